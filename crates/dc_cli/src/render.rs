use crossterm::style::{Attribute, Color, ContentStyle, StyledContent};
use dc_core::{PostEntry, PostStorage, Result, SectionStatus, FRONTPAGE};
use std::io::{self, Write};

const TEASER_WIDTH: usize = 160;

/// Navigation bar title: bold, near-white text unless a style is given.
pub struct NavigatorTitle<'a> {
    text: &'a str,
    style_override: Option<ContentStyle>,
}

impl<'a> NavigatorTitle<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            style_override: None,
        }
    }

    pub fn with_style(mut self, style: ContentStyle) -> Self {
        self.style_override = Some(style);
        self
    }

    fn default_style() -> ContentStyle {
        let mut style = ContentStyle::new();
        style.foreground_color = Some(Color::Rgb { r: 248, g: 248, b: 248 });
        style.attributes.set(Attribute::Bold);
        style
    }

    pub fn render(&self) -> StyledContent<&'a str> {
        self.style_override
            .unwrap_or_else(Self::default_style)
            .apply(self.text)
    }
}

/// Human title for a section key.
pub fn section_title(section: &str) -> String {
    if section == FRONTPAGE {
        return "The Chronicle".to_string();
    }
    let mut chars = section.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn write_section<W: Write>(
    out: &mut W,
    section: &str,
    status: Option<&SectionStatus>,
    entries: &[PostEntry],
    limit: usize,
) -> io::Result<()> {
    let title = section_title(section);
    writeln!(out, "{}", NavigatorTitle::new(&title).render())?;

    match status {
        Some(SectionStatus::Loading) => writeln!(out, "  Loading…")?,
        Some(SectionStatus::Failed { reason }) => {
            writeln!(out, "  ⚠️  Could not load {}: {}", section, reason)?
        }
        None if entries.is_empty() => writeln!(out, "  Not loaded yet")?,
        _ => {}
    }

    for entry in entries.iter().take(limit) {
        let post = &entry.post;
        writeln!(
            out,
            "{} {} [{}]",
            post.published.format("%Y-%m-%d %H:%M"),
            post.title,
            entry.id
        )?;

        let mut byline = Vec::new();
        if !post.authors.is_empty() {
            byline.push(format!("by {}", post.authors.join(", ")));
        }
        let tags: Vec<&str> = post.visible_tags().map(|t| t.name.as_str()).collect();
        if !tags.is_empty() {
            byline.push(tags.join(", "));
        }
        if !byline.is_empty() {
            writeln!(out, "    {}", byline.join(" · "))?;
        }
        if !post.teaser.is_empty() {
            writeln!(out, "    {}", truncate(&post.teaser, TEASER_WIDTH))?;
        }
    }

    if entries.len() > limit {
        writeln!(out, "  … {} more", entries.len() - limit)?;
    }
    Ok(())
}

/// Prints the section selected as the current tab.
pub async fn print_current_tab(storage: &dyn PostStorage, limit: usize) -> Result<()> {
    let section = storage.tab().await?;
    let status = storage.section_status(&section).await?;
    let entries = storage.posts_for_section(&section).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_section(&mut out, &section, status.as_ref(), &entries, limit)?;
    writeln!(out)?;
    Ok(())
}
