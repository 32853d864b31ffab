use clap::Subcommand;
use dc_core::{Result, FRONTPAGE};

use crate::actions::PostActions;
use crate::section::Section;

#[derive(Subcommand, Debug, Clone)]
pub enum FetchCommands {
    /// Fetch the frontpage listing
    Frontpage,
    /// Fetch a named section (e.g. sports)
    Section {
        /// Section name as used in the site's URLs
        name: String,
    },
    /// Fetch the frontpage and every top-level section
    All,
    /// List top-level sections
    Sections,
}

/// Runs a fetch command and returns the sections that loaded.
pub async fn handle_command(command: FetchCommands, actions: &PostActions) -> Result<Vec<String>> {
    match command {
        FetchCommands::Frontpage => {
            let report = actions.get_frontpage().await?;
            Ok(vec![report.section])
        }
        FetchCommands::Section { name } => {
            let report = actions.get_section(&name).await?;
            Ok(vec![report.section])
        }
        FetchCommands::All => {
            let sections = all_sections(&actions.storage().top_level_sections().await?)?;
            let mut loaded = Vec::new();
            for (section, result) in actions.get_sections(&sections).await {
                match result {
                    Ok(report) => loaded.push(report.section),
                    Err(e) => eprintln!("Failed to fetch {}: {}", section, e),
                }
            }
            Ok(loaded)
        }
        FetchCommands::Sections => {
            println!("Available sections:");
            println!("  {}", FRONTPAGE);
            for name in actions.storage().top_level_sections().await? {
                println!("  {}", name);
            }
            Ok(Vec::new())
        }
    }
}

fn all_sections(top_level: &[String]) -> Result<Vec<Section>> {
    let mut sections = vec![Section::Frontpage];
    for name in top_level {
        let section: Section = name.parse()?;
        if !sections.contains(&section) {
            sections.push(section);
        }
    }
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sections() {
        let top_level = vec!["news".to_string(), "frontpage".to_string(), "news".to_string()];
        let sections = all_sections(&top_level).unwrap();
        assert_eq!(sections, vec![Section::Frontpage, Section::Named("news".to_string())]);

        assert!(all_sections(&["".to_string()]).is_err());
    }
}
