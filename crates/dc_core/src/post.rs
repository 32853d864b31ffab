use chrono::DateTime;

use crate::raw::{RawArticle, RawMedia, RawTag};
use crate::text::{extract_html_text, unescape};
use crate::types::{Media, Post, Tag};
use crate::{Error, Result};

const NEWSLETTER_TAG: &str = "newsletter";

/// Substrings marking a tag as editorial bookkeeping rather than something
/// readers should see. Matched case-insensitively anywhere in the name.
const INTERNAL_TAG_PATTERNS: [&str; 5] = ["top", "newsletter", "hot", "homepage", "columnist"];

pub fn clean_media(m: &RawMedia) -> Media {
    Media {
        caption: extract_html_text(&unescape(&m.caption)),
        authors: m.authors.iter().map(|a| unescape(a)).collect(),
        thumbnail_url: unescape(&m.thumbnail_url),
        preview_url: unescape(&m.preview_url),
        original_url: unescape(&m.original_url),
    }
}

pub fn clean_tag(t: &RawTag) -> Tag {
    Tag {
        name: unescape(&t.name),
    }
}

/// Normalizes one API article into a display-ready post.
pub fn raw_data_to_post(a: &RawArticle) -> Result<Post> {
    let published = DateTime::from_timestamp(a.published, 0).ok_or_else(|| Error::MalformedArticle {
        id: a.uid.to_string(),
        reason: format!("published timestamp {} is out of range", a.published),
    })?;

    Ok(Post {
        title: unescape(&a.headline),
        body: unescape(&a.copy),
        teaser: extract_html_text(&unescape(&a.abstract_html)),
        published,
        authors: a.authors.iter().map(|author| unescape(author)).collect(),
        images: a.media.iter().map(clean_media).collect(),
        tags: a.tags.iter().map(clean_tag).collect(),
        url: unescape(&a.url),
    })
}

/// Moves posts tagged `newsletter` to the front, keeping the relative order
/// inside both groups.
pub fn frontpage_sort<T, I>(posts: I) -> Vec<T>
where
    T: AsRef<Post>,
    I: IntoIterator<Item = T>,
{
    let (mut top, bottom): (Vec<T>, Vec<T>) = posts
        .into_iter()
        .partition(|p| p.as_ref().has_tag(NEWSLETTER_TAG));
    top.extend(bottom);
    top
}

pub fn is_internal_tag(tag_name: &str) -> bool {
    let name = tag_name.to_lowercase();
    INTERNAL_TAG_PATTERNS.iter().any(|pattern| name.contains(pattern))
}
