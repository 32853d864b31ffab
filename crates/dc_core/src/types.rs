use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::post::is_internal_tag;

/// Section name of the root listing.
pub const FRONTPAGE: &str = "frontpage";

/// Numeric article id assigned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(PostId)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub body: String,
    pub teaser: String,
    pub published: DateTime<Utc>,
    pub authors: Vec<String>,
    pub images: Vec<Media>,
    pub tags: Vec<Tag>,
    pub url: String,
}

impl Post {
    /// Exact, case-sensitive tag lookup.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Tags meant for readers, with editorial tags filtered out.
    pub fn visible_tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter().filter(|t| !is_internal_tag(&t.name))
    }
}

impl AsRef<Post> for Post {
    fn as_ref(&self) -> &Post {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub caption: String,
    pub authors: Vec<String>,
    pub thumbnail_url: String,
    pub preview_url: String,
    pub original_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// A post together with the id it is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostEntry {
    pub id: PostId,
    pub post: Post,
}

impl AsRef<Post> for PostEntry {
    fn as_ref(&self) -> &Post {
        &self.post
    }
}

/// Load state of a section, as last reported by a fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SectionStatus {
    Loading,
    Loaded {
        count: usize,
        skipped: usize,
        at: DateTime<Utc>,
    },
    Failed {
        reason: String,
    },
}

impl SectionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SectionStatus::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SectionStatus::Failed { .. })
    }
}
