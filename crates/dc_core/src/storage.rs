use async_trait::async_trait;
use indexmap::IndexMap;

use crate::types::{Post, PostEntry, PostId, SectionStatus};
use crate::Result;

/// Shared state read by the front end and written by fetch actions.
#[async_trait]
pub trait PostStorage: Send + Sync {
    /// Adds posts to the shared mapping, replacing any stored under the same id.
    async fn merge_posts(&self, posts: IndexMap<PostId, Post>) -> Result<()>;

    /// Replaces the id list of a section.
    async fn set_section_ids(&self, section: &str, ids: Vec<PostId>) -> Result<()>;

    async fn set_section_status(&self, section: &str, status: SectionStatus) -> Result<()>;

    async fn get_post(&self, id: PostId) -> Result<Option<Post>>;

    async fn section_ids(&self, section: &str) -> Result<Option<Vec<PostId>>>;

    async fn section_status(&self, section: &str) -> Result<Option<SectionStatus>>;

    /// Posts of a section in display order. Ids with no stored post are skipped.
    async fn posts_for_section(&self, section: &str) -> Result<Vec<PostEntry>>;

    async fn post_count(&self) -> Result<usize>;

    async fn top_level_sections(&self) -> Result<Vec<String>>;

    async fn set_top_level_sections(&self, sections: Vec<String>) -> Result<()>;

    /// Currently selected tab.
    async fn tab(&self) -> Result<String>;

    async fn select_tab(&self, tab: &str) -> Result<()>;
}
