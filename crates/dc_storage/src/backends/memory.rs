use async_trait::async_trait;
use dc_core::{frontpage_sort, Error, Post, PostEntry, PostId, PostStorage, Result, SectionStatus, FRONTPAGE};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::StoreConfig;

/// Sections are keyed by name, so a blank one cannot be written.
fn section_key(section: &str) -> Result<&str> {
    if section.trim().is_empty() {
        return Err(Error::Storage("section name cannot be empty".to_string()));
    }
    Ok(section)
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: HashMap<PostId, Post>,
    section_ids: HashMap<String, Vec<PostId>>,
    section_status: HashMap<String, SectionStatus>,
    top_level_sections: Vec<String>,
    tab: String,
}

impl MemoryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            top_level_sections: config.top_level_sections,
            tab: config.initial_tab,
            ..Default::default()
        }
    }

    pub fn merge_posts(&mut self, posts: IndexMap<PostId, Post>) {
        debug!("Merging {} posts into {} stored", posts.len(), self.posts.len());
        self.posts.extend(posts);
    }

    pub fn set_section_ids(&mut self, section: &str, ids: Vec<PostId>) {
        self.section_ids.insert(section.to_string(), ids);
    }

    pub fn posts_for_section(&self, section: &str) -> Vec<PostEntry> {
        let entries = self
            .section_ids
            .get(section)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| {
                        self.posts.get(id).map(|post| PostEntry {
                            id: *id,
                            post: post.clone(),
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        if section == FRONTPAGE {
            frontpage_sort(entries)
        } else {
            entries
        }
    }
}

/// Process-local state store shared behind an `Arc`.
#[derive(Clone)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(MemoryStore::new(config))),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStorage for MemoryStorage {
    async fn merge_posts(&self, posts: IndexMap<PostId, Post>) -> Result<()> {
        let mut store = self.store.write().await;
        store.merge_posts(posts);
        Ok(())
    }

    async fn set_section_ids(&self, section: &str, ids: Vec<PostId>) -> Result<()> {
        let section = section_key(section)?;
        let mut store = self.store.write().await;
        store.set_section_ids(section, ids);
        Ok(())
    }

    async fn set_section_status(&self, section: &str, status: SectionStatus) -> Result<()> {
        let section = section_key(section)?;
        let mut store = self.store.write().await;
        store.section_status.insert(section.to_string(), status);
        Ok(())
    }

    async fn get_post(&self, id: PostId) -> Result<Option<Post>> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn section_ids(&self, section: &str) -> Result<Option<Vec<PostId>>> {
        let store = self.store.read().await;
        Ok(store.section_ids.get(section).cloned())
    }

    async fn section_status(&self, section: &str) -> Result<Option<SectionStatus>> {
        let store = self.store.read().await;
        Ok(store.section_status.get(section).cloned())
    }

    async fn posts_for_section(&self, section: &str) -> Result<Vec<PostEntry>> {
        let store = self.store.read().await;
        Ok(store.posts_for_section(section))
    }

    async fn post_count(&self) -> Result<usize> {
        let store = self.store.read().await;
        Ok(store.posts.len())
    }

    async fn top_level_sections(&self) -> Result<Vec<String>> {
        let store = self.store.read().await;
        Ok(store.top_level_sections.clone())
    }

    async fn set_top_level_sections(&self, sections: Vec<String>) -> Result<()> {
        let mut store = self.store.write().await;
        store.top_level_sections = sections;
        Ok(())
    }

    async fn tab(&self) -> Result<String> {
        let store = self.store.read().await;
        Ok(store.tab.clone())
    }

    async fn select_tab(&self, tab: &str) -> Result<()> {
        let tab = section_key(tab)?;
        let mut store = self.store.write().await;
        store.tab = tab.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dc_core::Tag;

    fn post(title: &str, tags: &[&str]) -> Post {
        Post {
            title: title.to_string(),
            body: "Body".to_string(),
            teaser: "Teaser".to_string(),
            published: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
            authors: vec!["Staff".to_string()],
            images: vec![],
            tags: tags.iter().map(|t| Tag { name: t.to_string() }).collect(),
            url: format!("http://www.dukechronicle.com/{}", title),
        }
    }

    fn batch(items: &[(u64, Post)]) -> IndexMap<PostId, Post> {
        items.iter().map(|(id, p)| (PostId(*id), p.clone())).collect()
    }

    #[tokio::test]
    async fn test_merge_posts_is_additive() {
        let storage = MemoryStorage::new();
        storage.merge_posts(batch(&[(1, post("one", &[])), (2, post("two", &[]))])).await.unwrap();
        storage.merge_posts(batch(&[(3, post("three", &[]))])).await.unwrap();

        assert_eq!(storage.post_count().await.unwrap(), 3);
        assert_eq!(storage.get_post(PostId(1)).await.unwrap().unwrap().title, "one");
        assert!(storage.get_post(PostId(4)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_merge_posts_overwrites_same_id() {
        let storage = MemoryStorage::new();
        storage.merge_posts(batch(&[(1, post("old", &[]))])).await.unwrap();
        storage.merge_posts(batch(&[(1, post("new", &[]))])).await.unwrap();

        assert_eq!(storage.post_count().await.unwrap(), 1);
        assert_eq!(storage.get_post(PostId(1)).await.unwrap().unwrap().title, "new");
    }

    #[tokio::test]
    async fn test_set_section_ids_replaces() {
        let storage = MemoryStorage::new();
        storage.set_section_ids("sports", vec![PostId(1), PostId(2)]).await.unwrap();
        storage.set_section_ids("news", vec![PostId(9)]).await.unwrap();
        storage.set_section_ids("sports", vec![PostId(3)]).await.unwrap();

        assert_eq!(storage.section_ids("sports").await.unwrap(), Some(vec![PostId(3)]));
        assert_eq!(storage.section_ids("news").await.unwrap(), Some(vec![PostId(9)]));
        assert_eq!(storage.section_ids("opinion").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_posts_for_section() {
        let storage = MemoryStorage::new();
        storage
            .merge_posts(batch(&[
                (1, post("a", &[])),
                (2, post("b", &["newsletter"])),
                (3, post("c", &[])),
            ]))
            .await
            .unwrap();
        storage.set_section_ids("sports", vec![PostId(1), PostId(2), PostId(99)]).await.unwrap();
        storage.set_section_ids(FRONTPAGE, vec![PostId(1), PostId(3), PostId(2)]).await.unwrap();

        let sports: Vec<PostId> = storage.posts_for_section("sports").await.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(sports, vec![PostId(1), PostId(2)]);

        let front: Vec<PostId> = storage.posts_for_section(FRONTPAGE).await.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(front, vec![PostId(2), PostId(1), PostId(3)]);

        assert!(storage.posts_for_section("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_section_status() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.section_status("news").await.unwrap(), None);

        storage.set_section_status("news", SectionStatus::Loading).await.unwrap();
        assert!(storage.section_status("news").await.unwrap().unwrap().is_loading());

        storage
            .set_section_status("news", SectionStatus::Failed { reason: "boom".to_string() })
            .await
            .unwrap();
        assert!(storage.section_status("news").await.unwrap().unwrap().is_failed());
    }

    #[tokio::test]
    async fn test_views_and_top_level_sections() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.tab().await.unwrap(), FRONTPAGE);
        assert_eq!(storage.top_level_sections().await.unwrap().len(), 5);

        storage.select_tab("sports").await.unwrap();
        storage.set_top_level_sections(vec!["news".to_string()]).await.unwrap();
        assert_eq!(storage.tab().await.unwrap(), "sports");
        assert_eq!(storage.top_level_sections().await.unwrap(), vec!["news"]);

        let custom = MemoryStorage::with_config(StoreConfig::default().with_top_level_sections(vec![]));
        assert!(custom.top_level_sections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_section_is_rejected() {
        let storage = MemoryStorage::new();
        for name in ["", "  "] {
            assert!(matches!(
                storage.set_section_ids(name, vec![PostId(1)]).await,
                Err(Error::Storage(_))
            ));
            assert!(matches!(
                storage.set_section_status(name, SectionStatus::Loading).await,
                Err(Error::Storage(_))
            ));
            assert!(matches!(storage.select_tab(name).await, Err(Error::Storage(_))));
        }
        assert_eq!(storage.section_ids("").await.unwrap(), None);
        assert_eq!(storage.tab().await.unwrap(), FRONTPAGE);
    }

    #[tokio::test]
    async fn test_shared_between_clones() {
        let storage = MemoryStorage::new();
        let shared: Arc<dyn PostStorage> = Arc::new(storage.clone());
        shared.merge_posts(batch(&[(5, post("five", &[]))])).await.unwrap();
        assert!(storage.get_post(PostId(5)).await.unwrap().is_some());
    }
}
