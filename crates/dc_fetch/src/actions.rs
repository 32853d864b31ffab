use chrono::Utc;
use dc_core::{PostId, PostStorage, Result, SectionStatus};
use futures::future::join_all;
use std::sync::Arc;

use crate::client::ChronicleClient;
use crate::envelope::SectionBatch;
use crate::logging::Logger;
use crate::section::Section;

/// Outcome of a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchReport {
    pub section: String,
    pub ids: Vec<PostId>,
    pub skipped: usize,
}

/// Fetches listings and merges them into the shared store.
///
/// The store is only written after the whole response has been parsed, so a
/// failed fetch leaves posts and section ids as they were and marks the
/// section as failed.
pub struct PostActions {
    client: ChronicleClient,
    storage: Arc<dyn PostStorage>,
}

impl PostActions {
    pub fn new(client: ChronicleClient, storage: Arc<dyn PostStorage>) -> Self {
        Self { client, storage }
    }

    pub fn storage(&self) -> Arc<dyn PostStorage> {
        self.storage.clone()
    }

    pub async fn get_frontpage(&self) -> Result<FetchReport> {
        self.fetch(&Section::Frontpage).await
    }

    pub async fn get_section(&self, section: &str) -> Result<FetchReport> {
        let section: Section = section.parse()?;
        self.fetch(&section).await
    }

    /// Runs the fetches concurrently. Results come back in input order.
    pub async fn get_sections(&self, sections: &[Section]) -> Vec<(Section, Result<FetchReport>)> {
        let results = join_all(sections.iter().map(|section| self.fetch(section))).await;
        sections.iter().cloned().zip(results).collect()
    }

    pub async fn fetch(&self, section: &Section) -> Result<FetchReport> {
        let logger = Logger::new().with_prefix(format!("[{}]", section));
        let key = section.name();

        self.storage.set_section_status(key, SectionStatus::Loading).await?;
        logger.debug("Fetching listing");

        match self.client.fetch_section(section).await {
            Ok(batch) => self.apply(key, batch, &logger).await,
            Err(e) => {
                logger.error(&format!("Fetch failed: {}", e));
                // the fetch error is what the caller needs, even if recording it fails
                if let Err(status_err) = self
                    .storage
                    .set_section_status(key, SectionStatus::Failed { reason: e.to_string() })
                    .await
                {
                    logger.warn(&format!("Could not record failure: {}", status_err));
                }
                Err(e)
            }
        }
    }

    async fn apply(&self, key: &str, batch: SectionBatch, logger: &Logger) -> Result<FetchReport> {
        for e in &batch.skipped {
            logger.warn(&format!("Skipping article: {}", e));
        }

        let ids = batch.ids();
        let skipped = batch.skipped.len();

        self.storage.merge_posts(batch.posts).await?;
        self.storage.set_section_ids(key, ids.clone()).await?;
        self.storage
            .set_section_status(
                key,
                SectionStatus::Loaded {
                    count: ids.len(),
                    skipped,
                    at: Utc::now(),
                },
            )
            .await?;

        logger.info(&format!("Fetched {} posts ({} skipped)", ids.len(), skipped));

        Ok(FetchReport {
            section: key.to_string(),
            ids,
            skipped,
        })
    }
}
