use dc_core::{Error, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::envelope::{parse_section, SectionBatch};
use crate::section::Section;

pub const DEFAULT_BASE_URL: &str = "http://www.dukechronicle.com/";
pub const DEFAULT_USER_AGENT: &str = "chronicle/0.1 (Rust)";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: Url,
    pub user_agent: String,
    /// No timeout when unset.
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl FetchConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!("{} cannot be used as a base URL", base_url)));
        }
        self.base_url = url;
        Ok(self)
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP access to the listing endpoints.
#[derive(Debug, Clone)]
pub struct ChronicleClient {
    client: Client,
    config: FetchConfig,
}

impl ChronicleClient {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn section_url(&self, section: &Section) -> Result<Url> {
        section.url(&self.config.base_url)
    }

    pub async fn fetch_section(&self, section: &Section) -> Result<SectionBatch> {
        let url = self.section_url(section)?;
        debug!("GET {}", url);

        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        parse_section(&bytes)
    }
}
