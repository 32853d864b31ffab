use dc_core::FRONTPAGE;

pub mod backends;

pub use backends::*;

/// Sections offered for navigation when none are configured.
pub const DEFAULT_TOP_LEVEL_SECTIONS: [&str; 5] = ["news", "sports", "opinion", "recess", "towerview"];

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub top_level_sections: Vec<String>,
    pub initial_tab: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            top_level_sections: DEFAULT_TOP_LEVEL_SECTIONS.iter().map(|s| s.to_string()).collect(),
            initial_tab: FRONTPAGE.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn with_top_level_sections(mut self, sections: Vec<String>) -> Self {
        self.top_level_sections = sections;
        self
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::StoreConfig;
    pub use dc_core::PostStorage;
}
