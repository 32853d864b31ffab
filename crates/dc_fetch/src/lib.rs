pub mod actions;
pub mod cli;
pub mod client;
pub mod envelope;
pub mod logging;
pub mod section;

pub use actions::{FetchReport, PostActions};
pub use cli::{handle_command, FetchCommands};
pub use client::{ChronicleClient, FetchConfig, DEFAULT_BASE_URL};
pub use envelope::{parse_section, SectionBatch};
pub use logging::{init_logging, Logger};
pub use section::Section;

pub mod prelude {
    pub use super::{ChronicleClient, FetchConfig, PostActions, Section};
    pub use dc_core::{Error, Post, PostStorage, Result};
}
