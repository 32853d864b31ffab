pub mod error;
pub mod post;
pub mod raw;
pub mod storage;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use post::{clean_media, clean_tag, frontpage_sort, is_internal_tag, raw_data_to_post};
pub use raw::{RawArticle, RawMedia, RawTag};
pub use storage::PostStorage;
pub use text::{extract_html_text, unescape};
pub use types::{FRONTPAGE, Media, Post, PostEntry, PostId, SectionStatus, Tag};

pub mod prelude {
    pub use super::storage::PostStorage;
    pub use super::types::{Post, PostEntry, PostId, SectionStatus};
    pub use super::{Error, Result};
}
