//! Response body handling for section listings.
//!
//! The API answers with a JSON array whose first element carries an
//! `articles` object mapping article ids to raw article records.

use dc_core::{raw_data_to_post, Error, Post, PostId, RawArticle, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Normalized posts of one response, ordered by ascending id.
#[derive(Debug, Default)]
pub struct SectionBatch {
    pub posts: IndexMap<PostId, Post>,
    /// Articles that could not be normalized.
    pub skipped: Vec<Error>,
}

impl SectionBatch {
    pub fn ids(&self) -> Vec<PostId> {
        self.posts.keys().copied().collect()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Extracts the `articles` mapping, failing on any other shape.
pub fn parse_articles(body: &[u8]) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_slice(body)?;

    let first = match value {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        Value::Array(_) => return Err(Error::Envelope("response array is empty".to_string())),
        other => {
            return Err(Error::Envelope(format!(
                "expected an array, found {}",
                kind(&other)
            )))
        }
    };

    let mut listing = match first {
        Value::Object(listing) => listing,
        other => {
            return Err(Error::Envelope(format!(
                "expected an object as the first element, found {}",
                kind(&other)
            )))
        }
    };

    match listing.remove("articles") {
        Some(Value::Object(articles)) => Ok(articles),
        Some(other) => Err(Error::Envelope(format!(
            "`articles` should be an object, found {}",
            kind(&other)
        ))),
        None => Err(Error::Envelope("missing `articles` field".to_string())),
    }
}

/// Normalizes every article. Posts are keyed by their `uid` and sorted by it,
/// whatever order the response used; broken records are collected in
/// `skipped` instead of failing the batch.
pub fn normalize_articles(articles: Map<String, Value>) -> SectionBatch {
    let mut batch = SectionBatch::default();

    for (key, value) in articles {
        let normalized = serde_json::from_value::<RawArticle>(value)
            .map_err(|e| Error::MalformedArticle {
                id: key.clone(),
                reason: e.to_string(),
            })
            .and_then(|raw| raw_data_to_post(&raw).map(|post| (raw.uid, post)));

        match normalized {
            Ok((id, post)) => {
                batch.posts.insert(id, post);
            }
            Err(e) => batch.skipped.push(e),
        }
    }

    batch.posts.sort_keys();
    batch
}

pub fn parse_section(body: &[u8]) -> Result<SectionBatch> {
    Ok(normalize_articles(parse_articles(body)?))
}
