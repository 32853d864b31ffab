//! Article records as the API sends them, before normalization.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::types::PostId;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawArticle {
    #[serde(deserialize_with = "post_id")]
    pub uid: PostId,
    pub headline: String,
    pub copy: String,
    #[serde(rename = "abstract")]
    pub abstract_html: String,
    #[serde(deserialize_with = "epoch_seconds")]
    pub published: i64,
    #[serde(rename = "getAuthor", default, deserialize_with = "values")]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "values")]
    pub media: Vec<RawMedia>,
    #[serde(default, deserialize_with = "values")]
    pub tags: Vec<RawTag>,
    #[serde(rename = "getURL")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMedia {
    pub caption: String,
    #[serde(rename = "getAuthor", default, deserialize_with = "values")]
    pub authors: Vec<String>,
    #[serde(rename = "urlThumbnail")]
    pub thumbnail_url: String,
    #[serde(rename = "urlPreview")]
    pub preview_url: String,
    #[serde(rename = "originalUrl")]
    pub original_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTag {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

fn epoch_seconds<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| de::Error::custom(format!("invalid timestamp {:?}: {}", s, e))),
    }
}

fn post_id<'de, D>(deserializer: D) -> std::result::Result<PostId, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => u64::try_from(n)
            .map(PostId)
            .map_err(|_| de::Error::custom(format!("negative uid {}", n))),
        NumberOrText::Text(s) => s
            .parse::<PostId>()
            .map_err(|e| de::Error::custom(format!("invalid uid {:?}: {}", s, e))),
    }
}

/// Collections arrive either as JSON arrays or as objects keyed by index;
/// both are flattened to their values in iteration order. `null` is empty.
fn values<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        other => {
            return Err(de::Error::custom(format!(
                "expected a list or a mapping, found {}",
                other
            )))
        }
    };

    items
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(de::Error::custom))
        .collect()
}
