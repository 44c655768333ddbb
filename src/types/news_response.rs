use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::NewsArticle;

/// Response body for `GET /get_news`.
///
/// The backend either reports an application error as `{"error": ...}` or
/// returns the headlines as a bare array.  Any object with an `error` key is
/// an error; a non-string value is kept as its JSON text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NewsResponse {
    /// Application-level error, rendered as plain text.
    Error {
        /// The backend's error message.
        error: String,
    },
    /// The current headlines.
    Articles(Vec<NewsArticle>),
}

impl NewsResponse {
    /// Returns the application error, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            NewsResponse::Error { error } => Some(error),
            NewsResponse::Articles(_) => None,
        }
    }

    /// Returns the articles, if any.
    pub fn articles(&self) -> Option<&[NewsArticle]> {
        match self {
            NewsResponse::Error { .. } => None,
            NewsResponse::Articles(articles) => Some(articles),
        }
    }
}

impl<'de> Deserialize<'de> for NewsResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(mut fields) if fields.contains_key("error") => {
                let error = match fields.remove("error") {
                    Some(Value::String(error)) => error,
                    Some(other) => other.to_string(),
                    None => String::new(),
                };
                Ok(NewsResponse::Error { error })
            }
            Value::Array(items) => serde_json::from_value(Value::Array(items))
                .map(NewsResponse::Articles)
                .map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "expected an error object or an array of articles, found {other}"
            ))),
        }
    }
}

impl From<Vec<NewsArticle>> for NewsResponse {
    fn from(articles: Vec<NewsArticle>) -> Self {
        NewsResponse::Articles(articles)
    }
}
