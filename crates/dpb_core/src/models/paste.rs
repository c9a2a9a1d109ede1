//! Paste documents and the JSON payloads exchanged with the store.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{UNKNOWN_MESSAGE, UNKNOWN_REASON};

/// Store timestamps keep the offset they were sent with.
pub type Timestamp = DateTime<FixedOffset>;

/// A stored paste as seen by a viewer. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteDocument {
    /// Opaque handle assigned by the store.
    pub key: String,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    /// `None` means the paste never expires.
    pub expire_at: Option<Timestamp>,
}

/// Body of `POST {base}/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddRequest {
    pub title: String,
    pub content: String,
    /// Lifetime in seconds; `0` means never expires.
    pub expiration: u64,
}

/// Success body of `POST {base}/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddResponse {
    pub key: String,
}

/// Success body of `GET {base}/query/{key}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub expire_at: Option<Timestamp>,
}

impl QueryResponse {
    /// Attach the lookup key to build a full [`PasteDocument`].
    pub fn into_document(self, key: impl Into<String>) -> PasteDocument {
        PasteDocument {
            key: key.into(),
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            expire_at: self.expire_at,
        }
    }
}

/// Error envelope returned by the store for non-2xx responses.
///
/// Parsing never fails: missing or mistyped fields fall back to defaults so
/// classification always has something to work with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: Option<i64>,
    pub reason: String,
    pub message: String,
}

impl ErrorBody {
    /// Read `code`, `reason` and `message` out of an arbitrary JSON value.
    ///
    /// `code` accepts a JSON integer or a numeric string. Empty or absent
    /// `reason`/`message` become [`UNKNOWN_REASON`]/[`UNKNOWN_MESSAGE`].
    pub fn from_value(value: &Value) -> Self {
        let code = value.get("code").and_then(|code| match code {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse::<i64>().ok(),
            _ => None,
        });
        Self {
            code,
            reason: non_empty_str(value, "reason").unwrap_or(UNKNOWN_REASON).to_string(),
            message: non_empty_str(value, "message")
                .unwrap_or(UNKNOWN_MESSAGE)
                .to_string(),
        }
    }
}

fn non_empty_str<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
