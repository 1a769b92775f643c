//! JSON payload written under each draft key.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted draft: the text plus the wall-clock time it was written.
///
/// Serialized as `{"content": "...", "timestamp": "<ISO 8601>"}`. The
/// timestamp is what the UI reports as "saved at".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A stored value that could not be decoded into a [`DraftRecord`].
///
/// Decoding is an explicit parse-and-validate step: anything in storage
/// that is not JSON of the right shape (including a bad timestamp) comes
/// back as this error and is handled as "no record found".
#[derive(Debug, Error)]
#[error("malformed draft record: {0}")]
pub struct RecordError(#[from] serde_json::Error);

impl DraftRecord {
    pub fn new(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self { content: content.into(), timestamp }
    }

    /// Decode a raw stored value.
    pub fn from_json(raw: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Encode for storage.
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }
}
