//! Object storage for submission photos.
//!
//! Photos are uploaded under a millisecond-timestamp-prefixed key and
//! referenced afterwards only by their public URL.

pub mod http;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use axum::body::Bytes;
use chrono::{DateTime, Utc};

use crate::error::AdminError;

pub use http::HttpObjectStore;
pub use memory::MemoryObjectStore;

/// Upload target for binary objects.
#[async_trait]
pub trait ObjectStore: Send + Sync + fmt::Debug {
    /// Stores `bytes` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ObjectStorage`] if the upload is rejected or
    /// the backend is unreachable.
    async fn upload(&self, key: &str, content_type: &str, bytes: Bytes)
    -> Result<(), AdminError>;

    /// Public URL of an uploaded object.
    fn public_url(&self, key: &str) -> String;
}

/// Builds the storage key `{unix_millis}-{file name}`.
///
/// Anything outside `[A-Za-z0-9._-]` in the file name becomes `-`; an
/// empty name becomes `photo`.
#[must_use]
pub fn photo_key(now: DateTime<Utc>, file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let mut sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    if sanitized.trim_matches(['-', '.']).is_empty() {
        sanitized = "photo".to_string();
    }
    format!("{}-{sanitized}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::day;

    #[test]
    fn key_is_timestamp_prefixed() {
        let at = day(1);
        let key = photo_key(at, "first dance.JPG");
        assert_eq!(key, format!("{}-first-dance.JPG", at.timestamp_millis()));
    }

    #[test]
    fn key_strips_directories_and_empty_names() {
        let at = day(1);
        assert!(photo_key(at, "../../etc/passwd").ends_with("-passwd"));
        assert!(photo_key(at, "").ends_with("-photo"));
        assert!(photo_key(at, "café.png").ends_with("-caf-.png"));
    }
}
