//! Descriptor sources: where a page's widget list comes from.
//!
//! A source resolves a page slug to an ordered list of descriptors. Both the
//! file and HTTP sources accept the same payload shape, either a bare array of
//! descriptor objects or an object with a `widgets` array.

pub mod file;
pub mod http;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::WidgetDescriptor;

pub use file::FileSource;
pub use http::HttpSource;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("slug pattern compiles"));

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid page slug {0:?} (expected lowercase letters, digits, '-' or '_')")]
    InvalidSlug(String),
    #[error("page {0:?} not found")]
    PageNotFound(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid descriptor payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid descriptor payload: {0}")]
    Payload(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },
}

impl SourceError {
    /// Whether retrying the same fetch could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Http(e) => e.is_timeout() || e.is_connect(),
            SourceError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Anything that can supply the descriptor list for a page.
pub trait DescriptorSource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    fn fetch(&self, page: &str) -> Result<Vec<WidgetDescriptor>, SourceError>;
}

/// Reject slugs that could escape a directory or a URL path segment.
pub fn validate_slug(page: &str) -> Result<(), SourceError> {
    if SLUG_RE.is_match(page) {
        Ok(())
    } else {
        Err(SourceError::InvalidSlug(page.to_string()))
    }
}

/// Turn a page payload into descriptors sorted by `order`.
///
/// Entries that are not JSON objects are skipped. The sort is stable, so
/// descriptors sharing an `order` keep their payload order.
pub fn parse_page_payload(payload: &Value) -> Result<Vec<WidgetDescriptor>, SourceError> {
    let entries = match payload {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("widgets") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => {
                return Err(SourceError::Payload("missing \"widgets\" array".into()));
            }
            Some(_) => return Err(SourceError::Payload("\"widgets\" is not an array".into())),
        },
        _ => {
            return Err(SourceError::Payload(
                "expected an array or an object with \"widgets\"".into(),
            ));
        }
    };

    let mut descriptors = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        match WidgetDescriptor::from_value(idx, entry) {
            Some(d) => descriptors.push(d),
            None => tracing::warn!("skipping widget entry {idx}: not an object"),
        }
    }
    descriptors.sort_by_key(|d| d.order);
    Ok(descriptors)
}
