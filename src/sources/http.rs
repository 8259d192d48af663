//! Content service over HTTP: `GET <base_url>/pages/<slug>/widgets`.
//!
//! Uses the blocking reqwest client; callers inside an async runtime should
//! run [`DescriptorSource::fetch`] on a blocking task.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::model::WidgetDescriptor;
use crate::sources::{DescriptorSource, SourceError, parse_page_payload, validate_slug};

pub struct HttpSource {
    base_url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(concat!("storefront-widgets/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn page_url(&self, page: &str) -> String {
        format!(
            "{}/pages/{}/widgets",
            self.base_url,
            urlencoding::encode(page)
        )
    }
}

impl DescriptorSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self, page: &str) -> Result<Vec<WidgetDescriptor>, SourceError> {
        validate_slug(page)?;
        let url = self.page_url(page);
        let resp = self.client.get(&url).send()?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::PageNotFound(page.to_string()));
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url,
            });
        }
        // Decode separately so a bad body is a JSON error, not a transport one.
        let body = resp.bytes()?;
        let payload: Value = serde_json::from_slice(&body)?;
        let descriptors = parse_page_payload(&payload)?;
        tracing::debug!("http source: loaded {} widgets from {url}", descriptors.len());
        Ok(descriptors)
    }
}
