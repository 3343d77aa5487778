// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::time::Duration;

use crate::errors::{RegistryError, RegistryResult};
use crate::observability::messages::{registry::FetchFailed, StructuredLog};

/// HTTP client for an application's manifest and schema documents.
///
/// Requests time out after the configured duration and redirects are never
/// followed; a 3xx answer fails to decode and counts as a transport failure.
#[derive(Debug, Clone)]
pub struct MetadataFetcher {
    client: reqwest::Client,
}

impl MetadataFetcher {
    pub fn new(timeout: Duration) -> RegistryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(RegistryError::Client)?;

        Ok(Self { client })
    }

    /// GET a JSON document
    pub async fn fetch_json(&self, url: &str) -> RegistryResult<Value> {
        let result = async {
            self.client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await
        }
        .await;

        result.map_err(|source| {
            FetchFailed {
                url,
                status: source.status().map(|status| status.as_u16()),
                error: &source,
            }
            .log();

            RegistryError::Transport {
                url: url.to_string(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn fetches_json_documents() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/manifest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "text-to-image"}"#)
            .create_async()
            .await;

        let fetcher = MetadataFetcher::new(Duration::from_secs(5)).unwrap();
        let document = fetcher
            .fetch_json(&format!("{}/manifest", server.url()))
            .await
            .unwrap();

        assert_eq!(document, json!({"name": "text-to-image"}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/manifest")
            .with_status(503)
            .create_async()
            .await;

        let fetcher = MetadataFetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher
            .fetch_json(&format!("{}/manifest", server.url()))
            .await
            .unwrap_err();

        match err {
            RegistryError::Transport { ref source, .. } => {
                assert_eq!(source.status().map(|s| s.as_u16()), Some(503));
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn redirects_are_not_followed() {
        let mut server = mockito::Server::new_async().await;
        let _redirect = server
            .mock("GET", "/manifest")
            .with_status(302)
            .with_header("location", "/elsewhere")
            .create_async()
            .await;
        let elsewhere = server
            .mock("GET", "/elsewhere")
            .with_status(200)
            .with_body("{}")
            .expect(0)
            .create_async()
            .await;

        let fetcher = MetadataFetcher::new(Duration::from_secs(5)).unwrap();
        let result = fetcher.fetch_json(&format!("{}/manifest", server.url())).await;

        assert!(matches!(result, Err(RegistryError::Transport { .. })));
        elsewhere.assert_async().await;
    }
}
