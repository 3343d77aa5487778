// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::registry::SchemaKind;

/// Every URL the registry needs for one application, derived from its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEndpoints {
    scheme: String,
    host: String,
}

impl AppEndpoints {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    pub fn manifest_url(&self) -> String {
        format!("{}/manifest", self.base_url())
    }

    pub fn schema_url(&self, kind: SchemaKind) -> String {
        format!("{}/schema?type={}", self.base_url(), kind.as_str())
    }

    pub fn execute_url(&self) -> String {
        format!("{}/execute", self.base_url())
    }

    /// WebSocket channel; `wss` when the application is served over `https`
    pub fn channel_url(&self) -> String {
        let ws_scheme = if self.scheme == "https" { "wss" } else { "ws" };
        format!("{}://{}/app", ws_scheme, self.host)
    }

    pub fn proxy_id(&self) -> String {
        format!("{}-proxy", self.host)
    }

    pub fn resource_template(&self) -> String {
        format!("{}/resource?reid={{reid}}", self.base_url())
    }
}
