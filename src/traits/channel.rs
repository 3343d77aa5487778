// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::RemoteError;
use crate::registry::AppEndpoints;

/// A live, persistent channel to one remote application.
///
/// The registry holds at most one per application and never issues two
/// exchanges on the same channel concurrently.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Send a request document, returning the handler id to await
    async fn execute(&self, request: &Value, uid: &str) -> Result<String, RemoteError>;

    /// Wait for the response to a previously executed request
    async fn get_response(&self, handler: &str) -> Result<Value, RemoteError>;

    /// Close the channel. Calling it on a closed channel does nothing.
    async fn disconnect(&self);

    fn is_open(&self) -> bool;

    /// Absolute URL for a resource id referenced in a response
    fn resource_url(&self, reid: &str) -> String;
}

/// Opens channels for the registry.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, endpoints: &AppEndpoints) -> Result<Box<dyn Channel>, RemoteError>;
}
