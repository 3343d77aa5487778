// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the application registry.
//!
//! This module contains message types for logging events related to:
//! * Application address resolution and initialization
//! * Manifest and schema fetches, including retried attempts
//! * Remote execute calls

use crate::observability::messages::{error_chain, StructuredLog};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Registration of an application began.
///
/// # Log Level
/// `info!` - Important operational event
pub struct AppInitializing<'a> {
    pub app_id: &'a str,
    pub host: &'a str,
}

impl Display for AppInitializing<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Initializing app: {}", self.host)
    }
}

impl StructuredLog for AppInitializing<'_> {
    fn log(&self) {
        tracing::info!(app_id = self.app_id, host = self.host, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "app_initialization",
            span_name = name,
            app_id = self.app_id,
            host = self.host,
        )
    }
}

/// Manifest document fetched.
///
/// # Log Level
/// `info!`
pub struct ManifestLoaded<'a> {
    pub host: &'a str,
}

impl Display for ManifestLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] Manifest loaded", self.host)
    }
}

impl StructuredLog for ManifestLoaded<'_> {
    fn log(&self) {
        tracing::info!(host = self.host, "{}", self);
    }
}

/// Input and output schema documents fetched.
///
/// # Log Level
/// `info!`
pub struct SchemasLoaded<'a> {
    pub host: &'a str,
}

impl Display for SchemasLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] Schemas loaded", self.host)
    }
}

impl StructuredLog for SchemasLoaded<'_> {
    fn log(&self) {
        tracing::info!(host = self.host, "{}", self);
    }
}

/// A single metadata request failed.
///
/// # Log Level
/// `error!` - The request failed; the retry policy decides what happens next
pub struct FetchFailed<'a> {
    pub url: &'a str,
    pub status: Option<u16>,
    pub error: &'a dyn Error,
}

impl Display for FetchFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP error for {}: {}", self.url, status),
            None => write!(f, "Request failed for {}: {}", self.url, error_chain(self.error)),
        }
    }
}

impl StructuredLog for FetchFailed<'_> {
    fn log(&self) {
        tracing::error!(url = self.url, status = self.status, "{}", self);
    }
}

/// One initialization attempt failed.
///
/// # Log Level
/// `warn!` - Recoverable while attempts remain
pub struct AttemptFailed<'a> {
    pub host: &'a str,
    pub attempt: u32,
    pub max_attempts: u32,
    pub error: &'a dyn Error,
}

impl Display for AttemptFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] Attempt {}/{} failed: {}",
            self.host, self.attempt, self.max_attempts, self.error
        )
    }
}

impl StructuredLog for AttemptFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            host = self.host,
            attempt = self.attempt,
            max_attempts = self.max_attempts,
            "{}", self
        );
    }
}

/// Every initialization attempt failed.
///
/// # Log Level
/// `error!`
pub struct InitializationFailed<'a> {
    pub host: &'a str,
    pub attempts: u32,
}

impl Display for InitializationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] Initialization failed after {} attempts",
            self.host, self.attempts
        )
    }
}

impl StructuredLog for InitializationFailed<'_> {
    fn log(&self) {
        tracing::error!(host = self.host, attempts = self.attempts, "{}", self);
    }
}

/// Reconnect requested for an application.
///
/// # Log Level
/// `info!`
pub struct ReconnectRequested<'a> {
    pub app_id: &'a str,
    pub had_connection: bool,
}

impl Display for ReconnectRequested<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Reconnecting app '{}' (existing connection: {})",
            self.app_id, self.had_connection
        )
    }
}

impl StructuredLog for ReconnectRequested<'_> {
    fn log(&self) {
        tracing::info!(
            app_id = self.app_id,
            had_connection = self.had_connection,
            "{}", self
        );
    }
}

/// Execute call sent to an application.
///
/// # Log Level
/// `debug!`
pub struct ApplicationCallStarted<'a> {
    pub app_id: &'a str,
    pub url: &'a str,
}

impl Display for ApplicationCallStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] POST {}", self.app_id, self.url)
    }
}

impl StructuredLog for ApplicationCallStarted<'_> {
    fn log(&self) {
        tracing::debug!(app_id = self.app_id, url = self.url, "{}", self);
    }
}

/// Execute call answered.
///
/// # Log Level
/// `info!`
pub struct ApplicationCallCompleted<'a> {
    pub app_id: &'a str,
    pub duration: Duration,
}

impl Display for ApplicationCallCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] Execute completed in {:?}", self.app_id, self.duration)
    }
}

impl StructuredLog for ApplicationCallCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            app_id = self.app_id,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// A response didn't match the application's declared output schema.
///
/// The document is still returned to the caller unchanged.
///
/// # Log Level
/// `warn!`
pub struct ResponseSchemaMismatch<'a> {
    pub app_id: &'a str,
    pub violations: &'a [String],
}

impl Display for ResponseSchemaMismatch<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] Response does not match output schema: {}",
            self.app_id,
            self.violations.join("; ")
        )
    }
}

impl StructuredLog for ResponseSchemaMismatch<'_> {
    fn log(&self) {
        tracing::warn!(
            app_id = self.app_id,
            violation_count = self.violations.len(),
            "{}", self
        );
    }
}
