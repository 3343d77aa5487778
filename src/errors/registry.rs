// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for application registration, metadata lookup and remote calls.

use thiserror::Error;

use super::{ConfigError, RemoteError};

#[derive(Error, Debug)]
pub enum RegistryError {
    /// Registration named an identifier the address table doesn't know.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// `call`/`exchange` on an identifier that was never registered.
    #[error("Unknown app ID: {0}")]
    UnknownApplication(String),

    /// Network or HTTP-status failure talking to an application.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Manifest or schema requested for an application that was never registered.
    #[error("No schemas found for app: {0}")]
    NotFound(String),

    /// Schema kind other than `input` or `output`.
    #[error("schema_type must be 'input' or 'output', got '{0}'")]
    InvalidArgument(String),

    /// The persistent channel failed to open or broke mid-exchange.
    #[error(transparent)]
    Connection(#[from] RemoteError),

    /// Building the HTTP client failed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl RegistryError {
    /// Whether an initialization attempt that failed this way should be retried
    pub fn is_retryable(&self) -> bool {
        matches!(self, RegistryError::Transport { .. } | RegistryError::Connection(_))
    }

    /// Whether this is a configuration problem (unknown identifier at registration)
    pub fn is_configuration(&self) -> bool {
        matches!(self, RegistryError::Configuration(_))
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
