// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

use super::{MemoryError, RegistryError};

/// Failures of the prompt-expansion collaborator
#[derive(Error, Debug)]
pub enum LanguageModelError {
    #[error("Failed to build language model client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Language model request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Language model returned no message content")]
    EmptyResponse,
}

/// Any failure that aborts a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    LanguageModel(#[from] LanguageModelError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Response from '{app_id}' has no usable 'result' field")]
    MissingResult { app_id: String },

    #[error("Response from '{app_id}' carried an undecodable result: {source}")]
    Decode {
        app_id: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("Failed to write artifact '{}': {source}", path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Errors raised while assembling a runtime from configuration
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    LanguageModel(#[from] LanguageModelError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
