// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Problems found while validating a loaded configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A pipeline stage names an application that has no entry in the address table
    UnknownPipelineApp {
        /// Which pipeline slot references the application
        role: &'static str,
        /// The application identifier that couldn't be resolved
        app_id: String,
    },
    /// Both pipeline stages point at the same application
    DuplicatePipelineApp {
        /// The identifier used twice
        app_id: String,
    },
    /// The retry policy would never attempt a fetch
    ZeroRetryAttempts,
    /// The registry scheme is neither `http` nor `https`
    UnsupportedScheme {
        /// The configured scheme
        scheme: String,
    },
    /// No language model name was configured
    EmptyModelName,
    /// Sampling temperature outside of 0.0..=2.0
    TemperatureOutOfRange {
        /// The configured temperature
        temperature: f64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownPipelineApp { role, app_id } => {
                write!(
                    f,
                    "Pipeline {} application '{}' has no entry in registry.nodes",
                    role, app_id
                )
            }
            ValidationError::DuplicatePipelineApp { app_id } => {
                write!(
                    f,
                    "Application '{}' is used for both text-to-image and image-to-3D",
                    app_id
                )
            }
            ValidationError::ZeroRetryAttempts => {
                write!(f, "registry.max_attempts must be at least 1")
            }
            ValidationError::UnsupportedScheme { scheme } => {
                write!(
                    f,
                    "Unsupported registry scheme '{}', expected 'http' or 'https'",
                    scheme
                )
            }
            ValidationError::EmptyModelName => write!(f, "language_model.model must not be empty"),
            ValidationError::TemperatureOutOfRange { temperature } => {
                write!(
                    f,
                    "language_model.temperature {} is outside of 0.0..=2.0",
                    temperature
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading configuration or resolving configured values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`crate::config::Config`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// One or more validation rules failed.
    #[error("Configuration validation failed:\n{}", join_lines(.0))]
    Invalid(Vec<ValidationError>),

    /// An application identifier has no entry in the address table.
    #[error("Unknown app ID: {0}")]
    UnknownApplication(String),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
