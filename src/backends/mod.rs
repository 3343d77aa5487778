// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Collaborator backends for the pipeline.
//!
//! ## Ollama Backend
//! [`ollama::OllamaClient`] expands prompts through a local Ollama server's
//! chat API. It implements [`crate::traits::LanguageModel`] and is built from
//! the `language_model` configuration section.
//!
//! ## Stub Backend (Test-Only)
//! Testing utilities (only available in test builds):
//! - **StubLanguageModel**: Fixed expansion text
//! - **FailingLanguageModel**: Expansion always fails
//! - **StubConnector / StubChannel**: In-memory channels that count how many
//!   are live, for registry and reconnect tests

pub mod ollama;
#[cfg(test)]
pub mod stub;

pub use ollama::OllamaClient;
