// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::LanguageModelError;

/// Expands a short user prompt into a richer description.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn expand(&self, prompt: &str) -> Result<String, LanguageModelError>;

    /// Model name, for logging
    fn name(&self) -> &str;
}
