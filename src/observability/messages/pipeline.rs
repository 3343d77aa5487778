// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline execution.
//!
//! This module contains message types for logging events related to:
//! * Pipeline lifecycle (start, completion, failure)
//! * Prompt expansion
//! * Artifact persistence and memory records

use crate::observability::messages::{error_chain, StructuredLog};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;
use tracing::Span;

/// Pipeline run accepted a prompt.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_atelier::observability::messages::pipeline::PipelineStarted;
///
/// let msg = PipelineStarted {
///     prompt: "glowing dragon",
///     user_id: "super-user",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PipelineStarted<'a> {
    pub prompt: &'a str,
    pub user_id: &'a str,
}

impl Display for PipelineStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Processing prompt: {}", self.prompt)
    }
}

impl StructuredLog for PipelineStarted<'_> {
    fn log(&self) {
        tracing::info!(user_id = self.user_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline",
            span_name = name,
            user_id = self.user_id,
            prompt_len = self.prompt.len(),
        )
    }
}

/// Prompt expanded by the language model.
///
/// # Log Level
/// `info!`
pub struct PromptExpanded<'a> {
    pub model: &'a str,
    pub expanded_prompt: &'a str,
}

impl Display for PromptExpanded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Expanded prompt: {}", self.expanded_prompt)
    }
}

impl StructuredLog for PromptExpanded<'_> {
    fn log(&self) {
        tracing::info!(model = self.model, "{}", self);
    }
}

/// Artifact bytes written to disk.
///
/// # Log Level
/// `info!`
pub struct ArtifactSaved<'a> {
    pub kind: &'a str,
    pub path: &'a Path,
    pub size: usize,
}

impl Display for ArtifactSaved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} saved: {} ({} bytes)",
            self.kind,
            self.path.display(),
            self.size
        )
    }
}

impl StructuredLog for ArtifactSaved<'_> {
    fn log(&self) {
        tracing::info!(
            kind = self.kind,
            path = %self.path.display(),
            size = self.size,
            "{}", self
        );
    }
}

/// Memory record inserted for a completed run.
///
/// # Log Level
/// `debug!`
pub struct MemoryRecorded<'a> {
    pub record_id: &'a str,
}

impl Display for MemoryRecorded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Memory record {} stored", self.record_id)
    }
}

impl StructuredLog for MemoryRecorded<'_> {
    fn log(&self) {
        tracing::debug!(record_id = self.record_id, "{}", self);
    }
}

/// Pipeline run finished successfully.
///
/// # Log Level
/// `info!`
pub struct PipelineCompleted {
    pub duration: Duration,
}

impl Display for PipelineCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Pipeline completed in {:?}", self.duration)
    }
}

impl StructuredLog for PipelineCompleted {
    fn log(&self) {
        tracing::info!(duration_ms = self.duration.as_millis() as u64, "{}", self);
    }
}

/// Pipeline run aborted.
///
/// The full error chain is logged; the caller only sees the top-level message.
///
/// # Log Level
/// `error!`
pub struct PipelineFailed<'a> {
    pub stage: &'a str,
    pub error: &'a dyn Error,
}

impl Display for PipelineFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Pipeline error at {}: {}", self.stage, self.error)
    }
}

impl StructuredLog for PipelineFailed<'_> {
    fn log(&self) {
        tracing::error!(
            stage = self.stage,
            chain = %error_chain(self.error),
            "{}", self
        );
    }
}

/// A user's submitted configuration was replaced by the pinned pipeline apps.
///
/// # Log Level
/// `info!`
pub struct UserConfigCorrected<'a> {
    pub user_id: &'a str,
    pub app_ids: &'a [String],
}

impl Display for UserConfigCorrected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Corrected config for user '{}': {:?}",
            self.user_id, self.app_ids
        )
    }
}

impl StructuredLog for UserConfigCorrected<'_> {
    fn log(&self) {
        tracing::info!(user_id = self.user_id, "{}", self);
    }
}
