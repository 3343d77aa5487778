// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// Outcome of one pipeline run, serialized as the endpoint's JSON answer.
///
/// ```json
/// {"status": "success", "expanded_prompt": "...", "image": "output_1.png", "model_3d": "model_1.glb"}
/// {"status": "error", "message": "..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PipelineResult {
    Success {
        expanded_prompt: String,
        image: String,
        model_3d: String,
    },
    Error {
        message: String,
    },
}

impl PipelineResult {
    pub fn error(message: impl Into<String>) -> Self {
        PipelineResult::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineResult::Success { .. })
    }

    /// Pretty JSON, two-space indented
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            serde_json::json!({"status": "error", "message": e.to_string()}).to_string()
        })
    }
}
