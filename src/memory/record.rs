// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Provenance of one completed pipeline run. Never updated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: String,
    pub user_id: String,
    pub prompt: String,
    pub expanded_prompt: String,
    pub image_path: String,
    pub model3d_path: String,
    pub timestamp: DateTime<Utc>,
}

impl MemoryRecord {
    /// New record with a fresh v4 id, stamped now
    pub fn new(
        user_id: impl Into<String>,
        prompt: impl Into<String>,
        expanded_prompt: impl Into<String>,
        image_path: impl Into<String>,
        model3d_path: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            prompt: prompt.into(),
            expanded_prompt: expanded_prompt.into(),
            image_path: image_path.into(),
            model3d_path: model3d_path.into(),
            timestamp: Utc::now(),
        }
    }
}
