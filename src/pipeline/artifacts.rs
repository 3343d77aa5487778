// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::Utc;
use std::path::{Path, PathBuf};

use crate::errors::PipelineError;
use crate::observability::messages::{pipeline::ArtifactSaved, StructuredLog};

/// What a pipeline stage produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Image,
    Model,
}

impl ArtifactKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Image => "output",
            ArtifactKind::Model => "model",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Image => "png",
            ArtifactKind::Model => "glb",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Image => "Image",
            ArtifactKind::Model => "3D model",
        }
    }

    /// Content type served for an artifact file name, by extension
    pub fn content_type_for(name: &str) -> &'static str {
        match Path::new(name).extension().and_then(|ext| ext.to_str()) {
            Some("png") => "image/png",
            Some("glb") => "model/gltf-binary",
            _ => "application/octet-stream",
        }
    }
}

/// Writes artifacts as `<prefix>_<unix millis>.<ext>` under one directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn file_name(kind: ArtifactKind, timestamp_millis: i64) -> String {
        format!("{}_{}.{}", kind.prefix(), timestamp_millis, kind.extension())
    }

    /// Write `bytes`, returning the path written
    pub async fn write(&self, kind: ArtifactKind, bytes: &[u8]) -> Result<PathBuf, PipelineError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| PipelineError::Artifact {
                path: self.output_dir.clone(),
                source,
            })?;

        let path = self
            .output_dir
            .join(Self::file_name(kind, Utc::now().timestamp_millis()));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| PipelineError::Artifact {
                path: path.clone(),
                source,
            })?;

        ArtifactSaved {
            kind: kind.label(),
            path: &path,
            size: bytes.len(),
        }
        .log();

        Ok(path)
    }
}
