// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The prompt → image → 3D pipeline.
//!
//! [`PipelineExecutor::execute`] expands a prompt with the configured
//! [`crate::traits::LanguageModel`], sends it to the text-to-image
//! application, sends the resulting image to the image-to-3D application,
//! writes both artifacts to disk and records the run in the memory store.

mod artifacts;
mod executor;
mod payload;
mod result;


pub use artifacts::{ArtifactKind, ArtifactWriter};
pub use executor::{PipelineExecutor, PipelineSettings};
pub use payload::{encode, result_bytes};
pub use result::PipelineResult;
