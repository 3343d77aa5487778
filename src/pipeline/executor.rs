// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::json;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

use crate::config::PipelineConfig;
use crate::errors::PipelineError;
use crate::memory::{MemoryRecord, MemoryStore};
use crate::observability::messages::{pipeline::*, StructuredLog};
use crate::pipeline::payload::{encode, result_bytes};
use crate::pipeline::{ArtifactKind, ArtifactWriter, PipelineResult};
use crate::registry::ApplicationRegistry;
use crate::traits::LanguageModel;

/// Which applications to call, as whom, and where results go.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub text_to_image_app: String,
    pub image_to_3d_app: String,
    pub user_id: String,
    pub output_dir: PathBuf,
    pub database: PathBuf,
}

impl From<&PipelineConfig> for PipelineSettings {
    fn from(cfg: &PipelineConfig) -> Self {
        Self {
            text_to_image_app: cfg.text_to_image_app.clone(),
            image_to_3d_app: cfg.image_to_3d_app.clone(),
            user_id: cfg.user_id.clone(),
            output_dir: cfg.output_dir.clone(),
            database: cfg.database.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipelineStage {
    OpenMemory,
    Expand,
    TextToImage,
    SaveImage,
    ImageTo3d,
    SaveModel,
    Record,
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            PipelineStage::OpenMemory => "open_memory",
            PipelineStage::Expand => "expand_prompt",
            PipelineStage::TextToImage => "text_to_image",
            PipelineStage::SaveImage => "save_image",
            PipelineStage::ImageTo3d => "image_to_3d",
            PipelineStage::SaveModel => "save_model",
            PipelineStage::Record => "record_memory",
        };
        f.write_str(name)
    }
}

type StageResult<T> = Result<T, (PipelineStage, PipelineError)>;

fn at<E: Into<PipelineError>>(stage: PipelineStage) -> impl FnOnce(E) -> (PipelineStage, PipelineError) {
    move |error| (stage, error.into())
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Runs prompt → expanded prompt → image → 3D model.
///
/// Stages run strictly in order and the first failure stops the run. The
/// memory database is opened at the start of every run and closed when the
/// run ends, whatever its outcome.
pub struct PipelineExecutor {
    language_model: Arc<dyn LanguageModel>,
    registry: ApplicationRegistry,
    settings: PipelineSettings,
    artifacts: ArtifactWriter,
}

impl PipelineExecutor {
    pub fn new(
        language_model: Arc<dyn LanguageModel>,
        registry: ApplicationRegistry,
        settings: PipelineSettings,
    ) -> Self {
        let artifacts = ArtifactWriter::new(settings.output_dir.clone());
        Self {
            language_model,
            registry,
            settings,
            artifacts,
        }
    }

    pub fn registry(&self) -> &ApplicationRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ApplicationRegistry {
        &mut self.registry
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Run the pipeline for one prompt.
    ///
    /// Never fails: a stage failure is logged with its full error chain and
    /// returned as [`PipelineResult::Error`].
    pub async fn execute(&self, prompt: &str) -> PipelineResult {
        let message = PipelineStarted {
            prompt,
            user_id: &self.settings.user_id,
        };
        let span = message.span("pipeline");

        async {
            message.log();
            let started = Instant::now();

            match self.run(prompt).await {
                Ok(result) => {
                    PipelineCompleted {
                        duration: started.elapsed(),
                    }
                    .log();
                    result
                }
                Err((stage, error)) => {
                    let stage = stage.to_string();
                    PipelineFailed {
                        stage: &stage,
                        error: &error,
                    }
                    .log();
                    PipelineResult::error(error.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, prompt: &str) -> StageResult<PipelineResult> {
        let store = MemoryStore::open(&self.settings.database).map_err(at(PipelineStage::OpenMemory))?;
        let user_id = self.settings.user_id.as_str();

        let expanded_prompt = self
            .language_model
            .expand(prompt)
            .await
            .map_err(at(PipelineStage::Expand))?;
        PromptExpanded {
            model: self.language_model.name(),
            expanded_prompt: &expanded_prompt,
        }
        .log();

        let text_to_image = self.settings.text_to_image_app.as_str();
        let image_response = self
            .registry
            .call(text_to_image, &json!({ "prompt": expanded_prompt }), user_id)
            .await
            .map_err(at(PipelineStage::TextToImage))?;
        let image = result_bytes(text_to_image, &image_response).map_err(at(PipelineStage::TextToImage))?;
        let image_path = self
            .artifacts
            .write(ArtifactKind::Image, &image)
            .await
            .map_err(at(PipelineStage::SaveImage))?;

        let image_to_3d = self.settings.image_to_3d_app.as_str();
        let model_response = self
            .registry
            .call(image_to_3d, &json!({ "image": encode(&image) }), user_id)
            .await
            .map_err(at(PipelineStage::ImageTo3d))?;
        let model = result_bytes(image_to_3d, &model_response).map_err(at(PipelineStage::ImageTo3d))?;
        let model_path = self
            .artifacts
            .write(ArtifactKind::Model, &model)
            .await
            .map_err(at(PipelineStage::SaveModel))?;

        let record = MemoryRecord::new(
            user_id,
            prompt,
            expanded_prompt.as_str(),
            path_string(&image_path),
            path_string(&model_path),
        );
        store.insert(&record).await.map_err(at(PipelineStage::Record))?;
        MemoryRecorded {
            record_id: &record.id,
        }
        .log();

        Ok(PipelineResult::Success {
            expanded_prompt,
            image: record.image_path,
            model_3d: record.model3d_path,
        })
    }
}
