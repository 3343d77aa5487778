// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::OllamaClient;
use crate::config::{effective_user_config, needs_correction, Config, UserConfig};
use crate::errors::BuildError;
use crate::observability::messages::{pipeline::UserConfigCorrected, StructuredLog};
use crate::pipeline::{PipelineExecutor, PipelineSettings};
use crate::registry::{ApplicationRegistry, RegistrySettings};
use crate::remote::WebSocketConnector;
use crate::traits::{Connector, LanguageModel};

/// Pipeline runtime builder - turns a validated configuration into a ready executor.
///
/// The builder resolves the effective configuration of the pipeline user
/// (see [`effective_user_config`]), registers the applications it names, and
/// wires the registry, language model and pipeline settings together.
///
/// # Examples
///
/// ```no_run
/// use the_atelier::config::{load_and_validate_config, RuntimeBuilder};
///
/// # async fn run() -> anyhow::Result<()> {
/// let config = load_and_validate_config("configs/atelier.yaml")?;
/// let executor = RuntimeBuilder::from_config(&config).await?;
///
/// let result = executor.execute("glowing dragon").await;
/// println!("{}", result.to_pretty_json());
/// # Ok(())
/// # }
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build with the production collaborators: Ollama and WebSocket channels.
    pub async fn from_config(cfg: &Config) -> Result<PipelineExecutor, BuildError> {
        let language_model = Arc::new(OllamaClient::new(&cfg.language_model)?);
        Self::with_collaborators(cfg, language_model, Arc::new(WebSocketConnector)).await
    }

    /// Build with explicit collaborators.
    ///
    /// Every submitted user configuration that differs from the pinned
    /// pipeline applications is logged as corrected. The registry is
    /// initialized with the pipeline user's effective application list.
    pub async fn with_collaborators(
        cfg: &Config,
        language_model: Arc<dyn LanguageModel>,
        connector: Arc<dyn Connector>,
    ) -> Result<PipelineExecutor, BuildError> {
        let mut users: Vec<(&String, &UserConfig)> = cfg.users.iter().collect();
        users.sort_by(|a, b| a.0.cmp(b.0));
        for (user_id, submitted) in users {
            if needs_correction(submitted, &cfg.pipeline) {
                UserConfigCorrected {
                    user_id,
                    app_ids: &effective_user_config(submitted, &cfg.pipeline).app_ids,
                }
                .log();
            }
        }

        let submitted = cfg
            .users
            .get(&cfg.pipeline.user_id)
            .cloned()
            .unwrap_or_else(|| UserConfig {
                app_ids: cfg.pipeline.app_ids(),
            });
        let effective = effective_user_config(&submitted, &cfg.pipeline);

        let registry = ApplicationRegistry::initialize(
            RegistrySettings::from(&cfg.registry),
            &effective.app_ids,
            connector,
        )
        .await?;

        Ok(PipelineExecutor::new(
            language_model,
            registry,
            PipelineSettings::from(&cfg.pipeline),
        ))
    }
}
