// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Submitted user configuration → effective user configuration.
//!
//! Users may submit any application list; the pipeline only ever talks to
//! the two applications pinned in [`PipelineConfig`], so the effective
//! configuration always carries those. Both functions are pure: they never
//! mutate their inputs and hold no state between calls.

use std::collections::HashMap;

use crate::config::{PipelineConfig, UserConfig};

/// Effective configuration for one user.
pub fn effective_user_config(submitted: &UserConfig, pipeline: &PipelineConfig) -> UserConfig {
    let pinned = pipeline.app_ids();
    if submitted.app_ids == pinned {
        return submitted.clone();
    }
    UserConfig { app_ids: pinned }
}

/// Effective configuration for every submitted user.
pub fn effective_user_configs(
    submitted: &HashMap<String, UserConfig>,
    pipeline: &PipelineConfig,
) -> HashMap<String, UserConfig> {
    submitted
        .iter()
        .map(|(user_id, config)| (user_id.clone(), effective_user_config(config, pipeline)))
        .collect()
}

/// Whether [`effective_user_config`] would change the submitted configuration.
pub fn needs_correction(submitted: &UserConfig, pipeline: &PipelineConfig) -> bool {
    submitted.app_ids != pipeline.app_ids()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::{IMAGE_TO_3D_APP_ID, TEXT_TO_IMAGE_APP_ID};

    #[test]
    fn wrong_app_ids_are_replaced() {
        let pipeline = PipelineConfig::default();
        let submitted = UserConfig {
            app_ids: vec!["stale-app".to_string()],
        };

        let effective = effective_user_config(&submitted, &pipeline);

        assert_eq!(effective.app_ids, vec![TEXT_TO_IMAGE_APP_ID, IMAGE_TO_3D_APP_ID]);
        assert!(needs_correction(&submitted, &pipeline));
        // input untouched
        assert_eq!(submitted.app_ids, vec!["stale-app"]);
    }

    #[test]
    fn correct_submission_is_unchanged() {
        let pipeline = PipelineConfig::default();
        let submitted = UserConfig {
            app_ids: pipeline.app_ids(),
        };

        assert_eq!(effective_user_config(&submitted, &pipeline), submitted);
        assert!(!needs_correction(&submitted, &pipeline));
    }

    #[test]
    fn every_user_gets_the_pinned_apps() {
        let pipeline = PipelineConfig::default();
        let submitted = HashMap::from([
            ("alice".to_string(), UserConfig::default()),
            (
                "bob".to_string(),
                UserConfig {
                    app_ids: vec![IMAGE_TO_3D_APP_ID.to_string()],
                },
            ),
        ]);

        let effective = effective_user_configs(&submitted, &pipeline);

        assert_eq!(effective.len(), 2);
        for config in effective.values() {
            assert_eq!(config.app_ids, pipeline.app_ids());
        }
    }
}
