// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Config;
use crate::errors::ValidationError;

const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// Validate a loaded configuration.
///
/// Checks that:
/// * both pipeline applications resolve through the address table, and differ
/// * the retry policy makes at least one attempt
/// * the registry scheme is `http` or `https`
/// * a language model is named and its temperature is within 0.0..=2.0
///
/// All failures are collected so a single run reports every problem.
pub fn validate_config(cfg: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let pipeline = &cfg.pipeline;

    for (role, app_id) in [
        ("text-to-image", &pipeline.text_to_image_app),
        ("image-to-3D", &pipeline.image_to_3d_app),
    ] {
        if !cfg.registry.nodes.contains(app_id) {
            errors.push(ValidationError::UnknownPipelineApp {
                role,
                app_id: app_id.clone(),
            });
        }
    }

    if pipeline.text_to_image_app == pipeline.image_to_3d_app {
        errors.push(ValidationError::DuplicatePipelineApp {
            app_id: pipeline.text_to_image_app.clone(),
        });
    }

    if cfg.registry.max_attempts == 0 {
        errors.push(ValidationError::ZeroRetryAttempts);
    }

    if !SUPPORTED_SCHEMES.contains(&cfg.registry.scheme.as_str()) {
        errors.push(ValidationError::UnsupportedScheme {
            scheme: cfg.registry.scheme.clone(),
        });
    }

    if cfg.language_model.model.trim().is_empty() {
        errors.push(ValidationError::EmptyModelName);
    }

    let temperature = cfg.language_model.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        errors.push(ValidationError::TemperatureOutOfRange { temperature });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&Config::default()), Ok(()));
    }

    #[test]
    fn test_validation_table_driven() {
        struct TestCase {
            name: &'static str,
            yaml: &'static str,
            expected: Vec<ValidationError>,
        }

        let test_cases = vec![
            TestCase {
                name: "pipeline app missing from nodes",
                yaml: r#"
pipeline:
  image_to_3d_app: ghost
"#,
                expected: vec![ValidationError::UnknownPipelineApp {
                    role: "image-to-3D",
                    app_id: "ghost".to_string(),
                }],
            },
            TestCase {
                name: "same app for both stages",
                yaml: r#"
pipeline:
  text_to_image_app: 69543f29-4d41-4afc-7f29-3d51591f11eb
"#,
                expected: vec![ValidationError::DuplicatePipelineApp {
                    app_id: "69543f29-4d41-4afc-7f29-3d51591f11eb".to_string(),
                }],
            },
            TestCase {
                name: "zero attempts",
                yaml: "registry:\n  max_attempts: 0\n",
                expected: vec![ValidationError::ZeroRetryAttempts],
            },
            TestCase {
                name: "ftp scheme",
                yaml: "registry:\n  scheme: ftp\n",
                expected: vec![ValidationError::UnsupportedScheme {
                    scheme: "ftp".to_string(),
                }],
            },
            TestCase {
                name: "blank model",
                yaml: "language_model:\n  model: '  '\n",
                expected: vec![ValidationError::EmptyModelName],
            },
            TestCase {
                name: "temperature too hot",
                yaml: "language_model:\n  temperature: 3.5\n",
                expected: vec![ValidationError::TemperatureOutOfRange { temperature: 3.5 }],
            },
        ];

        for case in test_cases {
            let cfg = parse_config(case.yaml).unwrap();
            let result = validate_config(&cfg);
            assert_eq!(result, Err(case.expected), "case: {}", case.name);
        }
    }

    #[test]
    fn collects_every_problem() {
        let yaml = r#"
registry:
  scheme: gopher
  max_attempts: 0
  nodes: {}
"#;
        let cfg = parse_config(yaml).unwrap();
        let errors = validate_config(&cfg).unwrap_err();

        // two unresolved pipeline apps + attempts + scheme
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroRetryAttempts));
    }
}
