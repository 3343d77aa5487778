// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Text-to-image application
pub const TEXT_TO_IMAGE_APP_ID: &str = "f0997a01-d6d3-a5fe-53d8-561300318557";
/// Image-to-3D application
pub const IMAGE_TO_3D_APP_ID: &str = "69543f29-4d41-4afc-7f29-3d51591f11eb";

/// Host serving the text-to-image application
pub const TEXT_TO_IMAGE_NODE: &str = "f0997a01-d6d3-a5fe-53d8-561300318557.node3.openfabric.network";
/// Host serving the image-to-3D application
pub const IMAGE_TO_3D_NODE: &str = "69543f29-4d41-4afc-7f29-3d51591f11eb.node5.openfabric.network";

/// Scheme used for metadata and execute endpoints
pub const DEFAULT_SCHEME: &str = "https";
/// Initialization attempts per application
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Fixed delay between initialization attempts
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;
/// Timeout for manifest/schema fetches
pub const DEFAULT_METADATA_TIMEOUT_SECS: u64 = 10;
/// Timeout for execute calls
pub const DEFAULT_EXECUTE_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_BIND: &str = "0.0.0.0:7860";

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "mistral";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

/// Identity attached to execute calls and memory records
pub const DEFAULT_USER_ID: &str = "super-user";
pub const DEFAULT_DATABASE: &str = "memory.db";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
