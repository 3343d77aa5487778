// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;

use crate::errors::PipelineError;

/// Bytes carried in a response's `result` field.
///
/// Accepts a base64 string or an array of byte values.
pub fn result_bytes(app_id: &str, response: &Value) -> Result<Vec<u8>, PipelineError> {
    let missing = || PipelineError::MissingResult {
        app_id: app_id.to_string(),
    };

    match response.get("result") {
        Some(Value::String(encoded)) => {
            STANDARD
                .decode(encoded.trim())
                .map_err(|source| PipelineError::Decode {
                    app_id: app_id.to_string(),
                    source,
                })
        }
        Some(Value::Array(values)) => values
            .iter()
            .map(|v| v.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(missing),
        _ => Err(missing()),
    }
}

/// Encode bytes for a request document
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
