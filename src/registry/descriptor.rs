// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::registry::{AppEndpoints, SchemaKind, SchemaValidator};

/// Everything fetched about one application at registration.
#[derive(Debug, Clone)]
pub struct ApplicationDescriptor {
    pub id: String,
    pub endpoints: AppEndpoints,
    pub manifest: Value,
    pub input_schema: Value,
    pub output_schema: Value,
    input_validator: SchemaValidator,
    output_validator: SchemaValidator,
}

impl ApplicationDescriptor {
    pub fn new(
        id: impl Into<String>,
        endpoints: AppEndpoints,
        manifest: Value,
        input_schema: Value,
        output_schema: Value,
    ) -> Self {
        let input_validator = SchemaValidator::from_schema(&input_schema);
        let output_validator = SchemaValidator::from_schema(&output_schema);
        Self {
            id: id.into(),
            endpoints,
            manifest,
            input_schema,
            output_schema,
            input_validator,
            output_validator,
        }
    }

    pub fn schema(&self, kind: SchemaKind) -> &Value {
        match kind {
            SchemaKind::Input => &self.input_schema,
            SchemaKind::Output => &self.output_schema,
        }
    }

    pub fn validator(&self, kind: SchemaKind) -> &SchemaValidator {
        match kind {
            SchemaKind::Input => &self.input_validator,
            SchemaKind::Output => &self.output_validator,
        }
    }
}
