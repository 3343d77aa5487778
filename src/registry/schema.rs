// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Schema kinds and the lightweight validators built from schema documents.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::RegistryError;

/// Which of an application's two schema documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Input,
    Output,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Input => "input",
            SchemaKind::Output => "output",
        }
    }
}

impl Display for SchemaKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = RegistryError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "input" => Ok(SchemaKind::Input),
            "output" => Ok(SchemaKind::Output),
            other => Err(RegistryError::InvalidArgument(other.to_string())),
        }
    }
}

/// Field validator selected by a JSON-schema `type` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    /// Unrecognized or missing type; accepts anything
    Raw,
}

impl FieldKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "string" => FieldKind::String,
            "integer" => FieldKind::Integer,
            "number" => FieldKind::Number,
            "boolean" => FieldKind::Boolean,
            "array" => FieldKind::Array,
            "object" => FieldKind::Object,
            _ => FieldKind::Raw,
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
            FieldKind::Raw => true,
        }
    }
}

/// Validator for one schema document, built once at registration.
///
/// Only the top level is checked: declared `properties` must have the
/// declared type and every entry of `required` must be present. Unknown
/// fields pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaValidator {
    fields: BTreeMap<String, FieldKind>,
    required: Vec<String>,
}

impl SchemaValidator {
    pub fn from_schema(schema: &Value) -> Self {
        let fields = schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| {
                properties
                    .iter()
                    .map(|(name, property)| {
                        let kind = property
                            .get("type")
                            .and_then(Value::as_str)
                            .map(FieldKind::from_type_name)
                            .unwrap_or(FieldKind::Raw);
                        (name.clone(), kind)
                    })
                    .collect()
            })
            .unwrap_or_default();

        let required = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self { fields, required }
    }

    pub fn field(&self, name: &str) -> Option<FieldKind> {
        self.fields.get(name).copied()
    }

    /// Check a document, returning every violation found
    pub fn validate(&self, document: &Value) -> Result<(), Vec<String>> {
        let empty = Map::new();
        let object = match document.as_object() {
            Some(object) => object,
            None if self.fields.is_empty() && self.required.is_empty() => &empty,
            None => return Err(vec!["document is not an object".to_string()]),
        };

        let mut violations: Vec<String> = self
            .required
            .iter()
            .filter(|name| !object.contains_key(name.as_str()))
            .map(|name| format!("missing required field '{}'", name))
            .collect();

        for (name, value) in object {
            if let Some(kind) = self.fields.get(name) {
                if !kind.accepts(value) {
                    violations.push(format!("field '{}' is not {:?}", name, kind));
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_schema_kinds() {
        assert_eq!("input".parse::<SchemaKind>().unwrap(), SchemaKind::Input);
        assert_eq!("output".parse::<SchemaKind>().unwrap(), SchemaKind::Output);

        let err = "bogus".parse::<SchemaKind>().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(ref kind) if kind == "bogus"));
    }

    #[test]
    fn type_names_map_to_field_kinds() {
        let cases = [
            ("string", FieldKind::String),
            ("integer", FieldKind::Integer),
            ("number", FieldKind::Number),
            ("boolean", FieldKind::Boolean),
            ("array", FieldKind::Array),
            ("object", FieldKind::Object),
            ("binary", FieldKind::Raw),
        ];
        for (name, expected) in cases {
            assert_eq!(FieldKind::from_type_name(name), expected, "type: {}", name);
        }
    }

    #[test]
    fn validates_properties_and_required() {
        let validator = SchemaValidator::from_schema(&json!({
            "type": "object",
            "properties": {
                "prompt": {"type": "string"},
                "steps": {"type": "integer"},
                "blob": {}
            },
            "required": ["prompt"]
        }));

        assert_eq!(validator.field("blob"), Some(FieldKind::Raw));
        assert!(validator.validate(&json!({"prompt": "a cat", "steps": 4})).is_ok());
        assert!(validator.validate(&json!({"prompt": "a cat", "extra": true})).is_ok());

        let violations = validator.validate(&json!({"steps": "four"})).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert!(violations[0].contains("missing required field 'prompt'"));
        assert!(violations[1].contains("'steps'"));
    }

    #[test]
    fn empty_schema_accepts_anything() {
        let validator = SchemaValidator::from_schema(&json!({}));
        assert!(validator.validate(&json!("just a string")).is_ok());
        assert!(validator.validate(&json!({"any": 1})).is_ok());
    }
}
