// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::consts::{
    IMAGE_TO_3D_APP_ID, IMAGE_TO_3D_NODE, TEXT_TO_IMAGE_APP_ID, TEXT_TO_IMAGE_NODE,
};
use crate::errors::ConfigError;

/// Newtype wrapper mapping application identifiers to the host serving them.
///
/// Configured under `registry.nodes`. When the section is present it replaces
/// the built-in table entirely.
///
/// # Example
/// ```yaml
/// registry:
///   nodes:
///     f0997a01-d6d3-a5fe-53d8-561300318557: f0997a01-d6d3-a5fe-53d8-561300318557.node3.openfabric.network
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressTable(pub HashMap<String, String>);

impl AddressTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Add or replace the host for an application
    pub fn insert(&mut self, app_id: impl Into<String>, host: impl Into<String>) {
        self.0.insert(app_id.into(), host.into());
    }

    /// Resolve an application identifier to its host
    pub fn resolve(&self, app_id: &str) -> Result<&str, ConfigError> {
        self.0
            .get(app_id)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::UnknownApplication(app_id.to_string()))
    }

    pub fn contains(&self, app_id: &str) -> bool {
        self.0.contains_key(app_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AddressTable {
    fn default() -> Self {
        Self(HashMap::from([
            (TEXT_TO_IMAGE_APP_ID.to_string(), TEXT_TO_IMAGE_NODE.to_string()),
            (IMAGE_TO_3D_APP_ID.to_string(), IMAGE_TO_3D_NODE.to_string()),
        ]))
    }
}

impl From<HashMap<String, String>> for AddressTable {
    fn from(table: HashMap<String, String>) -> Self {
        Self(table)
    }
}
