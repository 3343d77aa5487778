// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Remote application registry.
//!
//! The registry maps application identifiers to hosts through the injected
//! [`crate::config::AddressTable`], fetches each application's manifest and
//! input/output schemas with bounded retries, and keeps one persistent
//! channel per application.
//!
//! # Endpoints
//!
//! For an application served at `host` over `scheme`:
//! ```text
//! {scheme}://{host}/manifest
//! {scheme}://{host}/schema?type=input|output
//! {scheme}://{host}/execute
//! ws[s]://{host}/app
//! ```

mod application_registry;
mod descriptor;
mod endpoints;
mod fetch;
mod retry;
mod schema;

pub use application_registry::{ApplicationRegistry, RegistrySettings};
pub use descriptor::ApplicationDescriptor;
pub use endpoints::AppEndpoints;
pub use fetch::MetadataFetcher;
pub use retry::RetryPolicy;
pub use schema::{FieldKind, SchemaKind, SchemaValidator};
