// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Diagnostic output goes through message types defined in [`messages`]. Each
//! message is a small struct with a `Display` implementation and a
//! [`messages::StructuredLog`] implementation, so log call sites never carry
//! magic strings and every event has the same field names wherever it's emitted.
//!
//! Messages are organized by subsystem:
//! * `messages::registry` - application registration, metadata fetches, remote calls
//! * `messages::remote` - persistent channel lifecycle
//! * `messages::pipeline` - pipeline stages and outcomes
//! * `messages::server` - web layer events
//!
//! # Usage
//!
//! ```rust
//! use the_atelier::observability::messages::{registry::ManifestLoaded, StructuredLog};
//!
//! ManifestLoaded { host: "app.node3.example" }.log();
//! ```

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install the global `tracing` subscriber.
///
/// Honors `RUST_LOG` and falls back to [`DEFAULT_LOG_FILTER`]. Calling it more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
