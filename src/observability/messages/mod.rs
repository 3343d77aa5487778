// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_atelier::observability::messages::pipeline::PipelineStarted;
//! use the_atelier::observability::messages::StructuredLog;
//!
//! let msg = PipelineStarted {
//!     prompt: "glowing dragon",
//!     user_id: "super-user",
//! };
//!
//! let span = msg.span("pipeline");
//! let _guard = span.enter();
//! msg.log();
//! ```

pub mod pipeline;
pub mod registry;
pub mod remote;
pub mod server;

use std::error::Error;
use tracing::Span;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the event at the message's level with its structured fields
    fn log(&self);

    /// Open a span carrying the message's fields
    fn span(&self, name: &str) -> Span {
        tracing::info_span!("event", span_name = name)
    }
}

/// Render an error and all of its sources as `outer: inner: innermost`.
pub fn error_chain(error: &dyn Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !rendered.ends_with(&cause_text) {
            rendered.push_str(": ");
            rendered.push_str(&cause_text);
        }
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "stage failed")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn error_chain_includes_every_source() {
        let error = Outer(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(error_chain(&error), "stage failed: disk full");
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Request to http://app/manifest failed: {source}")]
    struct Interpolating {
        #[source]
        source: Outer,
    }

    #[test]
    fn error_chain_skips_sources_already_in_the_message() {
        let error = Interpolating {
            source: Outer(std::io::Error::new(std::io::ErrorKind::Other, "disk full")),
        };
        assert_eq!(
            error_chain(&error),
            "Request to http://app/manifest failed: stage failed: disk full"
        );
    }

    #[test]
    fn error_chain_without_source_is_display() {
        let error = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(error_chain(&error), "boom");
    }
}
