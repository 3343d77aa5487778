// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// HTTP listener bound.
pub struct ServerListening<'a> {
    pub addr: &'a str,
}

impl Display for ServerListening<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Web form listening on http://{}", self.addr)
    }
}

impl StructuredLog for ServerListening<'_> {
    fn log(&self) {
        tracing::info!(addr = self.addr, "{}", self);
    }
}

/// Artifact download refused before touching the filesystem.
pub struct ArtifactRequestRejected<'a> {
    pub name: &'a str,
    pub reason: &'a str,
}

impl Display for ArtifactRequestRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Rejected artifact request '{}': {}", self.name, self.reason)
    }
}

impl StructuredLog for ArtifactRequestRejected<'_> {
    fn log(&self) {
        tracing::warn!(name = self.name, reason = self.reason, "{}", self);
    }
}
