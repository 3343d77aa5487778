// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the persistent channel lifecycle.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Channel established.
///
/// # Log Level
/// `info!`
pub struct ChannelOpened<'a> {
    pub url: &'a str,
    pub proxy_id: &'a str,
}

impl Display for ChannelOpened<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Connected to {} as {}", self.url, self.proxy_id)
    }
}

impl StructuredLog for ChannelOpened<'_> {
    fn log(&self) {
        tracing::info!(url = self.url, proxy_id = self.proxy_id, "{}", self);
    }
}

/// Channel closed locally.
///
/// # Log Level
/// `info!`
pub struct ChannelClosed<'a> {
    pub url: &'a str,
}

impl Display for ChannelClosed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Disconnected from {}", self.url)
    }
}

impl StructuredLog for ChannelClosed<'_> {
    fn log(&self) {
        tracing::info!(url = self.url, "{}", self);
    }
}

/// Close handshake didn't complete cleanly; the channel is dropped anyway.
///
/// # Log Level
/// `debug!`
pub struct CloseHandshakeFailed<'a> {
    pub url: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for CloseHandshakeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Close handshake with {} failed: {}", self.url, self.error)
    }
}

impl StructuredLog for CloseHandshakeFailed<'_> {
    fn log(&self) {
        tracing::debug!(url = self.url, "{}", self);
    }
}

/// A frame arrived that doesn't answer the pending request.
///
/// # Log Level
/// `debug!`
pub struct FrameSkipped<'a> {
    pub url: &'a str,
    pub awaiting: &'a str,
}

impl Display for FrameSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping frame from {} while awaiting '{}'",
            self.url, self.awaiting
        )
    }
}

impl StructuredLog for FrameSkipped<'_> {
    fn log(&self) {
        tracing::debug!(url = self.url, awaiting = self.awaiting, "{}", self);
    }
}
