// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Persistent channel to a single remote application.
//!
//! [`RemoteConnection`] owns one WebSocket and implements [`crate::traits::Channel`];
//! [`WebSocketConnector`] is the production [`crate::traits::Connector`] the
//! registry uses to open one per application.

mod connection;
mod connector;

pub use connection::{RemoteConnection, RESOURCE_ID_PLACEHOLDER};
pub use connector::WebSocketConnector;
