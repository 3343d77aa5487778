// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for the persistent channel to a remote application.

use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Error, Debug)]
pub enum RemoteError {
    /// The channel could not be established.
    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tungstenite::Error,
    },

    /// The channel was never opened, was closed locally, or the peer hung up.
    #[error("Connection to {0} is closed")]
    Closed(String),

    /// Transport failure on an open channel.
    #[error("Channel error: {0}")]
    Channel(#[from] tungstenite::Error),

    /// The remote application reported a failure for a request.
    #[error("Remote execution '{handler}' failed: {message}")]
    Execution { handler: String, message: String },
}

pub type RemoteResult<T> = Result<T, RemoteError>;
