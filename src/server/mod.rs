// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Web form and JSON endpoints in front of the pipeline.
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | prompt form |
//! | `POST /execution` | run the pipeline for `{"prompt": ..}` |
//! | `GET /artifacts/{name}` | download a generated `.png` or `.glb` |
//! | `GET /memories?limit=N` | most recent memory records |
//! | `POST /apps/{id}/reconnect` | re-register one remote application |

mod routes;

pub use routes::{router, AppState, ExecutionRequest, MemoriesQuery};

use tokio::net::TcpListener;

use crate::observability::messages::{server::ServerListening, StructuredLog};

/// Serve [`router`] on `bind` until Ctrl-C.
pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    let addr = listener.local_addr()?.to_string();
    ServerListening { addr: &addr }.log();

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}
