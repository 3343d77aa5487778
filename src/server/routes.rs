// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::memory::{MemoryRecord, MemoryStore};
use crate::observability::messages::{server::ArtifactRequestRejected, StructuredLog};
use crate::pipeline::{ArtifactKind, PipelineExecutor, PipelineResult};

const FORM_HTML: &str = include_str!("form.html");

const DEFAULT_MEMORY_LIMIT: usize = 20;
const MAX_MEMORY_LIMIT: usize = 500;

/// Shared state for every route.
///
/// Pipeline runs and reconnects take the executor lock, so at most one of
/// them is in flight at a time.
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<Mutex<PipelineExecutor>>,
    pub output_dir: PathBuf,
    pub database: PathBuf,
}

impl AppState {
    pub fn new(executor: PipelineExecutor) -> Self {
        let output_dir = executor.settings().output_dir.clone();
        let database = executor.settings().database.clone();
        Self {
            executor: Arc::new(Mutex::new(executor)),
            output_dir,
            database,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExecutionRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct MemoriesQuery {
    pub limit: Option<usize>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/execution", post(execution_handler))
        .route("/artifacts/{name}", get(artifact_handler))
        .route("/memories", get(memories_handler))
        .route("/apps/{id}/reconnect", post(reconnect_handler))
        .with_state(state)
}

async fn index_handler() -> Html<&'static str> {
    Html(FORM_HTML)
}

async fn execution_handler(
    State(state): State<AppState>,
    Json(request): Json<ExecutionRequest>,
) -> Result<Json<PipelineResult>, (StatusCode, Json<PipelineResult>)> {
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(PipelineResult::error("prompt must not be empty")),
        ));
    }

    let executor = state.executor.lock().await;
    Ok(Json(executor.execute(prompt).await))
}

fn rejection_reason(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("empty name")
    } else if name.contains(['/', '\\']) {
        Some("path separators are not allowed")
    } else if name.contains("..") {
        Some("parent references are not allowed")
    } else if name.chars().all(|c| c == '.') {
        Some("name must not be only dots")
    } else {
        None
    }
}

async fn artifact_handler(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    if let Some(reason) = rejection_reason(&name) {
        ArtifactRequestRejected {
            name: &name,
            reason,
        }
        .log();
        return StatusCode::BAD_REQUEST.into_response();
    }

    match tokio::fs::read(state.output_dir.join(&name)).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, ArtifactKind::content_type_for(&name))],
            bytes,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(name = %name, "Failed to read artifact: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn memories_handler(
    State(state): State<AppState>,
    Query(query): Query<MemoriesQuery>,
) -> Result<Json<Vec<MemoryRecord>>, StatusCode> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_MEMORY_LIMIT)
        .min(MAX_MEMORY_LIMIT);

    let store = MemoryStore::open(&state.database).map_err(|e| {
        tracing::error!("Failed to open memory store: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let records = store.recent(limit).await.map_err(|e| {
        tracing::error!("Failed to read memories: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(records))
}

async fn reconnect_handler(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut executor = state.executor.lock().await;
    let registry = executor.registry_mut();

    match registry.reconnect(&app_id).await {
        Ok(()) => {
            let connected = registry.is_connected(&app_id);
            (
                StatusCode::OK,
                Json(json!({ "app_id": app_id, "connected": connected })),
            )
        }
        Err(e) => {
            let status = if e.is_configuration() {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_GATEWAY
            };
            (
                status,
                Json(json!({ "app_id": app_id, "connected": false, "error": e.to_string() })),
            )
        }
    }
}
