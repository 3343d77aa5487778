// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::{LanguageModelError, RemoteError};
use crate::registry::AppEndpoints;
use crate::traits::{Channel, Connector, LanguageModel};

/// A language model that always expands to the same text
pub struct StubLanguageModel {
    pub response: String,
}

impl StubLanguageModel {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl LanguageModel for StubLanguageModel {
    async fn expand(&self, _prompt: &str) -> Result<String, LanguageModelError> {
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// A language model that never answers
pub struct FailingLanguageModel;

#[async_trait]
impl LanguageModel for FailingLanguageModel {
    async fn expand(&self, _prompt: &str) -> Result<String, LanguageModelError> {
        Err(LanguageModelError::EmptyResponse)
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Connector handing out in-memory [`StubChannel`]s and counting them.
#[derive(Default)]
pub struct StubConnector {
    live: Arc<AtomicUsize>,
    opened: AtomicUsize,
    failures_remaining: AtomicU32,
}

impl StubConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse the first `failures` connection attempts
    pub fn failing_first(failures: u32) -> Self {
        Self {
            failures_remaining: AtomicU32::new(failures),
            ..Self::default()
        }
    }

    /// Channels currently open
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Channels ever opened
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for StubConnector {
    async fn connect(&self, endpoints: &AppEndpoints) -> Result<Box<dyn Channel>, RemoteError> {
        let refused = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if refused {
            return Err(RemoteError::Closed(endpoints.channel_url()));
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubChannel {
            live: Arc::clone(&self.live),
            open: AtomicBool::new(true),
            resource_template: endpoints.resource_template(),
            next_handler: AtomicUsize::new(0),
            pending: Mutex::new(HashMap::new()),
        }))
    }
}

/// Channel answering every request with `{"echo": request, "uid": uid}`
pub struct StubChannel {
    live: Arc<AtomicUsize>,
    open: AtomicBool,
    resource_template: String,
    next_handler: AtomicUsize,
    pending: Mutex<HashMap<String, Value>>,
}

#[async_trait]
impl Channel for StubChannel {
    async fn execute(&self, request: &Value, uid: &str) -> Result<String, RemoteError> {
        if !self.is_open() {
            return Err(RemoteError::Closed("stub".to_string()));
        }
        let handler = format!("stub-{}", self.next_handler.fetch_add(1, Ordering::SeqCst));
        self.pending
            .lock()
            .unwrap()
            .insert(handler.clone(), json!({"echo": request, "uid": uid}));
        Ok(handler)
    }

    async fn get_response(&self, handler: &str) -> Result<Value, RemoteError> {
        self.pending
            .lock()
            .unwrap()
            .remove(handler)
            .ok_or_else(|| RemoteError::Closed("stub".to_string()))
    }

    async fn disconnect(&self) {
        if self.open.swap(false, Ordering::SeqCst) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn resource_url(&self, reid: &str) -> String {
        self.resource_template
            .replace(crate::remote::RESOURCE_ID_PLACEHOLDER, reid)
    }
}
