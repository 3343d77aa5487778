// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::errors::{RemoteError, RemoteResult};
use crate::observability::messages::{remote::*, StructuredLog};
use crate::traits::Channel;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Placeholder substituted by [`RemoteConnection::resource_url`]
pub const RESOURCE_ID_PLACEHOLDER: &str = "{reid}";

/// Frames the remote application sends back over the channel.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum InboundFrame {
    Response {
        id: String,
        #[serde(default)]
        data: Value,
    },
    Error {
        id: String,
        #[serde(default)]
        message: String,
    },
    #[serde(other)]
    Other,
}

/// One persistent WebSocket channel to a remote application.
///
/// Outbound requests are text frames of the form
/// `{"type":"execute","id":<handler>,"uid":<uid>,"request":<document>}`.
/// The application answers with `{"type":"response","id":<handler>,"data":..}`
/// or `{"type":"error","id":<handler>,"message":..}`; any other frame,
/// including text that is not a frame at all, is skipped while a response is
/// awaited.
pub struct RemoteConnection {
    url: String,
    proxy_id: String,
    resource_template: String,
    stream: Mutex<Option<WsStream>>,
    open: AtomicBool,
    next_handler: AtomicU64,
}

impl RemoteConnection {
    /// Describe a channel without opening it
    pub fn new(
        url: impl Into<String>,
        proxy_id: impl Into<String>,
        resource_template: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            proxy_id: proxy_id.into(),
            resource_template: resource_template.into(),
            stream: Mutex::new(None),
            open: AtomicBool::new(false),
            next_handler: AtomicU64::new(0),
        }
    }

    /// Establish the channel, returning the now-open connection
    pub async fn connect(mut self) -> RemoteResult<Self> {
        let (stream, _response) =
            connect_async(self.url.as_str())
                .await
                .map_err(|source| RemoteError::Connect {
                    url: self.url.clone(),
                    source,
                })?;

        *self.stream.get_mut() = Some(stream);
        self.open.store(true, Ordering::SeqCst);

        ChannelOpened {
            url: &self.url,
            proxy_id: &self.proxy_id,
        }
        .log();

        Ok(self)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn proxy_id(&self) -> &str {
        &self.proxy_id
    }

    fn closed(&self) -> RemoteError {
        RemoteError::Closed(self.url.clone())
    }

    fn mark_closed(&self, slot: &mut Option<WsStream>) {
        *slot = None;
        self.open.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl Channel for RemoteConnection {
    async fn execute(&self, request: &Value, uid: &str) -> RemoteResult<String> {
        let sequence = self.next_handler.fetch_add(1, Ordering::SeqCst) + 1;
        let handler = format!("{}-{}", self.proxy_id, sequence);
        let frame = json!({
            "type": "execute",
            "id": handler,
            "uid": uid,
            "request": request,
        });

        let mut slot = self.stream.lock().await;
        let stream = slot.as_mut().ok_or_else(|| self.closed())?;
        let sent = stream.send(Message::Text(frame.to_string())).await;
        if let Err(e) = sent {
            self.mark_closed(&mut slot);
            return Err(e.into());
        }

        Ok(handler)
    }

    async fn get_response(&self, handler: &str) -> RemoteResult<Value> {
        let mut slot = self.stream.lock().await;

        loop {
            let stream = slot.as_mut().ok_or_else(|| self.closed())?;
            let next = stream.next().await;
            let message = match next {
                Some(Ok(message)) => message,
                Some(Err(e)) => {
                    self.mark_closed(&mut slot);
                    return Err(e.into());
                }
                None => {
                    self.mark_closed(&mut slot);
                    return Err(self.closed());
                }
            };

            let text = match message {
                Message::Text(text) => text,
                Message::Close(_) => {
                    self.mark_closed(&mut slot);
                    return Err(self.closed());
                }
                // ping/pong are answered by tungstenite; binary frames carry nothing we await
                _ => continue,
            };

            match serde_json::from_str::<InboundFrame>(&text) {
                Ok(InboundFrame::Response { id, data }) if id == handler => return Ok(data),
                Ok(InboundFrame::Error { id, message }) if id == handler => {
                    return Err(RemoteError::Execution {
                        handler: id,
                        message,
                    })
                }
                _ => FrameSkipped {
                    url: &self.url,
                    awaiting: handler,
                }
                .log(),
            }
        }
    }

    async fn disconnect(&self) {
        let mut slot = self.stream.lock().await;
        let Some(mut stream) = slot.take() else {
            return;
        };
        self.open.store(false, Ordering::SeqCst);

        if let Err(error) = stream.close(None).await {
            CloseHandshakeFailed {
                url: &self.url,
                error: &error,
            }
            .log();
        }
        ChannelClosed { url: &self.url }.log();
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn resource_url(&self, reid: &str) -> String {
        self.resource_template.replace(RESOURCE_ID_PLACEHOLDER, reid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Accept one WebSocket client and answer each execute frame.
    ///
    /// A request carrying `"fail": true` gets an error frame. Every answer is
    /// preceded by a bare `heartbeat` text, a response frame without an id
    /// and an unrelated progress frame.
    async fn spawn_application() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();

            while let Some(Ok(Message::Text(text))) = ws.next().await {
                let frame: Value = serde_json::from_str(&text).unwrap();
                ws.send(Message::Text("heartbeat".to_string())).await.unwrap();
                let orphan = json!({"type": "response", "data": {"stale": true}});
                ws.send(Message::Text(orphan.to_string())).await.unwrap();
                let progress = json!({"type": "progress", "id": frame["id"], "percent": 50});
                ws.send(Message::Text(progress.to_string())).await.unwrap();

                let reply = if frame["request"]["fail"] == json!(true) {
                    json!({"type": "error", "id": frame["id"], "message": "out of credits"})
                } else {
                    json!({
                        "type": "response",
                        "id": frame["id"],
                        "data": {"echo": frame["request"], "uid": frame["uid"]},
                    })
                };
                ws.send(Message::Text(reply.to_string())).await.unwrap();
            }
        });

        format!("ws://{}/app", addr)
    }

    #[tokio::test]
    async fn execute_and_get_response_round_trip() {
        let url = spawn_application().await;
        let connection = RemoteConnection::new(&url, "app-proxy", "http://x/resource?reid={reid}")
            .connect()
            .await
            .unwrap();
        assert!(connection.is_open());

        let handler = connection
            .execute(&json!({"prompt": "a cat"}), "super-user")
            .await
            .unwrap();
        assert_eq!(handler, "app-proxy-1");

        let response = connection.get_response(&handler).await.unwrap();
        assert_eq!(response["echo"]["prompt"], "a cat");
        assert_eq!(response["uid"], "super-user");

        connection.disconnect().await;
        assert!(!connection.is_open());
    }

    #[tokio::test]
    async fn error_frame_becomes_execution_error() {
        let url = spawn_application().await;
        let connection = RemoteConnection::new(&url, "app-proxy", "")
            .connect()
            .await
            .unwrap();

        let handler = connection
            .execute(&json!({"fail": true}), "super-user")
            .await
            .unwrap();
        let err = connection.get_response(&handler).await.unwrap_err();

        match err {
            RemoteError::Execution { handler: id, message } => {
                assert_eq!(id, handler);
                assert_eq!(message, "out of credits");
            }
            other => panic!("expected execution error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn undecodable_frames_leave_the_stream_in_step() {
        let url = spawn_application().await;
        let connection = RemoteConnection::new(&url, "p", "").connect().await.unwrap();

        for prompt in ["first", "second"] {
            let handler = connection
                .execute(&json!({"prompt": prompt}), "u")
                .await
                .unwrap();
            let response = connection.get_response(&handler).await.unwrap();
            assert_eq!(response["echo"]["prompt"], prompt);
        }
        assert!(connection.is_open());
    }

    #[tokio::test]
    async fn handlers_are_unique_per_connection() {
        let url = spawn_application().await;
        let connection = RemoteConnection::new(&url, "p", "").connect().await.unwrap();

        let first = connection.execute(&json!({}), "u").await.unwrap();
        connection.get_response(&first).await.unwrap();
        let second = connection.execute(&json!({}), "u").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn connect_to_nothing_fails() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = RemoteConnection::new(format!("ws://{}/app", addr), "p", "")
            .connect()
            .await;

        assert!(matches!(result, Err(RemoteError::Connect { .. })));
    }

    #[tokio::test]
    async fn disconnect_is_idempotent_and_closes_calls() {
        let url = spawn_application().await;
        let connection = RemoteConnection::new(&url, "p", "").connect().await.unwrap();

        connection.disconnect().await;
        connection.disconnect().await;

        assert!(!connection.is_open());
        let err = connection.execute(&json!({}), "u").await.unwrap_err();
        assert!(matches!(err, RemoteError::Closed(_)));
    }

    #[test]
    fn unopened_connection_is_closed() {
        let connection = RemoteConnection::new("ws://127.0.0.1:1/app", "p", "");
        assert!(!connection.is_open());
    }

    #[test]
    fn resource_url_substitutes_reid() {
        let connection = RemoteConnection::new(
            "wss://host/app",
            "host-proxy",
            "https://host/resource?reid={reid}",
        );
        assert_eq!(
            connection.resource_url("abc123"),
            "https://host/resource?reid=abc123"
        );
    }
}
