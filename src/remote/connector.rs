// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::RemoteError;
use crate::registry::AppEndpoints;
use crate::remote::RemoteConnection;
use crate::traits::{Channel, Connector};

/// Opens a [`RemoteConnection`] on the application's `/app` channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketConnector;

#[async_trait]
impl Connector for WebSocketConnector {
    async fn connect(&self, endpoints: &AppEndpoints) -> Result<Box<dyn Channel>, RemoteError> {
        let connection = RemoteConnection::new(
            endpoints.channel_url(),
            endpoints.proxy_id(),
            endpoints.resource_template(),
        )
        .connect()
        .await?;

        Ok(Box::new(connection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn connects_to_the_app_channel() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let _ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        });

        let endpoints = AppEndpoints::new("http", addr.to_string());
        let channel = WebSocketConnector.connect(&endpoints).await.unwrap();

        assert!(channel.is_open());
        assert_eq!(
            channel.resource_url("r1"),
            format!("http://{}/resource?reid=r1", addr)
        );
        channel.disconnect().await;
        assert!(!channel.is_open());
    }

    #[tokio::test]
    async fn unreachable_host_is_connect_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoints = AppEndpoints::new("http", addr.to_string());
        let result = WebSocketConnector.connect(&endpoints).await;

        assert!(matches!(result, Err(RemoteError::Connect { .. })));
    }
}
