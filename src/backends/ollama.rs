// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LanguageModelConfig;
use crate::errors::LanguageModelError;
use crate::traits::LanguageModel;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Prompt expansion through Ollama's `/api/chat`.
///
/// The prompt is sent as a single non-streaming user message; the reply's
/// `message.content` is the expanded prompt.
pub struct OllamaClient {
    client: reqwest::Client,
    chat_url: String,
    model: String,
    temperature: f64,
}

impl OllamaClient {
    pub fn new(cfg: &LanguageModelConfig) -> Result<Self, LanguageModelError> {
        let client = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(LanguageModelError::Client)?;

        Ok(Self {
            client,
            chat_url: format!("{}/api/chat", cfg.base_url.trim_end_matches('/')),
            model: cfg.model.clone(),
            temperature: cfg.temperature,
        })
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    async fn expand(&self, prompt: &str) -> Result<String, LanguageModelError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
            },
        };

        let response = async {
            self.client
                .post(&self.chat_url)
                .json(&request)
                .send()
                .await?
                .error_for_status()?
                .json::<ChatResponse>()
                .await
        }
        .await
        .map_err(|source| LanguageModelError::Http {
            url: self.chat_url.clone(),
            source,
        })?;

        match response.message {
            Some(message) if !message.content.trim().is_empty() => Ok(message.content),
            _ => Err(LanguageModelError::EmptyResponse),
        }
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn config_for(server: &mockito::ServerGuard) -> LanguageModelConfig {
        LanguageModelConfig {
            base_url: format!("{}/", server.url()),
            ..LanguageModelConfig::default()
        }
    }

    #[tokio::test]
    async fn expands_prompt_through_chat_api() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::PartialJson(json!({
                "model": "mistral",
                "messages": [{"role": "user", "content": "glowing dragon"}],
                "stream": false,
                "options": {"temperature": 0.7}
            })))
            .with_status(200)
            .with_body(
                r#"{"model":"mistral","message":{"role":"assistant","content":"A majestic glowing dragon"},"done":true}"#,
            )
            .create_async()
            .await;

        let client = OllamaClient::new(&config_for(&server)).unwrap();
        let expanded = client.expand("glowing dragon").await.unwrap();

        assert_eq!(expanded, "A majestic glowing dragon");
        assert_eq!(client.name(), "mistral");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn blank_content_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"message":{"role":"assistant","content":"  "}}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(&config_for(&server)).unwrap();
        let err = client.expand("anything").await.unwrap_err();

        assert!(matches!(err, LanguageModelError::EmptyResponse));
    }

    #[tokio::test]
    async fn server_error_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body(r#"{"error":"model 'mistral' not found"}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(&config_for(&server)).unwrap();
        let err = client.expand("anything").await.unwrap_err();

        match err {
            LanguageModelError::Http { url, .. } => assert!(url.ends_with("/api/chat")),
            other => panic!("expected http error, got {:?}", other),
        }
    }
}
