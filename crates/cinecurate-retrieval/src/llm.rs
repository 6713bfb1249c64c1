//! Chat-model contract.
//!
//! Model invocation is an external service; this module only defines the
//! request/response boundary and a scripted backend for tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;

/// LLM-related errors.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for LLM operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Configuration handed to a chat backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name/identifier.
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Temperature (0.0 = deterministic).
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::chat()
    }
}

impl LlmConfig {
    /// Answering model.
    pub fn chat() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
            timeout_secs: 60,
        }
    }

    /// Query-writing model. Deterministic.
    pub fn cypher() -> Self {
        Self {
            model: "gpt-4".to_string(),
            max_tokens: 512,
            temperature: 0.0,
            timeout_secs: 60,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A chat-completion backend.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Get the backend name.
    fn name(&self) -> &str;

    /// Get the current configuration.
    fn config(&self) -> &LlmConfig;

    /// Answer a conversation with the next assistant message.
    async fn chat(&self, messages: &[ChatMessage]) -> LlmResult<String>;

    /// Single-prompt completion.
    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        self.chat(&[ChatMessage::user(prompt)]).await
    }
}

/// Scripted backend for tests.
///
/// Replies with the first canned response whose pattern occurs in any message,
/// otherwise with a fixed default. Every conversation is recorded.
pub struct MockBackend {
    config: LlmConfig,
    responses: Vec<(String, String)>,
    fallback: String,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            config: LlmConfig::default(),
            responses: Vec::new(),
            fallback: "Mock response".to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add a canned response for a prompt pattern.
    pub fn with_response(mut self, pattern: &str, response: &str) -> Self {
        self.responses.push((pattern.to_string(), response.to_string()));
        self
    }

    /// Report `config` as the backend configuration.
    pub fn with_config(mut self, config: LlmConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the reply used when no pattern matches.
    pub fn with_fallback(mut self, response: &str) -> Self {
        self.fallback = response.to_string();
        self
    }

    /// Conversations received so far.
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn chat(&self, messages: &[ChatMessage]) -> LlmResult<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }

        let reply = self
            .responses
            .iter()
            .find(|(pattern, _)| messages.iter().any(|m| m.content.contains(pattern.as_str())))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| self.fallback.clone());
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend() {
        let backend = MockBackend::new().with_response("test", "Test response");

        let response = backend.complete("This is a test").await.unwrap();
        assert_eq!(response, "Test response");

        let response = backend.complete("unrelated").await.unwrap();
        assert_eq!(response, "Mock response");
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_complete_sends_single_user_message() {
        let backend = MockBackend::new();
        backend.complete("hello").await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls[0], vec![ChatMessage::user("hello")]);
    }

    #[test]
    fn test_config_builders() {
        let chat = LlmConfig::chat();
        assert!(chat.model.contains("gpt"));

        let cypher = LlmConfig::cypher().with_temperature(5.0);
        assert!((cypher.temperature - 2.0).abs() < f32::EPSILON);
        assert_eq!(LlmConfig::cypher().temperature, 0.0);
    }

    #[test]
    fn test_mock_reports_configured_model() {
        assert_eq!(MockBackend::new().config(), &LlmConfig::chat());

        let backend = MockBackend::new().with_config(LlmConfig::cypher());
        assert_eq!(backend.config().model, "gpt-4");
        assert_eq!(backend.config().temperature, 0.0);
    }
}
