//! Blocking chat-completions client for the text generation service.
//!
//! The pipeline consumes generation as an opaque capability behind the
//! [`TextGenerator`] trait; [`ChatClient`] is the production implementation
//! talking to an OpenAI-compatible `/chat/completions` endpoint.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, trace};

/// Environment variable holding the service credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable overriding the service endpoint.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Opaque text-generation capability consumed by the pipeline stages.
///
/// One call is one request/response cycle; implementations report quota,
/// network, and auth problems as [`Error::Service`].
pub trait TextGenerator {
    /// Generates text from a system prompt and a user prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no text.
    fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String>;
}

/// Chat-completions client over blocking HTTP.
///
/// Timeouts are left to the HTTP agent's defaults; there are no retries.
pub struct ChatClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl ChatClient {
    /// Creates a client with an explicit credential and endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Creates a client from the process environment.
    ///
    /// Reads the credential from `OPENAI_API_KEY` and an optional endpoint
    /// override from `OPENAI_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] if the credential variable is
    /// unset or blank.
    pub fn from_env() -> Result<Self> {
        let api_key = require_credential(env::var(API_KEY_VAR).ok())?;
        let base_url = env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(api_key, base_url))
    }
}

impl TextGenerator for ChatClient {
    fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String> {
        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
        };

        let url = endpoint_url(&self.base_url);
        trace!(model, url = %url, "sending chat completion request");

        let mut response = self
            .agent
            .post(url.as_str())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send_json(&request)?;

        let completion: ChatCompletion = response.body_mut().read_json()?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::service("response contained no message content"))?;

        debug!(model, chars = text.len(), "chat completion received");
        Ok(text.trim().to_string())
    }
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn require_credential(value: Option<String>) -> Result<String> {
    value
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| Error::missing_credential(API_KEY_VAR))
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_shape() {
        let request = ChatRequest {
            model: "gpt-4.1-nano",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "classify the file",
                },
                ChatMessage {
                    role: "user",
                    content: "File path: a.java",
                },
            ],
            temperature: 0.3,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4.1-nano");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_completion_parsing() {
        let raw = r#"{
            "id": "chatcmpl-123",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Persistence"}}
            ]
        }"#;

        let completion: ChatCompletion = serde_json::from_str(raw).unwrap();
        assert_eq!(
            completion.choices[0].message.content.as_deref(),
            Some("Persistence")
        );
    }

    #[test]
    fn test_completion_without_content() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let completion: ChatCompletion = serde_json::from_str(raw).unwrap();
        assert!(completion.choices[0].message.content.is_none());
    }

    #[test]
    fn test_endpoint_url_normalizes_trailing_slash() {
        assert_eq!(
            endpoint_url("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            endpoint_url("https://api.openai.com/v1"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_require_credential() {
        assert_eq!(require_credential(Some("sk-test".to_string())).unwrap(), "sk-test");
        assert!(require_credential(None).unwrap_err().to_string().contains(API_KEY_VAR));
        assert!(require_credential(Some("  ".to_string())).is_err());
    }
}
