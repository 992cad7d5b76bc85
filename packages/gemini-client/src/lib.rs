//! Pure Gemini REST API client.
//!
//! A minimal client for the Generative Language API `generateContent`
//! endpoint. Takes a prompt, returns the first candidate's text.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::new(api_key);
//! let text = client.generate_content("gemini-2.0-flash", "Say hi").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::{Content, GenerateContentRequest, GenerateContentResponse, Part};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used when callers don't pick one.
pub const GEMINI_FLASH: &str = "gemini-2.0-flash";

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Single-turn text completion. Returns the first candidate's text.
    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            BASE_URL, model, self.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
                role: Some("user".to_string()),
            }],
        };

        let resp = self.client.post(&url).json(&request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let payload: GenerateContentResponse = resp.json().await?;
        tracing::debug!(model, candidates = payload.candidates.len(), "Gemini response");
        payload
            .text()
            .ok_or_else(|| GeminiError::Parse("response contained no candidate text".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_joins_candidate_parts() {
        let payload: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] }
            }]
        }))
        .unwrap();
        assert_eq!(payload.text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn text_is_none_without_candidates() {
        let payload: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(payload.text().is_none());
    }
}
