//! Generation Providers
//!
//! Defines the generator trait and the Gemini implementation.

use async_trait::async_trait;
use serde::Deserialize;

use super::prompt::build_request;
use super::types::{GenerateError, GenerationConfig, GenerationRequest};
use crate::config::GeminiConfig;

/// Explanation generator trait
#[async_trait]
pub trait ExplanationGenerator: Send + Sync {
    /// Perform a single generation call
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError>;

    /// Build the prompt for `text` and generate an explanation.
    ///
    /// An empty payload counts as a failure.
    async fn generate_explanation(
        &self,
        text: &str,
        config: &GenerationConfig,
    ) -> Result<String, GenerateError> {
        let request = build_request(text, config);
        let explanation = self.generate(&request).await?;

        if explanation.is_empty() {
            return Err(GenerateError::EmptyResponse);
        }

        Ok(explanation)
    }
}

/// Google Gemini `generateContent` provider
pub struct GeminiGenerator {
    client: reqwest::Client,
    /// API root, e.g. "https://generativelanguage.googleapis.com"
    base_url: String,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl ExplanationGenerator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        let body = serde_json::json!({
            "systemInstruction": {
                "parts": [{ "text": request.system_instruction }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.user_prompt }]
            }],
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_output_tokens
            }
        });

        tracing::debug!(
            model = %request.model,
            prompt_chars = request.user_prompt.chars().count(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Api { status, body });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Decode(e.to_string()))?;

        parsed.into_text()
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all text parts joined
    fn into_text(self) -> Result<String, GenerateError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
            .unwrap_or_default();

        if !text.is_empty() {
            return Ok(text);
        }

        match self.prompt_feedback.and_then(|feedback| feedback.block_reason) {
            Some(reason) => Err(GenerateError::Blocked(reason)),
            None => Err(GenerateError::EmptyResponse),
        }
    }
}

/// Mock generator for testing
///
/// Counts calls and remembers the last request it was given.
#[cfg(test)]
pub struct MockGenerator {
    response: Result<String, String>,
    calls: std::sync::atomic::AtomicUsize,
    last_request: std::sync::Mutex<Option<GenerationRequest>>,
}

#[cfg(test)]
impl MockGenerator {
    pub fn returning(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            calls: std::sync::atomic::AtomicUsize::new(0),
            last_request: std::sync::Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            ..Self::returning("")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ExplanationGenerator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        self.response
            .clone()
            .map_err(GenerateError::Transport)
    }
}
