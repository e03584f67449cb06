//! Generation Types
//!
//! Request/config/error types shared by the prompt builder and the providers.

/// Sampling and prompt parameters for explanation generation
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Model identifier (e.g. "gemini-2.5-flash")
    pub model: String,
    /// Sampling temperature; kept high for divergent, funny output
    pub temperature: f64,
    /// Cap on generated tokens
    pub max_output_tokens: u32,
    /// Only this many characters of extracted text are embedded in the prompt
    pub max_prompt_chars: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.9,
            max_output_tokens: 2500,
            max_prompt_chars: 12_000,
        }
    }
}

/// A fully composed generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    /// Persona directive sent as the system instruction
    pub system_instruction: String,
    /// User turn: fixed prefix followed by the truncated PDF text
    pub user_prompt: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
}

/// Generation error types
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Failed to call Gemini: {0}")]
    Transport(String),

    #[error("Gemini returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Prompt blocked by Gemini: {0}")]
    Blocked(String),

    #[error("Empty response from Gemini AI")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerateError {
    fn from(err: reqwest::Error) -> Self {
        GenerateError::Transport(err.to_string())
    }
}
