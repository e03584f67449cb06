//! Explanation Generation Module
//!
//! Turns extracted PDF text into a meme-style explainer by calling an
//! external generative-language model.
//!
//! Providers:
//! - Gemini (`generateContent` REST API)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pdf_genie_server::genie::{ExplanationGenerator, GeminiGenerator, GenerationConfig};
//!
//! let generator = GeminiGenerator::new(&config.gemini);
//! let explanation = generator
//!     .generate_explanation(&pdf_text, &GenerationConfig::default())
//!     .await?;
//! ```

mod prompt;
mod provider;
mod types;

pub use prompt::{build_request, truncate_chars, PERSONA_INSTRUCTION, USER_PROMPT_PREFIX};
pub use provider::{ExplanationGenerator, GeminiGenerator};
pub use types::{GenerateError, GenerationConfig, GenerationRequest};

#[cfg(test)]
pub use provider::MockGenerator;
