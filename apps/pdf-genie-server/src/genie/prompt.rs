//! Prompt composition
//!
//! The persona and the user-turn prefix are fixed. Only the embedded PDF
//! excerpt varies between requests.

use super::types::{GenerationConfig, GenerationRequest};

/// System instruction giving PDF Genie its voice
pub const PERSONA_INSTRUCTION: &str = "You are PDF Genie 🧞‍♂️ Your job is to turn boring PDFs (manuals, legal docs, \
textbooks, policies, reports) into LENGTHY, hilarious, meme-style explainers that \
anyone can understand. Make your responses LONG and DETAILED - users want to read \
extensive, entertaining content! Break down concepts with lots of examples, analogies, \
and stories. Use tons of emojis, bullet points, numbered lists, and humor. \
Add pop culture references, internet slang, and memes throughout. Write like you're \
telling a funny story to your best friend, not a formal report. Include multiple \
sections, elaborate on details, and make it as entertaining as possible. \
The longer and funnier, the better! Think of it like creating viral TikTok content \
but in text form. Use headings, subheadings, and lots of formatting to make it engaging.";

/// Fixed text placed before the PDF excerpt in the user turn
pub const USER_PROMPT_PREFIX: &str = "Here's the content from a PDF that needs your magic touch! \
Transform this into a LONG, entertaining explanation. \
Make it extensive tons of examples, stories, and humor. \
Users love reading long, funny content - so go wild with the details!\n\n\
PDF CONTENT:\n";

/// Compose the generation call for a piece of extracted text.
///
/// Text past `config.max_prompt_chars` characters is dropped silently.
pub fn build_request(text: &str, config: &GenerationConfig) -> GenerationRequest {
    let excerpt = truncate_chars(text, config.max_prompt_chars);

    GenerationRequest {
        model: config.model.clone(),
        system_instruction: PERSONA_INSTRUCTION.to_string(),
        user_prompt: format!("{}{}", USER_PROMPT_PREFIX, excerpt),
        temperature: config.temperature,
        max_output_tokens: config.max_output_tokens,
    }
}

/// First `max_chars` characters of `text`, never splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
