//! Configuration management for PDF Genie Server
//!
//! Everything is read from the process environment (after `.env` has been
//! loaded by `dotenvy`). The Gemini API key is the only required value.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::genie::GenerationConfig;

/// 10 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_MIN_TEXT_CHARS: usize = 50;

/// Slack allowed on top of the file limit for multipart boundaries and part headers
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY not found in environment variables. Please add it to your .env file.")]
    MissingApiKey,

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub generation: GenerationConfig,
    pub upload: UploadConfig,
    pub frontend: FrontendConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
}

// Keep the secret out of logs
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Largest accepted PDF, in bytes
    pub max_upload_bytes: usize,
    /// Minimum trimmed text length (in characters) worth sending for generation
    pub min_text_chars: usize,
}

impl UploadConfig {
    /// Upper bound for the whole multipart request body
    pub fn request_body_limit(&self) -> usize {
        self.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
    }
}

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub static_dir: PathBuf,
    pub index_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            gemini: GeminiConfig {
                api_key: String::new(),
                base_url: "https://generativelanguage.googleapis.com".to_string(),
            },
            generation: GenerationConfig::default(),
            upload: UploadConfig {
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
                min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            },
            frontend: FrontendConfig {
                static_dir: PathBuf::from("static"),
                index_path: PathBuf::from("index.html"),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Unset variables fall back to the defaults; set but unparseable ones
    /// are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let api_key = lookup("GEMINI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var(&lookup, "SERVER_PORT", defaults.server.port)?,
            },
            gemini: GeminiConfig {
                api_key,
                base_url: lookup("GEMINI_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.gemini.base_url),
            },
            generation: GenerationConfig {
                model: lookup("GEMINI_MODEL").unwrap_or(defaults.generation.model),
                temperature: parse_var(
                    &lookup,
                    "GEMINI_TEMPERATURE",
                    defaults.generation.temperature,
                )?,
                max_output_tokens: parse_var(
                    &lookup,
                    "GEMINI_MAX_OUTPUT_TOKENS",
                    defaults.generation.max_output_tokens,
                )?,
                max_prompt_chars: parse_var(
                    &lookup,
                    "MAX_PROMPT_CHARS",
                    defaults.generation.max_prompt_chars,
                )?,
            },
            upload: UploadConfig {
                max_upload_bytes: parse_var(
                    &lookup,
                    "MAX_UPLOAD_BYTES",
                    defaults.upload.max_upload_bytes,
                )?,
                min_text_chars: parse_var(
                    &lookup,
                    "MIN_TEXT_CHARS",
                    defaults.upload.min_text_chars,
                )?,
            },
            frontend: FrontendConfig {
                static_dir: lookup("STATIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.frontend.static_dir),
                index_path: lookup("INDEX_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.frontend.index_path),
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_missing_api_key_fails() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));

        let result = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "   ")]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "secret")])).unwrap();

        assert_eq!(config.gemini.api_key, "secret");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.upload.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.upload.min_text_chars, 50);
        assert_eq!(config.generation.max_prompt_chars, 12_000);
        assert_eq!(config.generation.model, "gemini-2.5-flash");
        assert_eq!(config.generation.max_output_tokens, 2500);
        assert!((config.generation.temperature - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_BASE_URL", "http://localhost:8080/"),
            ("SERVER_PORT", "8000"),
            ("MIN_TEXT_CHARS", "10"),
            ("MAX_PROMPT_CHARS", "500"),
            ("INDEX_PATH", "/srv/genie/index.html"),
        ]))
        .unwrap();

        assert_eq!(config.gemini.base_url, "http://localhost:8080");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.upload.min_text_chars, 10);
        assert_eq!(config.generation.max_prompt_chars, 500);
        assert_eq!(config.frontend.index_path, PathBuf::from("/srv/genie/index.html"));
    }

    #[test]
    fn test_invalid_number_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "secret"),
            ("MAX_UPLOAD_BYTES", "ten megs"),
        ]));

        match result {
            Err(ConfigError::Invalid { var, value }) => {
                assert_eq!(var, "MAX_UPLOAD_BYTES");
                assert_eq!(value, "ten megs");
            }
            other => panic!("Expected Invalid error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "super-secret")])).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
    }
}
