use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-0125";
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_ORIGINS: &str =
    "http://localhost:3000,https://lakshya-ai.vercel.app,https://lakshya-learn-ai.vercel.app";

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to each component explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_api_url: String,
    /// Total attempts per completion call. 1 means no retries.
    pub llm_max_attempts: u32,
    pub database_file: PathBuf,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_model: optional_env("OPENAI_MODEL", DEFAULT_MODEL),
            openai_api_url: optional_env("OPENAI_API_URL", DEFAULT_API_URL),
            llm_max_attempts: optional_env("LLM_MAX_ATTEMPTS", "1")
                .parse::<u32>()
                .context("LLM_MAX_ATTEMPTS must be a positive integer")?
                .max(1),
            database_file: PathBuf::from(optional_env("DATABASE_FILE", "database.json")),
            cors_allowed_origins: parse_origins(&optional_env(
                "CORS_ALLOWED_ORIGINS",
                DEFAULT_ORIGINS,
            )),
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES", "10485760")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            port: optional_env("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Splits a comma-separated origin list. Trailing slashes are dropped since
/// browsers never send them in the `Origin` header.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_default_list() {
        let origins = parse_origins(DEFAULT_ORIGINS);
        assert_eq!(
            origins,
            vec![
                "http://localhost:3000",
                "https://lakshya-ai.vercel.app",
                "https://lakshya-learn-ai.vercel.app",
            ]
        );
    }

    #[test]
    fn test_parse_origins_strips_whitespace_and_slashes() {
        let origins = parse_origins(" https://a.example/ , ,https://b.example");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_parse_origins_empty() {
        assert!(parse_origins("").is_empty());
    }
}
