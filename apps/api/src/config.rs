use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matching::tokenizer::{TokenizerConfig, DEFAULT_MIN_TOKEN_LEN, DEFAULT_STOP_WORDS};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; startup fails only on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Saved documents go to Redis when set, otherwise they stay in memory.
    pub redis_url: Option<String>,
    /// Replaces the built-in stop-word list when set.
    pub stop_words: Option<Vec<String>>,
    pub min_token_len: usize,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            redis_url: None,
            stop_words: None,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let min_token_len: usize = parse_env_or("MATCH_MIN_TOKEN_LEN", DEFAULT_MIN_TOKEN_LEN)?;
        if min_token_len == 0 {
            anyhow::bail!("MATCH_MIN_TOKEN_LEN must be at least 1");
        }

        Ok(Config {
            port: parse_env_or("PORT", DEFAULT_PORT)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            redis_url: optional_env("REDIS_URL"),
            stop_words: optional_env("MATCH_STOP_WORDS").map(|raw| parse_stop_words(&raw)),
            min_token_len,
            max_upload_bytes: parse_env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }

    /// Tokenizer settings the comparator is built with.
    pub fn tokenizer_config(&self) -> TokenizerConfig {
        match &self.stop_words {
            Some(words) => TokenizerConfig::new(words, self.min_token_len),
            None => TokenizerConfig::new(DEFAULT_STOP_WORDS.iter().copied(), self.min_token_len),
        }
    }
}

/// Splits a comma-separated stop-word list, dropping blanks.
pub fn parse_stop_words(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
