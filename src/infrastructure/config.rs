//! Application configuration

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which narrative adapter supplies flavor text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeBackend {
    /// Templated prose, no network access
    Builtin,
    /// Ollama through its OpenAI-compatible API
    Ollama,
}

impl FromStr for NarrativeBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "builtin" | "" => Ok(Self::Builtin),
            "ollama" => Ok(Self::Ollama),
            other => bail!("Unknown narrative backend: {}", other),
        }
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,

    pub narrative_backend: NarrativeBackend,
    /// Ollama API base URL (OpenAI-compatible)
    pub ollama_base_url: String,
    /// Model used for narrative requests
    pub ollama_model: String,

    /// Seeds cosmetic selection when set
    pub challenge_seed: Option<u64>,
    /// Minimum skill options for requests that carry no party context
    pub default_minimum_solutions: usize,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            narrative_backend: env::var("NARRATIVE_BACKEND")
                .unwrap_or_else(|_| "builtin".to_string())
                .parse()
                .context("NARRATIVE_BACKEND must be 'builtin' or 'ollama'")?,
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434/v1".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),

            challenge_seed: env::var("CHALLENGE_SEED")
                .ok()
                .map(|seed| seed.parse::<u64>())
                .transpose()
                .context("CHALLENGE_SEED must be an unsigned integer")?,
            default_minimum_solutions: env::var("DEFAULT_MINIMUM_SOLUTIONS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("DEFAULT_MINIMUM_SOLUTIONS must be a positive integer")?,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 3000,
            narrative_backend: NarrativeBackend::Builtin,
            ollama_base_url: "http://localhost:11434/v1".to_string(),
            ollama_model: "llama3.2".to_string(),
            challenge_seed: None,
            default_minimum_solutions: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrative_backend_parsing() {
        assert_eq!("Ollama".parse::<NarrativeBackend>().unwrap(), NarrativeBackend::Ollama);
        assert_eq!("builtin".parse::<NarrativeBackend>().unwrap(), NarrativeBackend::Builtin);
        assert!("openai".parse::<NarrativeBackend>().is_err());
    }
}
