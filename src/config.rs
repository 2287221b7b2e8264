//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-generator.toml` in current directory
//! 4. `~/.config/sql-generator/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [llm]
//! provider = "groq"            # groq, openai, anthropic, ollama
//! model = "llama-3.3-70b-versatile"
//! api_key = "gsk_..."          # or use LLM_API_KEY env var
//! ollama_url = "http://localhost:11434"
//!
//! [retry]
//! max_retries = 3
//! initial_delay_ms = 1000
//! max_delay_ms = 30000
//! backoff_factor = 2.0
//!
//! [generation]
//! temperature = 0.1
//! max_tokens = 2000
//! attempts = 3
//! retry_delay_ms = 2000
//!
//! [export]
//! output_dir = "output"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `LLM_API_KEY` | API key for Groq/OpenAI/Anthropic |
//! | `LLM_PROVIDER` | Provider name |
//! | `LLM_MODEL` | Model identifier |
//! | `OLLAMA_URL` | Ollama base URL |

use std::{env, fs, path::PathBuf};

use serde::Deserialize;

use crate::error::{AppResult, config_error};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub llm:        LlmConfig,
    #[serde(default)]
    pub retry:      RetryConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub export:     ExportConfig
}

/// LLM provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub provider:   Option<String>,
    pub api_key:    Option<String>,
    pub model:      Option<String>,
    pub ollama_url: Option<String>
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider:   None,
            api_key:    None,
            model:      None,
            ollama_url: Some(String::from("http://localhost:11434"))
        }
    }
}

/// Retry configuration for LLM transport requests
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    pub max_retries:      u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms:     u64,
    pub backoff_factor:   f64
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries:      3,
            initial_delay_ms: 1000,
            max_delay_ms:     30000,
            backoff_factor:   2.0
        }
    }
}

/// Sampling and question-level retry configuration.
///
/// `attempts` and `retry_delay_ms` govern the per-question retry loop in the
/// pipeline: a question whose response cannot be parsed is retried after a
/// fixed delay until the attempt budget is exhausted.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub temperature:    f32,
    pub max_tokens:     u32,
    pub attempts:       u32,
    pub retry_delay_ms: u64
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature:    0.1,
            max_tokens:     2000,
            attempts:       3,
            retry_delay_ms: 2000
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExportConfig {
    /// Directory for export files
    pub output_dir: Option<String>
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-generator.toml)
    /// 3. Config file in home directory (~/.config/sql-generator/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        // Try to load from home directory config
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-generator")
                .join("config.toml");

            if home_config.exists() {
                let content = fs::read_to_string(&home_config)
                    .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
                config = toml::from_str(&content)
                    .map_err(|e| config_error(format!("Invalid config file: {}", e)))?;
            }
        }

        // Try to load from current directory config (overrides home config)
        let local_config = PathBuf::from(".sql-generator.toml");
        if local_config.exists() {
            let content = fs::read_to_string(&local_config)
                .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
            config = toml::from_str(&content)
                .map_err(|e| config_error(format!("Invalid config file: {}", e)))?;
        }

        // Override with environment variables
        if let Ok(api_key) = env::var("LLM_API_KEY") {
            config.llm.api_key = Some(api_key);
        }

        if let Ok(provider) = env::var("LLM_PROVIDER") {
            config.llm.provider = Some(provider);
        }

        if let Ok(model) = env::var("LLM_MODEL") {
            config.llm.model = Some(model);
        }

        if let Ok(url) = env::var("OLLAMA_URL") {
            config.llm.ollama_url = Some(url);
        }

        Ok(config)
    }
}
