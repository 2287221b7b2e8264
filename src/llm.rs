//! LLM provider integrations for SQL generation.
//!
//! This module provides a unified interface for interacting with multiple LLM
//! providers. It handles authentication, request formatting, response parsing,
//! token-usage accounting, and automatic retry with exponential backoff.
//!
//! # Supported Providers
//!
//! | Provider | Endpoint | Authentication |
//! |----------|----------|----------------|
//! | Groq | `api.groq.com` (OpenAI-compatible) | Bearer token |
//! | OpenAI | `api.openai.com` | Bearer token |
//! | Anthropic | `api.anthropic.com` | x-api-key header |
//! | Ollama | Local (configurable) | None |
//!
//! # Retry Behavior
//!
//! The client automatically retries on transient errors:
//! - Connection timeouts
//! - Rate limiting (429)
//! - Server errors (5xx)
//!
//! Retry delays use exponential backoff with configurable parameters. The
//! question-level retry (re-prompting when a response cannot be parsed) lives
//! in the pipeline, not here.
//!
//! # Example
//!
//! ```
//! use sql_query_generator::{
//!     config::{GenerationConfig, RetryConfig},
//!     llm::{LlmClient, LlmProvider}
//! };
//!
//! let provider = LlmProvider::Ollama {
//!     base_url: "http://localhost:11434".into(),
//!     model:    "llama3.2".into()
//! };
//!
//! let client =
//!     LlmClient::with_config(provider, RetryConfig::default(), &GenerationConfig::default());
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::{
    config::{GenerationConfig, RetryConfig},
    error::{AppResult, http_error, llm_api_error}
};

/// LLM provider configuration with authentication credentials.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    /// Groq API (OpenAI-compatible chat completions)
    Groq {
        /// API key (gsk_...)
        api_key: String,
        /// Model identifier (e.g., "llama-3.3-70b-versatile")
        model:   String
    },
    /// OpenAI API (GPT-4, GPT-3.5, etc.)
    OpenAI {
        /// API key (sk-...)
        api_key: String,
        /// Model identifier (e.g., "gpt-4", "gpt-3.5-turbo")
        model:   String
    },
    /// Anthropic API (Claude models)
    Anthropic {
        /// API key
        api_key: String,
        /// Model identifier (e.g., "claude-sonnet-4-20250514")
        model:   String
    },
    /// Local Ollama instance
    Ollama {
        /// Base URL (e.g., "http://localhost:11434")
        base_url: String,
        /// Model name (e.g., "llama3.2", "codellama")
        model:    String
    }
}

/// Token accounting for one model call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenUsage {
    pub prompt_tokens:     u64,
    pub completion_tokens: u64,
    pub total_tokens:      u64
}

/// Result of one successful model call.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// Raw model output text
    pub text:    String,
    /// Token usage, when the provider reports it
    pub usage:   Option<TokenUsage>,
    /// Wall-clock latency of the successful attempt
    pub latency: Duration
}

/// HTTP client for LLM API communication with retry support.
///
/// Handles provider-specific request formatting and response parsing.
/// Automatically retries transient failures with exponential backoff.
pub struct LlmClient {
    provider:     LlmProvider,
    client:       reqwest::Client,
    retry_config: RetryConfig,
    temperature:  f32,
    max_tokens:   u32
}

#[derive(Serialize)]
struct ChatCompletionsRequest {
    model:       String,
    messages:    Vec<ChatMessage>,
    temperature: f32,
    max_tokens:  u32
}

#[derive(Serialize)]
struct ChatMessage {
    role:    String,
    content: String
}

#[derive(Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
    usage:   Option<ChatCompletionsUsage>
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String
}

#[derive(Deserialize)]
struct ChatCompletionsUsage {
    prompt_tokens:     u64,
    completion_tokens: u64,
    total_tokens:      u64
}

#[derive(Serialize)]
struct AnthropicRequest {
    model:       String,
    max_tokens:  u32,
    temperature: f32,
    system:      String,
    messages:    Vec<AnthropicMessage>
}

#[derive(Serialize)]
struct AnthropicMessage {
    role:    String,
    content: String
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    usage:   Option<AnthropicUsage>
}

#[derive(Deserialize)]
struct AnthropicContent {
    text: String
}

#[derive(Deserialize)]
struct AnthropicUsage {
    input_tokens:  u64,
    output_tokens: u64
}

#[derive(Serialize)]
struct OllamaRequest {
    model:   String,
    system:  String,
    prompt:  String,
    stream:  bool,
    options: OllamaOptions
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32
}

#[derive(Deserialize)]
struct OllamaResponse {
    response:          String,
    prompt_eval_count: Option<u64>,
    eval_count:        Option<u64>
}

impl LlmClient {
    /// Create new LLM client with default retry and sampling configuration
    #[allow(dead_code)]
    pub fn new(provider: LlmProvider) -> Self {
        Self::with_config(
            provider,
            RetryConfig::default(),
            &GenerationConfig::default()
        )
    }

    /// Create new LLM client with custom retry and sampling configuration
    pub fn with_config(
        provider: LlmProvider,
        retry_config: RetryConfig,
        generation: &GenerationConfig
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            provider,
            client,
            retry_config,
            temperature: generation.temperature,
            max_tokens: generation.max_tokens
        }
    }

    /// Send one generation request with automatic transport retry
    pub async fn generate(&self, system_prompt: &str, user_prompt: &str) -> AppResult<ChatOutcome> {
        self.call_with_retry(system_prompt, user_prompt).await
    }

    async fn call_with_retry(&self, system: &str, user: &str) -> AppResult<ChatOutcome> {
        let mut last_error = None;
        let mut delay = self.retry_config.initial_delay_ms;
        for attempt in 0..=self.retry_config.max_retries {
            if attempt > 0 {
                eprintln!(
                    "Retrying LLM request (attempt {}/{}), waiting {}ms...",
                    attempt + 1,
                    self.retry_config.max_retries + 1,
                    delay
                );
                sleep(Duration::from_millis(delay)).await;
                delay = ((delay as f64 * self.retry_config.backoff_factor) as u64)
                    .min(self.retry_config.max_delay_ms);
            }
            let started = Instant::now();
            match self.call_provider(system, user).await {
                Ok((text, usage)) => {
                    return Ok(ChatOutcome {
                        text,
                        usage,
                        latency: started.elapsed()
                    });
                }
                Err(e) => {
                    if self.is_retryable_error(&e) {
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| llm_api_error("All retry attempts failed")))
    }

    fn is_retryable_error(&self, error: &masterror::AppError) -> bool {
        let msg = error.to_string().to_lowercase();
        msg.contains("timeout")
            || msg.contains("connection")
            || msg.contains("429")
            || msg.contains("rate limit")
            || msg.contains("500")
            || msg.contains("502")
            || msg.contains("503")
            || msg.contains("504")
    }

    async fn call_provider(
        &self,
        system: &str,
        user: &str
    ) -> AppResult<(String, Option<TokenUsage>)> {
        match &self.provider {
            LlmProvider::Groq {
                api_key,
                model
            } => {
                self.call_chat_completions(
                    "https://api.groq.com/openai/v1/chat/completions",
                    api_key,
                    model,
                    system,
                    user
                )
                .await
            }
            LlmProvider::OpenAI {
                api_key,
                model
            } => {
                self.call_chat_completions(
                    "https://api.openai.com/v1/chat/completions",
                    api_key,
                    model,
                    system,
                    user
                )
                .await
            }
            LlmProvider::Anthropic {
                api_key,
                model
            } => self.call_anthropic(api_key, model, system, user).await,
            LlmProvider::Ollama {
                base_url,
                model
            } => self.call_ollama(base_url, model, system, user).await
        }
    }

    /// Groq and OpenAI both speak the OpenAI chat-completions protocol.
    async fn call_chat_completions(
        &self,
        url: &str,
        api_key: &str,
        model: &str,
        system: &str,
        user: &str
    ) -> AppResult<(String, Option<TokenUsage>)> {
        let request = ChatCompletionsRequest {
            model:       model.to_string(),
            messages:    vec![
                ChatMessage {
                    role:    String::from("system"),
                    content: system.to_string()
                },
                ChatMessage {
                    role:    String::from("user"),
                    content: user.to_string()
                },
            ],
            temperature: self.temperature,
            max_tokens:  self.max_tokens
        };
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(http_error)?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(llm_api_error(format!(
                "Chat completions API error {}: {}",
                status, text
            )));
        }
        let result: ChatCompletionsResponse = response.json().await.map_err(http_error)?;
        let usage = result.usage.map(|u| TokenUsage {
            prompt_tokens:     u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens:      u.total_tokens
        });
        result
            .choices
            .first()
            .map(|c| (c.message.content.clone(), usage))
            .ok_or_else(|| llm_api_error("Empty response from chat completions API"))
    }

    async fn call_anthropic(
        &self,
        api_key: &str,
        model: &str,
        system: &str,
        user: &str
    ) -> AppResult<(String, Option<TokenUsage>)> {
        let request = AnthropicRequest {
            model:       model.to_string(),
            max_tokens:  self.max_tokens,
            temperature: self.temperature,
            system:      system.to_string(),
            messages:    vec![AnthropicMessage {
                role:    String::from("user"),
                content: user.to_string()
            }]
        };
        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await
            .map_err(http_error)?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(llm_api_error(format!(
                "Anthropic API error {}: {}",
                status, text
            )));
        }
        let result: AnthropicResponse = response.json().await.map_err(http_error)?;
        let usage = result.usage.map(|u| TokenUsage {
            prompt_tokens:     u.input_tokens,
            completion_tokens: u.output_tokens,
            total_tokens:      u.input_tokens + u.output_tokens
        });
        result
            .content
            .first()
            .map(|c| (c.text.clone(), usage))
            .ok_or_else(|| llm_api_error("Empty response from Anthropic"))
    }

    async fn call_ollama(
        &self,
        base_url: &str,
        model: &str,
        system: &str,
        user: &str
    ) -> AppResult<(String, Option<TokenUsage>)> {
        let request = OllamaRequest {
            model:   model.to_string(),
            system:  system.to_string(),
            prompt:  user.to_string(),
            stream:  false,
            options: OllamaOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens
            }
        };
        let url = format!("{}/api/generate", base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(http_error)?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(llm_api_error(format!(
                "Ollama API error {}: {}",
                status, text
            )));
        }
        let result: OllamaResponse = response.json().await.map_err(http_error)?;
        let usage = match (result.prompt_eval_count, result.eval_count) {
            (Some(prompt), Some(completion)) => Some(TokenUsage {
                prompt_tokens:     prompt,
                completion_tokens: completion,
                total_tokens:      prompt + completion
            }),
            _ => None
        };
        Ok((result.response, usage))
    }
}
