//! Helper functions for CLI operations.
//!
//! This module provides utility functions used throughout the CLI
//! application for building LLM providers, resolving effective
//! configuration values, and calculating exit codes.

use crate::{
    cli::Provider,
    error::{AppResult, config_error},
    llm::LlmProvider,
    output::OutputOptions
};

/// Calculates the process exit code for a finished run.
///
/// - `0` - every selected question produced a record
/// - `1` - at least one question exhausted its retries and got a failure
///   record
pub fn calculate_exit_code(failed: usize) -> i32 {
    if failed > 0 { 1 } else { 0 }
}

/// Creates output options from CLI parameters.
pub fn create_output_options(no_color: bool, verbose: bool) -> OutputOptions {
    OutputOptions {
        colored: !no_color,
        verbose
    }
}

/// Builds an LLM provider configuration from CLI parameters.
///
/// Constructs the appropriate `LlmProvider` variant based on the
/// selected provider type. For cloud providers (Groq, OpenAI,
/// Anthropic), an API key is required.
///
/// # Errors
///
/// Returns an error if a cloud provider is selected without an API key.
pub fn build_llm_provider(
    provider: Provider,
    api_key: Option<String>,
    model: String,
    ollama_url: String
) -> AppResult<LlmProvider> {
    match provider {
        Provider::Groq => {
            let key = api_key.ok_or_else(|| {
                config_error("API key required for Groq (use --api-key or LLM_API_KEY)")
            })?;
            Ok(LlmProvider::Groq {
                api_key: key,
                model
            })
        }
        Provider::OpenAI => {
            let key = api_key.ok_or_else(|| {
                config_error("API key required for OpenAI (use --api-key or LLM_API_KEY)")
            })?;
            Ok(LlmProvider::OpenAI {
                api_key: key,
                model
            })
        }
        Provider::Anthropic => {
            let key = api_key.ok_or_else(|| {
                config_error("API key required for Anthropic (use --api-key or LLM_API_KEY)")
            })?;
            Ok(LlmProvider::Anthropic {
                api_key: key,
                model
            })
        }
        Provider::Ollama => Ok(LlmProvider::Ollama {
            base_url: ollama_url,
            model
        })
    }
}

/// Checks if LLM access is available.
///
/// Ollama doesn't require an API key, while cloud providers do.
pub fn has_llm_access(api_key: &Option<String>, provider: &Provider) -> bool {
    api_key.is_some() || matches!(provider, Provider::Ollama)
}

/// Gets the effective model name from available sources.
///
/// Resolves the model name in order of precedence:
/// 1. Explicitly provided model name
/// 2. Model from configuration file
/// 3. Default model for the provider
pub fn get_effective_model(
    model: Option<String>,
    config_model: Option<String>,
    provider: &Provider
) -> String {
    model
        .or(config_model)
        .unwrap_or_else(|| provider.default_model().to_string())
}

/// Gets the effective Ollama URL from available sources.
///
/// Uses the config URL if the provided URL is the default localhost,
/// otherwise uses the explicitly provided URL.
pub fn get_effective_ollama_url(url: String, config_url: Option<String>) -> String {
    if url == "http://localhost:11434" {
        config_url.unwrap_or(url)
    } else {
        url
    }
}

/// Gets the effective export directory from available sources.
///
/// Uses the config directory if the provided one is the built-in default,
/// otherwise uses the explicitly provided directory.
pub fn get_effective_output_dir(dir: String, config_dir: Option<String>) -> String {
    if dir == "output" {
        config_dir.unwrap_or(dir)
    } else {
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_exit_code_all_generated() {
        assert_eq!(calculate_exit_code(0), 0);
    }

    #[test]
    fn test_calculate_exit_code_with_failures() {
        assert_eq!(calculate_exit_code(2), 1);
    }

    #[test]
    fn test_has_llm_access_with_api_key() {
        assert!(has_llm_access(&Some("key".to_string()), &Provider::Groq));
    }

    #[test]
    fn test_has_llm_access_ollama_no_key() {
        assert!(has_llm_access(&None, &Provider::Ollama));
    }

    #[test]
    fn test_has_llm_access_groq_no_key() {
        assert!(!has_llm_access(&None, &Provider::Groq));
    }

    #[test]
    fn test_has_llm_access_anthropic_no_key() {
        assert!(!has_llm_access(&None, &Provider::Anthropic));
    }

    #[test]
    fn test_get_effective_model_explicit() {
        let model = get_effective_model(Some("gpt-4o".to_string()), None, &Provider::OpenAI);
        assert_eq!(model, "gpt-4o");
    }

    #[test]
    fn test_get_effective_model_from_config() {
        let model = get_effective_model(None, Some("claude-3".to_string()), &Provider::Anthropic);
        assert_eq!(model, "claude-3");
    }

    #[test]
    fn test_get_effective_model_default() {
        let model = get_effective_model(None, None, &Provider::Groq);
        assert_eq!(model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_get_effective_ollama_url_explicit() {
        let url = get_effective_ollama_url(
            "http://custom:11434".to_string(),
            Some("http://other:11434".to_string())
        );
        assert_eq!(url, "http://custom:11434");
    }

    #[test]
    fn test_get_effective_ollama_url_from_config() {
        let url = get_effective_ollama_url(
            "http://localhost:11434".to_string(),
            Some("http://config:11434".to_string())
        );
        assert_eq!(url, "http://config:11434");
    }

    #[test]
    fn test_get_effective_output_dir_explicit() {
        let dir = get_effective_output_dir("exports".to_string(), Some("configured".to_string()));
        assert_eq!(dir, "exports");
    }

    #[test]
    fn test_get_effective_output_dir_from_config() {
        let dir = get_effective_output_dir("output".to_string(), Some("configured".to_string()));
        assert_eq!(dir, "configured");
    }

    #[test]
    fn test_create_output_options() {
        let opts = create_output_options(true, true);
        assert!(!opts.colored);
        assert!(opts.verbose);
    }

    #[test]
    fn test_build_llm_provider_ollama() {
        let provider = build_llm_provider(
            Provider::Ollama,
            None,
            "llama3".to_string(),
            "http://localhost:11434".to_string()
        )
        .unwrap();
        assert!(matches!(provider, LlmProvider::Ollama { .. }));
    }

    #[test]
    fn test_build_llm_provider_groq_no_key() {
        let result = build_llm_provider(
            Provider::Groq,
            None,
            "llama-3.3-70b-versatile".to_string(),
            "http://localhost:11434".to_string()
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_llm_provider_groq_with_key() {
        let provider = build_llm_provider(
            Provider::Groq,
            Some("gsk-test".to_string()),
            "llama-3.3-70b-versatile".to_string(),
            "http://localhost:11434".to_string()
        )
        .unwrap();
        assert!(matches!(provider, LlmProvider::Groq { .. }));
    }

    #[test]
    fn test_build_llm_provider_openai_with_key() {
        let provider = build_llm_provider(
            Provider::OpenAI,
            Some("sk-test".to_string()),
            "gpt-4".to_string(),
            "http://localhost:11434".to_string()
        )
        .unwrap();
        assert!(matches!(provider, LlmProvider::OpenAI { .. }));
    }

    #[test]
    fn test_build_llm_provider_anthropic_no_key() {
        let result = build_llm_provider(
            Provider::Anthropic,
            None,
            "claude-3".to_string(),
            "http://localhost:11434".to_string()
        );
        assert!(result.is_err());
    }
}
