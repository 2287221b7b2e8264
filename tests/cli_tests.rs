// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_query_generator::cli::{ExportFormat, Provider};

#[test]
fn test_provider_default_model_groq() {
    let provider = Provider::Groq;
    assert_eq!(provider.default_model(), "llama-3.3-70b-versatile");
}

#[test]
fn test_provider_default_model_openai() {
    let provider = Provider::OpenAI;
    assert_eq!(provider.default_model(), "gpt-4");
}

#[test]
fn test_provider_default_model_anthropic() {
    let provider = Provider::Anthropic;
    assert_eq!(provider.default_model(), "claude-sonnet-4-20250514");
}

#[test]
fn test_provider_default_model_ollama() {
    let provider = Provider::Ollama;
    assert_eq!(provider.default_model(), "llama3.2");
}

#[test]
fn test_provider_clone() {
    let provider = Provider::Groq;
    let cloned = provider.clone();
    assert_eq!(cloned.default_model(), "llama-3.3-70b-versatile");
}

#[test]
fn test_export_format_variants() {
    let _csv = ExportFormat::Csv;
    let _json = ExportFormat::Json;
    let _yaml = ExportFormat::Yaml;
    let _markdown = ExportFormat::Markdown;
}

#[test]
fn test_export_format_equality() {
    assert_eq!(ExportFormat::Csv, ExportFormat::Csv);
    assert_ne!(ExportFormat::Csv, ExportFormat::Markdown);
}
