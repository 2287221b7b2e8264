//! Application types for CLI commands.
//!
//! This module defines the data structures passed between the CLI entry
//! point and the generation pipeline.

use std::path::PathBuf;

use crate::{
    cli::{ExportFormat, Provider},
    output::RunSummary,
    response::GenerationRecord
};

/// Parameters for the generate command.
///
/// Contains all configuration options passed from the CLI to control
/// the generation run, including schema and question paths, LLM settings,
/// and export preferences.
#[derive(Debug, Clone)]
pub struct GenerateParams {
    /// Paths to warehouse schema JSON files, one per warehouse.
    pub schema_paths:   Vec<String>,
    /// Path to the questions CSV file.
    pub questions_path: String,
    /// Question selection expression, e.g. "1-6,9"; None selects all.
    pub select:         Option<String>,
    /// LLM provider for generation.
    pub provider:       Provider,
    /// API key for cloud LLM providers (Groq, OpenAI, Anthropic).
    pub api_key:        Option<String>,
    /// Model name to use for generation.
    pub model:          Option<String>,
    /// Base URL for Ollama server.
    pub ollama_url:     String,
    /// Export formats to write after the run.
    pub exports:        Vec<ExportFormat>,
    /// Directory for export files.
    pub output_dir:     String,
    /// Enable verbose output with per-question details.
    pub verbose:        bool,
    /// Dry run mode - show prompts without calling the LLM.
    pub dry_run:        bool,
    /// Disable colored terminal output.
    pub no_color:       bool
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Exit code: 0 all questions generated, 1 some questions failed.
    pub exit_code:    i32,
    /// Effective model name used for the run.
    pub model:        String,
    /// One record per selected question, in CSV order.
    pub records:      Vec<GenerationRecord>,
    /// Aggregate statistics; absent in dry-run mode.
    pub summary:      Option<RunSummary>,
    /// Export files created by the run.
    pub exported:     Vec<PathBuf>,
    /// Present when running in dry-run mode.
    pub dry_run_info: Option<DryRunInfo>
}

/// Information shown during dry run mode.
///
/// Contains the prompts that would be sent to the LLM, allowing users to
/// preview the data before spending API calls.
#[derive(Debug, Clone)]
pub struct DryRunInfo {
    /// Rendered schema blocks for every loaded warehouse.
    pub schema_overview:      String,
    /// System prompt for the first selected question.
    pub sample_system_prompt: String,
    /// User prompt for the first selected question.
    pub sample_user_prompt:   String,
    /// IDs of the questions the run would process.
    pub selected_ids:         Vec<u32>
}
