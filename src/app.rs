//! Application logic for the SQL Query Generator CLI.
//!
//! This module contains the pipeline logic separated from the main entry
//! point to enable testing.

mod generate;
mod helpers;
mod types;

pub use generate::run_generate;
pub use helpers::{
    build_llm_provider, calculate_exit_code, create_output_options, get_effective_model,
    get_effective_ollama_url, get_effective_output_dir, has_llm_access
};
pub use types::{DryRunInfo, GenerateParams, GenerateResult};
