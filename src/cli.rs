use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Query Generator - Turn natural-language analytics questions into ANSI SQL using LLM
#[derive(Parser, Debug)]
#[command(name = "sql-query-generator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate SQL for analytics questions against warehouse schemas
    Generate {
        /// Path to a warehouse schema JSON file (repeat for multiple warehouses)
        #[arg(short, long, required = true)]
        schema: Vec<PathBuf>,

        /// Path to questions CSV file with a question_id,question header
        #[arg(short, long)]
        questions: PathBuf,

        /// Question IDs to process, e.g. "1-6", "1,5,7", "15-20" (default: all)
        #[arg(long)]
        select: Option<String>,

        /// LLM provider to use
        #[arg(short, long, value_enum, default_value = "groq")]
        provider: Provider,

        /// API key for Groq, OpenAI or Anthropic
        #[arg(short, long, env = "LLM_API_KEY")]
        api_key: Option<String>,

        /// Model name
        #[arg(short, long)]
        model: Option<String>,

        /// Ollama base URL
        #[arg(long, default_value = "http://localhost:11434")]
        ollama_url: String,

        /// Export formats, comma separated
        #[arg(
            short = 'e',
            long,
            value_enum,
            value_delimiter = ',',
            default_value = "csv"
        )]
        export: Vec<ExportFormat>,

        /// Directory for export files
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Enable verbose output with per-question details
        #[arg(short, long)]
        verbose: bool,

        /// Show what would be sent to the LLM without making API calls
        #[arg(long)]
        dry_run: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Provider {
    Groq,
    OpenAI,
    Anthropic,
    Ollama
}

impl Provider {
    /// Get default model for provider
    pub fn default_model(&self) -> &str {
        match self {
            Self::Groq => "llama-3.3-70b-versatile",
            Self::OpenAI => "gpt-4",
            Self::Anthropic => "claude-sonnet-4-20250514",
            Self::Ollama => "llama3.2"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
    Markdown
}
