//! # SQL Query Generator
//!
//! LLM-powered pipeline turning natural-language analytics questions into
//! ANSI SQL.
//!
//! `sql-query-generator` loads one or more data-warehouse schemas, reads
//! analytics questions from CSV, and prompts an LLM provider to produce a
//! structured generation record per question: the target warehouse, the SQL,
//! the model's assumptions, and a self-assessed confidence score. The raw
//! model output is repaired into JSON, the SQL is normalized from vendor
//! dialect fragments into ANSI-compatible form, and the records are exported
//! as CSV, JSON, YAML, or a Markdown report.
//!
//! # Pipeline
//!
//! 1. **Load** - warehouse schemas (JSON) and questions (CSV)
//! 2. **Select** - narrow the run with a `1-6,9,15-20` expression
//! 3. **Generate** - one LLM call per question with transport and
//!    parse-level retry
//! 4. **Normalize** - rewrite `TOP n`, `DATE_SUB`, and interval spellings
//!    into ANSI form, then check the result parses
//! 5. **Export** - timestamped flat files plus a colored console summary
//!
//! The pipeline is sequential by design: questions are processed one at a
//! time, and the tool makes no correctness guarantee on model output beyond
//! the structural repair and normalization passes.
//!
//! # Quick Start
//!
//! ```bash
//! # Generate SQL for all questions against two warehouses
//! export LLM_API_KEY="gsk_..."
//! sql-query-generator generate \
//!     -s sales_dw.json -s marketing_dw.json \
//!     -q questions.csv
//!
//! # Process a subset and write every export format
//! sql-query-generator generate \
//!     -s sales_dw.json -s marketing_dw.json \
//!     -q questions.csv --select "1-6,9" \
//!     -e csv,json,yaml,markdown
//!
//! # Preview prompts without spending API calls
//! sql-query-generator generate -s sales_dw.json -q questions.csv --dry-run
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`LLM_API_KEY`, `LLM_PROVIDER`, etc.)
//! 3. `.sql-generator.toml` in current directory
//! 4. `~/.config/sql-generator/config.toml`
//!
//! ## Example Configuration
//!
//! ```toml
//! [llm]
//! provider = "groq"
//! model = "llama-3.3-70b-versatile"
//!
//! [generation]
//! temperature = 0.1
//! max_tokens = 2000
//! attempts = 3
//!
//! [export]
//! output_dir = "output"
//! ```
//!
//! # Exit Codes
//!
//! - `0` - every selected question produced a record
//! - `1` - at least one question failed after exhausting retries, or a
//!   fatal setup error occurred
//!
//! # Modules
//!
//! - [`app`] - pipeline orchestration and CLI helpers
//! - [`schema`] - warehouse schema loading and prompt rendering
//! - [`questions`] - CSV question loading and selection parsing
//! - [`prompt`] - system/user prompt construction
//! - [`llm`] - LLM provider integrations (Groq, OpenAI, Anthropic, Ollama)
//! - [`response`] - JSON recovery from free-form model output
//! - [`rewrite`] - ANSI normalization of generated SQL
//! - [`cache`] - per-run record cache for repeated question texts
//! - [`export`] - CSV/JSON/YAML/Markdown export files
//! - [`output`] - run summary and console formatting
//! - [`config`] - configuration loading and validation
//! - [`error`] - error types and constructors

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod llm;
pub mod output;
pub mod prompt;
pub mod questions;
pub mod response;
pub mod rewrite;
pub mod schema;
