//! Integration tests for the sql-query-generator binary.
//!
//! Network-dependent paths are exercised through --dry-run so no test ever
//! reaches an LLM API.

use std::io::Write;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("sql-query-generator");
    cmd.env_remove("LLM_API_KEY");
    cmd.env_remove("LLM_PROVIDER");
    cmd.env_remove("LLM_MODEL");
    cmd
}

fn schema_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "database": "sales_dw",
            "tables": {{
                "orders": {{
                    "columns": {{
                        "order_id": {{ "type": "INT", "description": "unique order id" }},
                        "total": {{ "type": "DECIMAL(10,2)", "description": "order total" }}
                    }}
                }}
            }}
        }}"#
    )
    .unwrap();
    file
}

fn questions_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "question_id,question").unwrap();
    writeln!(file, "1,Total revenue last month?").unwrap();
    writeln!(file, "2,Top 5 customers by revenue?").unwrap();
    file
}

#[test]
fn test_dry_run_success() {
    let schema = schema_file();
    let questions = questions_file();

    cmd()
        .args([
            "generate",
            "-s",
            schema.path().to_str().unwrap(),
            "-q",
            questions.path().to_str().unwrap(),
            "--dry-run",
            "--no-color"
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("Database: sales_dw"))
        .stdout(predicate::str::contains("Total revenue last month?"));
}

#[test]
fn test_dry_run_with_selection() {
    let schema = schema_file();
    let questions = questions_file();

    cmd()
        .args([
            "generate",
            "-s",
            schema.path().to_str().unwrap(),
            "-q",
            questions.path().to_str().unwrap(),
            "--select",
            "2",
            "--dry-run",
            "--no-color"
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 5 customers by revenue?"));
}

#[test]
fn test_invalid_selection_fails() {
    let schema = schema_file();
    let questions = questions_file();

    cmd()
        .args([
            "generate",
            "-s",
            schema.path().to_str().unwrap(),
            "-q",
            questions.path().to_str().unwrap(),
            "--select",
            "abc",
            "--dry-run"
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid question selection"));
}

#[test]
fn test_schema_file_not_found() {
    let questions = questions_file();

    cmd()
        .args([
            "generate",
            "-s",
            "/nonexistent/schema.json",
            "-q",
            questions.path().to_str().unwrap(),
            "--dry-run"
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_missing_api_key_fails() {
    let schema = schema_file();
    let questions = questions_file();

    cmd()
        .args([
            "generate",
            "-s",
            schema.path().to_str().unwrap(),
            "-q",
            questions.path().to_str().unwrap(),
            "--provider",
            "groq"
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key required"));
}

#[test]
fn test_help_lists_generate() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"));
}
