//! Extraction of generation records from free-form model output.
//!
//! Even with a strict-JSON instruction, models wrap the object in Markdown
//! fences, lead with prose, break string literals across lines, or leave
//! trailing commas. The extraction pass recovers the record anyway:
//!
//! 1. strip code fences,
//! 2. slice from the first `{` to the last `}`,
//! 3. merge lines that continue an open string literal (an unescaped line
//!    break inside a string is the most common way models emit multi-line
//!    SQL),
//! 4. parse; on failure drop trailing commas before `}` / `]` and retry
//!    once.
//!
//! Missing fields are filled with sentinel defaults rather than failing the
//! whole record. Identity fields (`question_id`, `question`) always come
//! from the source question, never from the model's echo.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{AppResult, response_parse_error},
    questions::Question
};

/// SQL stub stored when the model output held no usable `sql` field.
pub const SQL_PARSE_STUB: &str = "-- Error parsing response";

/// SQL stub stored when generation failed after exhausting retries.
pub const SQL_FAILURE_STUB: &str = "-- Error during generation";

static TRAILING_COMMA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("valid regex"));

/// One generated answer: the target warehouse, the SQL, and the model's
/// self-assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Identifier of the source question
    pub question_id:   u32,
    /// Natural-language question text
    pub question:      String,
    /// Warehouse database the SQL targets, "N/A" when none qualifies
    pub target_source: String,
    /// Generated SQL, or a `--` comment stub explaining why there is none
    pub sql:           String,
    /// Model's free-text reasoning about what it validated and assumed
    pub assumptions:   String,
    /// Model's self-assessed certainty, clamped to [0, 1]
    pub confidence:    f64
}

impl GenerationRecord {
    /// Build the record stored when every attempt for a question failed
    pub fn failure(question: &Question, attempts: u32, error: &str) -> Self {
        Self {
            question_id:   question.question_id,
            question:      question.question.clone(),
            target_source: String::from("Unknown"),
            sql:           String::from(SQL_FAILURE_STUB),
            assumptions:   format!("System error after {} retries: {}", attempts, error),
            confidence:    0.0
        }
    }

    /// Whether the record carries runnable SQL rather than a comment stub
    pub fn generated(&self) -> bool {
        self.confidence > 0.0 && !self.sql.trim_start().starts_with("--")
    }
}

/// Extract a generation record for `question` from raw model output
///
/// # Errors
///
/// Returns error when no JSON object can be recovered from the text
pub fn extract_record(text: &str, question: &Question) -> AppResult<GenerationRecord> {
    let value = extract_json(text)
        .ok_or_else(|| response_parse_error("no JSON object found in model output"))?;
    Ok(record_from_value(&value, question))
}

/// Recover a JSON value from free-form model text.
///
/// Returns `None` when no braces are present or the candidate cannot be
/// repaired into valid JSON.
pub fn extract_json(text: &str) -> Option<Value> {
    let stripped = text.replace("```json", "").replace("```", "");
    let start = stripped.find('{')?;
    let end = stripped.rfind('}')?;
    if end < start {
        return None;
    }
    let candidate = &stripped[start..=end];
    let repaired = merge_broken_strings(candidate);
    if let Ok(value) = serde_json::from_str(&repaired) {
        return Some(value);
    }
    let relaxed = TRAILING_COMMA_REGEX.replace_all(&repaired, "$1");
    serde_json::from_str(&relaxed).ok()
}

/// Merge lines that continue a string literal opened on an earlier line.
///
/// Tracks quote parity per line: a line with an odd number of unescaped
/// quotes opens or closes a string. Lines starting while a string is open
/// are joined to their predecessor with a space, which removes the raw
/// newline the model illegally embedded in the literal.
fn merge_broken_strings(json: &str) -> String {
    let mut cleaned: Vec<String> = Vec::new();
    let mut in_string = false;
    for line in json.lines() {
        let was_in_string = in_string;
        if unescaped_quote_count(line) % 2 == 1 {
            in_string = !in_string;
        }
        let trimmed = line.trim();
        if was_in_string {
            if let Some(last) = cleaned.last_mut() {
                last.push(' ');
                last.push_str(trimmed);
                continue;
            }
        }
        cleaned.push(trimmed.to_string());
    }
    cleaned.join("\n")
}

fn unescaped_quote_count(line: &str) -> usize {
    line.matches('"').count() - line.matches("\\\"").count()
}

fn record_from_value(value: &Value, question: &Question) -> GenerationRecord {
    let target_source = value
        .get("target_source")
        .and_then(Value::as_str)
        .unwrap_or("N/A")
        .to_string();
    let sql = value
        .get("sql")
        .and_then(Value::as_str)
        .unwrap_or(SQL_PARSE_STUB)
        .to_string();
    let assumptions = value
        .get("assumptions")
        .and_then(Value::as_str)
        .unwrap_or("AI did not provide reasoning")
        .to_string();
    let confidence = confidence_from_value(value.get("confidence")).clamp(0.0, 1.0);
    GenerationRecord {
        question_id: question.question_id,
        question: question.question.clone(),
        target_source,
        sql,
        assumptions,
        confidence
    }
}

/// Models emit confidence as a number or a numeric string; anything else
/// counts as zero.
fn confidence_from_value(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0
    }
}
