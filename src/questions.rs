//! Question loading and selection parsing.
//!
//! Questions come from a CSV file with a `question_id,question` header.
//! A selection expression narrows the run to a subset of IDs:
//!
//! - `1-6` - an inclusive range
//! - `1,5,7` - individual IDs
//! - `15-20,3,1-2` - mixed forms, in any order
//!
//! Malformed tokens and inverted ranges are errors; the run fails fast
//! instead of silently processing an unintended set. Selected IDs that match
//! no loaded question are reported back to the caller but are not fatal,
//! since question IDs in the CSV need not be dense.

use indexmap::IndexSet;
use serde::Deserialize;

use crate::error::{AppResult, questions_parse_error, selection_error};

/// One analytics question loaded from the questions CSV.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    /// Stable identifier from the CSV
    pub question_id: u32,
    /// Natural-language question text
    pub question:    String
}

/// Load questions from a CSV file with a `question_id,question` header
///
/// # Errors
///
/// Returns error if the file cannot be opened or a row fails to deserialize
pub fn load_questions(path: &str) -> AppResult<Vec<Question>> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| questions_parse_error(path, e.to_string()))?;
    let mut questions = Vec::new();
    for row in reader.deserialize() {
        let question: Question = row.map_err(|e| questions_parse_error(path, e.to_string()))?;
        questions.push(question);
    }
    Ok(questions)
}

/// Parse a selection expression like `"1-6,9,15-20"` into an ordered ID set
///
/// # Errors
///
/// Returns error on malformed tokens, inverted ranges, or an expression that
/// selects nothing
pub fn parse_selection(expr: &str) -> AppResult<IndexSet<u32>> {
    let mut ids = IndexSet::new();
    for part in expr.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.split_once('-') {
            Some((start, end)) => {
                let start = parse_id(start, part)?;
                let end = parse_id(end, part)?;
                if start > end {
                    return Err(selection_error(format!("range '{}' is inverted", part)));
                }
                ids.extend(start..=end);
            }
            None => {
                ids.insert(parse_id(part, part)?);
            }
        }
    }
    if ids.is_empty() {
        return Err(selection_error(format!("'{}' selects nothing", expr)));
    }
    Ok(ids)
}

fn parse_id(token: &str, context: &str) -> AppResult<u32> {
    token
        .trim()
        .parse()
        .map_err(|_| selection_error(format!("'{}' is not a question ID", context)))
}

/// Filter questions by a selection, preserving CSV order.
///
/// Returns the selected questions and the selected IDs that matched no
/// loaded question.
pub fn apply_selection(
    questions: &[Question],
    ids: &IndexSet<u32>
) -> (Vec<Question>, Vec<u32>) {
    let selected: Vec<Question> = questions
        .iter()
        .filter(|q| ids.contains(&q.question_id))
        .cloned()
        .collect();
    let missing: Vec<u32> = ids
        .iter()
        .copied()
        .filter(|id| !questions.iter().any(|q| q.question_id == *id))
        .collect();
    (selected, missing)
}
