// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use std::io::Write;

use indexmap::IndexSet;
use sql_query_generator::questions::{
    Question, apply_selection, load_questions, parse_selection
};
use tempfile::NamedTempFile;

fn sample_questions() -> Vec<Question> {
    vec![
        Question {
            question_id: 1,
            question:    String::from("Total revenue last month?")
        },
        Question {
            question_id: 2,
            question:    String::from("Top 5 customers by revenue?")
        },
        Question {
            question_id: 5,
            question:    String::from("Campaign click-through rate?")
        },
    ]
}

#[test]
fn test_load_questions_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "question_id,question").unwrap();
    writeln!(file, "1,Total revenue last month?").unwrap();
    writeln!(file, "2,\"Top 5 customers, by revenue?\"").unwrap();

    let questions = load_questions(file.path().to_str().unwrap()).unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].question_id, 1);
    assert_eq!(questions[1].question, "Top 5 customers, by revenue?");
}

#[test]
fn test_load_questions_bad_row_is_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "question_id,question").unwrap();
    writeln!(file, "not-a-number,broken row").unwrap();

    let result = load_questions(file.path().to_str().unwrap());
    assert!(result.is_err());
}

#[test]
fn test_load_questions_missing_file_is_error() {
    assert!(load_questions("/nonexistent/questions.csv").is_err());
}

#[test]
fn test_parse_selection_range() {
    let ids = parse_selection("1-4").unwrap();
    let expected: IndexSet<u32> = (1..=4).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_parse_selection_individual_ids() {
    let ids = parse_selection("1,5,7").unwrap();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&5));
}

#[test]
fn test_parse_selection_mixed() {
    let ids = parse_selection("15-17, 3, 1-2").unwrap();
    assert_eq!(ids.len(), 6);
    assert!(ids.contains(&16));
    assert!(ids.contains(&3));
    assert!(ids.contains(&1));
}

#[test]
fn test_parse_selection_duplicates_collapse() {
    let ids = parse_selection("1-3,2,3").unwrap();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_parse_selection_malformed_token_is_error() {
    assert!(parse_selection("1,abc,3").is_err());
}

#[test]
fn test_parse_selection_inverted_range_is_error() {
    assert!(parse_selection("6-1").is_err());
}

#[test]
fn test_parse_selection_empty_is_error() {
    assert!(parse_selection("").is_err());
    assert!(parse_selection(" , ,").is_err());
}

#[test]
fn test_apply_selection_preserves_csv_order() {
    let questions = sample_questions();
    let ids = parse_selection("5,1").unwrap();
    let (selected, missing) = apply_selection(&questions, &ids);

    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0].question_id, 1);
    assert_eq!(selected[1].question_id, 5);
    assert!(missing.is_empty());
}

#[test]
fn test_apply_selection_reports_missing_ids() {
    let questions = sample_questions();
    let ids = parse_selection("1,3,9").unwrap();
    let (selected, missing) = apply_selection(&questions, &ids);

    assert_eq!(selected.len(), 1);
    assert_eq!(missing, vec![3, 9]);
}
