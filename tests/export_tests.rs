// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use std::fs;

use sql_query_generator::{
    cli::ExportFormat,
    export::{ReportMeta, export_records, render_markdown, run_timestamp},
    output::RunSummary,
    response::GenerationRecord
};
use tempfile::TempDir;

fn sample_records() -> Vec<GenerationRecord> {
    vec![
        GenerationRecord {
            question_id:   1,
            question:      String::from("Total revenue last month?"),
            target_source: String::from("sales_dw"),
            sql:           String::from("SELECT SUM(total) FROM orders"),
            assumptions:   String::from("orders.total holds the order amount"),
            confidence:    0.9
        },
        GenerationRecord {
            question_id:   2,
            question:      String::from("Ad spend per social channel?"),
            target_source: String::from("N/A"),
            sql:           String::from("-- Cannot generate: no channel table in either warehouse"),
            assumptions:   String::from("neither warehouse documents social channels"),
            confidence:    0.2
        },
    ]
}

fn meta() -> ReportMeta {
    ReportMeta {
        model:        String::from("llama-3.3-70b-versatile"),
        temperature:  0.1,
        generated_at: String::from("2026-08-06 12:00:00")
    }
}

#[test]
fn test_run_timestamp_shape() {
    let stamp = run_timestamp();
    assert_eq!(stamp.len(), 15);
    assert_eq!(stamp.chars().nth(8), Some('_'));
}

#[test]
fn test_export_csv() {
    let records = sample_records();
    let summary = RunSummary::from_records(&records, &[], &[]);
    let dir = TempDir::new().unwrap();

    let created = export_records(
        &records,
        &summary,
        &[ExportFormat::Csv],
        dir.path(),
        &meta(),
        "20260806_120000"
    )
    .unwrap();

    assert_eq!(created.len(), 1);
    let content = fs::read_to_string(&created[0]).unwrap();
    assert!(content.starts_with("question_id,question,target_source,sql,assumptions,confidence"));
    assert!(content.contains("SELECT SUM(total) FROM orders"));
}

#[test]
fn test_export_json_round_trips() {
    let records = sample_records();
    let summary = RunSummary::from_records(&records, &[], &[]);
    let dir = TempDir::new().unwrap();

    let created = export_records(
        &records,
        &summary,
        &[ExportFormat::Json],
        dir.path(),
        &meta(),
        "20260806_120000"
    )
    .unwrap();

    let content = fs::read_to_string(&created[0]).unwrap();
    let parsed: Vec<GenerationRecord> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, records);
}

#[test]
fn test_export_yaml() {
    let records = sample_records();
    let summary = RunSummary::from_records(&records, &[], &[]);
    let dir = TempDir::new().unwrap();

    let created = export_records(
        &records,
        &summary,
        &[ExportFormat::Yaml],
        dir.path(),
        &meta(),
        "20260806_120000"
    )
    .unwrap();

    let content = fs::read_to_string(&created[0]).unwrap();
    assert!(content.contains("question_id: 1"));
    assert!(content.contains("target_source: sales_dw"));
}

#[test]
fn test_export_all_formats_with_duplicates() {
    let records = sample_records();
    let summary = RunSummary::from_records(&records, &[], &[]);
    let dir = TempDir::new().unwrap();

    let created = export_records(
        &records,
        &summary,
        &[
            ExportFormat::Csv,
            ExportFormat::Json,
            ExportFormat::Csv,
            ExportFormat::Yaml,
            ExportFormat::Markdown
        ],
        dir.path(),
        &meta(),
        "20260806_120000"
    )
    .unwrap();

    // Duplicate csv written once
    assert_eq!(created.len(), 4);
    assert!(created.iter().any(|p| p.ends_with("report_20260806_120000.md")));
}

#[test]
fn test_export_creates_output_dir() {
    let records = sample_records();
    let summary = RunSummary::from_records(&records, &[], &[]);
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("nested").join("out");

    let created = export_records(
        &records,
        &summary,
        &[ExportFormat::Csv],
        &nested,
        &meta(),
        "20260806_120000"
    )
    .unwrap();

    assert!(created[0].exists());
}

#[test]
fn test_markdown_report_sections() {
    let records = sample_records();
    let summary = RunSummary::from_records(&records, &[], &[]);
    let report = render_markdown(&records, &summary, &meta());

    assert!(report.contains("# SQL Generation Report"));
    assert!(report.contains("**Model**: llama-3.3-70b-versatile"));
    assert!(report.contains("## Summary"));
    assert!(report.contains("- Total questions: **2**"));
    assert!(report.contains("- Success rate: **50.0%**"));
    assert!(report.contains("## Low-confidence reasoning"));
    assert!(report.contains("### Question 2: Ad spend per social channel?"));
    assert!(report.contains("## Full results"));
    assert!(report.contains("```sql\nSELECT SUM(total) FROM orders\n```"));
}

#[test]
fn test_markdown_report_without_low_confidence_section() {
    let records = vec![GenerationRecord {
        question_id:   1,
        question:      String::from("Total revenue?"),
        target_source: String::from("sales_dw"),
        sql:           String::from("SELECT SUM(total) FROM orders"),
        assumptions:   String::from("straightforward aggregate"),
        confidence:    0.95
    }];
    let summary = RunSummary::from_records(&records, &[], &[]);
    let report = render_markdown(&records, &summary, &meta());
    assert!(!report.contains("## Low-confidence reasoning"));
}
