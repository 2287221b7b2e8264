//! Export of generation records to flat files.
//!
//! Every export file carries a shared run timestamp in its name so one run's
//! artifacts sort together: `queries_<ts>.csv`, `queries_<ts>.json`,
//! `queries_<ts>.yaml`, `report_<ts>.md`. The Markdown report is the
//! human-facing artifact; CSV and JSON are for downstream tooling.

use std::{
    fs,
    path::{Path, PathBuf}
};

use chrono::Local;
use indexmap::IndexSet;

use crate::{
    cli::ExportFormat,
    error::{AppResult, export_error},
    output::RunSummary,
    response::GenerationRecord
};

/// Metadata stamped into the Markdown report header.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub model:        String,
    pub temperature:  f32,
    pub generated_at: String
}

impl ReportMeta {
    /// Capture report metadata with the current local time
    pub fn new(model: String, temperature: f32) -> Self {
        Self {
            model,
            temperature,
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
        }
    }
}

/// Shared run timestamp used in export file names
pub fn run_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Write the selected export formats and return the created paths
///
/// Duplicate formats in the list are written once.
///
/// # Errors
///
/// Returns error if the output directory cannot be created or a file write
/// fails
pub fn export_records(
    records: &[GenerationRecord],
    summary: &RunSummary,
    formats: &[ExportFormat],
    output_dir: &Path,
    meta: &ReportMeta,
    stamp: &str
) -> AppResult<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .map_err(|e| export_error(&output_dir.display().to_string(), e.to_string()))?;

    let unique: IndexSet<ExportFormat> = formats.iter().copied().collect();
    let mut created = Vec::with_capacity(unique.len());
    for format in unique {
        let path = match format {
            ExportFormat::Csv => {
                let path = output_dir.join(format!("queries_{}.csv", stamp));
                write_csv(records, &path)?;
                path
            }
            ExportFormat::Json => {
                let path = output_dir.join(format!("queries_{}.json", stamp));
                write_json(records, &path)?;
                path
            }
            ExportFormat::Yaml => {
                let path = output_dir.join(format!("queries_{}.yaml", stamp));
                write_yaml(records, &path)?;
                path
            }
            ExportFormat::Markdown => {
                let path = output_dir.join(format!("report_{}.md", stamp));
                write_markdown(records, summary, meta, &path)?;
                path
            }
        };
        created.push(path);
    }
    Ok(created)
}

fn write_csv(records: &[GenerationRecord], path: &Path) -> AppResult<()> {
    let display = path.display().to_string();
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| export_error(&display, e.to_string()))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| export_error(&display, e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| export_error(&display, e.to_string()))
}

fn write_json(records: &[GenerationRecord], path: &Path) -> AppResult<()> {
    let display = path.display().to_string();
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| export_error(&display, e.to_string()))?;
    fs::write(path, json).map_err(|e| export_error(&display, e.to_string()))
}

fn write_yaml(records: &[GenerationRecord], path: &Path) -> AppResult<()> {
    let display = path.display().to_string();
    let yaml =
        serde_yaml::to_string(records).map_err(|e| export_error(&display, e.to_string()))?;
    fs::write(path, yaml).map_err(|e| export_error(&display, e.to_string()))
}

fn write_markdown(
    records: &[GenerationRecord],
    summary: &RunSummary,
    meta: &ReportMeta,
    path: &Path
) -> AppResult<()> {
    let display = path.display().to_string();
    let report = render_markdown(records, summary, meta);
    fs::write(path, report).map_err(|e| export_error(&display, e.to_string()))
}

/// Render the Markdown report body
pub fn render_markdown(
    records: &[GenerationRecord],
    summary: &RunSummary,
    meta: &ReportMeta
) -> String {
    let mut out = String::from("# SQL Generation Report\n\n");
    out.push_str(&format!("**Generated on**: {}  \n", meta.generated_at));
    out.push_str(&format!("**Model**: {}  \n", meta.model));
    out.push_str(&format!("**Temperature**: {}  \n\n", meta.temperature));

    out.push_str("## Summary\n\n");
    out.push_str(&format!("- Total questions: **{}**  \n", summary.total));
    out.push_str(&format!("- Generated: **{}**  \n", summary.generated));
    out.push_str(&format!(
        "- High confidence (>= 0.8): **{}**  \n",
        summary.high_confidence
    ));
    out.push_str(&format!(
        "- Success rate: **{:.1}%**  \n\n",
        summary.success_rate()
    ));

    let low_confidence: Vec<&GenerationRecord> = records
        .iter()
        .filter(|r| r.confidence < 0.5)
        .take(3)
        .collect();
    if !low_confidence.is_empty() {
        out.push_str("## Low-confidence reasoning\n");
        for record in low_confidence {
            out.push_str(&format!(
                "\n### Question {}: {}\n",
                record.question_id, record.question
            ));
            out.push_str(&format!("- **Confidence**: `{}`  \n", record.confidence));
            out.push_str(&format!("- **Assumptions**: {}  \n", record.assumptions));
            out.push_str(&format!("- **SQL**: `{}`  \n", record.sql));
        }
        out.push('\n');
    }

    out.push_str("## Full results\n");
    for record in records {
        out.push_str(&format!(
            "\n### Question {}: {}\n",
            record.question_id, record.question
        ));
        out.push_str(&format!(
            "- **Target source**: `{}`  \n",
            record.target_source
        ));
        out.push_str(&format!("- **Confidence**: `{}`  \n", record.confidence));
        out.push_str(&format!("- **Assumptions**: {}  \n", record.assumptions));
        out.push_str(&format!("\n**SQL**:\n```sql\n{}\n```\n\n---\n", record.sql));
    }
    out
}
