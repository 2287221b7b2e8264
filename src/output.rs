use std::{collections::BTreeMap, path::PathBuf, time::Duration};

use colored::Colorize;

use crate::{llm::TokenUsage, response::GenerationRecord, rewrite::parses_as_ansi};

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            colored: true,
            verbose: false
        }
    }
}

/// Aggregate statistics over one pipeline run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Questions processed
    pub total:              usize,
    /// Records carrying runnable SQL
    pub generated:          usize,
    /// Records with confidence >= 0.8
    pub high_confidence:    usize,
    /// Mean confidence across all records
    pub average_confidence: f64,
    /// Generated records whose SQL parses under a generic ANSI grammar
    pub ansi_clean:         usize,
    pub prompt_tokens:      u64,
    pub completion_tokens:  u64,
    pub total_tokens:       u64,
    /// Mean latency of successful model calls, in seconds
    pub average_latency_s:  f64,
    /// Histogram of target sources chosen by the model, sorted by name
    pub sources:            BTreeMap<String, usize>
}

impl RunSummary {
    /// Aggregate records, token usage, and call latencies into a summary
    pub fn from_records(
        records: &[GenerationRecord],
        usage: &[TokenUsage],
        latencies: &[Duration]
    ) -> Self {
        let total = records.len();
        let generated = records.iter().filter(|r| r.generated()).count();
        let high_confidence = records.iter().filter(|r| r.confidence >= 0.8).count();
        let average_confidence = if total > 0 {
            records.iter().map(|r| r.confidence).sum::<f64>() / total as f64
        } else {
            0.0
        };
        let ansi_clean = records
            .iter()
            .filter(|r| r.generated() && parses_as_ansi(&r.sql))
            .count();
        let average_latency_s = if latencies.is_empty() {
            0.0
        } else {
            latencies.iter().map(Duration::as_secs_f64).sum::<f64>() / latencies.len() as f64
        };
        let mut sources = BTreeMap::new();
        for record in records {
            *sources.entry(record.target_source.clone()).or_insert(0) += 1;
        }
        Self {
            total,
            generated,
            high_confidence,
            average_confidence,
            ansi_clean,
            prompt_tokens: usage.iter().map(|u| u.prompt_tokens).sum(),
            completion_tokens: usage.iter().map(|u| u.completion_tokens).sum(),
            total_tokens: usage.iter().map(|u| u.total_tokens).sum(),
            average_latency_s,
            sources
        }
    }

    /// Share of questions that produced runnable SQL, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.generated as f64 / self.total as f64 * 100.0
        }
    }
}

/// Format the end-of-run console report
pub fn format_run_summary(summary: &RunSummary, model: &str, opts: &OutputOptions) -> String {
    let mut out = String::new();
    let header = "Final Report";
    if opts.colored {
        out.push_str(&format!("{}\n", header.yellow().bold()));
    } else {
        out.push_str(&format!("{}\n", header));
    }
    out.push_str(&format!("{}\n", "=".repeat(70)));

    let rate = format!(
        "{}/{} ({:.1}%)",
        summary.generated,
        summary.total,
        summary.success_rate()
    );
    let avg_conf = format!("{:.3}", summary.average_confidence);
    out.push_str(&format!("Total processed: {}\n", summary.total));
    if opts.colored {
        out.push_str(&format!("Generated: {}\n", rate.green()));
        out.push_str(&format!("Average confidence: {}\n", avg_conf.cyan()));
    } else {
        out.push_str(&format!("Generated: {}\n", rate));
        out.push_str(&format!("Average confidence: {}\n", avg_conf));
    }
    out.push_str(&format!(
        "High confidence (>= 0.8): {}\n",
        summary.high_confidence
    ));
    out.push_str(&format!(
        "ANSI-parseable SQL: {}/{}\n",
        summary.ansi_clean, summary.generated
    ));

    if summary.total_tokens > 0 {
        let perf_header = "Performance:";
        if opts.colored {
            out.push_str(&format!("\n{}\n", perf_header.blue()));
        } else {
            out.push_str(&format!("\n{}\n", perf_header));
        }
        out.push_str(&format!("  Model: {}\n", model));
        out.push_str(&format!("  Prompt tokens: {}\n", summary.prompt_tokens));
        out.push_str(&format!(
            "  Completion tokens: {}\n",
            summary.completion_tokens
        ));
        out.push_str(&format!("  Total tokens: {}\n", summary.total_tokens));
        out.push_str(&format!(
            "  Avg latency per question: {:.2}s\n",
            summary.average_latency_s
        ));
    }

    let sources_header = "Target sources chosen:";
    if opts.colored {
        out.push_str(&format!("\n{}\n", sources_header.cyan()));
    } else {
        out.push_str(&format!("\n{}\n", sources_header));
    }
    for (source, count) in &summary.sources {
        out.push_str(&format!("  {}: {}\n", source, count));
    }
    out
}

/// Short status label for one record, used on the progress bar
pub fn status_label(confidence: f64, opts: &OutputOptions) -> String {
    if confidence >= 0.8 {
        if opts.colored {
            "confident".green().to_string()
        } else {
            String::from("confident")
        }
    } else if confidence >= 0.5 {
        if opts.colored {
            "unsure".yellow().to_string()
        } else {
            String::from("unsure")
        }
    } else if opts.colored {
        "cannot generate".red().to_string()
    } else {
        String::from("cannot generate")
    }
}

/// Per-question detail block for verbose mode
pub fn format_record_details(record: &GenerationRecord, opts: &OutputOptions) -> String {
    let header = format!("Q{}: {}", record.question_id, record.question);
    let mut out = if opts.colored {
        format!("{}\n", header.cyan().bold())
    } else {
        format!("{}\n", header)
    };
    out.push_str(&format!("  Target source: {}\n", record.target_source));
    out.push_str(&format!("  Confidence: {:.2}\n", record.confidence));
    out.push_str(&format!("  SQL: {}\n", record.sql));
    if record.generated() && !parses_as_ansi(&record.sql) {
        let warning = "  Warning: SQL does not parse under a generic ANSI grammar";
        if opts.colored {
            out.push_str(&format!("{}\n", warning.yellow()));
        } else {
            out.push_str(&format!("{}\n", warning));
        }
    }
    out
}

/// List exported files for the console
pub fn format_export_listing(paths: &[PathBuf], opts: &OutputOptions) -> String {
    if paths.is_empty() {
        return String::new();
    }
    let header = "Files created:";
    let mut out = if opts.colored {
        format!("{}\n", header.green())
    } else {
        format!("{}\n", header)
    };
    for path in paths {
        out.push_str(&format!("  {}\n", path.display()));
    }
    out
}
