//! Pipeline execution logic.
//!
//! This module contains the `run_generate` function that drives the complete
//! generation pipeline: schema and question loading, selection, per-question
//! prompting with retry, SQL normalization, and export.

use std::{path::Path, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::sleep;

use super::{
    helpers::{
        build_llm_provider, calculate_exit_code, create_output_options, get_effective_model,
        get_effective_ollama_url, get_effective_output_dir, has_llm_access
    },
    types::{DryRunInfo, GenerateParams, GenerateResult}
};
use crate::{
    cache::{cache_record, get_cached},
    config::{Config, GenerationConfig},
    error::{AppResult, config_error, selection_error},
    export::{ReportMeta, export_records, run_timestamp},
    llm::{LlmClient, TokenUsage},
    output::{RunSummary, format_record_details, status_label},
    prompt::{build_system_prompt, build_user_prompt},
    questions::{Question, apply_selection, load_questions, parse_selection},
    response::{GenerationRecord, extract_record},
    rewrite::rewrite_to_ansi,
    schema::Warehouse
};

/// Executes the complete generation pipeline.
///
/// 1. **Loading**: reads every warehouse schema and the questions CSV
/// 2. **Selection**: narrows the run to the requested question IDs
/// 3. **Generation**: prompts the LLM per question, with parse-level retry
/// 4. **Normalization**: rewrites generated SQL into ANSI-compatible form
/// 5. **Export**: writes the selected export formats and aggregates a
///    summary
///
/// In dry-run mode the pipeline stops after selection and returns the
/// prompts that would have been sent, without any network calls.
///
/// # Errors
///
/// Returns an error if loading or selection fails, if no API access is
/// configured, or if an export write fails. A question whose generation
/// fails does NOT abort the run; it yields a failure record and is
/// reflected in the exit code.
pub async fn run_generate(params: GenerateParams, config: Config) -> AppResult<GenerateResult> {
    let mut warehouses = Vec::with_capacity(params.schema_paths.len());
    for path in &params.schema_paths {
        warehouses.push(Warehouse::load(path)?);
    }
    let questions = load_questions(&params.questions_path)?;

    let selection = params.select.as_deref().map(parse_selection).transpose()?;
    let (selected, missing) = match &selection {
        Some(ids) => apply_selection(&questions, ids),
        None => (questions.clone(), Vec::new())
    };
    if selected.is_empty() {
        return Err(selection_error("no questions match the selection"));
    }
    if !missing.is_empty() {
        eprintln!("Warning: selected IDs not present in questions file: {:?}", missing);
    }

    let opts = create_output_options(params.no_color, params.verbose);
    let model_name = get_effective_model(params.model, config.llm.model.clone(), &params.provider);

    if params.dry_run {
        let first = &selected[0];
        let schema_overview = warehouses
            .iter()
            .map(Warehouse::to_prompt)
            .collect::<Vec<_>>()
            .join("");
        return Ok(GenerateResult {
            exit_code:    0,
            model:        model_name,
            records:      Vec::new(),
            summary:      None,
            exported:     Vec::new(),
            dry_run_info: Some(DryRunInfo {
                schema_overview,
                sample_system_prompt: build_system_prompt(first),
                sample_user_prompt: build_user_prompt(&warehouses, first),
                selected_ids: selected.iter().map(|q| q.question_id).collect()
            })
        });
    }

    let effective_api_key = params.api_key.or(config.llm.api_key.clone());
    if !has_llm_access(&effective_api_key, &params.provider) {
        return Err(config_error(
            "API key required for the selected provider (use --api-key or LLM_API_KEY)"
        ));
    }
    let effective_ollama_url =
        get_effective_ollama_url(params.ollama_url, config.llm.ollama_url.clone());
    let llm_provider = build_llm_provider(
        params.provider,
        effective_api_key,
        model_name.clone(),
        effective_ollama_url
    )?;
    let client = LlmClient::with_config(llm_provider, config.retry.clone(), &config.generation);

    let pb = ProgressBar::new(selected.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("{bar:40.green/white} {pos}/{len} {msg}")
    {
        pb.set_style(style);
    }

    let mut records = Vec::with_capacity(selected.len());
    let mut usage_log: Vec<TokenUsage> = Vec::new();
    let mut latency_log: Vec<Duration> = Vec::new();
    let mut failed = 0usize;

    for question in &selected {
        let record = if let Some(mut cached) = get_cached(&question.question) {
            cached.question_id = question.question_id;
            cached.question = question.question.clone();
            cached
        } else {
            let (record, ok) = generate_one(
                &client,
                &warehouses,
                question,
                &config.generation,
                &mut usage_log,
                &mut latency_log
            )
            .await;
            if ok {
                cache_record(&question.question, record.clone());
            } else {
                failed += 1;
            }
            record
        };

        pb.set_message(status_label(record.confidence, &opts));
        if opts.verbose {
            pb.println(format_record_details(&record, &opts));
        }
        pb.inc(1);
        records.push(record);
    }
    pb.finish_and_clear();

    let summary = RunSummary::from_records(&records, &usage_log, &latency_log);
    let meta = ReportMeta::new(model_name.clone(), config.generation.temperature);
    let output_dir =
        get_effective_output_dir(params.output_dir, config.export.output_dir.clone());
    let exported = export_records(
        &records,
        &summary,
        &params.exports,
        Path::new(&output_dir),
        &meta,
        &run_timestamp()
    )?;

    Ok(GenerateResult {
        exit_code: calculate_exit_code(failed),
        model: model_name,
        records,
        summary: Some(summary),
        exported,
        dry_run_info: None
    })
}

/// Generate one record, retrying when the response cannot be parsed.
///
/// Returns the record and whether generation succeeded. Exhausted retries
/// yield a failure record instead of an error so one bad question cannot
/// abort the run.
async fn generate_one(
    client: &LlmClient,
    warehouses: &[Warehouse],
    question: &Question,
    generation: &GenerationConfig,
    usage_log: &mut Vec<TokenUsage>,
    latency_log: &mut Vec<Duration>
) -> (GenerationRecord, bool) {
    let system_prompt = build_system_prompt(question);
    let user_prompt = build_user_prompt(warehouses, question);
    let attempts = generation.attempts.max(1);
    let mut last_error = String::from("no attempts made");

    for attempt in 1..=attempts {
        if attempt > 1 {
            sleep(Duration::from_millis(generation.retry_delay_ms)).await;
        }
        match client.generate(&system_prompt, &user_prompt).await {
            Ok(outcome) => {
                if let Some(usage) = outcome.usage {
                    usage_log.push(usage);
                }
                latency_log.push(outcome.latency);
                match extract_record(&outcome.text, question) {
                    Ok(mut record) => {
                        if record.generated() {
                            record.sql = rewrite_to_ansi(&record.sql).sql;
                        }
                        return (record, true);
                    }
                    Err(e) => last_error = e.to_string()
                }
            }
            Err(e) => last_error = e.to_string()
        }
    }

    (GenerationRecord::failure(question, attempts, &last_error), false)
}
