use std::process;

use clap::Parser;
use sql_query_generator::{
    app::{GenerateParams, create_output_options, run_generate},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult,
    output::{format_export_listing, format_run_summary}
};

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

async fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Generate {
            schema,
            questions,
            select,
            provider,
            api_key,
            model,
            ollama_url,
            export,
            output_dir,
            verbose,
            dry_run,
            no_color
        } => {
            let opts = create_output_options(no_color, verbose);
            let params = GenerateParams {
                schema_paths: schema.iter().map(|p| p.display().to_string()).collect(),
                questions_path: questions.display().to_string(),
                select,
                provider,
                api_key,
                model,
                ollama_url,
                exports: export,
                output_dir: output_dir.display().to_string(),
                verbose,
                dry_run,
                no_color
            };

            let result = run_generate(params, config).await?;

            if let Some(info) = result.dry_run_info {
                println!("=== DRY RUN - Would send to LLM ===\n");
                println!("Selected question IDs: {:?}\n", info.selected_ids);
                println!("Schema overview:\n{}", info.schema_overview);
                println!("System prompt:\n{}\n", info.sample_system_prompt);
                println!("User prompt:\n{}", info.sample_user_prompt);
                return Ok(result.exit_code);
            }

            if let Some(summary) = &result.summary {
                println!("{}", format_run_summary(summary, &result.model, &opts));
            }
            print!("{}", format_export_listing(&result.exported, &opts));

            Ok(result.exit_code)
        }
    }
}
