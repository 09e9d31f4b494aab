//! Content integrity checker
//!
//! Validates every technique content file independently and reports every
//! failing file before exiting non-zero, so authors can fix a whole batch
//! in one pass.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use waza_core::content::loader::load_techniques_dir;
use waza_core::core::error::WazaError;

#[derive(Parser, Debug)]
#[command(name = "validate_content")]
#[command(about = "Validate technique content files and report all failures")]
struct Args {
    /// Directory containing technique JSON files
    #[arg(default_value = "content/techniques")]
    dir: PathBuf,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct FailureReport {
    file: String,
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<waza_core::content::Issue>,
}

#[derive(Serialize)]
struct Report {
    valid: usize,
    failed: usize,
    failures: Vec<FailureReport>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    let outcome = match load_techniques_dir(&args.dir) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("cannot read {}: {}", args.dir.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let report = Report {
        valid: outcome.techniques.len(),
        failed: outcome.failures.len(),
        failures: outcome
            .failures
            .iter()
            .map(|failure| FailureReport {
                file: failure.path.display().to_string(),
                error: failure.error.to_string(),
                issues: match &failure.error {
                    WazaError::Validation { issues, .. } => issues.clone(),
                    _ => Vec::new(),
                },
            })
            .collect(),
    };

    if args.format == "json" {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("could not serialize report: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for failure in &report.failures {
            println!("FAIL {}", failure.file);
            if failure.issues.is_empty() {
                println!("  {}", failure.error);
            }
            for issue in &failure.issues {
                println!("  [{:?}] {}", issue.kind, issue);
            }
        }
        println!("{} valid, {} failed", report.valid, report.failed);
    }

    if report.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
