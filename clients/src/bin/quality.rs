//! `rulemine-quality`: Validates a saved rules file.
//!
//! **Usage:**
//! ```text
//! rulemine-quality <rules.json> [--minc <f>] [--minpca <f>]
//! ```
//!
//! Exits non-zero if any rule fails a check.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use rulemine_quality::{validate_file, Severity, Thresholds};

/// Validate mined rules.
#[derive(Parser)]
#[command(name = "rulemine-quality", about = "Validate mined rules and report their quality")]
struct Args {
    /// Rules saved as JSON by `rulemine-amie --save-format json`.
    rules: PathBuf,

    /// Warn for rules below this standard confidence.
    #[arg(long, default_value_t = 0.0)]
    minc: f64,

    /// Warn for rules below this PCA confidence.
    #[arg(long, default_value_t = 0.0)]
    minpca: f64,
}

fn main() -> Result<()> {
    rulemine_clients::init_tracing();
    let args = Args::parse();

    let thresholds = Thresholds {
        min_std_confidence: args.minc,
        min_pca_confidence: args.minpca,
    };
    let report = validate_file(&args.rules, thresholds)?;

    println!("Rule Quality Report: {}", args.rules.display());
    println!("===================");
    println!();

    let mut passed = 0usize;
    for result in &report.results {
        if result.severity == Severity::Pass {
            passed += 1;
            continue;
        }
        println!("{result}");
        for detail in &result.details {
            println!("       {detail}");
        }
    }

    let failed = report.failure_count();
    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        passed,
        report.warning_count(),
        failed
    );

    if failed > 0 {
        eprintln!("Quality check FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    println!("Quality check PASSED.");
    Ok(())
}
