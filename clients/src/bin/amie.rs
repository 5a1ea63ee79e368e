//! `rulemine-amie`: Mines rules from an ontology with AMIE3.
//!
//! Loads the given ontologies, converts the last one to Turtle in the working
//! directory, runs AMIE3 on it with a timeout and prints the mined rules with
//! their quality figures.
//!
//! **Usage:**
//! ```text
//! rulemine-amie --ontology <path>... [--minc 0.0] [--minpca 0.0] [--nc 8] [--const]
//!               [--jar <path>] [--java <path>] [--timeout <secs>] [--workdir <dir>]
//!               [--config <rulemine.toml>] [--save <path>] [--save-format text|json] [--strict]
//!               [--details]
//! ```
//!
//! With `--details`, each loaded ontology is summarized and every rule is
//! printed with all of its measures.
//!
//! Settings are read from `--config` (or `./rulemine.toml`), then from
//! `RULEMINE_AMIE_JAR`, `RULEMINE_JAVA` and `RULEMINE_TIMEOUT_SECS`; flags win.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use rulemine_amie::{AmieParameters, AmieSettings, Session};
use rulemine_ontology::convert::count_triples;
use rulemine_ontology::RulesFormat;
use rulemine_quality::{measure_rule, measure_set};

/// Mine Horn rules from an ontology with AMIE3.
#[derive(Parser)]
#[command(name = "rulemine-amie", about = "Mine rules from an ontology with AMIE3")]
struct Args {
    /// Ontology file(s) to load; rules are mined from the last one.
    #[arg(long, required = true, num_args = 1..)]
    ontology: Vec<PathBuf>,

    /// Minimum standard confidence (-minc).
    #[arg(long, default_value = "0.0")]
    minc: String,

    /// Minimum PCA confidence (-minpca).
    #[arg(long, default_value = "0.0")]
    minpca: String,

    /// Number of mining threads (-nc).
    #[arg(long, default_value = "8")]
    nc: String,

    /// Allow constants in rule atoms (-const).
    #[arg(long = "const")]
    constants: bool,

    /// AMIE3 jar, or a native AMIE executable.
    #[arg(long)]
    jar: Option<PathBuf>,

    /// Java runtime used for jars.
    #[arg(long)]
    java: Option<String>,

    /// Timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Directory AMIE3 runs in; ontology.ttl is written here.
    #[arg(long)]
    workdir: Option<PathBuf>,

    /// Settings file (default: ./rulemine.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the mined rules to this file.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Format of the saved rules: text or json.
    #[arg(long, default_value = "text")]
    save_format: String,

    /// Fail when AMIE3 exits with a non-zero code.
    #[arg(long)]
    strict: bool,

    /// Show ontology details and every measure of each rule.
    #[arg(long)]
    details: bool,
}

fn main() -> Result<()> {
    rulemine_clients::init_tracing();
    let args = Args::parse();

    let save_format = RulesFormat::from_name(&args.save_format)
        .ok_or_else(|| anyhow!("unknown save format {:?}; expected text or json", args.save_format))?;
    let params = AmieParameters::from_text(&args.minc, &args.minpca, &args.nc, args.constants)?;

    let mut settings = AmieSettings::load(args.config.as_deref()).context("Failed to load settings")?;
    if let Some(jar) = args.jar {
        settings.jar = jar;
    }
    if let Some(java) = args.java {
        settings.java = java;
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            bail!("--timeout must be greater than zero");
        }
        settings.timeout_secs = timeout;
    }
    if let Some(workdir) = args.workdir {
        settings.workdir = workdir;
    }
    settings.strict_exit |= args.strict;

    let mut session = Session::new(settings);
    for path in &args.ontology {
        let loaded = session
            .load_ontology(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        println!("Loaded ontology: {} ({})", loaded.path.display(), loaded.format);
    }

    if args.details {
        println!();
        println!("Ontologies");
        println!("==========");
        for (number, ontology) in session.registry().ontologies().iter().enumerate() {
            let triples = count_triples(&ontology.path, ontology.format)
                .with_context(|| format!("Failed to read {}", ontology.path.display()))?;
            println!(
                "{}. {} ({}): {triples} triples",
                number + 1,
                ontology.path.display(),
                ontology.format
            );
        }
        println!();
    }

    println!("Converting ontology and running AMIE3...");
    let run = session.run_amie(params).context("AMIE3 run failed")?;

    if let Some(conversion) = &run.conversion {
        println!(
            "  Converted {} triples to {}",
            conversion.triples,
            conversion.output.display()
        );
    }
    if let Some(output) = &run.output {
        println!();
        println!("AMIE3 results:");
        println!("{}", output.stdout.trim_end());
        if !output.exited_successfully() {
            eprintln!("AMIE3 exited with {:?}: {}", output.exit_code, output.stderr.trim());
        }
    }

    println!();
    println!("Extracted rules");
    println!("===============");
    for (number, rule) in session.registry().numbered_rules() {
        if args.details {
            println!("{number}.");
            for line in rule.to_string().lines() {
                println!("   {line}");
            }
        } else {
            println!("{number}. {}", rule.rule);
        }
        println!("   {}", measure_rule(rule));
    }
    if run.skipped > 0 {
        println!("({} unreadable rule line(s) skipped)", run.skipped);
    }
    match measure_set(session.registry().rules()) {
        Some(set) => println!("Summary: {set}"),
        None => println!("No rules mined."),
    }

    if let Some(path) = &args.save {
        session
            .save_rules(path, save_format)
            .with_context(|| format!("Failed to save rules to {}", path.display()))?;
        println!("  Written: {} ({save_format})", path.display());
    }
    Ok(())
}
