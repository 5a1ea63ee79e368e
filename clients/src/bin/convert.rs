//! `rulemine-convert`: Converts an ontology to the Turtle file AMIE3 reads.
//!
//! **Usage:**
//! ```text
//! rulemine-convert <input> [--out ontology.ttl] [--format rdfxml|turtle|ntriples]
//! ```
//!
//! The input format is detected from the extension unless `--format` is given.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rulemine_ontology::convert::convert_with;
use rulemine_ontology::RdfFormat;

/// Convert an ontology to Turtle.
#[derive(Parser)]
#[command(name = "rulemine-convert", about = "Convert an RDF/XML ontology to Turtle")]
struct Args {
    /// Ontology to convert.
    input: PathBuf,

    /// Turtle file to write.
    #[arg(long, default_value = "ontology.ttl")]
    out: PathBuf,

    /// Input format: rdfxml, turtle or ntriples (default: from extension).
    #[arg(long)]
    format: Option<String>,
}

fn main() -> Result<()> {
    rulemine_clients::init_tracing();
    let args = Args::parse();

    let format = match args.format.as_deref() {
        Some(name) => RdfFormat::from_name(name)
            .ok_or_else(|| anyhow!("unknown format {name:?}; expected rdfxml, turtle or ntriples"))?,
        None => RdfFormat::from_path(&args.input),
    };

    let summary = convert_with(&args.input, &args.out, format)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    println!(
        "Converted {} ({}): {} triples",
        args.input.display(),
        summary.input_format,
        summary.triples
    );
    println!("  Written: {}", summary.output.display());
    Ok(())
}
