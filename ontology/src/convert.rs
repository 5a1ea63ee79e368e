//! Ontology format conversion.
//!
//! Reads a whole ontology file into an in-memory graph and writes it back out
//! as Turtle 1.1. Conversion is synchronous and non-streaming. The Turtle text
//! is re-parsed in memory before anything touches the destination, and the
//! destination is replaced atomically, so a failed conversion never leaves a
//! truncated output behind.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use sophia::api::prelude::*;
use sophia::api::source::StreamError;
use sophia::inmem::graph::LightGraph;
use sophia::iri::Iri;
use sophia::turtle::parser::nt;
use sophia::turtle::parser::turtle::{self, TurtleParser};
use sophia::turtle::serializer::turtle::{TurtleConfig, TurtleSerializer};
use sophia::xml::parser::RdfXmlParser;
use thiserror::Error;
use tracing::{debug, info};

use crate::fs::write_atomic;
use crate::model::RdfFormat;

/// Errors raised while converting an ontology.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The input file does not exist.
    #[error("ontology file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Input path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The input is malformed or uses unsupported syntax.
    #[error("failed to parse {} as {format}: {message}", .path.display())]
    Parse {
        /// Input path.
        path: PathBuf,
        /// Format the input was parsed as.
        format: RdfFormat,
        /// Parser diagnostic.
        message: String,
    },

    /// The graph could not be serialized as Turtle.
    #[error("failed to serialize Turtle: {0}")]
    Serialize(String),

    /// The produced Turtle did not parse back to the same number of triples.
    #[error("Turtle output failed verification: {0}")]
    Verify(String),

    /// The destination could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Number of distinct triples written.
    pub triples: usize,
    /// Format the input was read as.
    pub input_format: RdfFormat,
    /// Path of the Turtle file.
    pub output: PathBuf,
}

/// Converts `input` to Turtle at `output`, detecting the input format from
/// its extension (see [`RdfFormat::from_path`]).
///
/// # Errors
///
/// Returns a [`ConversionError`] if the input is missing, unreadable or
/// malformed, or if the output cannot be produced or written.
pub fn convert(input: &Path, output: &Path) -> Result<ConversionSummary, ConversionError> {
    convert_with(input, output, RdfFormat::from_path(input))
}

/// Converts `input`, read as `format`, to Turtle at `output`.
///
/// # Errors
///
/// Returns a [`ConversionError`] if the input is missing, unreadable or
/// malformed, or if the output cannot be produced or written.
pub fn convert_with(
    input: &Path,
    output: &Path,
    format: RdfFormat,
) -> Result<ConversionSummary, ConversionError> {
    let graph = parse_graph(input, format)?;
    let triples = graph.triples().count();
    debug!(input = %input.display(), %format, triples, "ontology parsed");

    let text = to_turtle(&graph)?;
    verify_turtle(&text, triples)?;

    write_atomic(output, text.as_bytes()).map_err(|source| ConversionError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        triples,
        "ontology converted to Turtle"
    );
    Ok(ConversionSummary {
        triples,
        input_format: format,
        output: output.to_path_buf(),
    })
}

/// Number of distinct triples in an ontology file, without writing anything.
///
/// # Errors
///
/// Returns the same errors as [`parse_graph`].
pub fn count_triples(path: &Path, format: RdfFormat) -> Result<usize, ConversionError> {
    Ok(parse_graph(path, format)?.triples().count())
}

/// Parses a whole ontology file into an in-memory graph.
///
/// Relative IRIs are resolved against the `file://` IRI of `path`.
///
/// # Errors
///
/// Returns [`ConversionError::NotFound`], [`ConversionError::Read`] or
/// [`ConversionError::Parse`].
pub fn parse_graph(path: &Path, format: RdfFormat) -> Result<LightGraph, ConversionError> {
    if !path.exists() {
        return Err(ConversionError::NotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| ConversionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let base = file_iri(path);

    let parsed = match format {
        RdfFormat::RdfXml => RdfXmlParser { base }
            .parse(reader)
            .collect_triples::<LightGraph>()
            .map_err(stream_message),
        RdfFormat::Turtle => TurtleParser { base }
            .parse(reader)
            .collect_triples::<LightGraph>()
            .map_err(stream_message),
        RdfFormat::NTriples => nt::parse_bufread(reader)
            .collect_triples::<LightGraph>()
            .map_err(stream_message),
    };
    parsed.map_err(|message| ConversionError::Parse {
        path: path.to_path_buf(),
        format,
        message,
    })
}

/// Serializes a graph as pretty-printed Turtle.
///
/// # Errors
///
/// Returns [`ConversionError::Serialize`] if the serializer rejects the graph.
pub fn to_turtle(graph: &LightGraph) -> Result<String, ConversionError> {
    let config = TurtleConfig::new().with_pretty(true);
    let mut stringifier = TurtleSerializer::new_stringifier_with_config(config);
    stringifier
        .serialize_graph(graph)
        .map_err(|err| ConversionError::Serialize(stream_message(err)))?;
    Ok(stringifier.as_str().to_owned())
}

/// Re-parses produced Turtle and checks it carries `expected` triples.
fn verify_turtle(text: &str, expected: usize) -> Result<(), ConversionError> {
    let reparsed: LightGraph = turtle::parse_str(text)
        .collect_triples()
        .map_err(|err| ConversionError::Verify(stream_message(err)))?;
    let found = reparsed.triples().count();
    if found != expected {
        return Err(ConversionError::Verify(format!(
            "expected {expected} triples, Turtle output holds {found}"
        )));
    }
    Ok(())
}

fn stream_message<E1: std::error::Error, E2: std::error::Error>(err: StreamError<E1, E2>) -> String {
    match err {
        StreamError::SourceError(e) => e.to_string(),
        StreamError::SinkError(e) => e.to_string(),
    }
}

/// `file://` IRI of an existing path, used as the document base.
fn file_iri(path: &Path) -> Option<Iri<String>> {
    Iri::new(file_iri_string(path)?).ok()
}

fn file_iri_string(path: &Path) -> Option<String> {
    let absolute = path.canonicalize().ok()?;
    let raw = absolute.to_str()?.replace('\\', "/");
    let mut encoded = String::with_capacity(raw.len() + 8);
    encoded.push_str("file://");
    if !raw.starts_with('/') {
        encoded.push('/');
    }
    for c in raw.chars() {
        match c {
            ' ' => encoded.push_str("%20"),
            '#' => encoded.push_str("%23"),
            '%' => encoded.push_str("%25"),
            '?' => encoded.push_str("%3F"),
            c => encoded.push(c),
        }
    }
    Some(encoded)
}
