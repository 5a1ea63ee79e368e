//! Parser for AMIE3's standard output.
//!
//! AMIE3 prints progress lines, a tab-separated header starting with `Rule`,
//! one tab-separated line per mined rule, and a closing summary. Rule lines
//! are recognised by the `=>` in their first column:
//!
//! ```text
//! ?a  <hasChild>  ?b   => ?b  <hasParent>  ?a	0.5	0.6	0.7	10	20	15	?a
//! ```
//!
//! Columns after the rule are Head Coverage, Std Confidence, PCA Confidence
//! and Positive Examples; later columns are ignored.

use std::sync::OnceLock;

use regex::Regex;
use rulemine_ontology::ExtractedRule;
use tracing::{debug, warn};

/// Separator between rule body and head.
pub const IMPLIES: &str = "=>";

/// Rules recovered from one AMIE3 run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedOutput {
    /// Rules in the order AMIE3 printed them.
    pub rules: Vec<ExtractedRule>,
    /// Rule lines that were dropped because a metric column was unreadable.
    pub skipped: usize,
}

/// Splits an atom list into terms: `<iri>`, quoted literals (with an optional
/// datatype or language suffix) and bare tokens such as `?a`.
#[allow(clippy::expect_used)]
fn term_regex() -> &'static Regex {
    static TERM: OnceLock<Regex> = OnceLock::new();
    TERM.get_or_init(|| {
        Regex::new(r#"<[^>]*>|"(?:[^"\\]|\\.)*"\S*|\S+"#).expect("literal pattern compiles")
    })
}

/// Parses every rule line in `stdout`.
#[must_use]
pub fn parse_rules(stdout: &str) -> ParsedOutput {
    let mut parsed = ParsedOutput::default();
    for (index, line) in stdout.lines().enumerate() {
        match parse_rule_line(line) {
            LineKind::Rule(rule) => parsed.rules.push(rule),
            LineKind::Malformed(reason) => {
                warn!(line = index + 1, %reason, "skipping malformed AMIE rule line");
                parsed.skipped += 1;
            }
            LineKind::Other => {}
        }
    }
    debug!(rules = parsed.rules.len(), skipped = parsed.skipped, "AMIE output parsed");
    parsed
}

enum LineKind {
    Rule(ExtractedRule),
    Malformed(String),
    Other,
}

fn parse_rule_line(line: &str) -> LineKind {
    let columns: Vec<&str> = line.split('\t').map(str::trim).collect();
    let Some(rule_text) = columns.first() else {
        return LineKind::Other;
    };
    let Some((body, head)) = rule_text.split_once(IMPLIES) else {
        return LineKind::Other;
    };
    if columns.len() < 5 {
        return LineKind::Malformed(format!("expected at least 5 columns, found {}", columns.len()));
    }

    let body_terms = terms(body);
    let head_terms = terms(head);
    if head_terms.is_empty() {
        return LineKind::Malformed("rule has no head atom".to_string());
    }

    let metrics = (
        ratio("head coverage", columns[1]),
        ratio("std confidence", columns[2]),
        ratio("pca confidence", columns[3]),
        count("positive examples", columns[4]),
    );
    match metrics {
        (Ok(head_coverage), Ok(std_confidence), Ok(pca_confidence), Ok(positive_examples)) => {
            LineKind::Rule(ExtractedRule {
                rule: format!("{} {} {}", body_terms.join(" "), IMPLIES, head_terms.join(" "))
                    .trim_start()
                    .to_string(),
                head_coverage,
                std_confidence,
                pca_confidence,
                positive_examples,
                body_size: (body_terms.len() / 3) as u64,
            })
        }
        (Err(e), ..) | (_, Err(e), ..) | (_, _, Err(e), _) | (.., Err(e)) => LineKind::Malformed(e),
    }
}

fn terms(atoms: &str) -> Vec<&str> {
    term_regex().find_iter(atoms).map(|m| m.as_str()).collect()
}

/// Coverage and confidences are fractions; anything outside `[0, 1]` is unreadable.
fn ratio(name: &str, raw: &str) -> Result<f64, String> {
    let value = raw
        .parse::<f64>()
        .map_err(|e| format!("{name} {raw:?}: {e}"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{name} {raw:?} is not within [0, 1]"));
    }
    Ok(value)
}

/// Counts are integers, but some AMIE builds print them as `12.0`.
fn count(name: &str, raw: &str) -> Result<u64, String> {
    if let Ok(value) = raw.parse::<u64>() {
        return Ok(value);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => Ok(value as u64),
        _ => Err(format!("{name} {raw:?} is not a non-negative integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RUN: &str = "\
Using the default schema relations
Assuming <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> as type relation
Loading files...
  Starting ontology.ttl
  Finished ontology.ttl, still running: 0
Loaded 20 facts in 0.01 s using 2 MB
Starting the mining phase... Using 8 threads
Rule\tHead Coverage\tStd Confidence\tPCA Confidence\tPositive Examples\tBody size\tPCA Body size\tFunctional variable
?a  <hasChild>  ?b   => ?b  <hasParent>  ?a\t0.5\t0.625\t0.7142857\t5\t8\t7\t?a
?a  <marriedTo>  ?f  ?f  <hasChild>  ?b   => ?a  <hasChild>  ?b\t0.3\t0.75\t0.75\t3\t4\t4\t?b
Mining done in 0.02 s
Total time 0.05 s
2 rules mined.
";

    #[test]
    fn parses_rule_lines_and_ignores_the_rest() {
        let parsed = parse_rules(SAMPLE_RUN);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.rules.len(), 2);

        let first = &parsed.rules[0];
        assert_eq!(first.rule, "?a <hasChild> ?b => ?b <hasParent> ?a");
        assert_eq!(first.head_coverage, 0.5);
        assert_eq!(first.std_confidence, 0.625);
        assert_eq!(first.positive_examples, 5);
        assert_eq!(first.body_size, 1);

        let second = &parsed.rules[1];
        assert_eq!(second.body_size, 2);
        assert_eq!(second.pca_confidence, 0.75);
    }

    #[test]
    fn literals_with_spaces_stay_one_term() {
        let line = "?a  <name>  \"Ada Lovelace\"@en   => ?a  <type>  <Person>\t0.1\t0.2\t0.3\t1";
        let parsed = parse_rules(line);
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].body_size, 1);
        assert_eq!(parsed.rules[0].rule, "?a <name> \"Ada Lovelace\"@en => ?a <type> <Person>");
    }

    #[test]
    fn full_iris_are_kept() {
        let line = "?a  <http://ex.org/p>  ?b   => ?a  <http://ex.org/q>  ?b\t1.0\t1.0\t1.0\t12.0\t12\t12\t?a";
        let parsed = parse_rules(line);
        assert_eq!(parsed.rules[0].positive_examples, 12);
        assert!(parsed.rules[0].rule.contains("<http://ex.org/q>"));
    }

    #[test]
    fn empty_body_rules_are_accepted() {
        let parsed = parse_rules("=> ?a  <p>  ?b\t0.9\t0.9\t0.9\t9");
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].body_size, 0);
        assert_eq!(parsed.rules[0].rule, "=> ?a <p> ?b");
    }

    #[test]
    fn malformed_metrics_are_counted() {
        let text = "?a <p> ?b => ?a <q> ?b\tNaNish\t0.5\t0.5\t3\n\
                    ?a <p> ?b => ?a <q> ?b\t0.5\t0.5\n\
                    ?a <p> ?b => ?a <q> ?b\t0.5\t0.5\t0.5\t-4";
        let parsed = parse_rules(text);
        assert!(parsed.rules.is_empty());
        assert_eq!(parsed.skipped, 3);
    }

    #[test]
    fn out_of_range_metrics_are_skipped() {
        let text = "?a <p> ?b => ?a <q> ?b\tNaN\t1.5\t-0.2\t3\n\
                    ?a <p> ?b => ?a <q> ?b\tinf\t0.5\t0.5\t3\n\
                    ?a <p> ?b => ?a <q> ?b\t0.5\t1.5\t0.5\t3\n\
                    ?a <p> ?b => ?a <q> ?b\t0.5\t0.5\t-0.2\t3\n\
                    ?a <p> ?b => ?a <q> ?b\t1\t0\t1.0\t3";
        let parsed = parse_rules(text);
        assert_eq!(parsed.skipped, 4);
        assert_eq!(parsed.rules.len(), 1);
        assert!(parsed.rules[0].check().is_ok());
    }

    #[test]
    fn header_and_summary_only_yield_nothing() {
        let parsed = parse_rules("Rule\tHead Coverage\n3 rules mined.\n");
        assert_eq!(parsed, ParsedOutput::default());
    }
}
