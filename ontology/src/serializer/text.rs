//! Line-oriented text serializer for extracted rules.
//!
//! Each rule becomes one record line of the form
//! `{'rule': '...', 'head_coverage': 0.75, ..., 'body_size': 2}`.

use crate::model::ExtractedRule;

/// Serializes rules to text, one record per line, in the given order.
#[must_use]
pub fn to_text(rules: &[ExtractedRule]) -> String {
    let mut out = String::with_capacity(rules.len() * 160);
    for rule in rules {
        out.push_str(&record(rule));
        out.push('\n');
    }
    out
}

/// Renders a single rule record (no trailing newline).
#[must_use]
pub fn record(rule: &ExtractedRule) -> String {
    format!(
        "{{'rule': {}, 'head_coverage': {}, 'std_confidence': {}, 'pca_confidence': {}, 'positive_examples': {}, 'body_size': {}}}",
        quoted(&rule.rule),
        float(rule.head_coverage),
        float(rule.std_confidence),
        float(rule.pca_confidence),
        rule.positive_examples,
        rule.body_size
    )
}

/// Single-quoted string with `\` and `'` escaped.
fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Floats always carry a decimal point (`1.0`, not `1`).
fn float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
