//! JSON serializer for extracted rules.

use crate::model::ExtractedRule;

/// Serializes rules to a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if `serde_json` fails to serialize a rule.
pub fn to_json(rules: &[ExtractedRule]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rules)
}

/// Parses a JSON array of rules.
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of rule objects.
pub fn from_json(text: &str) -> serde_json::Result<Vec<ExtractedRule>> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_back_what_it_writes() {
        let rules = vec![ExtractedRule {
            rule: "?a <p> ?b  => ?b <q> ?a".to_string(),
            head_coverage: 0.1,
            std_confidence: 0.2,
            pca_confidence: 0.3,
            positive_examples: 4,
            body_size: 1,
        }];
        let text = to_json(&rules).unwrap();
        assert!(text.contains("\"pca_confidence\": 0.3"));
        assert_eq!(from_json(&text).unwrap(), rules);
    }

    #[test]
    fn rejects_non_array() {
        assert!(from_json("{\"rule\": \"x\"}").is_err());
    }
}
