//! Serializers for extracted rules.
//!
//! Two formats are supported:
//! - **Text** ([`text`]): one record per line, the format the rule list is saved in
//! - **JSON** ([`json`]): a JSON array that [`json::from_json`] reads back

pub mod json;
pub mod text;

use std::fmt;

/// Output format for saved rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RulesFormat {
    /// One record per line.
    #[default]
    Text,
    /// Pretty-printed JSON array.
    Json,
}

impl RulesFormat {
    /// Returns the short name used on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RulesFormat::Text => "text",
            RulesFormat::Json => "json",
        }
    }

    /// Parses `text`/`txt` or `json`, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(RulesFormat::Text),
            "json" => Some(RulesFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for RulesFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
