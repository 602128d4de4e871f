//! OutputType - Kind of interpreter output attached to a paragraph

use serde::{Deserialize, Serialize};

/// Interpreter output types the converter knows how to render
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputType {
    /// HTML output, rendered as an embedded image when one is present
    Html,
    /// Plain REPL text
    Text,
    /// Tab separated or JSON encoded table
    Table,
}

impl OutputType {
    /// Parse a Zeppelin type tag; unknown tags (e.g. `ANGULAR`) yield `None`
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "HTML" => Some(OutputType::Html),
            "TEXT" => Some(OutputType::Text),
            "TABLE" => Some(OutputType::Table),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputType::Html => write!(f, "HTML"),
            OutputType::Text => write!(f, "TEXT"),
            OutputType::Table => write!(f, "TABLE"),
        }
    }
}
