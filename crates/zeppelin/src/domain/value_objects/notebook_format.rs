//! NotebookFormat - Zeppelin export format generation

use serde::{Deserialize, Serialize};

/// Notebook export format
///
/// Zeppelin changed the paragraph result layout between releases:
/// 0.6.x stores a single `result` object, 0.7.x stores `results`
/// with a list of typed messages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotebookFormat {
    /// Zeppelin 0.6.2 layout (`result`)
    #[default]
    Legacy,
    /// Zeppelin 0.7.1 layout (`results`)
    New,
}

impl NotebookFormat {
    /// Paragraph key holding the interpreter output
    pub fn result_key(&self) -> &'static str {
        match self {
            NotebookFormat::Legacy => "result",
            NotebookFormat::New => "results",
        }
    }

    /// Zeppelin release the format was introduced with
    pub fn zeppelin_version(&self) -> &'static str {
        match self {
            NotebookFormat::Legacy => "0.6.2",
            NotebookFormat::New => "0.7.1",
        }
    }
}

impl std::fmt::Display for NotebookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotebookFormat::Legacy => write!(f, "legacy"),
            NotebookFormat::New => write!(f, "new"),
        }
    }
}

impl std::str::FromStr for NotebookFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "0.6" | "0.6.2" => Ok(NotebookFormat::Legacy),
            "new" | "0.7" | "0.7.1" => Ok(NotebookFormat::New),
            _ => Err(format!("Unknown notebook format: {}", s)),
        }
    }
}
