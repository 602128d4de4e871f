//! Notebook Entity - Zeppelin note as exported to JSON

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ConvertError;
use crate::domain::value_objects::NotebookFormat;

/// A Zeppelin note
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

/// One notebook cell: its source text plus the interpreter output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ParagraphConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Zeppelin 0.6.x output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<LegacyResult>,
    /// Zeppelin 0.7.x output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<NewResults>,
}

/// Paragraph editor settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_mode: Option<String>,
}

/// Interpreter status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultCode {
    Success,
    Error,
    Incomplete,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Single output of a 0.6.x paragraph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyResult {
    #[serde(default)]
    pub code: ResultCode,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub output_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

/// Output list of a 0.7.x paragraph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewResults {
    #[serde(default)]
    pub code: ResultCode,
    #[serde(default)]
    pub msg: Vec<ResultMessage>,
}

/// Typed output entry of a 0.7.x paragraph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultMessage {
    #[serde(default, rename = "type")]
    pub output_type: String,
    #[serde(default)]
    pub data: String,
}

/// Counts reported by `Notebook::summary`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotebookSummary {
    pub paragraphs: usize,
    pub with_text: usize,
    pub successes: usize,
    pub errors: usize,
}

impl Notebook {
    /// Parse a notebook from its JSON export
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a notebook file
    pub fn from_path(path: &Path) -> Result<Self, ConvertError> {
        let content = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Detect which Zeppelin release produced the export
    ///
    /// Any paragraph carrying `results` marks the 0.7.x layout.
    pub fn detect_format(&self) -> NotebookFormat {
        if self.paragraphs.iter().any(|p| p.results.is_some()) {
            NotebookFormat::New
        } else {
            NotebookFormat::Legacy
        }
    }

    pub fn summary(&self) -> NotebookSummary {
        let mut summary = NotebookSummary {
            paragraphs: self.paragraphs.len(),
            ..Default::default()
        };

        for paragraph in &self.paragraphs {
            if paragraph.text.is_some() {
                summary.with_text += 1;
            }
            match paragraph.code() {
                Some(ResultCode::Success) => summary.successes += 1,
                Some(ResultCode::Error) => summary.errors += 1,
                _ => {}
            }
        }

        summary
    }
}

impl Paragraph {
    /// Editor mode from the paragraph config, if any
    pub fn editor_mode(&self) -> Option<&str> {
        self.config.as_ref()?.editor_mode.as_deref()
    }

    /// Result status regardless of export layout
    pub fn code(&self) -> Option<ResultCode> {
        self.results
            .as_ref()
            .map(|r| r.code)
            .or_else(|| self.result.as_ref().map(|r| r.code))
    }
}
