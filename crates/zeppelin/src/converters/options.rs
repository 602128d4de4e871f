//! Converter options

use serde::{Deserialize, Serialize};

use super::table::DEFAULT_ROW_LIMIT;
use crate::domain::ConvertError;

/// Settings shared by every conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterOptions {
    /// Author used until a paragraph names one
    pub user: String,
    /// Fence language for paragraphs without an interpreter directive
    pub language: Option<String>,
    /// Rows kept from tables Zeppelin marked as truncated
    pub table_row_limit: usize,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            user: "anonymous".to_string(),
            language: None,
            table_row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

impl ConverterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_table_row_limit(mut self, limit: usize) -> Self {
        self.table_row_limit = limit;
        self
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.table_row_limit == 0 {
            return Err(ConvertError::Validation(
                "table row limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
