//! Zeppelin 0.7.1 dialect
//!
//! Results live under `results.msg[]`; images are base64 PNG data URIs.

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;

use super::dialect::{ResultDialect, ResultRoute};
use crate::domain::{
    CodeLanguage, ConvertError, NotebookFormat, OutputType, Paragraph, ResultCode,
};

static BASE64_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"base64,(.*?)""#).expect("valid base64 pattern"));

/// Editor modes whose output repeats the paragraph source
const PROSE_MODES: &[&str] = &["text", "markdown"];

/// Dialect for notebooks exported by Zeppelin 0.7.x
#[derive(Debug, Clone, Copy, Default)]
pub struct NewDialect;

impl ResultDialect for NewDialect {
    fn format(&self) -> NotebookFormat {
        NotebookFormat::New
    }

    fn route<'a>(&self, paragraph: &'a Paragraph) -> ResultRoute<'a> {
        let Some(editor_mode) = paragraph.editor_mode() else {
            return ResultRoute::Skip;
        };
        let mode = CodeLanguage::mode_name(editor_mode);

        let Some(results) = paragraph.results.as_ref() else {
            return ResultRoute::Skip;
        };
        if results.code != ResultCode::Success {
            return ResultRoute::Skip;
        }
        let Some(first) = results.msg.first() else {
            return ResultRoute::Skip;
        };

        if PROSE_MODES.contains(&mode) {
            return ResultRoute::Skip;
        }

        match OutputType::from_tag(&first.output_type) {
            Some(output_type) => ResultRoute::Render(output_type, &first.data),
            None => ResultRoute::Skip,
        }
    }

    fn find_image<'a>(&self, msg: &'a str) -> Option<&'a str> {
        BASE64_RE
            .captures(msg)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    fn decode_image(&self, found: &str) -> Result<Vec<u8>, ConvertError> {
        STANDARD
            .decode(found.trim())
            .map_err(|e| ConvertError::ImageDecode(format!("Invalid base64 image: {e}")))
    }
}
