//! Result dialects
//!
//! The parts of conversion that differ between Zeppelin export formats:
//! where results live, how they are routed, and how images are embedded.

use crate::domain::{ConvertError, NotebookFormat, OutputType, Paragraph};

/// What to do with a paragraph's result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultRoute<'a> {
    /// Nothing to render
    Skip,
    /// Render `msg` with the handler for the output type
    Render(OutputType, &'a str),
    /// The paragraph failed; emit the error marker
    Failed,
}

/// Format-specific result handling
pub trait ResultDialect {
    fn format(&self) -> NotebookFormat;

    /// Decide how a paragraph's result is rendered
    fn route<'a>(&self, paragraph: &'a Paragraph) -> ResultRoute<'a>;

    /// Locate an encoded image inside an HTML result
    fn find_image<'a>(&self, msg: &'a str) -> Option<&'a str>;

    /// Turn the located image into PNG bytes
    fn decode_image(&self, found: &str) -> Result<Vec<u8>, ConvertError>;
}
