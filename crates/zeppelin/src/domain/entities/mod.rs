//! Domain Entities
//!
//! The notebook as exported by Zeppelin and the Markdown document built from it.

mod document;
mod notebook;

pub use document::{MarkdownDocument, NoteMetadata, NOT_AVAILABLE};
pub use notebook::{
    LegacyResult, NewResults, Notebook, NotebookSummary, Paragraph, ParagraphConfig, ResultCode,
    ResultMessage,
};
