//! Value Objects
//!
//! Immutable types describing notebook formats, outputs, and dates.

mod language;
mod notebook_format;
mod output_type;
mod timestamp;

pub use language::{CodeLanguage, DEFAULT_LANGUAGE};
pub use notebook_format::NotebookFormat;
pub use output_type::OutputType;
pub use timestamp::Timestamp;
