//! Zeppelin Notebook Converter
//!
//! Turns Apache Zeppelin notebook exports (JSON) into Markdown documents
//! with front matter, fenced code, tables, and extracted chart images.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): notebook model and value types
//!   - `entities/`: Notebook, Paragraph, MarkdownDocument
//!   - `value_objects/`: NotebookFormat, OutputType, Timestamp
//!   - `errors/`: ConvertError
//!
//! - **Ports** (`ports/`): ImageSink
//! - **Adapters** (`adapters/`): filesystem and in-memory image sinks
//! - **Converters** (`converters/`): Markdown builder plus the 0.6.x
//!   (`result`, inline SVG) and 0.7.x (`results`, base64 PNG) dialects
//!
//! # Usage
//!
//! ```rust,ignore
//! use zeppelin::{convert_notebook, ConverterOptions, FsImageSink, Notebook};
//!
//! let notebook = Notebook::from_path("note.json".as_ref())?;
//! let options = ConverterOptions::default();
//! let report = convert_notebook(&notebook, None, FsImageSink::new("out"), options)?;
//! std::fs::write("out/note.md", report.document.render())?;
//! ```

pub mod adapters;
pub mod converters;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use adapters::{validate_images_dir, FsImageSink, MemoryImageSink, DEFAULT_IMAGES_DIR};
pub use converters::{
    convert_notebook, ConversionReport, ConverterOptions, LegacyConverter, MarkdownConverter,
    NewConverter,
};
pub use domain::{
    ConvertError, MarkdownDocument, NoteMetadata, Notebook, NotebookFormat, NotebookSummary,
    Paragraph, Timestamp,
};
pub use ports::ImageSink;
