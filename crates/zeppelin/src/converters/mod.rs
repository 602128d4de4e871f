//! Converters
//!
//! Markdown generation for both Zeppelin export formats.

mod dialect;
mod legacy;
mod markdown;
mod new;
mod options;
pub mod table;

pub use dialect::{ResultDialect, ResultRoute};
pub use legacy::LegacyDialect;
pub use markdown::{LegacyConverter, MarkdownConverter, NewConverter};
pub use new::NewDialect;
pub use options::ConverterOptions;

use crate::domain::{ConvertError, MarkdownDocument, NoteMetadata, Notebook, NotebookFormat};
use crate::ports::ImageSink;

/// Outcome of `convert_notebook`
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub format: NotebookFormat,
    pub document: MarkdownDocument,
    pub metadata: NoteMetadata,
    pub images: usize,
}

/// Convert a notebook with the dialect matching `format`
///
/// Pass `None` to detect the format from the notebook itself.
pub fn convert_notebook<S: ImageSink>(
    notebook: &Notebook,
    format: Option<NotebookFormat>,
    sink: S,
    options: ConverterOptions,
) -> Result<ConversionReport, ConvertError> {
    options.validate()?;

    let format = format.unwrap_or_else(|| notebook.detect_format());
    match format {
        NotebookFormat::Legacy => run(MarkdownConverter::legacy(sink, options), notebook),
        NotebookFormat::New => run(MarkdownConverter::new_format(sink, options), notebook),
    }
}

fn run<D: ResultDialect, S: ImageSink>(
    mut converter: MarkdownConverter<D, S>,
    notebook: &Notebook,
) -> Result<ConversionReport, ConvertError> {
    converter.build_document(notebook)?;

    let format = converter.format();
    let images = converter.image_count();
    let metadata = converter.metadata().clone();
    let (document, _) = converter.into_parts();

    Ok(ConversionReport {
        format,
        document,
        metadata,
        images,
    })
}
