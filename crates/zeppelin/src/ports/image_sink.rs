//! Image Sink Port
//!
//! Where decoded result images go, and how the Markdown refers to them.

use crate::domain::errors::ConvertError;

/// Destination for images extracted from paragraph results
///
/// # Example
///
/// ```rust,ignore
/// use zeppelin::ports::ImageSink;
///
/// struct S3Sink { /* bucket client */ }
///
/// impl ImageSink for S3Sink {
///     fn store(&mut self, file_name: &str, png: &[u8]) -> Result<String, ConvertError> {
///         // upload, return public URL
///     }
/// }
/// ```
pub trait ImageSink {
    /// Persist a PNG image
    ///
    /// # Arguments
    /// * `file_name` - Name such as `output_1.png`, unique per conversion
    /// * `png` - Encoded PNG bytes
    ///
    /// # Returns
    /// The link target to embed in the Markdown document
    fn store(&mut self, file_name: &str, png: &[u8]) -> Result<String, ConvertError>;
}

impl<T: ImageSink + ?Sized> ImageSink for &mut T {
    fn store(&mut self, file_name: &str, png: &[u8]) -> Result<String, ConvertError> {
        (**self).store(file_name, png)
    }
}
