//! In-memory Image Sink
//!
//! Keeps images in memory; used for dry runs and tests.

use crate::domain::errors::ConvertError;
use crate::ports::ImageSink;

use super::fs_image_sink::DEFAULT_IMAGES_DIR;

#[derive(Debug, Default)]
pub struct MemoryImageSink {
    images: Vec<(String, Vec<u8>)>,
}

impl MemoryImageSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored images as `(file name, bytes)` in insertion order
    pub fn images(&self) -> &[(String, Vec<u8>)] {
        &self.images
    }
}

impl ImageSink for MemoryImageSink {
    fn store(&mut self, file_name: &str, png: &[u8]) -> Result<String, ConvertError> {
        self.images.push((file_name.to_string(), png.to_vec()));
        Ok(format!("{}/{}", DEFAULT_IMAGES_DIR, file_name))
    }
}
