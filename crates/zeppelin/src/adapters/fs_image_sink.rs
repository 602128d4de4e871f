//! Filesystem Image Sink
//!
//! Writes images into `<output dir>/<images dir>`, next to the Markdown file.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::domain::errors::ConvertError;
use crate::ports::ImageSink;

/// Default sub-directory for extracted images
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Filesystem implementation of ImageSink
pub struct FsImageSink {
    root: PathBuf,
    images_dir: String,
}

impl FsImageSink {
    /// Sink writing into `<root>/images`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images_dir: DEFAULT_IMAGES_DIR.to_string(),
        }
    }

    /// Sink writing into `<root>/<images_dir>`; the directory must stay under `root`
    pub fn with_images_dir(
        root: impl Into<PathBuf>,
        images_dir: impl Into<String>,
    ) -> Result<Self, ConvertError> {
        let images_dir = images_dir.into();
        validate_images_dir(&images_dir)?;

        Ok(Self {
            root: root.into(),
            images_dir,
        })
    }

    /// Directory images are written to
    pub fn images_path(&self) -> PathBuf {
        self.root.join(&self.images_dir)
    }

    fn link_for(&self, file_name: &str) -> String {
        // Links are relative to the Markdown file, which lives in `root`
        Path::new(&self.images_dir)
            .join(file_name)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

/// Accept only relative paths without `..`, so images land under the output directory
pub fn validate_images_dir(images_dir: &str) -> Result<(), ConvertError> {
    let path = Path::new(images_dir);
    if images_dir.trim().is_empty() {
        return Err(ConvertError::Validation(
            "images directory must not be empty".to_string(),
        ));
    }
    if path.is_absolute() || path.has_root() {
        return Err(ConvertError::Validation(format!(
            "images directory must be relative: {}",
            images_dir
        )));
    }
    if !path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(ConvertError::Validation(format!(
            "images directory must stay inside the output directory: {}",
            images_dir
        )));
    }
    Ok(())
}

impl ImageSink for FsImageSink {
    fn store(&mut self, file_name: &str, png: &[u8]) -> Result<String, ConvertError> {
        let dir = self.images_path();
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|e| ConvertError::io(&dir, e))?;
            tracing::debug!("Created image directory {:?}", dir);
        }

        let path = dir.join(file_name);
        fs::write(&path, png).map_err(|e| ConvertError::io(&path, e))?;
        tracing::debug!(bytes = png.len(), "Wrote image {:?}", path);

        Ok(self.link_for(file_name))
    }
}
