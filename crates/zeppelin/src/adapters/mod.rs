//! Adapters
//!
//! Concrete `ImageSink` implementations.

mod fs_image_sink;
mod memory_image_sink;

pub use fs_image_sink::{validate_images_dir, FsImageSink, DEFAULT_IMAGES_DIR};
pub use memory_image_sink::MemoryImageSink;
