//! Ports (Interfaces)
//!
//! Abstract interfaces the converter uses to reach the outside world.
//!
//! Implementations of these traits live in `adapters/`.

mod image_sink;

// Re-exports
pub use image_sink::ImageSink;
