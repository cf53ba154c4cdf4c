//! # Monument Constructor Raster
//!
//! Pixel-level operations for the monument constructor: the screen
//! compositing filter that melts portraits into stone, the undoable
//! background eraser, and the PNG/PDF export pipeline built on the
//! resvg/tiny-skia SVG rasterizer.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod eraser;
pub mod error;
pub mod export;
pub mod screen;

pub use codec::{
    data_uri_bytes, encode_png, load_rgba_from_bytes, load_rgba_from_data_uri, png_data_uri,
};
pub use eraser::{EraserCanvas, DEFAULT_BRUSH_SIZE, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
pub use error::{RasterError, RasterResult};
pub use export::{DesignExporter, ExportConfig, ExportFormat};
pub use screen::{apply_screen_filter, process_data_uri};

/// Raster crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
