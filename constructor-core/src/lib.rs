//! # Monument Constructor Core
//!
//! Scene model and interaction logic for the monument constructor: the
//! element graph, direct-manipulation state machine, and design
//! persistence. Rendering and network access live in sibling crates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             constructor-core                │
//! ├─────────────────────────────────────────────┤
//! │  Scene Graph     │  Interaction             │
//! │  - Elements      │  - Drag / resize         │
//! │  - Transforms    │  - Rotation / pinch      │
//! │  - Z-order       │  - Inline text editing   │
//! ├─────────────────────────────────────────────┤
//! │  Geometry        │  Persistence             │
//! │  - Hit testing   │  - Design documents      │
//! │  - Coord spaces  │  - Saved-design store    │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod fonts;
pub mod geometry;
pub mod repository;
pub mod scene;

pub use document::{DesignDocument, DOCUMENT_VERSION};
pub use editor::{Editor, EditorMode, ResizeStart, ScreenModeChange};
pub use element::{
    Element, ElementId, ElementKind, FontSpec, ImageAttrs, TextAlign, TextAttrs, Transform,
};
pub use error::{ConstructorError, ConstructorResult};
pub use event::{TouchInput, TouchPhase, TouchPoint};
pub use fonts::{engraving_font, EngravingFont, ENGRAVING_FONTS};
pub use geometry::Point;
pub use repository::DesignRepository;
pub use scene::{Scene, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

/// Constructor core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
