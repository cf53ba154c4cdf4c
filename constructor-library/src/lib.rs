//! # Monument Constructor Library
//!
//! Client for the remote asset library: monument catalog, decor art, and
//! server-side image processing, plus the cancellation guard that keeps
//! slow downloads from clobbering newer selections.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod error;
pub mod loader;

pub use catalog::{
    CatalogCategory, CatalogProduct, DecorAsset, DecorKind, LibraryClient, MonumentShape,
    MONUMENT_SHAPES,
};
pub use error::{LibraryError, LibraryResult};
pub use loader::{ImageLoader, LoadTicket};

/// Library crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
