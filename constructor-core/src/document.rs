//! Serializable design document.
//!
//! [`DesignDocument`] is the persisted form of a scene: the monument image,
//! the elements in z-order, and save metadata. Derived data such as the
//! screen-filter cache is stripped on save and rebuilt on demand after load.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::{ConstructorResult, Element, Scene};

/// Current document format version.
pub const DOCUMENT_VERSION: &str = "1.0";

/// A saved monument design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignDocument {
    /// Monument background image source.
    pub monument_image: String,
    /// Elements in z-order (earlier paints below later).
    pub elements: Vec<Element>,
    /// Save time, Unix milliseconds.
    pub timestamp: u64,
    /// Format version.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

impl DesignDocument {
    /// Build a document from a runtime scene.
    ///
    /// The screen-filter cache (`processed_src`) is dropped from image
    /// elements so saved designs stay small; the `screen_mode` flag is
    /// kept and the cache regenerates after load.
    #[must_use]
    pub fn from_scene(scene: &Scene) -> Self {
        let elements = scene
            .elements()
            .iter()
            .map(|element| {
                let mut element = element.clone();
                if let Some(image) = element.kind.image_mut() {
                    image.processed_src = None;
                }
                element
            })
            .collect();
        Self {
            monument_image: scene.monument_image.clone(),
            elements,
            timestamp: current_timestamp_ms(),
            version: default_version(),
        }
    }

    /// Materialize the document into a scene, replacing its contents.
    /// Zoom and pan reset to the defaults.
    #[must_use]
    pub fn into_scene(self) -> Scene {
        let mut scene = Scene::new(self.monument_image);
        scene.set_elements(self.elements);
        scene
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConstructorError::Serialization`] on failure.
    pub fn to_json(&self) -> ConstructorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConstructorError::Serialization`] on malformed input.
    pub fn from_json(json: &str) -> ConstructorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Current Unix timestamp in milliseconds.
pub(crate) fn current_timestamp_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| {
        // Timestamp will not exceed u64 max for millennia
        #[allow(clippy::cast_possible_truncation)]
        {
            d.as_millis() as u64
        }
    })
}
