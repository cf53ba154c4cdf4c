//! Background eraser for uploaded portraits.
//!
//! Holds the full-resolution image while the UI shows a copy scaled to fit
//! an 800x600 viewport; stroke coordinates arrive in display space and are
//! mapped back to buffer space here. Strokes punch transparent circles and
//! are undoable, with the history capped so long sessions stay bounded.

use image::{Rgba, RgbaImage};

use crate::codec::{load_rgba_from_data_uri, png_data_uri};
use crate::error::RasterResult;

/// Smallest brush diameter, display pixels.
pub const MIN_BRUSH_SIZE: f32 = 5.0;
/// Largest brush diameter, display pixels.
pub const MAX_BRUSH_SIZE: f32 = 100.0;
/// Default brush diameter.
pub const DEFAULT_BRUSH_SIZE: f32 = 20.0;

/// Display viewport the image is scaled to fit.
const MAX_DISPLAY_WIDTH: f32 = 800.0;
const MAX_DISPLAY_HEIGHT: f32 = 600.0;

/// Oldest snapshots are dropped past this many history states.
const HISTORY_LIMIT: usize = 64;

/// An erasable image with undo/redo history.
#[derive(Debug)]
pub struct EraserCanvas {
    image: RgbaImage,
    display_scale: f32,
    brush_size: f32,
    /// Snapshots; `history[cursor]` mirrors the current image.
    history: Vec<RgbaImage>,
    cursor: usize,
    stroke_active: bool,
    stroke_dirty: bool,
}

impl EraserCanvas {
    /// Wrap an image for erasing.
    #[must_use]
    pub fn new(image: RgbaImage) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let (w, h) = (image.width() as f32, image.height() as f32);
        let display_scale = (MAX_DISPLAY_WIDTH / w)
            .min(MAX_DISPLAY_HEIGHT / h)
            .min(1.0);
        Self {
            history: vec![image.clone()],
            image,
            display_scale,
            brush_size: DEFAULT_BRUSH_SIZE,
            cursor: 0,
            stroke_active: false,
            stroke_dirty: false,
        }
    }

    /// Load an eraser canvas from a data-URI image.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Resource`](crate::error::RasterError::Resource) if the URI cannot be decoded.
    pub fn from_data_uri(uri: &str) -> RasterResult<Self> {
        Ok(Self::new(load_rgba_from_data_uri(uri)?))
    }

    /// Current image, full resolution.
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Display size after fitting into the 800x600 viewport.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn display_size(&self) -> (f32, f32) {
        (
            self.image.width() as f32 * self.display_scale,
            self.image.height() as f32 * self.display_scale,
        )
    }

    /// Current brush diameter, display pixels.
    #[must_use]
    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    /// Set the brush diameter, clamped to the slider range.
    pub fn set_brush_size(&mut self, size: f32) {
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    /// Begin an erase stroke.
    pub fn begin_stroke(&mut self) {
        self.stroke_active = true;
        self.stroke_dirty = false;
    }

    /// Erase at a display-space position. No-op outside a stroke.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn erase_at(&mut self, display_x: f32, display_y: f32) {
        if !self.stroke_active {
            return;
        }
        let scale = self.display_scale.max(f32::EPSILON);
        let cx = display_x / scale;
        let cy = display_y / scale;
        let radius = self.brush_size / 2.0 / scale;
        let radius_sq = radius * radius;

        let x_min = ((cx - radius).floor().max(0.0)) as u32;
        let y_min = ((cy - radius).floor().max(0.0)) as u32;
        let x_max = ((cx + radius).ceil() as u32).min(self.image.width().saturating_sub(1));
        let y_max = ((cy + radius).ceil() as u32).min(self.image.height().saturating_sub(1));

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx.mul_add(dx, dy * dy) <= radius_sq {
                    let p = self.image.get_pixel_mut(x, y);
                    *p = Rgba([p[0], p[1], p[2], 0]);
                    self.stroke_dirty = true;
                }
            }
        }
    }

    /// Finish a stroke, recording it as one undo step. Strokes that erased
    /// nothing leave the history untouched.
    pub fn end_stroke(&mut self) {
        if !self.stroke_active {
            return;
        }
        self.stroke_active = false;
        if !self.stroke_dirty {
            return;
        }
        // A new stroke invalidates the redo tail.
        self.history.truncate(self.cursor + 1);
        self.history.push(self.image.clone());
        self.cursor += 1;
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
            self.cursor -= 1;
        }
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Step back one stroke. No-op at the oldest retained state.
    pub fn undo(&mut self) {
        if self.can_undo() {
            self.cursor -= 1;
            self.image = self.history[self.cursor].clone();
        }
    }

    /// Reapply the stroke undone last. No-op when nothing was undone.
    pub fn redo(&mut self) {
        if self.can_redo() {
            self.cursor += 1;
            self.image = self.history[self.cursor].clone();
        }
    }

    /// Discard every stroke, restoring the oldest retained state.
    pub fn reset(&mut self) {
        let initial = self.history[0].clone();
        self.image = initial.clone();
        self.history = vec![initial];
        self.cursor = 0;
        self.stroke_active = false;
        self.stroke_dirty = false;
    }

    /// Export the edited image as a PNG data URI.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Resource`](crate::error::RasterError::Resource) if encoding fails.
    pub fn to_data_uri(&self) -> RasterResult<String> {
        png_data_uri(&self.image)
    }
}
