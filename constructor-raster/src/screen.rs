//! Screen compositing filter for engraving previews.
//!
//! Simulates how a portrait looks engraved on dark stone: every channel is
//! screen-blended with 50% white so the image lightens, and the alpha
//! channel is rewritten from luminance so dark pixels dissolve into the
//! monument surface.

use image::RgbaImage;

use crate::error::RasterResult;
use crate::codec::{load_rgba_from_data_uri, png_data_uri};

/// Alpha falloff exponent applied to luminance.
const ALPHA_GAMMA: f32 = 0.7;

/// Apply the screen filter in place.
///
/// Per pixel: `c' = 1 - (1 - c) * 0.5` for each color channel, and
/// `alpha = luminance^0.7` where luminance uses the Rec. 601 weights
/// (0.299, 0.587, 0.114). The source alpha is discarded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn apply_screen_filter(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let r = f32::from(pixel[0]) / 255.0;
        let g = f32::from(pixel[1]) / 255.0;
        let b = f32::from(pixel[2]) / 255.0;

        let luminance = 0.114f32.mul_add(b, 0.299f32.mul_add(r, 0.587 * g));

        pixel[0] = ((1.0 - (1.0 - r) * 0.5) * 255.0) as u8;
        pixel[1] = ((1.0 - (1.0 - g) * 0.5) * 255.0) as u8;
        pixel[2] = ((1.0 - (1.0 - b) * 0.5) * 255.0) as u8;
        pixel[3] = (luminance.powf(ALPHA_GAMMA) * 255.0) as u8;
    }
}

/// Run the screen filter over a data-URI image and return the result as a
/// PNG data URI, ready to store as an element's `processed_src`.
///
/// # Errors
///
/// Returns [`crate::RasterError::Resource`] if the URI cannot be decoded or
/// the result cannot be encoded.
pub fn process_data_uri(uri: &str) -> RasterResult<String> {
    let mut image = load_rgba_from_data_uri(uri)?;
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        "applying screen filter"
    );
    apply_screen_filter(&mut image);
    png_data_uri(&image)
}
