//! Image decoding and data-URI utilities.
//!
//! Element sources travel as base64 data URIs (`data:image/png;base64,...`)
//! so a saved design stays self-contained.

use base64::Engine;
use image::RgbaImage;

use crate::error::{RasterError, RasterResult};

/// Decode an image from raw bytes into RGBA pixels.
///
/// # Errors
///
/// Returns [`RasterError::Resource`] if the bytes are not a decodable image.
pub fn load_rgba_from_bytes(data: &[u8]) -> RasterResult<RgbaImage> {
    let img = image::load_from_memory(data)
        .map_err(|e| RasterError::Resource(format!("Failed to decode image: {e}")))?;
    Ok(img.to_rgba8())
}

/// Decode an image from a base64 data URI.
///
/// # Errors
///
/// Returns [`RasterError::Resource`] if the URI is malformed or the payload
/// cannot be decoded.
pub fn load_rgba_from_data_uri(uri: &str) -> RasterResult<RgbaImage> {
    load_rgba_from_bytes(&data_uri_bytes(uri)?)
}

/// Extract the decoded payload of a base64 data URI.
///
/// # Errors
///
/// Returns [`RasterError::Resource`] for anything that is not a
/// `data:...;base64,...` URI.
pub fn data_uri_bytes(uri: &str) -> RasterResult<Vec<u8>> {
    let Some(uri_data) = uri.strip_prefix("data:") else {
        return Err(RasterError::Resource("Not a data URI".to_string()));
    };

    let comma_pos = uri_data
        .find(',')
        .ok_or_else(|| RasterError::Resource("Invalid data URI: missing comma".to_string()))?;
    let metadata = &uri_data[..comma_pos];
    let encoded = &uri_data[comma_pos + 1..];

    if !metadata.contains(";base64") {
        return Err(RasterError::Resource(
            "Invalid data URI: not base64 encoded".to_string(),
        ));
    }

    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| RasterError::Resource(format!("Failed to decode base64: {e}")))
}

/// Encode an image to PNG bytes.
///
/// # Errors
///
/// Returns [`RasterError::Resource`] if encoding fails.
pub fn encode_png(image: &RgbaImage) -> RasterResult<Vec<u8>> {
    let mut buf = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| RasterError::Resource(format!("PNG encoding failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Encode an image as a PNG data URI.
///
/// # Errors
///
/// Returns [`RasterError::Resource`] if encoding fails.
pub fn png_data_uri(image: &RgbaImage) -> RasterResult<String> {
    let png = encode_png(image)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(png);
    Ok(format!("data:image/png;base64,{encoded}"))
}
