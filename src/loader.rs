//! Decoded-image ingestion. The engine only ever consumes raw RGBA pixel
//! buffers; every encoded byte stream passes through here.

use crate::canvas::Canvas;
use crate::color::Color;
use std::fs;
use std::path::Path;

/// Decode an encoded image (PNG) into a `Canvas`.
pub fn decode_image(data: &[u8]) -> Result<Canvas, String> {
    let decoded = image::load_from_memory(data)
        .map_err(|e| format!("image decode failed: {}", e))?
        .to_rgba8();
    let (w, h) = decoded.dimensions();
    let pixels: Vec<Color> = decoded
        .pixels()
        .map(|p| Color::rgba(p[0], p[1], p[2], p[3]))
        .collect();
    Canvas::from_pixels(w as i32, h as i32, pixels)
        .ok_or_else(|| "image has zero extent".to_string())
}

/// Read and decode an image file.
pub fn load_image(path: impl AsRef<Path>) -> Result<Canvas, String> {
    decode_image(&read_file(path)?)
}

/// Whole-file read convenience.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>, String> {
    fs::read(path.as_ref())
        .map_err(|e| format!("read {} failed: {}", path.as_ref().display(), e))
}
