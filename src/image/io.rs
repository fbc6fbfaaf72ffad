//! I/O helpers for grayscale frames and JSON.
//!
//! - `load_raw` / `save_raw`: headerless `width × height` row-major bytes.
//! - `load_grayscale_image`: decode a PNG/JPEG, convert to luma and resize
//!   to the frame size.
//! - `save_grayscale_png`: write a frame as an 8-bit grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::GrayImageU8;
use crate::error::{FilterError, Result};
use image::imageops::{self, FilterType};
use image::GrayImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read exactly `width * height` bytes from a headerless raw file.
pub fn load_raw(path: &Path, width: usize, height: usize) -> Result<GrayImageU8> {
    let data = fs::read(path).map_err(|e| FilterError::io(path, e))?;
    GrayImageU8::from_bytes(width, height, data)
}

/// Write the frame bytes verbatim, creating parent directories.
pub fn save_raw(path: &Path, image: &GrayImageU8) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, image.as_bytes()).map_err(|e| FilterError::io(path, e))
}

/// Decode an image file, convert to 8-bit grayscale and resize to `width × height`.
pub fn load_grayscale_image(path: &Path, width: usize, height: usize) -> Result<GrayImageU8> {
    let mut gray = image::open(path)
        .map_err(|source| FilterError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .into_luma8();
    if gray.width() as usize != width || gray.height() as usize != height {
        gray = imageops::resize(&gray, width as u32, height as u32, FilterType::Triangle);
    }
    GrayImageU8::from_bytes(width, height, gray.into_raw())
}

/// Load either a `.raw` dump or any decodable image format.
pub fn load_image_any(path: &Path, width: usize, height: usize) -> Result<GrayImageU8> {
    let is_raw = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("raw"));
    if is_raw {
        load_raw(path, width, height)
    } else {
        load_grayscale_image(path, width, height)
    }
}

/// Save a frame to a grayscale PNG.
pub fn save_grayscale_png(image: &GrayImageU8, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let expected = image.len();
    let out = GrayImage::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.as_bytes().to_vec(),
    )
    .ok_or(FilterError::DimensionMismatch {
        expected,
        actual: image.as_bytes().len(),
    })?;
    out.save(path).map_err(|source| FilterError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| FilterError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|e| FilterError::io(path, e))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| FilterError::io(parent, e))?;
        }
    }
    Ok(())
}
