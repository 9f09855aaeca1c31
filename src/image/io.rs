//! I/O helpers for masks and JSON.
//!
//! - `load_mask`: read a PNG/TIFF/etc. and binarize it into a `BinaryMask`.
//! - `save_mask`: write a mask back to disk as 8-bit grayscale.
//! - `write_json_file` / `read_json_file`: pretty JSON documents on disk.
use super::BinaryMask;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk, convert to 8-bit grayscale and binarize
/// (nonzero = plant).
pub fn load_mask(path: &Path) -> Result<BinaryMask> {
    let gray = image::open(path)?.into_luma8();
    Ok(BinaryMask::from_gray(&gray))
}

pub fn save_mask(mask: &BinaryMask, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    mask.to_gray_image().save(path)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
