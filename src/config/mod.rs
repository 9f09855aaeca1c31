//! JSON configuration of the command-line tools.

pub mod count;
pub mod descriptors;
pub mod train;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
