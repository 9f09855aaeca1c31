use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct TrainToolConfig {
    /// Labeled descriptor tables, concatenated in order.
    pub tables: Vec<PathBuf>,
    pub output: TrainOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct TrainOutputConfig {
    pub model_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<TrainToolConfig, String> {
    super::load_json(path)
}
