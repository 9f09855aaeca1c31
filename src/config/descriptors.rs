use crate::rows::RowDetectorParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct DescriptorToolConfig {
    pub mask: PathBuf,
    /// Ground resolution in pixels per meter.
    pub scale: f64,
    /// Headerless `x,y` plant annotations. When present the output table is
    /// labeled with a plant count per blob, covers every external blob of the
    /// mask and drops unannotated ones.
    #[serde(default)]
    pub points: Option<PathBuf>,
    /// Row detection for the unlabeled table.
    #[serde(default)]
    pub rows: RowDetectorParams,
    pub output: DescriptorOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct DescriptorOutputConfig {
    pub table_csv: PathBuf,
}

pub fn load_config(path: &Path) -> Result<DescriptorToolConfig, String> {
    super::load_json(path)
}
