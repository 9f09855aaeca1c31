#![doc = include_str!("../README.md")]

pub mod config;
pub mod contour;
pub mod counting;
pub mod descriptors;
pub mod error;
pub mod image;
pub mod model;
pub mod rows;

// --- High-level re-exports -------------------------------------------------

pub use crate::counting::{count, CountResult, LabeledBox};
pub use crate::error::{Error, Result};
pub use crate::model::{CountingModel, FitQuality};
pub use crate::rows::{detect_rows, RowDetection, RowDetectorParams};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use plant_counter::prelude::*;
/// use std::path::Path;
///
/// # fn main() -> plant_counter::Result<()> {
/// let mask = load_mask(Path::new("mask.png"))?;
/// let model = CountingModel::load(Path::new("model.json"))?;
/// let res = count(&mask, &model, 25.0)?;
/// println!("plants={} rows={}", res.total, res.row_count);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::descriptors::{DescriptorVector, LabeledSample};
    pub use crate::image::io::load_mask;
    pub use crate::image::BinaryMask;
    pub use crate::{count, detect_rows, CountResult, CountingModel};
}
