//! End-to-end plant counting on one mask.
//!
//! Rows are detected first; only blobs kept by a row are described and
//! passed through the model. The total is the sum of all per-blob estimates,
//! rounded once (half to even). Blobs whose estimate is not positive still
//! contribute to the total but get no label.

use crate::contour::BoundingBox;
use crate::descriptors;
use crate::error::{check_scale, Error, Result};
use crate::image::BinaryMask;
use crate::model::{self, CountingModel};
use crate::rows::{detect_rows_with, LineSegment, RowDetectorParams};
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// A blob with a positive estimate, ready to draw.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabeledBox {
    pub bbox: BoundingBox,
    /// Estimate with one decimal, e.g. `"2.4"`.
    pub label: String,
    pub estimate: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CountResult {
    pub total: i64,
    pub labeled_blobs: Vec<LabeledBox>,
    pub row_count: usize,
    pub lines: Vec<LineSegment>,
    pub latency_ms: f64,
}

impl CountResult {
    /// No blob received a label.
    pub fn is_empty(&self) -> bool {
        self.labeled_blobs.is_empty()
    }
}

pub fn count(mask: &BinaryMask, model: &CountingModel, scale: f64) -> Result<CountResult> {
    count_with(mask, model, scale, &RowDetectorParams::default())
}

pub fn count_with(
    mask: &BinaryMask,
    model: &CountingModel,
    scale: f64,
    params: &RowDetectorParams,
) -> Result<CountResult> {
    check_scale(scale)?;
    let t0 = Instant::now();
    let detection = detect_rows_with(mask, scale, params);
    if detection.blobs.is_empty() {
        debug!(
            "count: no blobs retained ({} rows), skipping model",
            detection.row_count
        );
        return Ok(CountResult {
            row_count: detection.row_count,
            lines: detection.lines,
            latency_ms: t0.elapsed().as_secs_f64() * 1000.0,
            ..CountResult::default()
        });
    }

    let vectors = descriptors::compute(&detection.blobs, scale)?;
    let estimates = model::predict(model, &vectors)?;

    let sum: f64 = estimates.iter().sum();
    if !sum.is_finite() || sum.abs() >= i64::MAX as f64 {
        return Err(Error::InvalidModel {
            reason: format!("estimates over {} blobs sum to {sum}", estimates.len()),
        });
    }
    let labeled_blobs: Vec<LabeledBox> = detection
        .blobs
        .iter()
        .zip(&estimates)
        .filter(|(_, e)| **e > 0.0)
        .map(|(blob, &estimate)| LabeledBox {
            bbox: blob.bbox(),
            label: format!("{estimate:.1}"),
            estimate,
        })
        .collect();
    let total = sum.round_ties_even() as i64;
    let latency_ms = t0.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "count: {} blobs, {} labeled, total={} (raw {:.3}), rows={}, {:.3} ms",
        detection.blobs.len(),
        labeled_blobs.len(),
        total,
        sum,
        detection.row_count,
        latency_ms
    );

    Ok(CountResult {
        total,
        labeled_blobs,
        row_count: detection.row_count,
        lines: detection.lines,
        latency_ms,
    })
}
