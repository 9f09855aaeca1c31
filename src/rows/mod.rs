//! Crop-row detection on a binary vegetation mask.
//!
//! Overview
//! - The per-row foreground sum (horizontal profile) peaks at every crop
//!   row; each sufficiently prominent, sufficiently separated peak seeds one
//!   row with a centre and a width measured at half prominence.
//! - External blob contours are extracted once and assigned to every row
//!   whose band `(centre - width, centre + width)` contains their vertical
//!   centroid.
//! - Within a row, blobs whose horizontal extent is covered by a wider blob
//!   are discarded.
//! - Blobs are then walked left to right. The first three define the row
//!   centre; afterwards the centre follows the mean of the last three
//!   accepted blobs and blobs straying more than half the row width from it
//!   are dropped.
//! - Consecutive centroids of each row are chained into line segments for
//!   overlays.
//!
//! Modules
//! - [`params`] – [`RowDetectorParams`] with the peak and tracking knobs.
//! - [`profile`] – intensity profile and 1-D peak analysis.
//! - `assign` – band assignment, span deduplication and centre tracking.

mod assign;
pub mod params;
pub mod profile;

pub use assign::RowSeed;
pub use params::RowDetectorParams;

use crate::contour::{extract_blobs, Blob, BlobId};
use crate::image::BinaryMask;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Segment between two consecutive row centroids, for display only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// One detected crop row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Row {
    pub seed: RowSeed,
    /// Accepted blobs ordered by horizontal centroid.
    pub blob_ids: Vec<BlobId>,
    pub centroids: Vec<[i32; 2]>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.blob_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blob_ids.is_empty()
    }

    /// Chain consecutive centroids; `len() - 1` segments.
    pub fn line_segments(&self) -> Vec<LineSegment> {
        self.centroids
            .windows(2)
            .map(|w| LineSegment {
                x1: w[0][0],
                y1: w[0][1],
                x2: w[1][0],
                y2: w[1][1],
            })
            .collect()
    }
}

/// Output of [`detect_rows`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct RowDetection {
    /// Blobs retained by at least one row, each reported once.
    pub blobs: Vec<Blob>,
    /// Number of row seeds (rows that end up empty still count).
    pub row_count: usize,
    pub lines: Vec<LineSegment>,
    pub rows: Vec<Row>,
}

/// Detect crop rows with the default parameters.
///
/// `scale` is the ground resolution in pixels per meter.
pub fn detect_rows(mask: &BinaryMask, scale: f64) -> RowDetection {
    detect_rows_with(mask, scale, &RowDetectorParams::default())
}

/// Row detection with explicit parameters.
///
/// `scale` only sets the minimum peak separation and is not validated here;
/// a non-positive or non-finite scale falls back to a one-pixel separation.
/// [`count`](crate::counting::count) and the descriptor functions reject it.
pub fn detect_rows_with(mask: &BinaryMask, scale: f64, params: &RowDetectorParams) -> RowDetection {
    if !(scale.is_finite() && scale > 0.0) {
        debug!("detect_rows: scale {scale} is not positive, using 1 px peak separation");
    }
    let seeds = row_seeds(mask, scale, params);
    if seeds.is_empty() {
        debug!("detect_rows: no row peaks in {}x{} mask", mask.width(), mask.height());
        return RowDetection::default();
    }

    let blobs = extract_blobs(mask);
    debug!(
        "detect_rows: {} row seeds, {} candidate blobs",
        seeds.len(),
        blobs.len()
    );

    let rows: Vec<Row> = seeds
        .iter()
        .map(|seed| {
            let members = assign::assign_to_band(seed, &blobs);
            let deduped = assign::drop_contained(&members, &blobs);
            let accepted = assign::refine_row(
                deduped.clone(),
                &blobs,
                seed,
                params.rolling_window,
                params.refine_band_factor,
            );
            debug!(
                "detect_rows: row y={:.1} w={:.1}: {} in band, {} after span dedup, {} accepted",
                seed.center,
                seed.width,
                members.len(),
                deduped.len(),
                accepted.len()
            );
            Row {
                seed: *seed,
                blob_ids: accepted.iter().map(|&i| blobs[i].id).collect(),
                centroids: accepted.iter().map(|&i| blobs[i].centroid()).collect(),
            }
        })
        .collect();

    let lines = rows.iter().flat_map(Row::line_segments).collect();

    let mut seen = HashSet::new();
    let retained = rows
        .iter()
        .flat_map(|row| row.blob_ids.iter())
        .filter(|id| seen.insert(**id))
        .map(|id| blobs[id.0 as usize].clone())
        .collect();

    RowDetection {
        blobs: retained,
        row_count: seeds.len(),
        lines,
        rows,
    }
}

/// Row seeds from the horizontal profile peaks, top to bottom.
pub fn row_seeds(mask: &BinaryMask, scale: f64, params: &RowDetectorParams) -> Vec<RowSeed> {
    let Some(profile) = profile::row_profile(mask) else {
        return Vec::new();
    };
    profile::find_peaks(
        &profile,
        params.min_prominence,
        params.min_separation_px(scale),
        params.rel_height,
    )
    .into_iter()
    .map(|p| RowSeed {
        center: p.index as f64,
        width: p.width,
    })
    .collect()
}
