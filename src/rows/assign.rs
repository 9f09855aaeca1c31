//! Blob-to-row assignment stages.
//!
//! All stages work on indices into the extracted blob list so rows can share
//! a blob without cloning it.

use crate::contour::Blob;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Row hypothesis seeded from one profile peak.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowSeed {
    /// Vertical position of the profile peak (pixels).
    pub center: f64,
    /// Peak width at the configured relative height (pixels).
    pub width: f64,
}

impl RowSeed {
    /// Open band `(center - width, center + width)`.
    pub fn band_contains(&self, y: f64) -> bool {
        self.center - self.width < y && y < self.center + self.width
    }
}

/// Blobs whose vertical centroid falls inside the seed band, in extraction
/// order.
pub(crate) fn assign_to_band(seed: &RowSeed, blobs: &[Blob]) -> Vec<usize> {
    blobs
        .iter()
        .enumerate()
        .filter(|(_, b)| seed.band_contains(b.centroid()[1] as f64))
        .map(|(i, _)| i)
        .collect()
}

/// Keep the widest horizontal spans of a row.
///
/// A candidate contained in an accepted span is dropped; otherwise accepted
/// spans contained in the candidate are evicted and the candidate is kept.
pub(crate) fn drop_contained(candidates: &[usize], blobs: &[Blob]) -> Vec<usize> {
    let mut kept: Vec<usize> = Vec::with_capacity(candidates.len());
    for &cand in candidates {
        let bbox = blobs[cand].bbox();
        if kept
            .iter()
            .any(|&k| bbox.span_x_within(&blobs[k].bbox()))
        {
            continue;
        }
        kept.retain(|&k| !blobs[k].bbox().span_x_within(&bbox));
        kept.push(cand);
    }
    kept
}

/// Accumulator threaded through [`refine_row`].
#[derive(Debug, Default)]
struct RowFold {
    recent_y: VecDeque<f64>,
    accepted: Vec<usize>,
}

impl RowFold {
    fn accept(&mut self, idx: usize, y: f64, window: usize) {
        if self.recent_y.len() == window {
            self.recent_y.pop_front();
        }
        self.recent_y.push_back(y);
        self.accepted.push(idx);
    }

    fn rolling_center(&self) -> f64 {
        self.recent_y.iter().sum::<f64>() / self.recent_y.len() as f64
    }
}

/// Sort by horizontal centroid and track the row centre left to right.
///
/// The first `window` blobs are accepted as is. Every later blob must sit
/// within `seed.width * band_factor` of the mean vertical centroid of the
/// last `window` accepted blobs.
pub(crate) fn refine_row(
    mut members: Vec<usize>,
    blobs: &[Blob],
    seed: &RowSeed,
    window: usize,
    band_factor: f64,
) -> Vec<usize> {
    members.sort_by_key(|&i| blobs[i].centroid()[0]);
    let window = window.max(1);
    let half_band = seed.width * band_factor;
    members
        .into_iter()
        .fold(RowFold::default(), |mut acc, idx| {
            let y = blobs[idx].centroid()[1] as f64;
            if acc.accepted.len() < window {
                acc.accept(idx, y, window);
            } else {
                let center = acc.rolling_center();
                if center - half_band < y && y < center + half_band {
                    acc.accept(idx, y, window);
                }
            }
            acc
        })
        .accepted
}
