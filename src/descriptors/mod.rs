//! Shape and size descriptors of plant blobs.
//!
//! Every blob maps to a [`DescriptorVector`] of ten features, in this order:
//!
//! | # | column                | definition                               |
//! |---|-----------------------|------------------------------------------|
//! | 1 | `AREA_M`              | area / scale²                            |
//! | 2 | `AREA_BB_M`           | bounding-box area / scale²               |
//! | 3 | `PERIMETRO_M`         | perimeter / scale                        |
//! | 4 | `PERIMETRO_BB_M`      | bounding-box perimeter / scale           |
//! | 5 | `COMPACIDAD`          | perimeter² / area                        |
//! | 6 | `EXCENTRICIDAD`       | boundary covariance eccentricity         |
//! | 7 | `RELACION_ASPECTO_BB` | bounding-box width / height              |
//! | 8 | `EXTENT`              | area / bounding-box area                 |
//! | 9 | `CONVEXIDAD`          | hull perimeter / perimeter               |
//! | 10| `SOLIDEZ`             | area / hull area                         |
//!
//! `scale` is the ground resolution in pixels per meter. Labeled tables add a
//! `CANTIDAD_PLANTAS` column with the number of annotated plants per blob.
//!
//! A degenerate blob fails the whole batch; no partial output is produced.

mod shape;
pub mod table;
mod vector;

pub use shape::{describe, eccentricity};
pub use vector::{
    DescriptorVector, LabeledSample, DESCRIPTOR_LEN, FEATURE_COLUMNS, TARGET_COLUMN,
};

use crate::contour::{extract_blobs, Blob};
use crate::error::{check_scale, Result};
use crate::image::BinaryMask;

/// Descriptors of every blob, in input order.
pub fn compute(blobs: &[Blob], scale: f64) -> Result<Vec<DescriptorVector>> {
    check_scale(scale)?;
    map_blobs(blobs, |blob| Some(describe(blob, scale)))
}

/// Training samples for the blobs that contain at least one annotated plant.
///
/// A point counts for a blob when it lies inside the contour or on it. Blobs
/// without points are left out.
pub fn compute_labeled(
    blobs: &[Blob],
    scale: f64,
    points: &[[f64; 2]],
) -> Result<Vec<LabeledSample>> {
    check_scale(scale)?;
    map_blobs(blobs, |blob| {
        let plant_count = points.iter().filter(|p| blob.contains(**p)).count() as u32;
        (plant_count > 0).then(|| {
            describe(blob, scale).map(|descriptors| LabeledSample {
                descriptors,
                plant_count,
            })
        })
    })
}

/// Training samples over every external blob of `mask`.
///
/// Row filtering is not applied: an annotated plant counts even when its
/// blob would be rejected by row detection.
pub fn training_samples(
    mask: &BinaryMask,
    scale: f64,
    points: &[[f64; 2]],
) -> Result<Vec<LabeledSample>> {
    check_scale(scale)?;
    compute_labeled(&extract_blobs(mask), scale, points)
}

#[cfg(feature = "parallel")]
fn map_blobs<T, F>(blobs: &[Blob], f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&Blob) -> Option<Result<T>> + Sync + Send,
{
    use rayon::prelude::*;

    blobs.par_iter().filter_map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_blobs<T, F>(blobs: &[Blob], f: F) -> Result<Vec<T>>
where
    F: Fn(&Blob) -> Option<Result<T>>,
{
    blobs.iter().filter_map(f).collect()
}
