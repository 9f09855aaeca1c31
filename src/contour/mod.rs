//! Blob extraction from binary masks.
//!
//! Connected plant regions are traced with Suzuki–Abe border following
//! (`imageproc::contours`) on a copy of the mask framed by one background
//! pixel, so regions touching the image border trace as outer borders like
//! any other. Only outermost outer borders are kept: hole
//! borders and regions nested inside holes are dropped, so every blob is the
//! external boundary of one top-level foreground component. Contours are
//! returned in raster order of their first pixel.
//!
//! Measures on the traced polygon live in [`geometry`]; [`Blob`] caches them.

mod blob;
pub mod geometry;

pub use blob::{Blob, BlobId, BoundingBox};
pub use geometry::Point;

use crate::image::BinaryMask;
use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use log::debug;

/// Extract the external boundary of every foreground component.
///
/// Components whose traced polygon encloses zero area are skipped.
pub fn extract_blobs(mask: &BinaryMask) -> Vec<Blob> {
    if mask.width() == 0 || mask.height() == 0 {
        return Vec::new();
    }
    let contours = find_contours::<i32>(&framed_gray(mask));
    let mut blobs = Vec::new();
    let mut degenerate = 0usize;
    for contour in contours {
        if contour.border_type != BorderType::Outer || contour.parent.is_some() {
            continue;
        }
        let points: Vec<Point> = contour.points.iter().map(|p| [p.x - 1, p.y - 1]).collect();
        let id = BlobId(blobs.len() as u32);
        match Blob::from_contour(id, points) {
            Some(blob) => blobs.push(blob),
            None => degenerate += 1,
        }
    }
    if degenerate > 0 {
        debug!(
            "extract_blobs: skipped {} zero-area contours, kept {}",
            degenerate,
            blobs.len()
        );
    }
    blobs
}

/// Grayscale copy of `mask` with a one-pixel background frame.
fn framed_gray(mask: &BinaryMask) -> GrayImage {
    let (w, h) = (mask.width(), mask.height());
    GrayImage::from_fn(w as u32 + 2, h as u32 + 2, |x, y| {
        let (x, y) = (x as usize, y as usize);
        if x == 0 || y == 0 || x > w || y > h {
            Luma([0])
        } else {
            Luma([mask.get(x - 1, y - 1)])
        }
    })
}
