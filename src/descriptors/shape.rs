//! Per-blob feature computation.

use super::vector::DescriptorVector;
use crate::contour::Blob;
use crate::error::{Error, Result};
use nalgebra::{Matrix2, SymmetricEigen};

/// Compute the ten descriptors of `blob` at `scale` pixels per meter.
pub fn describe(blob: &Blob, scale: f64) -> Result<DescriptorVector> {
    let bbox = blob.bbox();
    let area = blob.area();
    let perimeter = blob.perimeter();
    if area <= 0.0 {
        return Err(Error::geometry(format!("blob {} has zero area", blob.id.0)));
    }
    if perimeter <= 0.0 {
        return Err(Error::geometry(format!(
            "blob {} has zero perimeter",
            blob.id.0
        )));
    }
    if bbox.w <= 0 || bbox.h <= 0 {
        return Err(Error::geometry(format!(
            "blob {} has an empty bounding box",
            blob.id.0
        )));
    }
    let hull_area = blob.hull_area();
    if hull_area <= 0.0 {
        return Err(Error::geometry(format!(
            "blob {} has a flat convex hull",
            blob.id.0
        )));
    }
    let bb_area = bbox.area();
    let scale_sq = scale * scale;

    Ok(DescriptorVector([
        area / scale_sq,
        bb_area / scale_sq,
        perimeter / scale,
        bbox.perimeter() / scale,
        perimeter * perimeter / area,
        eccentricity(blob)?,
        bbox.w as f64 / bbox.h as f64,
        area / bb_area,
        blob.hull_perimeter() / perimeter,
        area / hull_area,
    ]))
}

/// Elongation of the boundary point cloud: `sqrt(1 - (λmin/λmax)²)` over
/// the eigenvalues of the sample covariance.
pub fn eccentricity(blob: &Blob) -> Result<f64> {
    let points = blob.points();
    let k = points.len();
    if k < 2 {
        return Err(Error::geometry(format!(
            "blob {} has fewer than two boundary points",
            blob.id.0
        )));
    }
    let n = k as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0f64, 0.0f64), |(sx, sy), p| (sx + p[0] as f64, sy + p[1] as f64));
    let (mx, my) = (sx / n, sy / n);
    let mut cov = Matrix2::<f64>::zeros();
    for p in points {
        let dx = p[0] as f64 - mx;
        let dy = p[1] as f64 - my;
        cov[(0, 0)] += dx * dx;
        cov[(0, 1)] += dx * dy;
        cov[(1, 1)] += dy * dy;
    }
    cov[(1, 0)] = cov[(0, 1)];
    cov /= n - 1.0;

    let eig = SymmetricEigen::new(cov).eigenvalues;
    let l_max = eig[0].max(eig[1]);
    let l_min = eig[0].min(eig[1]).max(0.0);
    if l_max <= 0.0 {
        return Err(Error::geometry(format!(
            "blob {} has no spatial spread",
            blob.id.0
        )));
    }
    let ratio = l_min / l_max;
    Ok((1.0 - ratio * ratio).max(0.0).sqrt())
}
