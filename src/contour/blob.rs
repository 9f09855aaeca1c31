use super::geometry::{self, Point};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Identifier of a blob: its position in extraction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobId(pub u32);

/// Axis-aligned bounding box with inclusive pixel extent
/// (`w = max_x - min_x + 1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl BoundingBox {
    pub fn from_points(points: &[Point]) -> Self {
        let mut min = [i32::MAX, i32::MAX];
        let mut max = [i32::MIN, i32::MIN];
        for p in points {
            min[0] = min[0].min(p[0]);
            min[1] = min[1].min(p[1]);
            max[0] = max[0].max(p[0]);
            max[1] = max[1].max(p[1]);
        }
        if points.is_empty() {
            return Self {
                x: 0,
                y: 0,
                w: 0,
                h: 0,
            };
        }
        Self {
            x: min[0],
            y: min[1],
            w: max[0] - min[0] + 1,
            h: max[1] - min[1] + 1,
        }
    }

    pub fn area(&self) -> f64 {
        self.w as f64 * self.h as f64
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * self.w as f64 + 2.0 * self.h as f64
    }

    /// Horizontal span `[x, x + w]`.
    pub fn span_x(&self) -> (i32, i32) {
        (self.x, self.x + self.w)
    }

    /// True when this box's horizontal span lies within `other`'s.
    pub fn span_x_within(&self, other: &BoundingBox) -> bool {
        let (a0, a1) = self.span_x();
        let (b0, b1) = other.span_x();
        b0 <= a0 && a1 <= b1
    }
}

/// External boundary of one connected plant region.
///
/// Geometric measures are computed once at construction; the convex hull is
/// derived lazily since only the descriptor stage needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blob {
    pub id: BlobId,
    points: Vec<Point>,
    area: f64,
    perimeter: f64,
    bbox: BoundingBox,
    centroid: [i32; 2],
    #[serde(skip)]
    hull: OnceLock<Vec<Point>>,
}

impl Blob {
    /// Build a blob from a closed contour. Returns `None` for contours that
    /// enclose no area (isolated pixels, one-pixel-thin strokes), whose
    /// centroid is undefined.
    pub fn from_contour(id: BlobId, points: Vec<Point>) -> Option<Self> {
        let [cx, cy] = geometry::polygon_centroid(&points)?;
        let centroid = [cx.trunc() as i32, cy.trunc() as i32];
        Some(Self {
            id,
            area: geometry::polygon_area(&points),
            perimeter: geometry::arc_length(&points),
            bbox: BoundingBox::from_points(&points),
            centroid,
            points,
            hull: OnceLock::new(),
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn perimeter(&self) -> f64 {
        self.perimeter
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Integral centroid `(m10/m00, m01/m00)` truncated toward zero.
    pub fn centroid(&self) -> [i32; 2] {
        self.centroid
    }

    pub fn hull(&self) -> &[Point] {
        self.hull
            .get_or_init(|| geometry::convex_hull(&self.points))
    }

    pub fn hull_area(&self) -> f64 {
        geometry::polygon_area(self.hull())
    }

    pub fn hull_perimeter(&self) -> f64 {
        geometry::arc_length(self.hull())
    }

    /// Inside-or-on-boundary test for a point in image coordinates.
    pub fn contains(&self, p: [f64; 2]) -> bool {
        geometry::point_in_polygon(&self.points, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_caches_measures() {
        let blob = Blob::from_contour(BlobId(0), vec![[2, 2], [6, 2], [6, 8], [2, 8]])
            .expect("non-degenerate");
        assert_eq!(blob.area(), 24.0);
        assert_eq!(blob.perimeter(), 20.0);
        assert_eq!(blob.centroid(), [4, 5]);
        assert_eq!(
            blob.bbox(),
            BoundingBox {
                x: 2,
                y: 2,
                w: 5,
                h: 7
            }
        );
        assert_eq!(blob.hull_area(), 24.0);
    }

    #[test]
    fn zero_area_contour_is_rejected() {
        assert!(Blob::from_contour(BlobId(0), vec![[1, 1]]).is_none());
        assert!(Blob::from_contour(BlobId(1), vec![[0, 0], [4, 0], [8, 0], [4, 0]]).is_none());
    }

    #[test]
    fn span_containment_is_horizontal_only() {
        let wide = BoundingBox {
            x: 0,
            y: 0,
            w: 10,
            h: 2,
        };
        let narrow = BoundingBox {
            x: 2,
            y: 50,
            w: 3,
            h: 40,
        };
        assert!(narrow.span_x_within(&wide));
        assert!(!wide.span_x_within(&narrow));
        assert!(wide.span_x_within(&wide));
    }
}
