//! Planar polygon measures over integer contour points.
//!
//! Contours are closed: the last point connects back to the first. Area and
//! moments use Green's theorem on the polygon, so they agree with the pixel
//! centres traced by the border follower rather than the pixel count.

pub type Point = [i32; 2];

#[inline]
fn cross(o: Point, a: Point, b: Point) -> i64 {
    let (ox, oy) = (o[0] as i64, o[1] as i64);
    (a[0] as i64 - ox) * (b[1] as i64 - oy) - (a[1] as i64 - oy) * (b[0] as i64 - ox)
}

/// Closed-polygon edges `(p[i], p[i+1 mod n])`.
fn edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// Polygon area (absolute shoelace value).
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = edges(points)
        .map(|(a, b)| a[0] as i64 * b[1] as i64 - b[0] as i64 * a[1] as i64)
        .sum();
    (twice as f64 * 0.5).abs()
}

/// Length of the closed polyline through `points`.
pub fn arc_length(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    edges(points)
        .map(|(a, b)| {
            let dx = (b[0] - a[0]) as f64;
            let dy = (b[1] - a[1]) as f64;
            (dx * dx + dy * dy).sqrt()
        })
        .sum()
}

/// Spatial moments as exact integer sums: `2·m00`, `6·m10`, `6·m01`.
///
/// Signs follow the contour orientation.
fn raw_moments(points: &[Point]) -> (i64, i64, i64) {
    if points.len() < 3 {
        return (0, 0, 0);
    }
    edges(points).fold((0, 0, 0), |(m00, m10, m01), (a, b)| {
        let (xa, ya) = (a[0] as i64, a[1] as i64);
        let (xb, yb) = (b[0] as i64, b[1] as i64);
        let c = xa * yb - xb * ya;
        (m00 + c, m10 + (xa + xb) * c, m01 + (ya + yb) * c)
    })
}

/// Centroid `m10 / m00, m01 / m00`, or `None` for a zero-area polygon.
///
/// Computed from the integer sums so centroids that fall on a pixel centre
/// are exact.
pub fn polygon_centroid(points: &[Point]) -> Option<[f64; 2]> {
    let (m00, m10, m01) = raw_moments(points);
    if m00 == 0 {
        return None;
    }
    let denom = (3 * m00) as f64;
    Some([m10 as f64 / denom, m01 as f64 / denom])
}

/// Convex hull (Andrew's monotone chain), counter-clockwise in image axes
/// with collinear points dropped.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts = points.to_vec();
    pts.sort_unstable();
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }
    let mut hull: Vec<Point> = Vec::with_capacity(pts.len() * 2);
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// True when `p` lies inside the closed polygon or on its boundary.
pub fn point_in_polygon(points: &[Point], p: [f64; 2]) -> bool {
    match points.len() {
        0 => return false,
        1 => return points[0][0] as f64 == p[0] && points[0][1] as f64 == p[1],
        _ => {}
    }
    let (px, py) = (p[0], p[1]);
    let mut inside = false;
    for (a, b) in edges(points) {
        let (xa, ya) = (a[0] as f64, a[1] as f64);
        let (xb, yb) = (b[0] as f64, b[1] as f64);
        let c = (xb - xa) * (py - ya) - (yb - ya) * (px - xa);
        if c == 0.0
            && px >= xa.min(xb)
            && px <= xa.max(xb)
            && py >= ya.min(yb)
            && py <= ya.max(yb)
        {
            return true;
        }
        if (ya > py) != (yb > py) {
            let x_cross = xa + (py - ya) * (xb - xa) / (yb - ya);
            if px < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}
