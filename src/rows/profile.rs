//! Horizontal intensity profile and 1-D peak analysis.
//!
//! Rows of plants show up as maxima of the per-row foreground sum. Peaks are
//! located, thinned by a minimum separation (highest first), filtered by
//! topographic prominence and measured at a relative height, following the
//! usual signal-processing definitions:
//!
//! - flat maxima report their middle sample;
//! - prominence is the drop from the peak to the higher of the two lowest
//!   points reached on either side before meeting a higher sample;
//! - width is taken at `peak - prominence * rel_height`, with linear
//!   interpolation between samples, never crossing the prominence bases.

use crate::image::BinaryMask;

/// A retained profile maximum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    pub index: usize,
    pub prominence: f64,
    pub left_base: usize,
    pub right_base: usize,
    /// Width at the configured relative height, in samples.
    pub width: f64,
    pub left_ip: f64,
    pub right_ip: f64,
}

/// Per-row foreground sum normalized to [0, 1].
///
/// Returns `None` when the image has no foreground.
pub fn row_profile(mask: &BinaryMask) -> Option<Vec<f64>> {
    let sums: Vec<f64> = mask
        .rows()
        .map(|row| row.iter().map(|&v| v as f64).sum())
        .collect();
    let max = sums.iter().cloned().fold(0.0f64, f64::max);
    if max <= 0.0 {
        return None;
    }
    Some(sums.into_iter().map(|v| v / max).collect())
}

/// Indices of strict local maxima; plateaus yield their (rounded-down) middle.
/// The first and last samples are never maxima.
pub fn local_maxima(x: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if x.len() < 3 {
        return peaks;
    }
    let i_max = x.len() - 1;
    let mut i = 1;
    while i < i_max {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < i_max && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                let right_edge = ahead - 1;
                peaks.push((i + right_edge) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    peaks
}

/// Keep peaks at least `distance` samples apart, visiting higher peaks first.
///
/// Equal heights are visited in reverse positional order.
pub fn select_by_distance(peaks: &[usize], x: &[f64], distance: usize) -> Vec<usize> {
    let n = peaks.len();
    let mut keep = vec![true; n];
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        x[peaks[a]]
            .partial_cmp(&x[peaks[b]])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for &j in order.iter().rev() {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 && peaks[j] - peaks[k - 1] < distance {
            keep[k - 1] = false;
            k -= 1;
        }
        let mut k = j + 1;
        while k < n && peaks[k] - peaks[j] < distance {
            keep[k] = false;
            k += 1;
        }
    }
    peaks
        .iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}

/// Prominence of `peak` with its left and right bases.
pub fn prominence(x: &[f64], peak: usize) -> (f64, usize, usize) {
    let top = x[peak];

    let mut left_min = top;
    let mut left_base = peak;
    let mut i = peak as isize;
    while i >= 0 && x[i as usize] <= top {
        if x[i as usize] < left_min {
            left_min = x[i as usize];
            left_base = i as usize;
        }
        i -= 1;
    }

    let mut right_min = top;
    let mut right_base = peak;
    let mut i = peak;
    while i < x.len() && x[i] <= top {
        if x[i] < right_min {
            right_min = x[i];
            right_base = i;
        }
        i += 1;
    }

    (top - left_min.max(right_min), left_base, right_base)
}

/// Width of `peak` at `rel_height` of its prominence, with interpolated
/// crossing positions `(width, left_ip, right_ip)`.
pub fn width_at(
    x: &[f64],
    peak: usize,
    prominence: f64,
    left_base: usize,
    right_base: usize,
    rel_height: f64,
) -> (f64, f64, f64) {
    let height = x[peak] - prominence * rel_height;

    let mut i = peak;
    while left_base < i && height < x[i] {
        i -= 1;
    }
    let mut left_ip = i as f64;
    if x[i] < height {
        left_ip += (height - x[i]) / (x[i + 1] - x[i]);
    }

    let mut i = peak;
    while i < right_base && height < x[i] {
        i += 1;
    }
    let mut right_ip = i as f64;
    if x[i] < height {
        right_ip -= (height - x[i]) / (x[i - 1] - x[i]);
    }

    (right_ip - left_ip, left_ip, right_ip)
}

/// Full peak search: maxima → separation → prominence → width.
pub fn find_peaks(
    x: &[f64],
    min_prominence: f64,
    min_distance: usize,
    rel_height: f64,
) -> Vec<Peak> {
    let maxima = local_maxima(x);
    let spaced = select_by_distance(&maxima, x, min_distance.max(1));
    spaced
        .into_iter()
        .filter_map(|index| {
            let (prom, left_base, right_base) = prominence(x, index);
            if prom < min_prominence {
                return None;
            }
            let (width, left_ip, right_ip) =
                width_at(x, index, prom, left_base, right_base, rel_height);
            Some(Peak {
                index,
                prominence: prom,
                left_base,
                right_base,
                width,
                left_ip,
                right_ip,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plateau_reports_middle_sample() {
        let x = [0.0, 1.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(local_maxima(&x), vec![2]);
        let edge = [1.0, 0.5, 0.0];
        assert!(local_maxima(&edge).is_empty());
    }

    #[test]
    fn distance_keeps_highest_peak() {
        let x = [0.0, 0.8, 0.0, 1.0, 0.0, 0.0, 0.0, 0.6, 0.0];
        let maxima = local_maxima(&x);
        assert_eq!(maxima, vec![1, 3, 7]);
        assert_eq!(select_by_distance(&maxima, &x, 3), vec![3, 7]);
        assert_eq!(select_by_distance(&maxima, &x, 1), vec![1, 3, 7]);
    }

    #[test]
    fn prominence_uses_higher_base() {
        let x = [0.0, 1.0, 0.4, 0.7, 0.0];
        let (prom, left, right) = prominence(&x, 3);
        assert!((prom - 0.3).abs() < 1e-12);
        assert_eq!(left, 2);
        assert_eq!(right, 4);
        let (prom, left, right) = prominence(&x, 1);
        assert!((prom - 1.0).abs() < 1e-12);
        assert_eq!((left, right), (0, 4));
    }

    #[test]
    fn width_interpolates_half_height() {
        let x = [0.0, 0.5, 1.0, 0.5, 0.0];
        let (prom, lb, rb) = prominence(&x, 2);
        let (width, left_ip, right_ip) = width_at(&x, 2, prom, lb, rb, 0.5);
        assert!((left_ip - 1.0).abs() < 1e-12);
        assert!((right_ip - 3.0).abs() < 1e-12);
        assert!((width - 2.0).abs() < 1e-12);

        let x = [0.0, 0.0, 1.0, 1.0, 0.0];
        let (prom, lb, rb) = prominence(&x, 2);
        let (width, _, _) = width_at(&x, 2, prom, lb, rb, 0.5);
        assert!((width - 2.0).abs() < 1e-12, "width={width}");
    }

    #[test]
    fn find_peaks_filters_low_prominence() {
        let x = [0.0, 1.0, 0.95, 0.97, 0.0, 0.0, 0.6, 0.0];
        let peaks = find_peaks(&x, 0.1, 1, 0.5);
        let idx: Vec<usize> = peaks.iter().map(|p| p.index).collect();
        assert_eq!(idx, vec![1, 6]);
    }

    #[test]
    fn profile_is_normalized_per_row() {
        let mask = BinaryMask::from_raw(3, 3, vec![0, 1, 255, 255, 0, 0, 0, 0, 9])
            .expect("3x3 buffer");
        let profile = row_profile(&mask).expect("foreground present");
        assert_eq!(profile, vec![1.0, 0.5, 0.5]);
        assert!(row_profile(&BinaryMask::new(3, 3)).is_none());
    }
}
