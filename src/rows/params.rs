use serde::{Deserialize, Serialize};

/// Knobs of the row detector.
///
/// The separation between row centres is derived from the ground scale
/// (`scale / separation_divisor` pixels, i.e. 10 cm at the default).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowDetectorParams {
    /// Minimum prominence of a profile peak, on the [0, 1] normalized profile.
    pub min_prominence: f64,
    /// Minimum peak separation is `scale / separation_divisor` pixels.
    pub separation_divisor: f64,
    /// Relative height at which the row width is measured.
    pub rel_height: f64,
    /// Number of leading blobs accepted unconditionally, and length of the
    /// rolling window that tracks the row centre afterwards.
    pub rolling_window: usize,
    /// Accepted vertical deviation from the rolling centre, as a fraction of
    /// the row width.
    pub refine_band_factor: f64,
}

impl Default for RowDetectorParams {
    fn default() -> Self {
        Self {
            min_prominence: 0.1,
            separation_divisor: 10.0,
            rel_height: 0.5,
            rolling_window: 3,
            refine_band_factor: 0.5,
        }
    }
}

impl RowDetectorParams {
    /// Integral peak separation in pixels (at least one sample).
    pub fn min_separation_px(&self, scale: f64) -> usize {
        let raw = scale / self.separation_divisor;
        if raw.is_finite() && raw > 1.0 {
            raw.ceil() as usize
        } else {
            1
        }
    }
}
