use plant_counter::image::BinaryMask;

/// Mask with one filled disc per `(x, y)` pair of the grid `xs × ys`.
pub fn disc_grid(width: usize, height: usize, xs: &[i64], ys: &[i64], radius: i64) -> BinaryMask {
    assert!(width > 0 && height > 0, "mask dimensions must be positive");
    assert!(radius > 0, "radius must be positive");
    let mut mask = BinaryMask::new(width, height);
    for &y in ys {
        for &x in xs {
            mask.fill_disc(x, y, radius);
        }
    }
    mask
}

/// Three rows of three discs of radius 6 centred at x = {10, 50, 90},
/// y = {20, 60, 100} on a 100x120 mask.
pub fn three_by_three() -> BinaryMask {
    disc_grid(100, 120, &[10, 50, 90], &[20, 60, 100], 6)
}

/// Deterministic uniform samples in `[0, 1)`.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}
