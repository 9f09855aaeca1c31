//! Owned binary vegetation mask.
//!
//! Pixels are stored as 0 (soil) or 255 (plant). Any nonzero input value is
//! treated as foreground when a mask is built from raw bytes.
use image::{GrayImage, Luma};

pub const FOREGROUND: u8 = 255;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BinaryMask {
    /// All-background mask of size `width × height`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Build from row-major bytes, binarizing nonzero values to 255.
    /// Returns `None` when `data.len() != width * height`.
    pub fn from_raw(width: usize, height: usize, mut data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        for px in data.iter_mut() {
            if *px != 0 {
                *px = FOREGROUND;
            }
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_gray(gray: &GrayImage) -> Self {
        let width = gray.width() as usize;
        let height = gray.height() as usize;
        let data = gray
            .as_raw()
            .iter()
            .map(|&v| if v != 0 { FOREGROUND } else { 0 })
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn is_foreground(&self, x: usize, y: usize) -> bool {
        self.get(x, y) != 0
    }

    /// Set a pixel; out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, foreground: bool) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = if foreground { FOREGROUND } else { 0 };
        }
    }

    /// Paint a filled disc centred on `(cx, cy)`, clipped to the mask.
    pub fn fill_disc(&mut self, cx: i64, cy: i64, radius: i64) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if x >= 0 && y >= 0 {
                    self.set(x as usize, y as usize, true);
                }
            }
        }
    }

    /// Paint a filled axis-aligned rectangle `[x0, x1) × [y0, y1)`.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                self.set(x, y, true);
            }
        }
    }

    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Pixel rows, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(self.width.max(1))
    }

    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            Luma([self.get(x as usize, y as usize)])
        })
    }
}
