use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Per-column standardization `z = (x - mean) / scale`.
///
/// `scale` is the population standard deviation; constant columns keep a
/// unit scale so they map to zero instead of dividing by zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(data: &DMatrix<f64>) -> Self {
        let n = data.nrows().max(1) as f64;
        let mut mean = Vec::with_capacity(data.ncols());
        let mut scale = Vec::with_capacity(data.ncols());
        for col in data.column_iter() {
            let m = col.sum() / n;
            let var = col.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / n;
            let sd = var.sqrt();
            mean.push(m);
            scale.push(if sd > 0.0 && sd.is_finite() { sd } else { 1.0 });
        }
        Self { mean, scale }
    }

    pub fn fit_vector(data: &DVector<f64>) -> Self {
        Self::fit(&DMatrix::from_column_slice(data.len(), 1, data.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn transform(&self, data: &DMatrix<f64>) -> DMatrix<f64> {
        let mut out = data.clone();
        for (j, mut col) in out.column_iter_mut().enumerate() {
            let (m, s) = (self.mean[j], self.scale[j]);
            col.apply(|v| *v = (*v - m) / s);
        }
        out
    }

    pub fn transform_value(&self, column: usize, value: f64) -> f64 {
        (value - self.mean[column]) / self.scale[column]
    }

    pub fn inverse_value(&self, column: usize, value: f64) -> f64 {
        value * self.scale[column] + self.mean[column]
    }
}
