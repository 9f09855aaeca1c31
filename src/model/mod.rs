//! Linear plant-count regressor.
//!
//! Descriptors and counts are standardized independently; an ordinary least
//! squares fit with intercept maps standardized descriptors to the
//! standardized count. Prediction reverses the output scaling, so estimates
//! are continuous and may be fractional or negative.
//!
//! Fitting needs at least `DESCRIPTOR_LEN + 1` samples and a full-rank design
//! matrix. Fitted models serialize to a versioned JSON document.

mod ols;
mod scaler;

pub use scaler::StandardScaler;

use crate::descriptors::{DescriptorVector, LabeledSample, DESCRIPTOR_LEN};
use crate::error::{Error, Result};
use crate::image::io::{read_json_file, write_json_file};
use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version written into every saved model.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Smallest training set that can determine ten coefficients and an intercept.
pub const MIN_TRAINING_SAMPLES: usize = DESCRIPTOR_LEN + 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountingModel {
    pub version: u32,
    /// One weight per standardized descriptor column.
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub input_scaler: StandardScaler,
    /// Single-column scaler of the plant count.
    pub output_scaler: StandardScaler,
}

/// In-sample goodness of fit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FitQuality {
    pub r_squared: f64,
    pub samples: usize,
}

impl CountingModel {
    pub fn feature_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Widths of the stored parameters must all agree with the descriptor
    /// width; every parameter must be finite and every scale positive.
    pub fn validate(&self) -> Result<()> {
        for actual in [
            self.coefficients.len(),
            self.input_scaler.mean.len(),
            self.input_scaler.scale.len(),
        ] {
            if actual != DESCRIPTOR_LEN {
                return Err(Error::ModelMismatch {
                    expected: DESCRIPTOR_LEN,
                    actual,
                });
            }
        }
        for actual in [self.output_scaler.mean.len(), self.output_scaler.scale.len()] {
            if actual != 1 {
                return Err(Error::ModelMismatch {
                    expected: 1,
                    actual,
                });
            }
        }
        check_finite("coefficients", &self.coefficients)?;
        check_finite("intercept", &[self.intercept])?;
        for (name, scaler) in [("input", &self.input_scaler), ("output", &self.output_scaler)] {
            check_finite(&format!("{name} mean"), &scaler.mean)?;
            if let Some(i) = scaler.scale.iter().position(|s| !(s.is_finite() && *s > 0.0)) {
                return Err(invalid_model(format!(
                    "{name} scale[{i}] is {}, expected positive",
                    scaler.scale[i]
                )));
            }
        }
        Ok(())
    }

    /// Estimated plant count of one descriptor vector; the model must be valid.
    fn predict_one(&self, v: &DescriptorVector) -> f64 {
        let standardized: f64 = v
            .as_slice()
            .iter()
            .enumerate()
            .map(|(j, x)| self.coefficients[j] * self.input_scaler.transform_value(j, *x))
            .sum();
        self.output_scaler
            .inverse_value(0, standardized + self.intercept)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_file(path, self)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let model: Self = read_json_file(path)?;
        model.validate()?;
        debug!(
            "CountingModel::load: {} (format v{})",
            path.display(),
            model.version
        );
        Ok(model)
    }
}

fn invalid_model(reason: String) -> Error {
    Error::InvalidModel { reason }
}

fn check_finite(name: &str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(invalid_model(format!("{name}[{i}] is {}", values[i]))),
        None => Ok(()),
    }
}

/// Fit a model on labeled samples and report its in-sample R².
pub fn fit(samples: &[LabeledSample]) -> Result<(CountingModel, FitQuality)> {
    if samples.len() < MIN_TRAINING_SAMPLES {
        return Err(Error::InsufficientData {
            samples: samples.len(),
            required: MIN_TRAINING_SAMPLES,
        });
    }
    let n = samples.len();
    let x = DMatrix::from_fn(n, DESCRIPTOR_LEN, |i, j| samples[i].descriptors.0[j]);
    let y = DVector::from_iterator(n, samples.iter().map(|s| f64::from(s.plant_count)));

    let input_scaler = StandardScaler::fit(&x);
    let output_scaler = StandardScaler::fit_vector(&y);
    let xs = input_scaler.transform(&x);
    let ys = y.map(|v| output_scaler.transform_value(0, v));

    let linear = ols::fit(&xs, &ys)?;
    let r_squared = ols::r_squared(&ys, &linear.predict(&xs));
    debug!("model::fit: {n} samples, R² = {r_squared:.4}");

    let model = CountingModel {
        version: MODEL_FORMAT_VERSION,
        coefficients: linear.coefficients.iter().copied().collect(),
        intercept: linear.intercept,
        input_scaler,
        output_scaler,
    };
    Ok((
        model,
        FitQuality {
            r_squared,
            samples: n,
        },
    ))
}

/// Estimated plant count per descriptor vector, in input order.
pub fn predict(model: &CountingModel, vectors: &[DescriptorVector]) -> Result<Vec<f64>> {
    model.validate()?;
    Ok(vectors.iter().map(|v| model.predict_one(v)).collect())
}
