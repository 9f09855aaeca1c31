//! Ordinary least squares with intercept, solved through the SVD.

use crate::error::{Error, Result};
use log::warn;
use nalgebra::{DMatrix, DVector};

/// Condition number above which a fit is reported as fragile.
const WARN_CONDITION: f64 = 1e8;
/// Singular values below this fraction of the largest count as zero.
const RANK_RTOL: f64 = 1e-10;

pub(crate) struct LinearFit {
    pub coefficients: DVector<f64>,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: &DMatrix<f64>) -> DVector<f64> {
        x * &self.coefficients + DVector::from_element(x.nrows(), self.intercept)
    }
}

/// Fit `y ≈ X·β + b`. Fails when the centred design matrix is rank deficient.
pub(crate) fn fit(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<LinearFit> {
    let (n, p) = x.shape();
    let x_mean: DVector<f64> = x.row_mean().transpose();
    let y_mean = y.mean();
    let mut xc = x.clone();
    for (j, mut col) in xc.column_iter_mut().enumerate() {
        let m = x_mean[j];
        col.apply(|v| *v -= m);
    }
    let yc = y.map(|v| v - y_mean);

    let svd = xc.svd(true, true);
    let sv_max = svd.singular_values.max();
    let tol = sv_max * RANK_RTOL.max(n.max(p) as f64 * f64::EPSILON);
    let rank = svd.rank(tol);
    if rank < p || sv_max <= 0.0 {
        return Err(Error::RankDeficient { rank, features: p });
    }
    let sv_min = svd.singular_values.min();
    if sv_max / sv_min > WARN_CONDITION {
        warn!(
            "ols: ill-conditioned design matrix (condition {:.3e})",
            sv_max / sv_min
        );
    }
    let coefficients = svd
        .solve(&yc, tol)
        .map_err(|_| Error::RankDeficient { rank, features: p })?;
    let intercept = y_mean - x_mean.dot(&coefficients);
    Ok(LinearFit {
        coefficients,
        intercept,
    })
}

/// Coefficient of determination; a constant target scores 1 when predicted
/// exactly and 0 otherwise.
pub(crate) fn r_squared(y: &DVector<f64>, y_pred: &DVector<f64>) -> f64 {
    let mean = y.mean();
    let ss_res: f64 = y.iter().zip(y_pred.iter()).map(|(a, b)| (a - b) * (a - b)).sum();
    let ss_tot: f64 = y.iter().map(|a| (a - mean) * (a - mean)).sum();
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}
