// dimscope-core/src/stats.rs
//! Radius statistics for point sets
//!
//! Summarises the distribution of per-point radii:
//! - min / max / mean / standard deviation of the radius
//! - max/min spread ratio (how concentrated the shell is)
//!
//! In high dimensions the radii of i.i.d. points concentrate on a thin
//! shell, so `std_norm / mean_norm` shrinks while `mean_norm` grows.

use crate::error::{DimError, DimResult};
use crate::points::PointSet;

/// Statistics about magnitude distribution
#[derive(Debug, Clone, PartialEq)]
pub struct MagnitudeStats {
    pub count: usize,
    pub min_norm: f64,
    pub max_norm: f64,
    pub mean_norm: f64,
    /// Sample standard deviation (divisor n − 1); 0.0 for a single point.
    pub std_norm: f64,
    /// max/min; infinite when a point sits on the origin.
    pub spread_ratio: f64,
}

impl MagnitudeStats {
    /// Statistics over precomputed radii. Empty or non-finite input is rejected.
    pub fn from_radii(radii: &[f64]) -> DimResult<Self> {
        if radii.is_empty() {
            return Err(DimError::invalid("no radii to summarise"));
        }
        if radii.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(DimError::invalid(
                "radii must be finite and non-negative",
            ));
        }

        let count = radii.len();
        let min_norm = radii.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_norm = radii.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let (mean_norm, std_norm) = sample_mean_std(radii);
        let spread_ratio = if min_norm > 0.0 {
            max_norm / min_norm
        } else {
            f64::INFINITY
        };

        Ok(Self {
            count,
            min_norm,
            max_norm,
            mean_norm,
            std_norm,
            spread_ratio,
        })
    }

    pub fn from_points(points: &PointSet) -> DimResult<Self> {
        Self::from_radii(&points.radii())
    }

    /// Coefficient of variation of the radius (std / mean).
    pub fn relative_spread(&self) -> f64 {
        if self.mean_norm > 0.0 {
            self.std_norm / self.mean_norm
        } else {
            0.0
        }
    }

    /// Pretty-print statistics
    pub fn summary(&self) -> String {
        format!(
            "n={}, min={:.4}, max={:.4}, mean={:.4}, std={:.4}, ratio={:.2}×",
            self.count,
            self.min_norm,
            self.max_norm,
            self.mean_norm,
            self.std_norm,
            self.spread_ratio
        )
    }
}

/// Mean and sample standard deviation (divisor n − 1, 0.0 for one value).
///
/// Values are divided by the largest magnitude first, so finite inputs near
/// `f64::MAX` give finite results. Empty input yields `(0.0, 0.0)`.
pub fn sample_mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    let scale = values.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
    if n == 0 || scale == 0.0 {
        return (0.0, 0.0);
    }
    let mean_u = values.iter().map(|v| v / scale).sum::<f64>() / n as f64;
    let std_u = if n > 1 {
        let ss: f64 = values.iter().map(|v| (v / scale - mean_u).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    } else {
        0.0
    };
    (mean_u * scale, std_u * scale)
}
