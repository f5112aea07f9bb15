//! Radial density and cumulative profiles.
//!
//! Given per-point radii (or any non-negative sample), builds:
//! - a Gaussian kernel density estimate on an evenly spaced grid spanning
//!   the observed range
//! - the empirical CDF evaluated at every observed value
//!
//! With `ProfileScale::MaxNormalized` the values are divided by their maximum
//! first, so both curves live on `[0, 1]` and shells from different
//! dimensionalities can be overlaid on one axis.

use std::fmt;
use std::str::FromStr;

use dimscope_core::{DimError, DimResult, sample_mean_std};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

const SQRT_2PI: f64 = 2.506_628_274_631_000_7;

/// Rescaling applied to the values before either curve is computed.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProfileScale {
    #[default]
    Raw,
    /// Divide by the maximum observed value.
    MaxNormalized,
}

impl FromStr for ProfileScale {
    type Err = DimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(ProfileScale::Raw),
            "max" | "normalized" => Ok(ProfileScale::MaxNormalized),
            other => Err(DimError::invalid(format!("unknown profile scale '{}'", other))),
        }
    }
}

/// KDE bandwidth selection. Rule factors are multiplied by the sample std.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum BandwidthRule {
    /// `n^(-1/5)`
    #[default]
    Scott,
    /// `(3n/4)^(-1/5)`
    Silverman,
    /// Absolute bandwidth in value units (after scaling).
    Fixed(f64),
}

impl BandwidthRule {
    /// Bandwidth for `n` samples with sample standard deviation `std`.
    pub fn bandwidth(&self, n: usize, std: f64) -> f64 {
        let n = n as f64;
        match *self {
            BandwidthRule::Scott => std * n.powf(-0.2),
            BandwidthRule::Silverman => std * (n * 0.75).powf(-0.2),
            BandwidthRule::Fixed(h) => h,
        }
    }
}

impl FromStr for BandwidthRule {
    type Err = DimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scott" => Ok(BandwidthRule::Scott),
            "silverman" => Ok(BandwidthRule::Silverman),
            other => other
                .parse::<f64>()
                .map(BandwidthRule::Fixed)
                .map_err(|_| DimError::invalid(format!("unknown bandwidth rule '{}'", other))),
        }
    }
}

impl fmt::Display for BandwidthRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandwidthRule::Scott => write!(f, "scott"),
            BandwidthRule::Silverman => write!(f, "silverman"),
            BandwidthRule::Fixed(h) => write!(f, "{}", h),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProfileConfig {
    pub scale: ProfileScale,
    pub bandwidth: BandwidthRule,
    /// Number of KDE evaluation points (>= 2).
    pub grid_size: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            scale: ProfileScale::Raw,
            bandwidth: BandwidthRule::Scott,
            grid_size: 200,
        }
    }
}

impl ProfileConfig {
    pub fn with_scale(mut self, scale: ProfileScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: BandwidthRule) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn normalized() -> Self {
        Self::default().with_scale(ProfileScale::MaxNormalized)
    }
}

/// Density values over an evenly spaced grid.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityCurve {
    pub grid: Vec<f64>,
    pub density: Vec<f64>,
    pub bandwidth: f64,
}

impl DensityCurve {
    /// Trapezoidal integral of the density over the grid.
    pub fn integral(&self) -> f64 {
        self.grid
            .windows(2)
            .zip(self.density.windows(2))
            .map(|(x, y)| 0.5 * (x[1] - x[0]) * (y[0] + y[1]))
            .sum()
    }
}

/// Empirical CDF sampled at every observed value (ascending).
#[derive(Clone, Debug, PartialEq)]
pub struct CumulativeCurve {
    pub values: Vec<f64>,
    /// Fraction of samples `<= values[i]`; non-decreasing, last entry 1.0.
    pub fractions: Vec<f64>,
}

impl CumulativeCurve {
    /// Step-function CDF at an arbitrary `x`.
    pub fn at(&self, x: f64) -> f64 {
        let count = self.values.partition_point(|v| *v <= x);
        count as f64 / self.values.len() as f64
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadialProfile {
    pub scale: ProfileScale,
    /// Divisor applied to the inputs (1.0 for `Raw`).
    pub scale_factor: f64,
    /// Scaled values in input order.
    pub values: Vec<f64>,
    pub density: DensityCurve,
    pub cumulative: CumulativeCurve,
}

/// Build the density and cumulative profile of `values`.
pub fn radial_profile(values: &[f64], config: &ProfileConfig) -> DimResult<RadialProfile> {
    if values.is_empty() {
        return Err(DimError::invalid(
            "density and CDF are undefined for an empty sequence",
        ));
    }
    if let Some(idx) = values.iter().position(|v| !v.is_finite() || *v < 0.0) {
        return Err(DimError::invalid(format!(
            "value {} at index {} is not a finite non-negative radius",
            values[idx], idx
        )));
    }
    if config.grid_size < 2 {
        return Err(DimError::invalid("KDE grid needs at least 2 points"));
    }
    if let BandwidthRule::Fixed(h) = config.bandwidth {
        if !(h.is_finite() && h > 0.0) {
            return Err(DimError::invalid(format!(
                "fixed bandwidth must be positive, got {}",
                h
            )));
        }
    }

    info!(
        "Building radial profile: n={}, scale={:?}, bandwidth={}",
        values.len(),
        config.scale,
        config.bandwidth
    );

    let (scaled, scale_factor) = match config.scale {
        ProfileScale::Raw => (values.to_vec(), 1.0),
        ProfileScale::MaxNormalized => {
            let max = values.iter().cloned().fold(0.0, f64::max);
            if max <= 0.0 {
                return Err(DimError::invalid(
                    "cannot normalise by the maximum when every value is 0",
                ));
            }
            (values.iter().map(|v| v / max).collect(), max)
        }
    };

    let density = gaussian_kde(&scaled, config.bandwidth, config.grid_size);
    let cumulative = empirical_cdf(&scaled);

    debug!(
        "Profile complete: bandwidth={:.6}, grid=[{:.4}, {:.4}]",
        density.bandwidth,
        density.grid[0],
        density.grid[density.grid.len() - 1]
    );

    Ok(RadialProfile {
        scale: config.scale,
        scale_factor,
        values: scaled,
        density,
        cumulative,
    })
}

/// Gaussian KDE on `grid_size` points spanning `[min, max]` of `values`.
///
/// Inputs must be non-empty and finite, `grid_size >= 2`.
fn gaussian_kde(values: &[f64], rule: BandwidthRule, grid_size: usize) -> DensityCurve {
    let n = values.len();
    let (mean, std) = sample_mean_std(values);

    let mut bandwidth = rule.bandwidth(n, std);
    if !(bandwidth > 0.0 && bandwidth.is_finite()) {
        // zero spread: fall back to a width relative to the magnitude
        bandwidth = (mean.abs() * 1e-3).max(1e-3);
        warn!(
            "Zero-spread sample (n={}, std={:.3e}); using fallback bandwidth {:.3e}",
            n, std, bandwidth
        );
    }

    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if hi > lo {
        (lo, hi)
    } else {
        ((lo - 3.0 * bandwidth).max(0.0), (hi + 3.0 * bandwidth).min(f64::MAX))
    };

    let step = (hi - lo) / (grid_size - 1) as f64;
    let mut grid: Vec<f64> = (0..grid_size).map(|i| lo + i as f64 * step).collect();
    grid[grid_size - 1] = hi;

    let norm = 1.0 / (n as f64 * bandwidth * SQRT_2PI);
    let density: Vec<f64> = grid
        .par_iter()
        .map(|&x| {
            values
                .iter()
                .map(|&xi| {
                    let z = (x - xi) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect();

    DensityCurve {
        grid,
        density,
        bandwidth,
    }
}

/// Empirical CDF at each sample; tied samples share the same fraction.
fn empirical_cdf(values: &[f64]) -> CumulativeCurve {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let mut fractions = vec![0.0; sorted.len()];
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i;
        while j + 1 < sorted.len() && sorted[j + 1] == sorted[i] {
            j += 1;
        }
        let frac = (j + 1) as f64 / n;
        fractions[i..=j].iter_mut().for_each(|f| *f = frac);
        i = j + 1;
    }

    CumulativeCurve {
        values: sorted,
        fractions,
    }
}
