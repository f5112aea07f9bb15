//! Synthetic Gaussian blobs.
//!
//! Centers are drawn uniformly inside `center_box` per coordinate, then each
//! point is its center plus isotropic `N(0, cluster_std²)` noise. Samples are
//! split as evenly as possible across centers, so every label appears as long
//! as `n_samples >= n_centers`.
//!
//! **Seeding**: with `seed: Some(s)` the output is fully reproducible
//! (ChaCha8). With `None` a fresh seed is drawn per call and recorded in
//! [`BlobSet::seed`], so repeated unseeded calls give different sets.

use dimscope_core::{DimError, DimResult, PointSet};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BlobConfig {
    pub n_samples: usize,
    pub n_features: usize,
    pub n_centers: usize,
    /// Bounding range `(low, high)` for every center coordinate.
    pub center_box: (f64, f64),
    pub cluster_std: f64,
    /// Shuffle rows after generation; otherwise rows are grouped by label.
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            n_samples: 100,
            n_features: 2,
            n_centers: 3,
            center_box: (-10.0, 10.0),
            cluster_std: 1.0,
            shuffle: true,
            seed: None,
        }
    }
}

impl BlobConfig {
    pub fn new(n_samples: usize, n_features: usize, n_centers: usize) -> Self {
        Self {
            n_samples,
            n_features,
            n_centers,
            ..Default::default()
        }
    }

    pub fn with_center_box(mut self, low: f64, high: f64) -> Self {
        self.center_box = (low, high);
        self
    }

    pub fn with_cluster_std(mut self, std: f64) -> Self {
        self.cluster_std = std;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> DimResult<()> {
        if self.n_samples == 0 {
            return Err(DimError::invalid("n_samples must be positive"));
        }
        if self.n_features == 0 {
            return Err(DimError::invalid("n_features must be positive"));
        }
        if self.n_centers == 0 {
            return Err(DimError::invalid("n_centers must be positive"));
        }
        if !(self.cluster_std.is_finite() && self.cluster_std >= 0.0) {
            return Err(DimError::invalid(format!(
                "cluster_std must be finite and non-negative, got {}",
                self.cluster_std
            )));
        }
        let (low, high) = self.center_box;
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(DimError::invalid(format!(
                "center_box ({}, {}) must be a finite, non-empty range",
                low, high
            )));
        }
        Ok(())
    }
}

/// Generated points with their cluster labels and the centers used.
#[derive(Clone, Debug, PartialEq)]
pub struct BlobSet {
    pub points: PointSet,
    pub labels: Vec<usize>,
    /// `n_centers × n_features`
    pub centers: PointSet,
    /// Seed that reproduces this set.
    pub seed: u64,
}

impl BlobSet {
    /// Radii of the generated points, in row order.
    pub fn radii(&self) -> Vec<f64> {
        self.points.radii()
    }

    /// Number of points carrying each label `0..n_centers`.
    pub fn label_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.centers.nrows()];
        for &l in &self.labels {
            counts[l] += 1;
        }
        counts
    }
}

/// Generate labeled blobs according to `config`.
pub fn make_blobs(config: &BlobConfig) -> DimResult<BlobSet> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let n = config.n_samples;
    let d = config.n_features;
    let k = config.n_centers;

    info!(
        "Generating blobs: n={}, d={}, k={}, std={:.3}, seed={}",
        n, d, k, config.cluster_std, seed
    );
    if k > n {
        warn!(
            "More centers ({}) than samples ({}); {} labels will be empty",
            k,
            n,
            k - n
        );
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let (low, high) = config.center_box;
    let uniform = Uniform::new(low, high);
    let centers: Vec<f64> = (0..k * d).map(|_| uniform.sample(&mut rng)).collect();
    debug!("Drew {} centers inside [{}, {})", k, low, high);

    let noise = Normal::new(0.0, config.cluster_std)
        .map_err(|e| DimError::invalid(format!("invalid cluster_std: {}", e)))?;

    // even split: the first n % k centers take one extra sample
    let base = n / k;
    let extra = n % k;
    let mut rows: Vec<(usize, Vec<f64>)> = Vec::with_capacity(n);
    for c in 0..k {
        let size = base + usize::from(c < extra);
        let center = &centers[c * d..(c + 1) * d];
        for _ in 0..size {
            let point: Vec<f64> = center.iter().map(|m| m + noise.sample(&mut rng)).collect();
            rows.push((c, point));
        }
    }

    if config.shuffle {
        rows.shuffle(&mut rng);
    }

    let labels: Vec<usize> = rows.iter().map(|(l, _)| *l).collect();
    let flat: Vec<f64> = rows.into_iter().flat_map(|(_, p)| p).collect();

    Ok(BlobSet {
        points: PointSet::from_vec(flat, n, d)?,
        labels,
        centers: PointSet::from_vec(centers, k, d)?,
        seed,
    })
}
