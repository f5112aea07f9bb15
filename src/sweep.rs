//! Dimensionality sweep: how radii and pairwise distances change with `d`.
//!
//! For every dimension in the sweep a fresh sample of `n_points` is drawn and
//! summarised. The per-dimension seed is derived from the sweep seed
//! (`seed + d`), so a seeded sweep is reproducible and each dimension still
//! gets an independent stream.

use std::str::FromStr;

use dimscope_core::{DimError, DimResult, MagnitudeStats, PointSet};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};
use serde::{Deserialize, Serialize};

use crate::blobs::{BlobConfig, make_blobs};
use crate::pairwise::{DistanceSummary, pairwise_distances};
use crate::profile::{ProfileConfig, RadialProfile, radial_profile};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum SampleDistribution {
    /// Uniform in the unit hypercube `[0, 1]^d`.
    #[default]
    UniformCube,
    /// Standard normal per coordinate.
    StandardGaussian,
    /// Gaussian blobs with the given number of centers.
    Blobs { n_centers: usize, cluster_std: f64 },
}

impl FromStr for SampleDistribution {
    type Err = DimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(SampleDistribution::UniformCube),
            "gaussian" => Ok(SampleDistribution::StandardGaussian),
            "blobs" => Ok(SampleDistribution::Blobs {
                n_centers: 3,
                cluster_std: 1.0,
            }),
            other => Err(DimError::invalid(format!(
                "unknown sample distribution '{}'",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SweepConfig {
    pub dims: Vec<usize>,
    pub n_points: usize,
    pub distribution: SampleDistribution,
    /// Attach the max-normalised radial profile to every row.
    pub with_profiles: bool,
    pub profile: ProfileConfig,
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            dims: vec![1, 2, 3, 5, 10, 25, 50, 100],
            n_points: 500,
            distribution: SampleDistribution::UniformCube,
            with_profiles: false,
            profile: ProfileConfig::normalized(),
            seed: None,
        }
    }
}

impl SweepConfig {
    pub fn with_dims(mut self, dims: Vec<usize>) -> Self {
        self.dims = dims;
        self
    }

    pub fn with_n_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    pub fn with_distribution(mut self, distribution: SampleDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn with_profiles(mut self, profile: ProfileConfig) -> Self {
        self.with_profiles = true;
        self.profile = profile;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SweepRow {
    pub dim: usize,
    pub radii: MagnitudeStats,
    pub distances: DistanceSummary,
    pub profile: Option<RadialProfile>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SweepReport {
    pub seed: u64,
    pub rows: Vec<SweepRow>,
}

/// Sample and summarise one point set per configured dimension.
pub fn dimension_sweep(config: &SweepConfig) -> DimResult<SweepReport> {
    if config.dims.is_empty() {
        return Err(DimError::invalid("sweep needs at least one dimension"));
    }
    if config.dims.contains(&0) {
        return Err(DimError::invalid("sweep dimensions must be positive"));
    }
    if config.n_points < 2 {
        return Err(DimError::invalid(format!(
            "sweep needs at least 2 points per dimension, got {}",
            config.n_points
        )));
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        "Dimension sweep: dims={:?}, n={}, distribution={:?}, seed={}",
        config.dims, config.n_points, config.distribution, seed
    );

    let mut rows = Vec::with_capacity(config.dims.len());
    for &dim in &config.dims {
        let dim_seed = seed.wrapping_add(dim as u64);
        let points = sample_points(config.distribution, config.n_points, dim, dim_seed)?;

        let radii = points.radii();
        let radius_stats = MagnitudeStats::from_radii(&radii)?;
        let distances = DistanceSummary::from_distances(&pairwise_distances(&points)?)?;
        let profile = if config.with_profiles {
            Some(radial_profile(&radii, &config.profile)?)
        } else {
            None
        };

        debug!(
            "d={}: radii {} | pairwise mean={:.4}, contrast={:.4}",
            dim,
            radius_stats.summary(),
            distances.mean,
            distances.relative_contrast
        );

        rows.push(SweepRow {
            dim,
            radii: radius_stats,
            distances,
            profile,
        });
    }

    Ok(SweepReport { seed, rows })
}

/// Draw `n` points in `dim` dimensions from `distribution`.
pub fn sample_points(
    distribution: SampleDistribution,
    n: usize,
    dim: usize,
    seed: u64,
) -> DimResult<PointSet> {
    match distribution {
        SampleDistribution::UniformCube => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let unit = Uniform::new(0.0, 1.0);
            let data: Vec<f64> = (0..n * dim).map(|_| unit.sample(&mut rng)).collect();
            PointSet::from_vec(data, n, dim)
        }
        SampleDistribution::StandardGaussian => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let data: Vec<f64> = (0..n * dim)
                .map(|_| {
                    let sample: f64 = StandardNormal.sample(&mut rng);
                    sample
                })
                .collect();
            PointSet::from_vec(data, n, dim)
        }
        SampleDistribution::Blobs {
            n_centers,
            cluster_std,
        } => {
            let config = BlobConfig::new(n, dim, n_centers)
                .with_cluster_std(cluster_std)
                .with_seed(seed);
            Ok(make_blobs(&config)?.points)
        }
    }
}
