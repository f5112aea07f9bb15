//! # dimscope
//!
//! Inspect how point clouds behave as dimensionality grows:
//!
//! - [`radius`]: Euclidean norm from the origin
//! - [`pairwise`]: all pairwise distances and their equal-width histogram
//! - [`profile`]: Gaussian KDE and empirical CDF of radii, optionally max-normalised
//! - [`blobs`]: seeded synthetic Gaussian clusters with labels
//! - [`reduction`]: PCA to a few dimensions, with a reusable fitted projection
//! - [`sweep`]: radius/distance summaries across a list of dimensions
//!
//! Every operation is a synchronous, in-memory transform. Caller-contract
//! violations surface as [`DimError::InvalidInput`].

pub mod blobs;
pub mod pairwise;
pub mod profile;
pub mod reduction;
pub mod sweep;

pub use dimscope_core::distance::{self, radius};
pub use dimscope_core::{DimError, DimResult, MagnitudeStats, PointSet};

pub use blobs::{BlobConfig, BlobSet, make_blobs};
pub use pairwise::{DistanceHistogram, DistanceSummary, distance_histogram, pairwise_distances};
pub use profile::{BandwidthRule, ProfileConfig, ProfileScale, RadialProfile, radial_profile};
pub use reduction::{PcaProjection, PcaReduction, fit_pca, reduce_for_display};
pub use sweep::{SampleDistribution, SweepConfig, SweepReport, dimension_sweep};

#[cfg(test)]
mod tests;

#[cfg(test)]
use std::sync::Once;

#[cfg(test)]
static INIT: Once = Once::new();

#[cfg(test)]
pub(crate) fn init() {
    INIT.call_once(|| {
        // Read RUST_LOG env variable, default to "debug" if not set
        let env = env_logger::Env::default().default_filter_or("debug");

        // don't panic if called multiple times across binaries
        let _ = env_logger::Builder::from_env(env)
            .is_test(true) // nicer formatting for tests
            .try_init();
    });
}
