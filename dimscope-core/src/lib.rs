//! Core primitives for dimscope: validated point sets, radii, distances and
//! radius statistics. Everything here is pure and allocation-bounded by the
//! caller's input.

pub mod distance;
pub mod error;
pub mod points;
pub mod stats;

pub use distance::radius;
pub use error::{DimError, DimResult};
pub use points::PointSet;
pub use stats::{MagnitudeStats, sample_mean_std};

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
            .is_test(true)
            .try_init();
    });
}
