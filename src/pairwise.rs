//! Pairwise-distance histograms.
//!
//! All `n(n−1)/2` Euclidean distances are materialised (O(n²·d) time,
//! O(n²) memory); no sampling or approximation is applied. This is sized for
//! exploratory sets of hundreds to a few thousand points.

use dimscope_core::distance::euclidean_distance_slice;
use dimscope_core::{DimError, DimResult, PointSet, sample_mean_std};
use log::{debug, info, trace};
use rayon::prelude::*;

/// Equal-width histogram of pairwise distances over `[0, max_distance]`.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceHistogram {
    /// `bins + 1` ascending edges, `edges[0] == 0.0`.
    pub edges: Vec<f64>,
    /// `bins` counts; bin `i` covers `[edges[i], edges[i+1])`, the last bin is closed.
    pub counts: Vec<usize>,
    pub max_distance: f64,
}

impl DistanceHistogram {
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Bin midpoints, convenient for plotting against counts.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }
}

/// Min / max / mean of the pairwise distances and their relative contrast.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceSummary {
    pub n_pairs: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// `(max − min) / min`; shrinks towards 0 as dimensionality grows.
    /// Infinite when two points coincide.
    pub relative_contrast: f64,
}

impl DistanceSummary {
    pub fn from_distances(distances: &[f64]) -> DimResult<Self> {
        if distances.is_empty() {
            return Err(DimError::invalid("no pairwise distances to summarise"));
        }
        let min = distances.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = distances.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let (mean, _) = sample_mean_std(distances);
        let relative_contrast = if min > 0.0 {
            (max - min) / min
        } else {
            f64::INFINITY
        };
        Ok(Self {
            n_pairs: distances.len(),
            min,
            max,
            mean,
            relative_contrast,
        })
    }
}

/// Condensed upper-triangle distances in order (0,1), (0,2), …, (1,2), …
///
/// Fails with `InvalidInput` when fewer than two points are supplied.
pub fn pairwise_distances(points: &PointSet) -> DimResult<Vec<f64>> {
    let n = points.nrows();
    if n < 2 {
        return Err(DimError::invalid(format!(
            "pairwise distances need at least 2 points, got {}",
            n
        )));
    }
    debug!(
        "Computing {} pairwise distances for {} points in {}D",
        n * (n - 1) / 2,
        n,
        points.ncols()
    );

    let distances: Vec<f64> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let row_i = points.row(i);
            ((i + 1)..n).map(move |j| euclidean_distance_slice(row_i, points.row(j)))
        })
        .collect();

    trace!("Pairwise distances computed: {}", distances.len());
    Ok(distances)
}

/// Bin all pairwise distances of `points` into `bins` equal-width bins.
pub fn distance_histogram(points: &PointSet, bins: usize) -> DimResult<DistanceHistogram> {
    if bins == 0 {
        return Err(DimError::invalid("bin count must be positive"));
    }
    let distances = pairwise_distances(points)?;
    let hist = histogram_from_distances(&distances, bins)?;
    info!(
        "Distance histogram: {} pairs, {} bins, max distance {:.4}",
        hist.total(),
        bins,
        hist.max_distance
    );
    Ok(hist)
}

/// Histogram over precomputed non-negative distances.
///
/// When every distance is zero the span `[0, 1]` is used so edges stay
/// strictly increasing; all pairs then land in the first bin.
pub fn histogram_from_distances(distances: &[f64], bins: usize) -> DimResult<DistanceHistogram> {
    if bins == 0 {
        return Err(DimError::invalid("bin count must be positive"));
    }
    if distances.is_empty() {
        return Err(DimError::invalid("no distances to bin"));
    }
    if distances.iter().any(|d| *d == f64::INFINITY) {
        return Err(DimError::invalid(
            "pairwise distance exceeds the f64 range",
        ));
    }
    if distances.iter().any(|d| !d.is_finite() || *d < 0.0) {
        return Err(DimError::invalid("distances must be finite and non-negative"));
    }

    let max_distance = distances.iter().cloned().fold(0.0, f64::max);
    let span = if max_distance > 0.0 { max_distance } else { 1.0 };
    let width = span / bins as f64;

    let mut edges: Vec<f64> = (0..bins).map(|i| i as f64 * width).collect();
    edges.push(span);

    let mut counts = vec![0usize; bins];
    for &d in distances {
        let idx = ((d / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Ok(DistanceHistogram {
        edges,
        counts,
        max_distance,
    })
}
