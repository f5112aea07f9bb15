//! # Principal-component reduction for display
//!
//! Projects a `n × d` point set onto the `k` directions of largest variance.
//! The fit centers the data, forms the `d × d` sample covariance and takes its
//! symmetric eigendecomposition (smartcore EVD); the `k` leading eigenvectors
//! become the components.
//!
//! The fitted [`PcaProjection`] keeps only the mean and the component
//! directions, enough to push further points through the same transform:
//!
//! ```ignore
//! let fit = fit_pca(&points, 2)?;
//! let new_2d = fit.projection.transform(&more_points)?;
//! ```
//!
//! Component signs are arbitrary in any eigen-solver; they are normalised so
//! the largest-magnitude entry of each component is positive, which keeps
//! repeated fits on the same data identical.
//!
//! Covariance costs O(n·d²) and the EVD O(d³), fine for the few hundred
//! dimensions the exploration uses.

use dimscope_core::{DimError, DimResult, PointSet};
use log::{debug, info, trace};
use rayon::prelude::*;
use smartcore::linalg::basic::arrays::{Array, Array2};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linalg::traits::evd::EVDDecomposable;

/// Fitted linear projection `y = C (x − mean)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PcaProjection {
    pub(crate) mean: Vec<f64>,
    /// `k` unit vectors of length `d`, by descending explained variance.
    pub(crate) components: Vec<Vec<f64>>,
    pub(crate) explained_variance: Vec<f64>,
    pub(crate) total_variance: f64,
}

impl PcaProjection {
    pub fn original_dim(&self) -> usize {
        self.mean.len()
    }

    pub fn reduced_dim(&self) -> usize {
        self.components.len()
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn components(&self) -> &[Vec<f64>] {
        &self.components
    }

    /// Variance captured along each component.
    pub fn explained_variance(&self) -> &[f64] {
        &self.explained_variance
    }

    /// Share of total variance captured along each component.
    pub fn explained_variance_ratio(&self) -> Vec<f64> {
        if self.total_variance <= 0.0 {
            return vec![0.0; self.explained_variance.len()];
        }
        self.explained_variance
            .iter()
            .map(|v| v / self.total_variance)
            .collect()
    }

    /// Project a single point.
    pub fn project(&self, point: &[f64]) -> DimResult<Vec<f64>> {
        if point.len() != self.original_dim() {
            return Err(DimError::invalid(format!(
                "point has {} components, projection expects {}",
                point.len(),
                self.original_dim()
            )));
        }
        Ok(self.project_unchecked(point))
    }

    fn project_unchecked(&self, point: &[f64]) -> Vec<f64> {
        self.components
            .iter()
            .map(|c| {
                c.iter()
                    .zip(point.iter().zip(&self.mean))
                    .map(|(w, (x, m))| w * (x - m))
                    .sum()
            })
            .collect()
    }

    /// Project every row of `points`.
    pub fn transform(&self, points: &PointSet) -> DimResult<PointSet> {
        if points.ncols() != self.original_dim() {
            return Err(DimError::invalid(format!(
                "points have {} dimensions, projection expects {}",
                points.ncols(),
                self.original_dim()
            )));
        }
        trace!(
            "Transforming {} points {}D → {}D",
            points.nrows(),
            self.original_dim(),
            self.reduced_dim()
        );
        let projected: Vec<Vec<f64>> = points
            .par_rows()
            .map(|row| self.project_unchecked(row))
            .collect();

        let mut flat = Vec::with_capacity(points.nrows() * self.reduced_dim());
        for row in projected {
            flat.extend(row);
        }
        PointSet::from_vec(flat, points.nrows(), self.reduced_dim())
    }
}

/// Projected points together with the projection that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct PcaReduction {
    pub points: PointSet,
    pub projection: PcaProjection,
}

/// Fit a `k`-component PCA on `points` and project them.
///
/// Fails with `InvalidInput` when `k == 0`, `k >= d`, or fewer than `k`
/// points are supplied.
pub fn fit_pca(points: &PointSet, k: usize) -> DimResult<PcaReduction> {
    let (n, d) = points.shape();
    if k == 0 {
        return Err(DimError::invalid("target dimension must be positive"));
    }
    if k >= d {
        return Err(DimError::invalid(format!(
            "target dimension {} must be smaller than source dimension {}",
            k, d
        )));
    }
    if n < k {
        return Err(DimError::invalid(format!(
            "{} points are not enough for {} components",
            n, k
        )));
    }

    info!("Fitting PCA: {} points, {}D → {}D", n, d, k);

    let mean = points.column_means();
    let covariance = covariance_matrix(points, &mean);

    // covariance is symmetric, so the buffer layout flag cannot transpose it
    let cov_dm = DenseMatrix::from_iterator(covariance.into_iter(), d, d, 0);
    let evd = cov_dm
        .evd(true)
        .map_err(|e| DimError::Decomposition(format!("symmetric EVD failed: {}", e)))?;

    let mut order: Vec<usize> = (0..d).collect();
    order.sort_by(|&a, &b| evd.d[b].total_cmp(&evd.d[a]));

    // tiny negative eigenvalues are round-off on a PSD matrix
    let total_variance: f64 = evd.d.iter().map(|v| v.max(0.0)).sum();

    let mut components = Vec::with_capacity(k);
    let mut explained_variance = Vec::with_capacity(k);
    for &col in order.iter().take(k) {
        let mut component: Vec<f64> = (0..d).map(|row| *evd.V.get((row, col))).collect();
        orient_component(&mut component);
        components.push(component);
        explained_variance.push(evd.d[col].max(0.0));
    }

    debug!(
        "PCA explained variance: {:?} of total {:.6}",
        explained_variance, total_variance
    );

    let projection = PcaProjection {
        mean,
        components,
        explained_variance,
        total_variance,
    };
    let projected = projection.transform(points)?;

    Ok(PcaReduction {
        points: projected,
        projection,
    })
}

/// Reduce to at most `k` dimensions for plotting.
///
/// Sets already at `d <= k` pass through unchanged with no projection, so
/// applying this twice with the same `k` keeps the shape.
pub fn reduce_for_display(
    points: &PointSet,
    k: usize,
) -> DimResult<(PointSet, Option<PcaProjection>)> {
    if k == 0 {
        return Err(DimError::invalid("target dimension must be positive"));
    }
    if points.ncols() <= k {
        debug!(
            "{}D points already within {}D, skipping reduction",
            points.ncols(),
            k
        );
        return Ok((points.clone(), None));
    }
    let fit = fit_pca(points, k)?;
    Ok((fit.points, Some(fit.projection)))
}

/// Row-major `d × d` sample covariance (divisor n − 1, or 1 for one point).
fn covariance_matrix(points: &PointSet, mean: &[f64]) -> Vec<f64> {
    let (n, d) = points.shape();
    let divisor = n.saturating_sub(1).max(1) as f64;

    let mut cov: Vec<f64> = (0..d)
        .into_par_iter()
        .flat_map_iter(|a| {
            (0..d).map(move |b| {
                if b < a {
                    return 0.0;
                }
                points
                    .rows()
                    .map(|r| (r[a] - mean[a]) * (r[b] - mean[b]))
                    .sum::<f64>()
                    / divisor
            })
        })
        .collect();

    for a in 0..d {
        for b in 0..a {
            cov[a * d + b] = cov[b * d + a];
        }
    }
    cov
}

/// Flip `component` so its largest-magnitude entry is positive.
fn orient_component(component: &mut [f64]) {
    let pivot = component
        .iter()
        .cloned()
        .fold(0.0f64, |acc, x| if x.abs() > acc.abs() { x } else { acc });
    if pivot < 0.0 {
        component.iter_mut().for_each(|x| *x = -*x);
    }
}
