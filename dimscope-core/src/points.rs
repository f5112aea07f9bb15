// dimscope-core/src/points.rs
use log::{debug, trace};
use rayon::prelude::*;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::distance::norm_slice;
use crate::error::{DimError, DimResult};

/// Row-major set of `nrows` points, each with `ncols` finite coordinates.
///
/// The dimensionality is fixed at construction; every row has exactly
/// `ncols` entries for the lifetime of the set.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    data: Vec<f64>,
    nrows: usize,
    ncols: usize,
}

impl PointSet {
    /// Build from owned rows. All rows must share one non-zero length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> DimResult<Self> {
        let ncols = match rows.first() {
            Some(r) => r.len(),
            None => {
                return Err(DimError::invalid(
                    "cannot infer dimensionality from zero rows; use PointSet::empty",
                ));
            }
        };
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(DimError::invalid(format!(
                "row {} has {} components, expected {}",
                idx,
                row.len(),
                ncols
            )));
        }
        let nrows = rows.len();
        let data: Vec<f64> = rows.into_iter().flatten().collect();
        Self::from_vec(data, nrows, ncols)
    }

    /// Factory to create from a flat row-major buffer
    pub fn from_vec(data: Vec<f64>, nrows: usize, ncols: usize) -> DimResult<Self> {
        if ncols == 0 {
            return Err(DimError::invalid("points must have at least one dimension"));
        }
        let expected = nrows.checked_mul(ncols).ok_or_else(|| {
            DimError::invalid(format!("shape {}x{} overflows usize", nrows, ncols))
        })?;
        if data.len() != expected {
            return Err(DimError::invalid(format!(
                "buffer of {} values does not match shape {}x{}",
                data.len(),
                nrows,
                ncols
            )));
        }
        if let Some(idx) = data.iter().position(|x| !x.is_finite()) {
            return Err(DimError::invalid(format!(
                "row {} column {} is not a finite number",
                idx / ncols,
                idx % ncols
            )));
        }
        trace!("PointSet {}x{} created", nrows, ncols);
        Ok(Self { data, nrows, ncols })
    }

    /// A set with a declared dimensionality and no points yet.
    pub fn empty(ncols: usize) -> DimResult<Self> {
        Self::from_vec(Vec::new(), 0, ncols)
    }

    /// Copy out of a smartcore matrix, row by row.
    pub fn from_dense(matrix: &DenseMatrix<f64>) -> DimResult<Self> {
        let (nrows, ncols) = matrix.shape();
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(*matrix.get((i, j)));
            }
        }
        Self::from_vec(data, nrows, ncols)
    }

    pub fn to_dense(&self) -> DimResult<DenseMatrix<f64>> {
        DenseMatrix::from_2d_vec(&self.to_rows())
            .map_err(|e| DimError::invalid(format!("cannot build dense matrix: {}", e)))
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn is_empty(&self) -> bool {
        self.nrows == 0
    }

    /// Zero-copy view of row `i`. Panics when `i` is out of bounds.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.ncols)
    }

    pub fn par_rows(&self) -> rayon::slice::ChunksExact<'_, f64> {
        self.data.par_chunks_exact(self.ncols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Per-row radius (Euclidean norm from the origin), in row order.
    pub fn radii(&self) -> Vec<f64> {
        debug!("Computing radii for {} points in {}D", self.nrows, self.ncols);
        self.par_rows().map(norm_slice).collect()
    }

    /// Column means; empty sets yield a zero vector.
    pub fn column_means(&self) -> Vec<f64> {
        let mut means = vec![0.0; self.ncols];
        if self.nrows == 0 {
            return means;
        }
        for row in self.rows() {
            for (m, x) in means.iter_mut().zip(row) {
                *m += x;
            }
        }
        let n = self.nrows as f64;
        means.iter_mut().for_each(|m| *m /= n);
        means
    }
}
