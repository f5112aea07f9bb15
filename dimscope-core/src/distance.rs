// dimscope-core/src/distance.rs
//! Distance metrics for point and radius computations
//!
//! Implements:
//! - Radius (Euclidean norm from the origin), validated
//! - Euclidean distance between rows
//!
//! The validated entry point is [`radius`]; the slice helpers assume the
//! caller already holds rows from a [`crate::points::PointSet`], whose
//! construction guarantees equal lengths and finite entries.

use crate::error::{DimError, DimResult};

/// Euclidean norm of `vector` measured from the origin.
///
/// Computes `sqrt(Σ xᵢ²)`. Fails with `InvalidInput` when the vector is empty
/// or holds a NaN / infinite entry.
pub fn radius(vector: &[f64]) -> DimResult<f64> {
    if vector.is_empty() {
        return Err(DimError::invalid("radius of an empty vector is undefined"));
    }
    if let Some(idx) = vector.iter().position(|x| !x.is_finite()) {
        return Err(DimError::invalid(format!(
            "component {} is not a finite number ({})",
            idx, vector[idx]
        )));
    }
    Ok(norm_slice(vector))
}

/// Unchecked Euclidean norm for rows that are already validated.
///
/// Components are divided by the largest magnitude before squaring, so any
/// norm that fits in an `f64` is returned finite.
pub fn norm_slice(vector: &[f64]) -> f64 {
    scaled_norm(vector.iter().copied())
}

/// Euclidean distance for slices
///
/// Differences are taken on halved coordinates, so `a − b` cannot overflow
/// for finite inputs of opposite sign; the result is infinite only when the
/// true distance exceeds `f64::MAX`.
pub fn euclidean_distance_slice(vec_i: &[f64], vec_j: &[f64]) -> f64 {
    assert_eq!(vec_i.len(), vec_j.len());
    2.0 * scaled_norm(vec_i.iter().zip(vec_j.iter()).map(|(a, b)| 0.5 * a - 0.5 * b))
}

fn scaled_norm<I>(components: I) -> f64
where
    I: Iterator<Item = f64> + Clone,
{
    let scale = components.clone().fold(0.0f64, |acc, x| acc.max(x.abs()));
    if scale == 0.0 {
        return 0.0;
    }
    components.map(|x| (x / scale).powi(2)).sum::<f64>().sqrt() * scale
}
