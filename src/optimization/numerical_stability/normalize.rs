//! Normalization of probability vectors and row-stochastic matrices.
//!
//! Purpose
//! -------
//! Provide the single rescaling primitive shared by initialization and the
//! M-step of the mixture-of-multinomials estimator: every row of a matrix (or
//! the whole of a vector) is divided by its total so it becomes a probability
//! distribution.
//!
//! Key behaviors
//! -------------
//! - [`normalize_rows`] rescales each row of a matrix to sum to one. Rows that
//!   sum to exactly zero are left untouched (they stay all-zero).
//! - [`normalize_vector`] rescales a vector by its total. A zero or non-finite
//!   total is reported as [`OptError::DegenerateVector`] instead of producing
//!   NaN/∞ entries.
//! - [`normalize`] dispatches on the rank of a dynamic array and rejects
//!   anything that is not 1-D or 2-D with [`OptError::InvalidShape`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are non-negative reals; this module does not check signs.
//! - Inputs are never mutated; every function allocates and returns a new array.
//!
//! Conventions
//! -----------
//! - Matrices are row-major in meaning: row `i` is one distribution.
//! - "Sums to one" means within floating-point rounding (tests use 1e-9).
//!
//! Testing notes
//! -------------
//! - Unit tests cover row sums, the zero-row rule, vector rescaling, the
//!   degenerate vector case, the rank check, and non-mutation of inputs.
use crate::optimization::errors::{OptError, OptResult};
use ndarray::{Array1, Array2, ArrayD, ArrayView1, ArrayView2, ArrayViewD, Axis, Ix1, Ix2};

/// Row-normalize a matrix, leaving all-zero rows unchanged.
///
/// Parameters
/// ----------
/// - `m`: `ArrayView2<f64>`
///   Non-negative matrix; row `i` is rescaled by `1 / sum(m[i, :])`.
///
/// Returns
/// -------
/// `Array2<f64>`
///   A new matrix of the same shape whose non-zero rows sum to one.
///
/// Panics
/// ------
/// - Never panics.
pub fn normalize_rows(m: ArrayView2<f64>) -> Array2<f64> {
    let mut out = m.to_owned();
    for mut row in out.axis_iter_mut(Axis(0)) {
        let s = row.sum();
        if s != 0.0 {
            row.mapv_inplace(|x| x / s);
        }
    }
    out
}

/// Normalize a vector by the sum of its elements.
///
/// Errors
/// ------
/// - [`OptError::DegenerateVector`] when the total is zero or not finite.
pub fn normalize_vector(v: ArrayView1<f64>) -> OptResult<Array1<f64>> {
    let s = v.sum();
    if s == 0.0 || !s.is_finite() {
        return Err(OptError::DegenerateVector { sum: s });
    }
    Ok(v.mapv(|x| x / s))
}

/// Normalize a vector or a matrix held in a dynamically-shaped array.
///
/// Rank 2 behaves like [`normalize_rows`]; rank 1 behaves like
/// [`normalize_vector`].
///
/// Errors
/// ------
/// - [`OptError::InvalidShape`] for arrays of any other rank.
/// - [`OptError::DegenerateVector`] for a rank-1 input summing to zero.
pub fn normalize(m: ArrayViewD<f64>) -> OptResult<ArrayD<f64>> {
    match m.ndim() {
        1 => {
            let v = m.into_dimensionality::<Ix1>().map_err(|_| OptError::InvalidShape { ndim: 1 })?;
            Ok(normalize_vector(v)?.into_dyn())
        }
        2 => {
            let mat =
                m.into_dimensionality::<Ix2>().map_err(|_| OptError::InvalidShape { ndim: 2 })?;
            Ok(normalize_rows(mat).into_dyn())
        }
        ndim => Err(OptError::InvalidShape { ndim }),
    }
}
