//! optimization — EM driver, normalization primitives, and error surface.
//!
//! Purpose
//! -------
//! Provide the model-agnostic half of the estimation stack: a convergence
//! loop for Expectation-Maximization, the normalization routines that keep
//! probability tables valid, and a single error/result surface for both.
//! Callers implement the E-step, M-step and log-likelihood; this layer decides
//! when to stop and reports progress.
//!
//! Key behaviors
//! -------------
//! - Drive any [`ExpectationMaximization`](em::ExpectationMaximization)
//!   implementor to convergence with [`em::run_em`], recording the full
//!   likelihood history and emitting progress observations to an
//!   [`EMObserver`](em::EMObserver).
//! - Supply shared numerical primitives (`numerical_stability`) for row- and
//!   vector-normalization of probability tables.
//! - Normalize configuration issues, degenerate inputs and model failures
//!   into a single enum (`errors::OptError`) with a common result alias
//!   (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is a log-likelihood that EM is expected to increase; the
//!   driver records it once before iterating and once per E/M pair.
//! - Model steps either complete or fail without partial updates; the driver
//!   never retries and surfaces the first failure.
//!
//! Conventions
//! -----------
//! - Public entrypoints that can fail return `OptResult<T>`; model errors are
//!   carried unchanged in `OptError::Model`.
//! - Only [`em::LogObserver`] talks to the `log` facade; everything else here
//!   is free of I/O.
//!
//! Downstream usage
//! ----------------
//! - Estimators implement `ExpectationMaximization` and call `run_em` with
//!   `EMOptions` and an observer of their choice.
//! - Front-ends import the curated surface via `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - `em`: stopping rules and the observer protocol on scripted likelihoods.
//! - `numerical_stability`: row sums, zero rows, degenerate vectors, rank checks.
//! - `errors`: conversions from model errors and `Display` output.

pub mod em;
pub mod errors;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use multinomial_mixture::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::em::prelude::*;
    pub use super::errors::{OptError, OptResult};
    pub use super::numerical_stability::prelude::*;
}
