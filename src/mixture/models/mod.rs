//! models — user-facing mixture-of-multinomials estimators.
//!
//! Purpose
//! -------
//! Collect the estimator types built on top of `mixture::core` and the
//! generic EM driver in `optimization::em`.
//!
//! Key behaviors
//! -------------
//! - [`MixMulti`] owns a corpus, the parameter matrices `P` / `Pi` and the
//!   responsibility cache, and exposes `initialize`, `e_step`, `m_step`,
//!   `log_likelihood`, `run` and `fit`.
//! - [`MixMulti`] implements
//!   [`ExpectationMaximization`](crate::optimization::em::ExpectationMaximization),
//!   so callers can also drive it with `run_em` and a custom observer.
//!
//! Invariants & assumptions
//! ------------------------
//! - The estimator is single-owner; mutating steps take `&mut self`.
//! - After initialization and every completed M-step, rows of `P` and `Pi`
//!   sum to one or are all-zero.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`mix_multi`] check hand-computed E/M/likelihood values,
//!   degenerate zeros and lifecycle errors.
//! - `tests/integration_mix_multi_pipeline.rs` runs EM end-to-end on the toy
//!   corpus.

pub mod mix_multi;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::mix_multi::MixMulti;

pub mod prelude {
    pub use super::mix_multi::MixMulti;
}
