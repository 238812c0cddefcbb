//! em — Expectation-Maximization driver.
//!
//! Purpose
//! -------
//! Provide a model-agnostic convergence loop for EM estimators together with
//! its configuration, result, and progress-observation types.
//!
//! Key behaviors
//! -------------
//! - [`ExpectationMaximization`]: the seam a model implements (E-step, M-step,
//!   log-likelihood).
//! - [`run_em`]: records the initial likelihood, alternates E/M steps, and stops
//!   on the iteration cap or when `ll[last] - ll[last - 1] < delta`.
//! - [`EMObserver`] implementations receive `(iteration, likelihood)` progress
//!   observations; [`LogObserver`] forwards them to the `log` facade.
//!
//! Invariants & assumptions
//! ------------------------
//! - A model step either completes or returns an error without partial
//!   updates; the driver does not retry.
//! - The likelihood history always starts with the pre-iteration value and has
//!   at most `max_iter + 1` entries.
//!
//! Downstream usage
//! ----------------
//! - Estimators call [`run_em`] from their own `run`/`fit` methods, choosing an
//!   observer according to [`EMOptions::verbose`].

pub mod observer;
pub mod run;
pub mod traits;

pub use self::observer::{EMObserver, FnObserver, HistoryObserver, LogObserver, NoopObserver};
pub use self::run::run_em;
pub use self::traits::{EMOptions, EMOutcome, EMStatus, ExpectationMaximization, verify_delta};

pub mod prelude {
    pub use super::observer::{EMObserver, FnObserver, HistoryObserver, LogObserver, NoopObserver};
    pub use super::run::run_em;
    pub use super::traits::{EMOptions, EMOutcome, EMStatus, ExpectationMaximization};
}
