//! Public API surface for Expectation-Maximization.
//!
//! - [`ExpectationMaximization`]: trait models implement so [`run_em`] can drive them.
//! - [`EMOptions`]: iteration cap, convergence threshold and verbosity.
//! - [`EMStatus`] and [`EMOutcome`]: normalized result returned by the driver.
//!
//! Convention: the objective is a log-likelihood that EM should *increase*. The
//! driver records it once before the first iteration and once after every
//! E/M pair.
//!
//! [`run_em`]: crate::optimization::em::run_em
use crate::optimization::errors::{OptError, OptResult};

/// Model interface for the EM convergence driver.
///
/// Required:
/// - `expectation(&mut self)`: recompute the posterior over latent variables
///   from the current parameters (E-step).
/// - `maximization(&mut self)`: re-estimate parameters from the posterior (M-step).
/// - `objective(&self)`: evaluate the log-likelihood under the current parameters.
///
/// Optional:
/// - `label(&self)`: a human-readable description used in progress logs.
///
/// Each method must either complete fully or leave the model unchanged; the
/// driver aborts on the first error.
pub trait ExpectationMaximization {
    // Required methods
    fn expectation(&mut self) -> OptResult<()>;
    fn maximization(&mut self) -> OptResult<()>;
    fn objective(&self) -> OptResult<f64>;

    // Optional methods
    fn label(&self) -> String {
        "EM model".to_string()
    }
}

/// Driver-level configuration.
///
/// Fields:
/// - `max_iter: usize`: hard cap on E/M iterations. `0` evaluates the initial
///   likelihood and returns without iterating.
/// - `delta: f64`: stop as soon as `ll[last] - ll[last - 1] < delta`. A drop in
///   likelihood therefore also stops the run.
/// - `verbose: bool`: if `true`, estimators attach a logging observer.
///
/// Default:
/// - `max_iter = 100`, `delta = 1e-3`, `verbose = false`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EMOptions {
    pub max_iter: usize,
    pub delta: f64,
    pub verbose: bool,
}

impl EMOptions {
    /// Construct validated options with `verbose = false`.
    ///
    /// # Errors
    /// - [`OptError::InvalidDelta`] if `delta` is NaN or infinite.
    pub fn new(max_iter: usize, delta: f64) -> OptResult<Self> {
        verify_delta(delta)?;
        Ok(Self { max_iter, delta, verbose: false })
    }

    /// Return a copy with the verbosity flag set.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for EMOptions {
    fn default() -> Self {
        Self { max_iter: 100, delta: 1e-3, verbose: false }
    }
}

/// Validate the likelihood-improvement threshold.
///
/// Negative values are accepted: they only stop the run on a drop larger than
/// `|delta|`.
///
/// # Errors
/// Returns [`OptError::InvalidDelta`] if the value is NaN or infinite.
pub fn verify_delta(delta: f64) -> OptResult<()> {
    if !delta.is_finite() {
        return Err(OptError::InvalidDelta { value: delta, reason: "Threshold must be finite." });
    }
    Ok(())
}

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EMStatus {
    /// The last likelihood change fell below `delta` (including any decrease).
    DeltaReached,
    /// `max_iter` iterations were performed.
    MaxIterReached,
}

impl std::fmt::Display for EMStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EMStatus::DeltaReached => write!(f, "Likelihood change below threshold"),
            EMStatus::MaxIterReached => write!(f, "Maximum number of iterations reached"),
        }
    }
}

/// Canonical result returned by [`run_em`](crate::optimization::em::run_em).
///
/// - `loglik_history`: every recorded log-likelihood, starting with the value
///   before the first iteration. Its length is `iterations + 1`.
/// - `iterations`: number of completed E/M pairs.
/// - `status`: termination reason.
/// - `converged`: `true` when the run stopped on the `delta` rule.
#[derive(Debug, Clone, PartialEq)]
pub struct EMOutcome {
    pub loglik_history: Vec<f64>,
    pub iterations: usize,
    pub status: EMStatus,
    pub converged: bool,
}

impl EMOutcome {
    /// Build an outcome from a non-empty likelihood history.
    pub fn new(loglik_history: Vec<f64>, status: EMStatus) -> Self {
        let iterations = loglik_history.len().saturating_sub(1);
        let converged = status == EMStatus::DeltaReached;
        Self { loglik_history, iterations, status, converged }
    }

    /// Last recorded log-likelihood.
    pub fn final_loglik(&self) -> f64 {
        self.loglik_history.last().copied().unwrap_or(f64::NAN)
    }

    /// Whether the final iteration lowered the likelihood.
    pub fn ended_on_decrease(&self) -> bool {
        match self.loglik_history.as_slice() {
            [.., prev, last] => last < prev,
            _ => false,
        }
    }
}
