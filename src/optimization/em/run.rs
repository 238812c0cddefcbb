//! Convergence driver that alternates E- and M-steps on an
//! [`ExpectationMaximization`] model and returns a crate-friendly [`EMOutcome`].
use crate::optimization::{
    em::{
        observer::EMObserver,
        traits::{EMOptions, EMOutcome, EMStatus, ExpectationMaximization},
    },
    errors::OptResult,
};

/// Run EM until the likelihood change drops below `opts.delta` or
/// `opts.max_iter` iterations have been performed.
///
/// # Steps
/// 1. Record `ll[0] = model.objective()` and notify `observer.start`.
/// 2. While fewer than `max_iter` iterations have run:
///    report `(iter, ll[iter])`, run `expectation`, `maximization`, then push
///    `objective()`. Stop when `ll[last] - ll[last - 1] < delta`; a decrease
///    therefore also stops the run.
/// 3. Report the final `(iter, ll[last])` and notify `observer.finish`.
///
/// # Arguments
/// - `model`: the model to iterate; updated in place.
/// - `opts`: iteration cap and threshold. `verbose` is ignored here; the caller
///   chooses the observer.
/// - `observer`: receiver for progress observations.
///
/// # Returns
/// An [`EMOutcome`] whose history has `iterations + 1 <= max_iter + 1` entries.
///
/// # Errors
/// Propagates the first error returned by the model. The model is left with the
/// state of its last completed step.
///
/// # Examples
/// ```ignore
/// let mut obs = LogObserver;
/// let outcome = run_em(&mut model, &EMOptions::new(30, 1e-3)?, &mut obs)?;
/// println!("{} after {} iterations", outcome.status, outcome.iterations);
/// ```
pub fn run_em<M, O>(model: &mut M, opts: &EMOptions, observer: &mut O) -> OptResult<EMOutcome>
where
    M: ExpectationMaximization + ?Sized,
    O: EMObserver + ?Sized,
{
    let mut history = vec![model.objective()?];
    observer.start(&model.label(), opts);

    let mut status = EMStatus::MaxIterReached;
    while history.len() <= opts.max_iter {
        let iter = history.len() - 1;
        observer.progress(iter, history[iter]);

        model.expectation()?;
        model.maximization()?;
        let ll = model.objective()?;
        history.push(ll);

        if ll - history[iter] < opts.delta {
            status = EMStatus::DeltaReached;
            break;
        }
    }

    let last = history.len() - 1;
    observer.progress(last, history[last]);

    let outcome = EMOutcome::new(history, status);
    observer.finish(&outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mixture::errors::MixError,
        optimization::{
            em::observer::{HistoryObserver, NoopObserver},
            errors::OptError,
        },
    };

    // Scripted model: `objective` returns `script[steps]`, where `steps` counts
    // completed M-steps. `fail_at` makes the E-step fail on that step index.
    struct Scripted {
        script: Vec<f64>,
        steps: usize,
        e_calls: usize,
        fail_at: Option<usize>,
    }

    impl Scripted {
        fn new(script: Vec<f64>) -> Self {
            Scripted { script, steps: 0, e_calls: 0, fail_at: None }
        }
    }

    impl ExpectationMaximization for Scripted {
        fn expectation(&mut self) -> OptResult<()> {
            if self.fail_at == Some(self.steps) {
                return Err(MixError::ModelNotInitialized.into());
            }
            self.e_calls += 1;
            Ok(())
        }

        fn maximization(&mut self) -> OptResult<()> {
            self.steps += 1;
            Ok(())
        }

        fn objective(&self) -> OptResult<f64> {
            Ok(self.script[self.steps.min(self.script.len() - 1)])
        }
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the stopping rules and observer protocol of `run_em`
    // with a scripted likelihood sequence. The real estimator is exercised in
    // `mixture::models` and in the integration tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `max_iter = 0` evaluates the initial likelihood and returns.
    //
    // Expect
    // ------
    // - One-element history, no E-step, status `MaxIterReached`.
    // - Exactly one progress observation, for iteration 0.
    fn run_em_with_zero_max_iter_returns_single_value() {
        let mut model = Scripted::new(vec![-10.0, -5.0]);
        let mut obs = HistoryObserver::new();

        let out = run_em(&mut model, &EMOptions::new(0, 1e-3).unwrap(), &mut obs).unwrap();

        assert_eq!(out.loglik_history, vec![-10.0]);
        assert_eq!(out.status, EMStatus::MaxIterReached);
        assert_eq!(model.e_calls, 0);
        assert_eq!(obs.records, vec![(0, -10.0)]);
        assert!(obs.finished);
    }

    #[test]
    // Purpose
    // -------
    // The iteration cap bounds the history length at `max_iter + 1`.
    fn run_em_stops_at_iteration_cap() {
        let mut model = Scripted::new((0..50).map(|i| -100.0 + i as f64).collect());

        let out = run_em(&mut model, &EMOptions::new(5, 1e-3).unwrap(), &mut NoopObserver).unwrap();

        assert_eq!(out.iterations, 5);
        assert_eq!(out.loglik_history.len(), 6);
        assert_eq!(out.status, EMStatus::MaxIterReached);
        assert!(!out.converged);
    }

    #[test]
    // Purpose
    // -------
    // A small improvement stops the run on the `delta` rule.
    //
    // Given
    // -----
    // - Script `[-10, -5, -4.9995]` with `delta = 1e-3`.
    //
    // Expect
    // ------
    // - Two iterations; the second improves by 5e-4 < 1e-3.
    fn run_em_stops_when_improvement_below_delta() {
        let mut model = Scripted::new(vec![-10.0, -5.0, -4.9995, 0.0]);

        let out =
            run_em(&mut model, &EMOptions::new(30, 1e-3).unwrap(), &mut NoopObserver).unwrap();

        assert_eq!(out.loglik_history, vec![-10.0, -5.0, -4.9995]);
        assert_eq!(out.status, EMStatus::DeltaReached);
        assert!(out.converged);
    }

    #[test]
    // Purpose
    // -------
    // A decrease in likelihood stops the run as well.
    fn run_em_stops_on_likelihood_decrease() {
        let mut model = Scripted::new(vec![-10.0, -5.0, -7.0, 100.0]);

        let out =
            run_em(&mut model, &EMOptions::new(30, 1e-3).unwrap(), &mut NoopObserver).unwrap();

        assert_eq!(out.loglik_history, vec![-10.0, -5.0, -7.0]);
        assert!(out.ended_on_decrease());
        assert_eq!(out.status, EMStatus::DeltaReached);
    }

    #[test]
    // Purpose
    // -------
    // Progress is reported before every E/M pair and once after the last one.
    //
    // Given
    // -----
    // - Script `[-4, -3, -2, -1]`, `max_iter = 3`.
    //
    // Expect
    // ------
    // - Observations for iterations 0, 1, 2 (before each pair) and 3 (final).
    fn run_em_reports_progress_before_each_pair_and_at_the_end() {
        let mut model = Scripted::new(vec![-4.0, -3.0, -2.0, -1.0]);
        let mut obs = HistoryObserver::new();

        run_em(&mut model, &EMOptions::new(3, 1e-3).unwrap(), &mut obs).unwrap();

        assert_eq!(obs.records, vec![(0, -4.0), (1, -3.0), (2, -2.0), (3, -1.0)]);
    }

    #[test]
    // Purpose
    // -------
    // Model errors abort the run and propagate unchanged.
    fn run_em_propagates_model_errors() {
        let mut model = Scripted::new(vec![-4.0, -3.0, -2.0]);
        model.fail_at = Some(1);
        let mut obs = HistoryObserver::new();

        let err = run_em(&mut model, &EMOptions::new(10, 1e-3).unwrap(), &mut obs).unwrap_err();

        assert_eq!(err, OptError::Model { source: MixError::ModelNotInitialized });
        assert_eq!(model.steps, 1);
        assert!(!obs.finished);
    }
}
