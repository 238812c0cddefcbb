//! Progress observers for the EM driver.
//!
//! The driver never prints. Instead it reports `(iteration, log-likelihood)`
//! pairs to an [`EMObserver`]: once before every E/M pair and once more after
//! the final iteration. Observers decide whether to log, record, or discard.
//!
//! Provided observers:
//! - [`NoopObserver`]: discards everything.
//! - [`LogObserver`]: forwards to the `log` facade (`info!` for progress,
//!   `debug!` for the start banner and termination status).
//! - [`HistoryObserver`]: stores every observation in memory.
//! - [`FnObserver`]: adapts a closure.
use crate::optimization::em::traits::{EMOptions, EMOutcome};
use log::{debug, info};

/// Receiver for progress observations emitted by
/// [`run_em`](crate::optimization::em::run_em).
pub trait EMObserver {
    /// Called once after the initial likelihood has been evaluated.
    fn start(&mut self, _label: &str, _opts: &EMOptions) {}

    /// Called with the iteration index and the current log-likelihood.
    fn progress(&mut self, iter: usize, loglik: f64);

    /// Called once with the final outcome.
    fn finish(&mut self, _outcome: &EMOutcome) {}
}

/// Observer that discards every observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopObserver;

impl EMObserver for NoopObserver {
    fn progress(&mut self, _iter: usize, _loglik: f64) {}
}

/// Observer that forwards observations to the `log` facade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogObserver;

impl EMObserver for LogObserver {
    fn start(&mut self, label: &str, opts: &EMOptions) {
        debug!("{label}");
        debug!(
            "Running EM, max_iter = {}, delta = {}",
            opts.max_iter, opts.delta
        );
    }

    fn progress(&mut self, iter: usize, loglik: f64) {
        info!("Iter {iter}, likelihood {loglik}");
    }

    fn finish(&mut self, outcome: &EMOutcome) {
        debug!(
            "EM stopped after {} iterations: {} (final likelihood {})",
            outcome.iterations,
            outcome.status,
            outcome.final_loglik()
        );
    }
}

/// Observer that records every `(iteration, log-likelihood)` pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryObserver {
    pub records: Vec<(usize, f64)>,
    pub finished: bool,
}

impl HistoryObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EMObserver for HistoryObserver {
    fn progress(&mut self, iter: usize, loglik: f64) {
        self.records.push((iter, loglik));
    }

    fn finish(&mut self, _outcome: &EMOutcome) {
        self.finished = true;
    }
}

/// Adapter turning a closure `FnMut(usize, f64)` into an observer.
pub struct FnObserver<F>(pub F);

impl<F> EMObserver for FnObserver<F>
where
    F: FnMut(usize, f64),
{
    fn progress(&mut self, iter: usize, loglik: f64) {
        (self.0)(iter, loglik)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::em::traits::EMStatus;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::sync::Mutex;

    #[test]
    // Purpose
    // -------
    // `HistoryObserver` records observations in order and notes completion.
    fn history_observer_records_progress_in_order() {
        let mut obs = HistoryObserver::new();

        obs.start("test", &EMOptions::default());
        obs.progress(0, -10.0);
        obs.progress(1, -8.0);
        obs.finish(&EMOutcome::new(vec![-10.0, -8.0], EMStatus::MaxIterReached));

        assert_eq!(obs.records, vec![(0, -10.0), (1, -8.0)]);
        assert!(obs.finished);
    }

    #[test]
    // Purpose
    // -------
    // `FnObserver` forwards each observation to the wrapped closure.
    fn fn_observer_forwards_to_closure() {
        let mut seen = Vec::new();
        {
            let mut obs = FnObserver(|iter, ll| seen.push((iter, ll)));
            obs.progress(3, -1.5);
        }
        assert_eq!(seen, vec![(3, -1.5)]);
    }

    struct CaptureLogger(Mutex<Vec<(Level, String)>>);

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.0.lock().unwrap().push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger(Mutex::new(Vec::new()));

    #[test]
    // Purpose
    // -------
    // `LogObserver` records reach whichever backend is installed on the `log`
    // facade, with progress at `INFO` and the banner/status at `DEBUG`.
    //
    // Given
    // -----
    // - A capturing logger installed as the global backend.
    //
    // Expect
    // ------
    // - One `INFO` record per progress call, carrying iteration and likelihood.
    // - `DEBUG` records for the label and the termination status.
    fn log_observer_records_reach_installed_backend() {
        // Arrange
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(LevelFilter::Trace);
        let mut obs = LogObserver;

        // Act
        obs.start("MM with 1 documents and 7 topics", &EMOptions::default());
        obs.progress(7, -2.5);
        obs.finish(&EMOutcome::new(vec![-3.0, -2.5], EMStatus::MaxIterReached));

        // Assert
        let records = CAPTURE.0.lock().unwrap();
        assert!(records.contains(&(Level::Info, "Iter 7, likelihood -2.5".to_string())));
        assert!(records.contains(&(Level::Debug, "MM with 1 documents and 7 topics".to_string())));
        assert!(
            records
                .iter()
                .any(|(level, msg)| *level == Level::Debug && msg.starts_with("EM stopped after 1 iterations"))
        );
    }
}
