//! multinomial_mixture — EM for mixture-of-multinomials topic models, with
//! optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the EM estimator to Python via the `_multinomial_mixture` extension module.
//! When the `python-bindings` feature is enabled, this module defines the
//! Python-facing class and submodule used by the `multinomial_mixture` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`mixture` and `optimization`) as the
//!   public crate surface.
//! - Define the `MixtureOfMultinomials` `#[pyclass]` wrapper and the
//!   `#[pymodule]` initializer for the `_multinomial_mixture` extension.
//! - Register the `topic_models` submodule in `sys.modules` so dot-notation
//!   imports work as expected.
//! - Install `pyo3-log` at import time so `log` records (EM progress when
//!   `verbose=True`) reach Python's `logging` under the
//!   `multinomial_mixture.*` logger names. Progress is emitted at `INFO`, so
//!   callers enable it with e.g. `logging.basicConfig(level=logging.INFO)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue, argument defaults, and error mapping.
//! - On successful conversion from Python objects to Rust types, the
//!   invariants documented in `mixture::core` hold.
//!
//! Conventions
//! -----------
//! - Matrices are returned to Python as `numpy.ndarray` of `float64`
//!   (`topic_word` is `K × V`, `doc_topic` is `D × K`).
//! - Errors from core Rust code are converted to `ValueError` at the PyO3
//!   boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code depends on [`mixture`] (usually via
//!   `mixture::prelude::*`) and ignores the items guarded by
//!   `python-bindings`.
//! - The Python packaging layer imports `_multinomial_mixture.topic_models`.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_mix_multi_pipeline.rs`.

pub mod mixture;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    mixture::{errors::MixError, models::mix_multi::MixMulti},
    utils::{build_mix_options, extract_corpus},
};

/// MixtureOfMultinomials — Python-facing wrapper for [`MixMulti`].
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `MixtureOfMultinomials(corpus, nb_topics, nb_words, init='uniform', ...)`:
/// - `corpus`: `dict[int, dict[int, int]]`, 2-D `numpy.ndarray`, or sequence
///   of rows.
/// - `nb_topics`, `nb_words`: model dimensions, both > 0.
/// - `init`: `'uniform'`, `'dirichlet'` (with `concentration`, default 1.0),
///   or `'fixed'` (with `init_topic_word` and `init_doc_topic`).
/// - `max_iter`, `delta`, `verbose`: options used by `fit`; `verbose` sends
///   per-iteration progress to Python's `logging` at `INFO`.
/// - `seed`: optional RNG seed for reproducible initialization.
///
/// Notes
/// -----
/// - Rust callers should use [`MixMulti`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "multinomial_mixture.topic_models")]
pub struct MixtureOfMultinomials {
    pub inner: MixMulti,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl MixtureOfMultinomials {
    #[new]
    #[pyo3(
        signature = (
            corpus,
            nb_topics,
            nb_words,
            init = None,
            concentration = None,
            init_topic_word = None,
            init_doc_topic = None,
            max_iter = 100,
            delta = 1e-3,
            seed = None,
            verbose = false,
        ),
        text_signature = "(corpus, nb_topics, nb_words, /, init='uniform', concentration=None, \
                          init_topic_word=None, init_doc_topic=None, max_iter=100, delta=0.001, \
                          seed=None, verbose=False)"
    )]
    pub fn new<'py>(
        corpus: &Bound<'py, PyAny>, nb_topics: usize, nb_words: usize, init: Option<&str>,
        concentration: Option<f64>, init_topic_word: Option<&Bound<'py, PyAny>>,
        init_doc_topic: Option<&Bound<'py, PyAny>>, max_iter: usize, delta: f64,
        seed: Option<u64>, verbose: bool,
    ) -> PyResult<Self> {
        let corpus = extract_corpus(corpus, nb_words)?;
        let options = build_mix_options(
            init,
            concentration,
            init_topic_word,
            init_doc_topic,
            max_iter,
            delta,
            seed,
            verbose,
        )?;
        let inner = MixMulti::new(corpus, nb_topics, nb_words, options)?;
        Ok(MixtureOfMultinomials { inner })
    }

    pub fn initialize(&mut self) -> PyResult<()> {
        Ok(self.inner.initialize()?)
    }

    pub fn e_step(&mut self) -> PyResult<()> {
        Ok(self.inner.e_step()?)
    }

    pub fn m_step(&mut self) -> PyResult<()> {
        Ok(self.inner.m_step()?)
    }

    pub fn log_likelihood(&self) -> PyResult<f64> {
        Ok(self.inner.log_likelihood()?)
    }

    /// Run EM on an initialized model and return the likelihood history.
    #[pyo3(signature = (max_iter, delta), text_signature = "(self, max_iter, delta)")]
    pub fn run(&mut self, max_iter: usize, delta: f64) -> PyResult<Vec<f64>> {
        Ok(self.inner.run(max_iter, delta)?.loglik_history.clone())
    }

    /// Initialize if needed, run EM with the constructor options, and return
    /// the likelihood history.
    pub fn fit(&mut self) -> PyResult<Vec<f64>> {
        Ok(self.inner.fit()?.loglik_history.clone())
    }

    pub fn perplexity(&self) -> PyResult<f64> {
        Ok(self.inner.perplexity()?)
    }

    #[pyo3(signature = (topic, n = 10))]
    pub fn top_words(&self, topic: usize, n: usize) -> PyResult<Vec<(usize, f64)>> {
        Ok(self.inner.top_words(topic, n)?)
    }

    #[getter]
    pub fn topic_word<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        self.ensure_initialized()?;
        Ok(self.inner.topic_word().to_owned().into_pyarray(py))
    }

    #[getter]
    pub fn doc_topic<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        self.ensure_initialized()?;
        Ok(self.inner.doc_topic().to_owned().into_pyarray(py))
    }

    #[getter]
    pub fn likelihood_history(&self) -> PyResult<Vec<f64>> {
        Ok(self.inner.results()?.loglik_history.clone())
    }

    #[getter]
    pub fn converged(&self) -> PyResult<bool> {
        Ok(self.inner.results()?.converged)
    }

    #[getter]
    pub fn dominant_topics(&self) -> PyResult<Vec<usize>> {
        Ok(self.inner.dominant_topics()?)
    }
}

#[cfg(feature = "python-bindings")]
impl MixtureOfMultinomials {
    fn ensure_initialized(&self) -> PyResult<()> {
        if !self.inner.is_initialized() {
            return Err(MixError::ModelNotInitialized.into());
        }
        Ok(())
    }
}

/// _multinomial_mixture — PyO3 module initializer for the Python extension.
///
/// Bridges the `log` facade to Python's `logging`, creates the `topic_models`
/// submodule, attaches it to the parent module and registers it in
/// `sys.modules` so it is importable via a dotted path.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _multinomial_mixture<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    // A logger installed earlier by the host process wins.
    if pyo3_log::Logger::new(_py, pyo3_log::Caching::LoggersAndLevels)?.install().is_err() {
        log::debug!("a `log` backend is already installed; keeping it");
    }

    let topic_models_mod = PyModule::new(_py, "topic_models")?;
    topic_models(_py, m, &topic_models_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("multinomial_mixture.topic_models", topic_models_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn topic_models<'py>(
    _py: Python, parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<MixtureOfMultinomials>()?;
    parent.add_submodule(m)?;
    Ok(())
}
