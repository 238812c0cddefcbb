//! Conversion helpers between Python objects and the crate's Rust types.
//!
//! Everything here is compiled only with the `python-bindings` feature and is
//! used by the `#[pyclass]` wrappers in the crate root.
#[cfg(feature = "python-bindings")]
use std::collections::BTreeMap;

#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    mixture::{
        core::{corpus::Corpus, init::Init, options::MixOptions},
        errors::MixError,
    },
    optimization::em::traits::EMOptions,
};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray2;

/// Convert a Python corpus into a [`Corpus`].
///
/// Accepted inputs:
/// - `dict[int, dict[int, int]]` mapping document index to `{word: count}`;
///   document keys must be `0..len(dict)`.
/// - A 2-D `numpy.ndarray` of `float64` (document-term matrix).
/// - A sequence of equal-length sequences of numbers.
#[cfg(feature = "python-bindings")]
pub fn extract_corpus<'py>(raw: &Bound<'py, PyAny>, nb_words: usize) -> PyResult<Corpus> {
    if let Ok(map) = raw.extract::<BTreeMap<usize, BTreeMap<usize, i64>>>() {
        return Ok(Corpus::from_map(&map, nb_words)?);
    }

    let dtm = extract_f64_matrix(raw).map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a dict[int, dict[int, int]], a 2-D numpy.ndarray, or a sequence of rows",
        )
    })?;
    if dtm.ncols() != nb_words {
        return Err(MixError::VocabularyMismatch { expected: nb_words, actual: dtm.ncols() }.into());
    }
    Ok(Corpus::from_dense(dtm.view())?)
}

/// Extract a 2-D `float64` matrix from a numpy array or a sequence of rows.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(raw: &Bound<'py, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    let rows: Vec<Vec<f64>> = raw.extract()?;
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != ncols) {
        return Err(PyValueError::new_err("all rows must have the same length"));
    }
    let nrows = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|e| PyValueError::new_err(format!("invalid matrix: {e}")))
}

/// Build [`MixOptions`] from the keyword arguments of `MixtureOfMultinomials`.
#[cfg(feature = "python-bindings")]
pub fn build_mix_options<'py>(
    init: Option<&str>, concentration: Option<f64>, init_topic_word: Option<&Bound<'py, PyAny>>,
    init_doc_topic: Option<&Bound<'py, PyAny>>, max_iter: usize, delta: f64, seed: Option<u64>,
    verbose: bool,
) -> PyResult<MixOptions> {
    let policy = extract_init(init, concentration, init_topic_word, init_doc_topic)?;
    let em_opts = EMOptions::new(max_iter, delta).map_err(MixError::from)?.with_verbose(verbose);
    Ok(MixOptions::new(policy, em_opts, seed))
}

#[cfg(feature = "python-bindings")]
fn extract_init<'py>(
    init: Option<&str>, concentration: Option<f64>, init_topic_word: Option<&Bound<'py, PyAny>>,
    init_doc_topic: Option<&Bound<'py, PyAny>>,
) -> PyResult<Init> {
    let init_str = init.unwrap_or("uniform").to_lowercase();

    let policy = match init_str.as_str() {
        "uniform" => Init::uniform(),
        "dirichlet" => Init::dirichlet(concentration.unwrap_or(1.0))?,
        "fixed" => {
            let p_any = init_topic_word.ok_or_else(|| {
                PyValueError::new_err("init_topic_word must be provided when init='fixed'")
            })?;
            let pi_any = init_doc_topic.ok_or_else(|| {
                PyValueError::new_err("init_doc_topic must be provided when init='fixed'")
            })?;
            Init::fixed(extract_f64_matrix(p_any)?, extract_f64_matrix(pi_any)?)?
        }
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid init policy {:?} (expected 'uniform', 'dirichlet', or 'fixed')",
                other
            )));
        }
    };

    Ok(policy)
}
