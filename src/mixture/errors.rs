//! Errors for mixture-of-multinomials models (corpus validation, shape and
//! initialization checks, degenerate probabilities, and lifecycle misuse).
//!
//! This module defines the model error type [`MixError`] used across the Rust
//! API and, behind the `python-bindings` feature, converted to `PyErr` for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based**: documents `0..nb_docs`, words `0..nb_words`,
//!   topics `0..nb_topics`.
//! - Word counts are non-negative integers; zero counts are dropped silently,
//!   negative or fractional counts are rejected.
//! - Zero probabilities that make the E-step posterior or the likelihood
//!   undefined are **raised** as [`MixError::DegenerateDistribution`]; they are
//!   never replaced by NaN or masked.
//! - Failures from the EM driver and the normalization primitive arrive as
//!   [`OptError`] and are flattened back into [`MixError`] via `From`.
use crate::optimization::errors::OptError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for mixture-model operations.
pub type MixResult<T> = Result<T, MixError>;

/// Unified error type for mixture-of-multinomials modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum MixError {
    // ---- Corpus validation ----
    /// The corpus has no documents.
    EmptyCorpus,

    /// The vocabulary size is zero.
    EmptyVocabulary,

    /// A word index is outside `[0, nb_words)`.
    WordOutOfRange { doc: usize, word: usize, nb_words: usize },

    /// A document index is outside `[0, nb_docs)` (document keys must be contiguous from 0).
    DocumentOutOfRange { doc: usize, nb_docs: usize },

    /// A word count is negative.
    NegativeCount { doc: usize, word: usize, count: i64 },

    /// A word count is fractional or not finite.
    NonIntegerCount { doc: usize, word: usize, value: f64 },

    /// The same word appears twice in one document.
    DuplicateWord { doc: usize, word: usize },

    /// Corpus vocabulary does not match the model vocabulary.
    VocabularyMismatch { expected: usize, actual: usize },

    // ---- Shape / initialization ----
    /// Number of topics must be > 0.
    InvalidTopicCount { nb_topics: usize },

    /// Normalization input is neither a vector nor a matrix.
    InvalidShape { ndim: usize },

    /// Dirichlet concentration must be finite and > 0.
    InvalidInitConcentration { value: f64 },

    /// An initialization policy cannot be applied to this model.
    InvalidInit { reason: &'static str },

    /// A fixed initial matrix has the wrong shape.
    InitShapeMismatch { name: &'static str, expected: (usize, usize), actual: (usize, usize) },

    /// A fixed initial matrix has a negative or non-finite entry.
    InvalidInitValue { name: &'static str, row: usize, col: usize, value: f64 },

    /// A topic index is outside `[0, nb_topics)`.
    InvalidTopic { topic: usize, nb_topics: usize },

    // ---- Degenerate probabilities ----
    /// `Pi[doc, :] · P[:, word]` is zero or not finite for a present pair.
    DegenerateDistribution { doc: usize, word: usize, value: f64 },

    /// A probability vector summed to zero or a non-finite value.
    DegenerateVector { sum: f64 },

    // ---- Options ----
    /// Convergence threshold must be finite.
    InvalidDelta { value: f64, reason: &'static str },

    // ---- Lifecycle ----
    /// `initialize` has not been called yet.
    ModelNotInitialized,

    /// No EM run has completed yet.
    ModelNotFitted,
}

impl std::error::Error for MixError {}

impl std::fmt::Display for MixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Corpus validation ----
            MixError::EmptyCorpus => {
                write!(f, "Corpus has no documents.")
            }
            MixError::EmptyVocabulary => {
                write!(f, "Vocabulary size must be > 0.")
            }
            MixError::WordOutOfRange { doc, word, nb_words } => {
                write!(f, "Document {doc} uses word {word}, outside the vocabulary [0, {nb_words}).")
            }
            MixError::DocumentOutOfRange { doc, nb_docs } => {
                write!(
                    f,
                    "Document index {doc} is outside [0, {nb_docs}); document indices must be contiguous from 0."
                )
            }
            MixError::NegativeCount { doc, word, count } => {
                write!(f, "Count of word {word} in document {doc} is negative: {count}")
            }
            MixError::NonIntegerCount { doc, word, value } => {
                write!(
                    f,
                    "Count of word {word} in document {doc} must be a non-negative integer; got: {value}"
                )
            }
            MixError::DuplicateWord { doc, word } => {
                write!(f, "Word {word} appears more than once in document {doc}.")
            }
            MixError::VocabularyMismatch { expected, actual } => {
                write!(f, "Vocabulary size mismatch: model expects {expected}, corpus has {actual}")
            }
            // ---- Shape / initialization ----
            MixError::InvalidTopicCount { nb_topics } => {
                write!(f, "Number of topics must be > 0; got: {nb_topics}")
            }
            MixError::InvalidShape { ndim } => {
                write!(f, "Normalization expects a vector or a matrix; got an array of rank {ndim}")
            }
            MixError::InvalidInitConcentration { value } => {
                write!(f, "Dirichlet concentration must be finite and > 0; got: {value}")
            }
            MixError::InvalidInit { reason } => {
                write!(f, "Invalid initialization: {reason}")
            }
            MixError::InitShapeMismatch { name, expected, actual } => {
                write!(f, "Initial {name} has shape {actual:?}; expected {expected:?}")
            }
            MixError::InvalidInitValue { name, row, col, value } => {
                write!(
                    f,
                    "Initial {name} entry ({row}, {col}) must be finite and >= 0; got: {value}"
                )
            }
            MixError::InvalidTopic { topic, nb_topics } => {
                write!(f, "Topic index {topic} is outside [0, {nb_topics}).")
            }
            // ---- Degenerate probabilities ----
            MixError::DegenerateDistribution { doc, word, value } => {
                write!(
                    f,
                    "Degenerate distribution for word {word} in document {doc}: mixture probability is {value}"
                )
            }
            MixError::DegenerateVector { sum } => {
                write!(f, "Cannot normalize a vector whose elements sum to {sum}")
            }
            // ---- Options ----
            MixError::InvalidDelta { value, reason } => {
                write!(f, "Invalid convergence threshold {value}: {reason}")
            }
            // ---- Lifecycle ----
            MixError::ModelNotInitialized => {
                write!(f, "Model hasn't been initialized yet.")
            }
            MixError::ModelNotFitted => {
                write!(f, "Model hasn't been fitted yet.")
            }
        }
    }
}

/// Convert a [`MixError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<MixError> for PyErr {
    fn from(err: MixError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<OptError> for MixError {
    fn from(err: OptError) -> MixError {
        match err {
            OptError::InvalidShape { ndim } => MixError::InvalidShape { ndim },
            OptError::DegenerateVector { sum } => MixError::DegenerateVector { sum },
            OptError::InvalidDelta { value, reason } => MixError::InvalidDelta { value, reason },
            OptError::Model { source } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The `OptError -> MixError` mapping, including unwrapping of model causes.
    // - `Display` output for the variants callers are most likely to see.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Wrapped model errors come back unchanged when flattened.
    fn from_opt_error_unwraps_model_cause() {
        let cause = MixError::DegenerateDistribution { doc: 1, word: 4, value: 0.0 };
        let wrapped = OptError::Model { source: cause.clone() };

        assert_eq!(MixError::from(wrapped), cause);
    }

    #[test]
    // Purpose
    // -------
    // Driver-level variants map to their model-level counterparts.
    fn from_opt_error_maps_driver_variants() {
        assert_eq!(
            MixError::from(OptError::InvalidShape { ndim: 3 }),
            MixError::InvalidShape { ndim: 3 }
        );
        assert_eq!(
            MixError::from(OptError::DegenerateVector { sum: 0.0 }),
            MixError::DegenerateVector { sum: 0.0 }
        );
        assert!(matches!(
            MixError::from(OptError::InvalidDelta { value: f64::NAN, reason: "x" }),
            MixError::InvalidDelta { .. }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Messages carry the indices needed to locate the problem.
    fn display_includes_indices() {
        let msg = MixError::WordOutOfRange { doc: 2, word: 9, nb_words: 5 }.to_string();
        assert!(msg.contains("Document 2"));
        assert!(msg.contains("word 9"));
        assert!(msg.contains("[0, 5)"));

        let msg = MixError::DegenerateDistribution { doc: 0, word: 3, value: 0.0 }.to_string();
        assert!(msg.contains("word 3"));
        assert!(msg.contains("document 0"));
    }
}
