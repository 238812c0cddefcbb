//! mixture — mixture-of-multinomials topic model: corpus, parameters, estimator.
//!
//! Purpose
//! -------
//! Provide a cohesive topic-model layer that bundles the bag-of-words corpus,
//! model dimensions, parameter matrices, initialization policies and the EM
//! estimator under a single namespace. This is the main entry point of the
//! crate and the surface the Python bindings wrap.
//!
//! Key behaviors
//! -------------
//! - Collect data and configuration building blocks in [`core`]: [`Corpus`],
//!   [`MixShape`], [`MixParams`], [`Responsibilities`], [`Init`] and
//!   [`MixOptions`].
//! - Expose the estimator [`MixMulti`] in [`models`].
//! - Centralize model errors in [`errors`] (`MixError`, `MixResult`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Corpora are validated once at construction: word indices are in range,
//!   counts are positive integers, each word appears at most once per
//!   document.
//! - Degenerate zero probabilities are raised as
//!   [`MixError::DegenerateDistribution`], never masked.
//!
//! Conventions
//! -----------
//! - `P` is `K × V` (topic-word), `Pi` is `D × K` (document-topic); both are
//!   row-stochastic.
//! - Log-likelihoods are base 10.
//! - Indexing is 0-based throughout.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use multinomial_mixture::mixture::prelude::*;
//!
//! let corpus = Corpus::new(vec![vec![(0, 100), (1, 29)], vec![(2, 100), (4, 150)]], 5).unwrap();
//! let mut model = MixMulti::new(corpus, 2, 5, MixOptions::default().with_seed(1)).unwrap();
//! model.initialize().unwrap();
//! let outcome = model.run(30, 1e-3).unwrap();
//! assert!(outcome.loglik_history.len() <= 31);
//! ```

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{Corpus, Init, MixOptions, MixParams, MixShape, Responsibilities};
pub use self::errors::{MixError, MixResult};
pub use self::models::MixMulti;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use multinomial_mixture::mixture::prelude::*;
//
// to import the main topic-model surface in a single line.

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{MixError, MixResult};
    pub use super::models::prelude::*;
    pub use crate::optimization::em::prelude::*;
}
