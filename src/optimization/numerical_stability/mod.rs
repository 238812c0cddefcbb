//! numerical_stability — normalization helpers for probability tables.
//!
//! Purpose
//! -------
//! Collect the small numerical primitives the EM estimator relies on to keep
//! its parameter tables valid probability distributions. Everything here is
//! pure: no logging, no I/O, no global state.
//!
//! Key behaviors
//! -------------
//! - Row-normalize topic-word and document-topic matrices
//!   ([`normalize_rows`]), leaving all-zero rows unchanged.
//! - Normalize posterior vectors ([`normalize_vector`]) and report zero totals
//!   explicitly rather than producing NaN.
//! - Offer a rank-dispatching entry point ([`normalize`]) for callers holding
//!   dynamically-shaped arrays.
//!
//! Conventions
//! -----------
//! - All routines operate on `ndarray` views and return owned arrays.
//! - Degenerate inputs surface as [`OptError`](crate::optimization::errors::OptError)
//!   variants; higher layers map them to model errors with document/word context.

pub mod normalize;

pub use self::normalize::{normalize, normalize_rows, normalize_vector};

pub mod prelude {
    pub use super::normalize::{normalize, normalize_rows, normalize_vector};
}
