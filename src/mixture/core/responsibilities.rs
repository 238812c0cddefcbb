//! Posterior topic responsibilities for every present (document, word) pair.
//!
//! Row `i` of the table belongs to entry `i` of
//! [`Corpus::entries`](crate::mixture::core::corpus::Corpus::entries) and holds
//! `p(topic | doc, word)` for all `K` topics. Pairs absent from the corpus have
//! no row, so the table never stores undefined posteriors.
use ndarray::{Array2, ArrayView1, ArrayView2};

/// Dense `nnz × K` responsibility table aligned to corpus entry order.
#[derive(Debug, Clone, PartialEq)]
pub struct Responsibilities {
    values: Array2<f64>,
}

impl Responsibilities {
    /// All-zero table, the state before the first E-step.
    pub fn zeros(nnz: usize, nb_topics: usize) -> Self {
        Self { values: Array2::zeros((nnz, nb_topics)) }
    }

    /// Wrap an already-computed table.
    pub fn from_values(values: Array2<f64>) -> Self {
        Self { values }
    }

    /// Posterior over topics for entry `entry`.
    ///
    /// # Panics
    /// If `entry` is out of range.
    pub fn row(&self, entry: usize) -> ArrayView1<'_, f64> {
        self.values.row(entry)
    }

    /// The whole table.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }
}
