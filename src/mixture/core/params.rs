//! MixParams — topic-word and document-topic probability matrices.
//!
//! Purpose
//! -------
//! Bundle the two parameter matrices of a mixture of multinomials so they are
//! always replaced together.
//!
//! Key behaviors
//! -------------
//! - `topic_word` (`P`, shape `K × V`): row `k` is the word distribution of
//!   topic `k`.
//! - `doc_topic` (`Pi`, shape `D × K`): row `d` is the topic distribution of
//!   document `d`.
//! - [`MixParams::max_row_sum_error`] reports how far either matrix is from
//!   being row-stochastic.
//!
//! Invariants & assumptions
//! ------------------------
//! - After initialization and after every M-step, non-zero rows sum to one.
//! - All-zero rows are permitted; they are a degenerate state that the E-step
//!   and the likelihood report when a present word depends on them.
use ndarray::{Array2, ArrayView2, Axis};

/// Parameter matrices of a mixture of multinomials.
#[derive(Debug, Clone, PartialEq)]
pub struct MixParams {
    pub topic_word: Array2<f64>,
    pub doc_topic: Array2<f64>,
}

impl MixParams {
    /// Bundle already-normalized matrices.
    pub fn new(topic_word: Array2<f64>, doc_topic: Array2<f64>) -> Self {
        Self { topic_word, doc_topic }
    }

    /// All-zero parameters of shape `K × V` and `D × K`.
    pub fn zeros(nb_topics: usize, nb_words: usize, nb_docs: usize) -> Self {
        Self {
            topic_word: Array2::zeros((nb_topics, nb_words)),
            doc_topic: Array2::zeros((nb_docs, nb_topics)),
        }
    }

    /// Largest `|row_sum - 1|` over all rows of both matrices.
    pub fn max_row_sum_error(&self) -> f64 {
        row_sum_error(self.topic_word.view()).max(row_sum_error(self.doc_topic.view()))
    }
}

fn row_sum_error(m: ArrayView2<f64>) -> f64 {
    m.sum_axis(Axis(1)).iter().fold(0.0_f64, |acc, s| acc.max((s - 1.0).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // `zeros` allocates `K × V` and `D × K` matrices.
    fn zeros_has_expected_shapes() {
        let params = MixParams::zeros(2, 5, 3);
        assert_eq!(params.topic_word.dim(), (2, 5));
        assert_eq!(params.doc_topic.dim(), (3, 2));
    }

    #[test]
    // Purpose
    // -------
    // The row-sum error is the worst deviation across both matrices.
    fn max_row_sum_error_reports_worst_row() {
        let params = MixParams::new(array![[0.5, 0.5], [0.2, 0.7]], array![[1.0, 0.0]]);
        assert_abs_diff_eq!(params.max_row_sum_error(), 0.1, epsilon = 1e-12);
    }
}
