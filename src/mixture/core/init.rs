//! Init — starting-point policies for the EM parameters.
//!
//! Purpose
//! -------
//! Decide how the topic-word matrix `P` (`K × V`) and the document-topic
//! matrix `Pi` (`D × K`) are filled before the first E-step.
//!
//! Key behaviors
//! -------------
//! - [`Init::Uniform`]: every entry drawn from `Uniform[0, 1)`, then each row
//!   normalized.
//! - [`Init::Dirichlet`]: every row drawn from a symmetric Dirichlet with the
//!   given concentration.
//! - [`Init::Fixed`]: caller-supplied matrices (warm start), shape-checked and
//!   row-normalized.
//!
//! Invariants & assumptions
//! ------------------------
//! - Random policies draw `P` first, row by row, then `Pi`, from the RNG they
//!   are handed, so a seeded RNG reproduces the same parameters.
//! - Every returned matrix is row-normalized; a fixed matrix with an all-zero
//!   row keeps that row at zero.
//!
//! Downstream usage
//! ----------------
//! - `MixMulti::initialize` builds a `StdRng` from the configured seed and
//!   calls [`Init::draw_params`].
use crate::{
    mixture::{
        core::{params::MixParams, shape::MixShape},
        errors::{MixError, MixResult},
    },
    optimization::numerical_stability::normalize::normalize_rows,
};
use ndarray::Array2;
use rand::Rng;
use rand_distr::{Dirichlet, Distribution};

/// Initialization policy for the EM parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Init {
    /// Independent `Uniform[0, 1)` entries, row-normalized.
    Uniform,
    /// Rows drawn from `Dirichlet(concentration, ..., concentration)`.
    Dirichlet { concentration: f64 },
    /// Caller-supplied starting matrices.
    Fixed { topic_word: Array2<f64>, doc_topic: Array2<f64> },
}

impl Default for Init {
    fn default() -> Self {
        Init::Uniform
    }
}

impl Init {
    pub fn uniform() -> Self {
        Init::Uniform
    }

    /// Symmetric Dirichlet initialization.
    ///
    /// # Errors
    /// [`MixError::InvalidInitConcentration`] unless `concentration` is finite
    /// and strictly positive.
    pub fn dirichlet(concentration: f64) -> MixResult<Self> {
        if !concentration.is_finite() || concentration <= 0.0 {
            return Err(MixError::InvalidInitConcentration { value: concentration });
        }
        Ok(Init::Dirichlet { concentration })
    }

    /// Warm start from explicit matrices.
    ///
    /// Shapes are checked against the model in [`Init::draw_params`]; here only
    /// the entries are validated.
    ///
    /// # Errors
    /// [`MixError::InvalidInitValue`] for a negative or non-finite entry.
    pub fn fixed(topic_word: Array2<f64>, doc_topic: Array2<f64>) -> MixResult<Self> {
        check_entries("topic_word", &topic_word)?;
        check_entries("doc_topic", &doc_topic)?;
        Ok(Init::Fixed { topic_word, doc_topic })
    }

    /// Produce row-normalized starting parameters.
    ///
    /// Parameters
    /// ----------
    /// - `rng`: source of randomness; unused by [`Init::Fixed`].
    /// - `shape`: model dimensions `K` and `V`.
    /// - `nb_docs`: number of documents `D`.
    ///
    /// Errors
    /// ------
    /// - [`MixError::InvalidInit`] for a Dirichlet draw over fewer than two
    ///   categories (one topic or a one-word vocabulary).
    /// - [`MixError::InitShapeMismatch`] when fixed matrices do not match
    ///   `K × V` and `D × K`.
    pub fn draw_params<R: Rng + ?Sized>(
        &self, rng: &mut R, shape: &MixShape, nb_docs: usize,
    ) -> MixResult<MixParams> {
        let (k, v) = (shape.nb_topics, shape.nb_words);
        let (topic_word, doc_topic) = match self {
            Init::Uniform => {
                let p = Array2::from_shape_simple_fn((k, v), || rng.gen::<f64>());
                let pi = Array2::from_shape_simple_fn((nb_docs, k), || rng.gen::<f64>());
                (p, pi)
            }
            Init::Dirichlet { concentration } => {
                let p = dirichlet_rows(rng, k, v, *concentration)?;
                let pi = dirichlet_rows(rng, nb_docs, k, *concentration)?;
                (p, pi)
            }
            Init::Fixed { topic_word, doc_topic } => {
                check_shape("topic_word", topic_word, (k, v))?;
                check_shape("doc_topic", doc_topic, (nb_docs, k))?;
                (topic_word.clone(), doc_topic.clone())
            }
        };

        Ok(MixParams::new(normalize_rows(topic_word.view()), normalize_rows(doc_topic.view())))
    }
}

fn dirichlet_rows<R: Rng + ?Sized>(
    rng: &mut R, rows: usize, cols: usize, concentration: f64,
) -> MixResult<Array2<f64>> {
    if cols < 2 {
        return Err(MixError::InvalidInit {
            reason: "Dirichlet initialization needs at least two categories per row.",
        });
    }
    let alpha = vec![concentration; cols];
    let dist = Dirichlet::new(&alpha)
        .map_err(|_| MixError::InvalidInitConcentration { value: concentration })?;

    let mut out = Array2::zeros((rows, cols));
    for mut row in out.rows_mut() {
        let draw: Vec<f64> = dist.sample(rng);
        for (dst, src) in row.iter_mut().zip(draw) {
            *dst = src;
        }
    }
    Ok(out)
}

fn check_shape(name: &'static str, m: &Array2<f64>, expected: (usize, usize)) -> MixResult<()> {
    if m.dim() != expected {
        return Err(MixError::InitShapeMismatch { name, expected, actual: m.dim() });
    }
    Ok(())
}

fn check_entries(name: &'static str, m: &Array2<f64>) -> MixResult<()> {
    for ((row, col), &value) in m.indexed_iter() {
        if !value.is_finite() || value < 0.0 {
            return Err(MixError::InvalidInitValue { name, row, col, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Axis};
    use rand::{rngs::StdRng, SeedableRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Row-stochastic output of the random policies.
    // - Reproducibility under a fixed seed.
    // - Validation of Dirichlet concentrations and fixed matrices.
    // -------------------------------------------------------------------------

    fn assert_rows_sum_to_one(m: &Array2<f64>) {
        for s in m.sum_axis(Axis(1)).iter() {
            assert_abs_diff_eq!(*s, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Uniform draws have the right shapes and rows summing to one.
    fn uniform_draw_is_row_stochastic() {
        let shape = MixShape::new(2, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let params = Init::Uniform.draw_params(&mut rng, &shape, 3).unwrap();

        assert_eq!(params.topic_word.dim(), (2, 5));
        assert_eq!(params.doc_topic.dim(), (3, 2));
        assert_rows_sum_to_one(&params.topic_word);
        assert_rows_sum_to_one(&params.doc_topic);
        assert!(params.topic_word.iter().all(|&x| x >= 0.0));
    }

    #[test]
    // Purpose
    // -------
    // The same seed yields identical parameters; a different seed does not.
    fn seeded_draws_are_reproducible() {
        let shape = MixShape::new(3, 4).unwrap();
        let a = Init::Uniform.draw_params(&mut StdRng::seed_from_u64(42), &shape, 2).unwrap();
        let b = Init::Uniform.draw_params(&mut StdRng::seed_from_u64(42), &shape, 2).unwrap();
        let c = Init::Uniform.draw_params(&mut StdRng::seed_from_u64(43), &shape, 2).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    // Purpose
    // -------
    // Dirichlet draws are row-stochastic.
    fn dirichlet_draw_is_row_stochastic() {
        let shape = MixShape::new(2, 5).unwrap();
        let init = Init::dirichlet(1.0).unwrap();

        let params = init.draw_params(&mut StdRng::seed_from_u64(1), &shape, 4).unwrap();

        assert_rows_sum_to_one(&params.topic_word);
        assert_rows_sum_to_one(&params.doc_topic);
    }

    #[test]
    // Purpose
    // -------
    // Invalid concentrations and single-topic Dirichlet draws are rejected.
    fn dirichlet_rejects_invalid_settings() {
        assert!(matches!(Init::dirichlet(0.0), Err(MixError::InvalidInitConcentration { .. })));
        assert!(matches!(Init::dirichlet(f64::NAN), Err(MixError::InvalidInitConcentration { .. })));

        let shape = MixShape::new(1, 5).unwrap();
        let err = Init::dirichlet(1.0)
            .unwrap()
            .draw_params(&mut StdRng::seed_from_u64(1), &shape, 2)
            .unwrap_err();
        assert!(matches!(err, MixError::InvalidInit { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Fixed matrices are normalized row-wise and zero rows stay zero.
    //
    // Given
    // -----
    // - `P = [[1, 3], [0, 0]]`, `Pi = [[2, 2]]`.
    //
    // Expect
    // ------
    // - `P = [[0.25, 0.75], [0, 0]]`, `Pi = [[0.5, 0.5]]`.
    fn fixed_draw_normalizes_and_keeps_zero_rows() {
        let shape = MixShape::new(2, 2).unwrap();
        let init = Init::fixed(array![[1.0, 3.0], [0.0, 0.0]], array![[2.0, 2.0]]).unwrap();

        let params = init.draw_params(&mut StdRng::seed_from_u64(0), &shape, 1).unwrap();

        assert_abs_diff_eq!(params.topic_word, array![[0.25, 0.75], [0.0, 0.0]], epsilon = 1e-12);
        assert_abs_diff_eq!(params.doc_topic, array![[0.5, 0.5]], epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Fixed matrices are validated for entries and shape.
    fn fixed_rejects_bad_entries_and_shapes() {
        let err = Init::fixed(array![[1.0, -1.0]], array![[1.0]]).unwrap_err();
        assert_eq!(err, MixError::InvalidInitValue { name: "topic_word", row: 0, col: 1, value: -1.0 });

        let shape = MixShape::new(2, 3).unwrap();
        let init = Init::fixed(array![[1.0, 1.0, 1.0]], array![[1.0, 1.0]]).unwrap();
        let err = init.draw_params(&mut StdRng::seed_from_u64(0), &shape, 1).unwrap_err();
        assert_eq!(
            err,
            MixError::InitShapeMismatch { name: "topic_word", expected: (2, 3), actual: (1, 3) }
        );
    }
}
