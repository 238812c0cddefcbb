//! Mixture of multinomials: EM estimator for mixture-of-multinomials topic models.
//!
//! Each document `d` mixes `K` topics with weights `Pi[d, :]`, and every word
//! occurrence is drawn by first picking a topic `k ~ Pi[d, :]` and then a word
//! `w ~ P[k, :]`. [`MixMulti`] owns the corpus, the parameters `(P, Pi)` and the
//! per-entry responsibility cache, and exposes the three EM building blocks:
//!
//! - [`MixMulti::e_step`]: `rsp(d, w) ∝ Pi[d, :] ⊙ P[:, w]` for every present pair.
//! - [`MixMulti::m_step`]: closed-form re-estimation from responsibility-weighted
//!   counts, followed by row normalization.
//! - [`MixMulti::log_likelihood`]: `Σ c(d, w) · log10(Pi[d, :] · P[:, w])`.
//!
//! The convergence loop itself lives in
//! [`run_em`](crate::optimization::em::run_em); this type implements
//! [`ExpectationMaximization`] so it plugs straight into it.
//!
//! Every step computes into fresh buffers and commits only on success, so a
//! failing step (degenerate zero probability) leaves the previous state intact.
use crate::{
    mixture::{
        core::{
            corpus::Corpus,
            options::MixOptions,
            params::MixParams,
            responsibilities::Responsibilities,
            shape::MixShape,
        },
        errors::{MixError, MixResult},
    },
    optimization::{
        em::{
            observer::{EMObserver, LogObserver, NoopObserver},
            run::run_em,
            traits::{EMOptions, EMOutcome, ExpectationMaximization},
        },
        errors::OptResult,
        numerical_stability::normalize::{normalize_rows, normalize_vector},
    },
};
use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// EM estimator for a mixture of multinomials.
///
/// Lifecycle: [`MixMulti::new`] → [`MixMulti::initialize`] (or
/// [`MixMulti::initialize_with_rng`]) → any sequence of `e_step` / `m_step` /
/// `log_likelihood`, or [`MixMulti::run`] / [`MixMulti::fit`]. The step methods
/// fail with [`MixError::ModelNotInitialized`] before initialization.
///
/// The corpus and the dimensions are fixed at construction and only readable
/// afterwards:
///
/// ```compile_fail
/// use multinomial_mixture::mixture::prelude::*;
///
/// let corpus = Corpus::new(vec![vec![(0, 1)]], 2).unwrap();
/// let mut model = MixMulti::new(corpus, 2, 2, MixOptions::default()).unwrap();
/// model.shape.nb_topics = 3;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MixMulti {
    /// Initialization policy, EM options and seed.
    pub options: MixOptions,
    /// Outcome of the last completed EM run.
    pub results: Option<EMOutcome>,
    corpus: Corpus,
    shape: MixShape,
    params: MixParams,
    rsp: Responsibilities,
    initialized: bool,
}

impl MixMulti {
    /// Construct an uninitialized estimator.
    ///
    /// # Arguments
    /// - `corpus`: validated corpus; its vocabulary must equal `nb_words`.
    /// - `nb_topics`: number of topics `K > 0`.
    /// - `nb_words`: vocabulary size `V > 0`.
    /// - `options`: initialization policy, EM options and seed.
    ///
    /// # Errors
    /// - [`MixError::InvalidTopicCount`] / [`MixError::EmptyVocabulary`] from
    ///   [`MixShape::new`].
    /// - [`MixError::VocabularyMismatch`] if `corpus.nb_words() != nb_words`.
    pub fn new(
        corpus: Corpus, nb_topics: usize, nb_words: usize, options: MixOptions,
    ) -> MixResult<MixMulti> {
        let shape = MixShape::new(nb_topics, nb_words)?;
        if corpus.nb_words() != nb_words {
            return Err(MixError::VocabularyMismatch {
                expected: nb_words,
                actual: corpus.nb_words(),
            });
        }
        let params = MixParams::zeros(nb_topics, nb_words, corpus.nb_docs());
        let rsp = Responsibilities::zeros(corpus.nnz(), nb_topics);
        Ok(MixMulti { corpus, shape, options, results: None, params, rsp, initialized: false })
    }

    /// Initialize `P`, `Pi` and the responsibility table using the configured
    /// seed, or OS entropy when no seed is set.
    pub fn initialize(&mut self) -> MixResult<()> {
        let mut rng = match self.options.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.initialize_with_rng(&mut rng)
    }

    /// Initialize from an explicit random generator.
    ///
    /// Resets the responsibilities to zero and clears previous results.
    pub fn initialize_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MixResult<()> {
        let params = self.options.init.draw_params(rng, &self.shape, self.corpus.nb_docs())?;
        self.params = params;
        self.rsp = Responsibilities::zeros(self.corpus.nnz(), self.shape.nb_topics);
        self.results = None;
        self.initialized = true;
        Ok(())
    }

    /// E-step: recompute the topic posterior of every present (document, word) pair.
    ///
    /// # Errors
    /// - [`MixError::ModelNotInitialized`] before initialization.
    /// - [`MixError::DegenerateDistribution`] when `Pi[d, :] · P[:, w]` is zero or
    ///   not finite for some present pair; the previous responsibilities are kept.
    pub fn e_step(&mut self) -> MixResult<()> {
        self.ensure_initialized()?;
        let p = self.params.topic_word.view();
        let pi = self.params.doc_topic.view();

        let mut values = Array2::<f64>::zeros((self.corpus.nnz(), self.shape.nb_topics));
        for ((doc, word, _), mut row) in self.corpus.entries().zip(values.rows_mut()) {
            let joint = &pi.row(doc) * &p.column(word);
            let posterior = normalize_vector(joint.view())
                .map_err(|_| MixError::DegenerateDistribution { doc, word, value: joint.sum() })?;
            row.assign(&posterior);
        }

        self.rsp = Responsibilities::from_values(values);
        Ok(())
    }

    /// M-step: re-estimate `P` and `Pi` from the responsibility-weighted counts.
    ///
    /// `Pi[d, :] ∝ Σ_w c(d, w) rsp(d, w)` and `P[:, w] ∝ Σ_d c(d, w) rsp(d, w)`;
    /// both matrices are row-normalized, and rows without any weight (empty
    /// documents, unused topics) stay all-zero.
    ///
    /// # Errors
    /// - [`MixError::ModelNotInitialized`] before initialization.
    pub fn m_step(&mut self) -> MixResult<()> {
        self.ensure_initialized()?;
        let (k, v) = (self.shape.nb_topics, self.shape.nb_words);

        let mut doc_acc = Array2::<f64>::zeros((self.corpus.nb_docs(), k));
        let mut word_acc = Array2::<f64>::zeros((k, v));
        for (entry, (doc, word, count)) in self.corpus.entries().enumerate() {
            let weight = count as f64;
            let rsp_row = self.rsp.row(entry);
            doc_acc.row_mut(doc).scaled_add(weight, &rsp_row);
            word_acc.column_mut(word).scaled_add(weight, &rsp_row);
        }

        self.params = MixParams::new(normalize_rows(word_acc.view()), normalize_rows(doc_acc.view()));
        Ok(())
    }

    /// Base-10 log-likelihood of the corpus under the current parameters.
    ///
    /// # Errors
    /// - [`MixError::ModelNotInitialized`] before initialization.
    /// - [`MixError::DegenerateDistribution`] when `Pi[d, :] · P[:, w]` is zero or
    ///   not finite for some present pair.
    pub fn log_likelihood(&self) -> MixResult<f64> {
        self.ensure_initialized()?;
        let p = self.params.topic_word.view();
        let pi = self.params.doc_topic.view();

        let mut ll = 0.0;
        for (doc, word, count) in self.corpus.entries() {
            let prob = pi.row(doc).dot(&p.column(word));
            if prob <= 0.0 || !prob.is_finite() {
                return Err(MixError::DegenerateDistribution { doc, word, value: prob });
            }
            ll += count as f64 * prob.log10();
        }
        Ok(ll)
    }

    /// Run EM for at most `max_iter` iterations, stopping early once
    /// `ll[last] - ll[last - 1] < delta`.
    ///
    /// # Errors
    /// - [`MixError::InvalidDelta`] if `delta` is not finite.
    /// - [`MixError::ModelNotInitialized`] before initialization.
    /// - Any step error; parameters keep their last completed state.
    pub fn run(&mut self, max_iter: usize, delta: f64) -> MixResult<&EMOutcome> {
        let opts = EMOptions::new(max_iter, delta)?.with_verbose(self.options.em_opts.verbose);
        self.run_with_options(&opts)
    }

    /// Run EM reporting progress to a caller-supplied observer.
    pub fn run_observed<O: EMObserver + ?Sized>(
        &mut self, opts: &EMOptions, observer: &mut O,
    ) -> MixResult<&EMOutcome> {
        self.ensure_initialized()?;
        self.results = None;
        let outcome = run_em(&mut *self, opts, observer)?;
        Ok(self.results.insert(outcome))
    }

    /// Initialize when needed, then run EM with the configured options.
    pub fn fit(&mut self) -> MixResult<&EMOutcome> {
        if !self.initialized {
            self.initialize()?;
        }
        let opts = self.options.em_opts;
        self.run_with_options(&opts)
    }

    /// Observed word counts.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Number of topics and vocabulary size.
    pub fn shape(&self) -> &MixShape {
        &self.shape
    }

    /// Topic-word matrix `P` (`K × V`).
    pub fn topic_word(&self) -> ArrayView2<'_, f64> {
        self.params.topic_word.view()
    }

    /// Document-topic matrix `Pi` (`D × K`).
    pub fn doc_topic(&self) -> ArrayView2<'_, f64> {
        self.params.doc_topic.view()
    }

    /// Current parameter pair.
    pub fn params(&self) -> &MixParams {
        &self.params
    }

    /// Responsibility table aligned with [`Corpus::entries`].
    pub fn responsibilities(&self) -> &Responsibilities {
        &self.rsp
    }

    /// Topic posterior of `(doc, word)`, or `None` when the pair is absent.
    pub fn responsibility(&self, doc: usize, word: usize) -> Option<ArrayView1<'_, f64>> {
        self.corpus.position(doc, word).map(|entry| self.rsp.row(entry))
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Outcome of the last completed run.
    ///
    /// # Errors
    /// [`MixError::ModelNotFitted`] if no run has completed.
    pub fn results(&self) -> MixResult<&EMOutcome> {
        self.results.as_ref().ok_or(MixError::ModelNotFitted)
    }

    /// Most probable topic of every document (`argmax Pi[d, :]`, lowest index on ties).
    pub fn dominant_topics(&self) -> MixResult<Vec<usize>> {
        self.ensure_initialized()?;
        Ok(self.params.doc_topic.rows().into_iter().map(argmax).collect())
    }

    /// The `n` most probable words of `topic`, as `(word, probability)` pairs in
    /// decreasing probability (ties by increasing word index).
    ///
    /// # Errors
    /// - [`MixError::ModelNotInitialized`] before initialization.
    /// - [`MixError::InvalidTopic`] for `topic >= nb_topics`.
    pub fn top_words(&self, topic: usize, n: usize) -> MixResult<Vec<(usize, f64)>> {
        self.ensure_initialized()?;
        self.shape.check_topic(topic)?;
        let mut words: Vec<(usize, f64)> =
            self.params.topic_word.row(topic).iter().copied().enumerate().collect();
        words.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        words.truncate(n);
        Ok(words)
    }

    /// Per-word perplexity `10^(-ll / total_count)`.
    pub fn perplexity(&self) -> MixResult<f64> {
        let ll = self.log_likelihood()?;
        let total = self.corpus.total_count();
        if total == 0.0 {
            return Ok(1.0);
        }
        Ok(10f64.powf(-ll / total))
    }

    fn run_with_options(&mut self, opts: &EMOptions) -> MixResult<&EMOutcome> {
        if opts.verbose {
            self.run_observed(opts, &mut LogObserver)
        } else {
            self.run_observed(opts, &mut NoopObserver)
        }
    }

    fn ensure_initialized(&self) -> MixResult<()> {
        if !self.initialized {
            return Err(MixError::ModelNotInitialized);
        }
        Ok(())
    }
}

impl ExpectationMaximization for MixMulti {
    fn expectation(&mut self) -> OptResult<()> {
        Ok(self.e_step()?)
    }

    fn maximization(&mut self) -> OptResult<()> {
        Ok(self.m_step()?)
    }

    fn objective(&self) -> OptResult<f64> {
        Ok(self.log_likelihood()?)
    }

    fn label(&self) -> String {
        format!(
            "MM with {} documents and {} topics",
            self.corpus.nb_docs(),
            self.shape.nb_topics
        )
    }
}

fn argmax(row: ArrayView1<f64>) -> usize {
    let mut best = 0;
    for (idx, &value) in row.iter().enumerate() {
        if value > row[best] {
            best = idx;
        }
    }
    best
}
