//! Corpus — validated sparse bag-of-words documents.
//!
//! Purpose
//! -------
//! Hold the observed word counts of every document in a compact, immutable,
//! CSR-like layout so the E-step, M-step and likelihood can iterate over the
//! (document, word) pairs that actually occur and nothing else.
//!
//! Key behaviors
//! -------------
//! - Build from per-document `(word, count)` lists ([`Corpus::new`]), from a
//!   nested map keyed by document and word index ([`Corpus::from_map`]), or
//!   from a dense document-term matrix ([`Corpus::from_dense`]).
//! - Validate indices, counts and duplicates once, at construction time.
//! - Drop zero counts so downstream code never sees an absent word.
//! - Expose entries in a fixed order (documents ascending, then words
//!   ascending) that other per-entry tables, such as responsibilities, align to.
//!
//! Invariants & assumptions
//! ------------------------
//! - `nb_docs() > 0` and `nb_words() > 0`.
//! - Every stored word index is `< nb_words()`, every stored count is `> 0`.
//! - Within a document, word indices are strictly increasing.
//! - Documents may be empty; they contribute nothing to the E/M statistics.
//!
//! Conventions
//! -----------
//! - Documents are indexed contiguously from 0; the position of a document in
//!   the input is its index.
//! - Entry index `i` (0-based, in [`Corpus::entries`] order) identifies a
//!   present (document, word) pair.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each constructor's happy path, the ordering guarantee,
//!   and every rejection path (range, sign, integrality, duplicates,
//!   contiguity, emptiness).
use crate::mixture::errors::{MixError, MixResult};
use ndarray::ArrayView2;
use std::collections::BTreeMap;

// 2^64: the first float that no `u64` count can hold.
const MAX_DENSE_COUNT: f64 = 18_446_744_073_709_551_616.0;

/// Sparse, immutable bag-of-words corpus.
///
/// Fields
/// ------
/// - `doc_offsets`: `Vec<usize>`
///   `doc_offsets[d]..doc_offsets[d + 1]` is the entry range of document `d`;
///   length `nb_docs + 1`.
/// - `words`: `Vec<usize>`
///   Word index of every entry.
/// - `counts`: `Vec<u64>`
///   Strictly positive count of every entry.
/// - `nb_words`: `usize`
///   Vocabulary size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    doc_offsets: Vec<usize>,
    words: Vec<usize>,
    counts: Vec<u64>,
    nb_words: usize,
}

impl Corpus {
    /// Construct a corpus from per-document `(word, count)` lists.
    ///
    /// Parameters
    /// ----------
    /// - `documents`: `Vec<Vec<(usize, u64)>>`
    ///   `documents[d]` lists the words of document `d` in any order.
    /// - `nb_words`: `usize`
    ///   Vocabulary size; every word index must be below it.
    ///
    /// Returns
    /// -------
    /// `MixResult<Corpus>`
    ///   The validated corpus with zero counts dropped and words sorted.
    ///
    /// Errors
    /// ------
    /// - `MixError::EmptyCorpus` if `documents` is empty.
    /// - `MixError::EmptyVocabulary` if `nb_words == 0`.
    /// - `MixError::WordOutOfRange` if a word index is `>= nb_words`.
    /// - `MixError::DuplicateWord` if a document lists the same word twice.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use multinomial_mixture::mixture::core::corpus::Corpus;
    /// let corpus = Corpus::new(vec![vec![(1, 29), (0, 100)], vec![(2, 100)]], 5).unwrap();
    /// assert_eq!(corpus.nb_docs(), 2);
    /// assert_eq!(corpus.document(0).collect::<Vec<_>>(), vec![(0, 100), (1, 29)]);
    /// ```
    pub fn new(documents: Vec<Vec<(usize, u64)>>, nb_words: usize) -> MixResult<Self> {
        if documents.is_empty() {
            return Err(MixError::EmptyCorpus);
        }
        if nb_words == 0 {
            return Err(MixError::EmptyVocabulary);
        }

        let mut doc_offsets = Vec::with_capacity(documents.len() + 1);
        let mut words = Vec::new();
        let mut counts = Vec::new();
        doc_offsets.push(0);

        for (doc, mut entries) in documents.into_iter().enumerate() {
            entries.sort_unstable_by_key(|&(word, _)| word);
            let mut previous: Option<usize> = None;
            for (word, count) in entries {
                if word >= nb_words {
                    return Err(MixError::WordOutOfRange { doc, word, nb_words });
                }
                if previous == Some(word) {
                    return Err(MixError::DuplicateWord { doc, word });
                }
                previous = Some(word);
                if count > 0 {
                    words.push(word);
                    counts.push(count);
                }
            }
            doc_offsets.push(words.len());
        }

        Ok(Corpus { doc_offsets, words, counts, nb_words })
    }

    /// Construct a corpus from a nested map `doc -> (word -> count)`.
    ///
    /// Document keys must be exactly `0..map.len()`. Counts are signed so that
    /// negative values coming from loosely-typed callers can be reported.
    ///
    /// Errors
    /// ------
    /// - `MixError::DocumentOutOfRange` if the keys are not contiguous from 0.
    /// - `MixError::NegativeCount` for a negative count.
    /// - Any error of [`Corpus::new`].
    pub fn from_map(map: &BTreeMap<usize, BTreeMap<usize, i64>>, nb_words: usize) -> MixResult<Self> {
        let nb_docs = map.len();
        let mut documents = Vec::with_capacity(nb_docs);
        for (expected, (&doc, entries)) in map.iter().enumerate() {
            if doc != expected {
                return Err(MixError::DocumentOutOfRange { doc, nb_docs });
            }
            let mut document = Vec::with_capacity(entries.len());
            for (&word, &count) in entries {
                if count < 0 {
                    return Err(MixError::NegativeCount { doc, word, count });
                }
                document.push((word, count as u64));
            }
            documents.push(document);
        }
        Corpus::new(documents, nb_words)
    }

    /// Construct a corpus from a dense document-term matrix (`nb_docs × nb_words`).
    ///
    /// Errors
    /// ------
    /// - `MixError::NegativeCount` for a negative entry.
    /// - `MixError::NonIntegerCount` for a fractional, non-finite or
    ///   unrepresentable (`>= 2^64`) entry.
    /// - `MixError::EmptyCorpus` / `MixError::EmptyVocabulary` for an empty axis.
    pub fn from_dense(dtm: ArrayView2<f64>) -> MixResult<Self> {
        let (nb_docs, nb_words) = dtm.dim();
        if nb_docs == 0 {
            return Err(MixError::EmptyCorpus);
        }
        let mut documents = Vec::with_capacity(nb_docs);
        for (doc, row) in dtm.rows().into_iter().enumerate() {
            let mut document = Vec::new();
            for (word, &value) in row.iter().enumerate() {
                if !value.is_finite() || value.fract() != 0.0 || value >= MAX_DENSE_COUNT {
                    return Err(MixError::NonIntegerCount { doc, word, value });
                }
                if value < 0.0 {
                    return Err(MixError::NegativeCount { doc, word, count: value as i64 });
                }
                if value > 0.0 {
                    document.push((word, value as u64));
                }
            }
            documents.push(document);
        }
        Corpus::new(documents, nb_words)
    }

    /// Number of documents.
    pub fn nb_docs(&self) -> usize {
        self.doc_offsets.len() - 1
    }

    /// Vocabulary size.
    pub fn nb_words(&self) -> usize {
        self.nb_words
    }

    /// Number of present (document, word) pairs.
    pub fn nnz(&self) -> usize {
        self.words.len()
    }

    /// Sum of all counts, accumulated in `f64` so it cannot overflow.
    pub fn total_count(&self) -> f64 {
        self.counts.iter().map(|&c| c as f64).sum()
    }

    /// `(word, count)` pairs of document `doc`, by increasing word index.
    ///
    /// # Panics
    /// If `doc >= nb_docs()`.
    pub fn document(&self, doc: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        let range = self.range(doc);
        self.words[range.clone()].iter().copied().zip(self.counts[range].iter().copied())
    }

    /// All `(doc, word, count)` triples, documents ascending then words ascending.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        (0..self.nb_docs()).flat_map(move |doc| self.document(doc).map(move |(w, c)| (doc, w, c)))
    }

    /// Entry index of the pair `(doc, word)`, or `None` if the word does not
    /// occur in the document (or `doc` is out of range).
    pub fn position(&self, doc: usize, word: usize) -> Option<usize> {
        if doc >= self.nb_docs() {
            return None;
        }
        let range = self.range(doc);
        self.words[range.clone()].binary_search(&word).ok().map(|offset| range.start + offset)
    }

    fn range(&self, doc: usize) -> std::ops::Range<usize> {
        self.doc_offsets[doc]..self.doc_offsets[doc + 1]
    }
}
