//! Model dimensions for a mixture of multinomials.
use crate::mixture::errors::{MixError, MixResult};

/// Number of topics `K` and vocabulary size `V` of a model.
///
/// Both are strictly positive; [`MixShape::new`] is the only constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixShape {
    pub nb_topics: usize,
    pub nb_words: usize,
}

impl MixShape {
    /// Validate and build a shape.
    ///
    /// # Errors
    /// - [`MixError::InvalidTopicCount`] if `nb_topics == 0`.
    /// - [`MixError::EmptyVocabulary`] if `nb_words == 0`.
    pub fn new(nb_topics: usize, nb_words: usize) -> MixResult<Self> {
        if nb_topics == 0 {
            return Err(MixError::InvalidTopicCount { nb_topics });
        }
        if nb_words == 0 {
            return Err(MixError::EmptyVocabulary);
        }
        Ok(Self { nb_topics, nb_words })
    }

    /// Check that `topic` is a valid topic index.
    pub fn check_topic(&self, topic: usize) -> MixResult<()> {
        if topic >= self.nb_topics {
            return Err(MixError::InvalidTopic { topic, nb_topics: self.nb_topics });
        }
        Ok(())
    }
}
