//! Estimator configuration.
use crate::{
    mixture::core::init::Init,
    optimization::em::traits::EMOptions,
};

/// Configuration of a `MixMulti` estimator.
///
/// - `init`: how `P` and `Pi` are filled before the first E-step.
/// - `em_opts`: iteration cap, convergence threshold and verbosity used by
///   `fit`.
/// - `random_seed`: `Some(seed)` makes random initialization reproducible;
///   `None` seeds from OS entropy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MixOptions {
    pub init: Init,
    pub em_opts: EMOptions,
    pub random_seed: Option<u64>,
}

impl MixOptions {
    pub fn new(init: Init, em_opts: EMOptions, random_seed: Option<u64>) -> Self {
        Self { init, em_opts, random_seed }
    }

    /// Return a copy with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }
}
