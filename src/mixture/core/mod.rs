//! core — data, dimensions, parameters and configuration of the mixture model.
//!
//! Submodules:
//! - [`corpus`]: validated sparse bag-of-words corpus.
//! - [`shape`]: number of topics and vocabulary size.
//! - [`params`]: `P` (topic-word) and `Pi` (document-topic) matrices.
//! - [`responsibilities`]: per-entry topic posteriors.
//! - [`init`]: initialization policies.
//! - [`options`]: estimator configuration.

pub mod corpus;
pub mod init;
pub mod options;
pub mod params;
pub mod responsibilities;
pub mod shape;

pub use self::corpus::Corpus;
pub use self::init::Init;
pub use self::options::MixOptions;
pub use self::params::MixParams;
pub use self::responsibilities::Responsibilities;
pub use self::shape::MixShape;

pub mod prelude {
    pub use super::corpus::Corpus;
    pub use super::init::Init;
    pub use super::options::MixOptions;
    pub use super::params::MixParams;
    pub use super::responsibilities::Responsibilities;
    pub use super::shape::MixShape;
}
