//! Errors for the EM driver and the shared numerical primitives.
//!
//! [`OptError`] is the error surface of everything under
//! [`crate::optimization`]: normalization of vectors/matrices, validation of
//! [`EMOptions`](crate::optimization::em::EMOptions), and failures bubbled up
//! from a model while the convergence loop is running. Model failures are
//! carried verbatim in [`OptError::Model`] so callers can recover the original
//! [`MixError`] without losing detail.
use crate::mixture::errors::MixError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Normalization ----
    /// Normalization input is neither a vector nor a matrix.
    InvalidShape { ndim: usize },

    /// Vector normalization with a zero or non-finite total.
    DegenerateVector { sum: f64 },

    // ---- EMOptions ----
    /// Convergence threshold must be a finite real.
    InvalidDelta { value: f64, reason: &'static str },

    // ---- Model ----
    /// A model step failed while the driver was iterating.
    Model { source: MixError },
}

impl std::error::Error for OptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptError::Model { source } => Some(source),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Normalization ----
            OptError::InvalidShape { ndim } => {
                write!(f, "Normalization expects a vector or a matrix; got an array of rank {ndim}")
            }
            OptError::DegenerateVector { sum } => {
                write!(f, "Cannot normalize a vector whose elements sum to {sum}")
            }

            // ---- EMOptions ----
            OptError::InvalidDelta { value, reason } => {
                write!(f, "Invalid convergence threshold {value}: {reason}")
            }

            // ---- Model ----
            OptError::Model { source } => {
                write!(f, "EM step failed: {source}")
            }
        }
    }
}

impl From<MixError> for OptError {
    fn from(err: MixError) -> Self {
        OptError::Model { source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    // Purpose
    // -------
    // Model failures keep their original cause when wrapped by the driver.
    //
    // Given
    // -----
    // - A `MixError::ModelNotInitialized` converted through `From`.
    //
    // Expect
    // ------
    // - The wrapper is `OptError::Model` and `source()` exposes the cause.
    fn from_mix_error_wraps_model_failure_and_exposes_source() {
        // Arrange
        let cause = MixError::ModelNotInitialized;

        // Act
        let err: OptError = cause.clone().into();

        // Assert
        assert_eq!(err, OptError::Model { source: cause });
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("EM step failed"));
    }

    #[test]
    // Purpose
    // -------
    // Display messages mention the offending values.
    fn display_reports_offending_values() {
        assert!(OptError::InvalidShape { ndim: 3 }.to_string().contains("rank 3"));
        assert!(OptError::DegenerateVector { sum: 0.0 }.to_string().contains("sum to 0"));
        let msg = OptError::InvalidDelta { value: f64::NAN, reason: "Threshold must be finite." }
            .to_string();
        assert!(msg.contains("NaN"));
    }
}
