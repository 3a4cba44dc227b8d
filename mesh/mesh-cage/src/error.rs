//! Error types for cage construction.
//!
//! The component functions (edge extraction, tetrahedralization, frames,
//! weights, adjacency, degeneracy filtering, distance queries) are total over
//! well-formed input and never fail. Errors only come out of the validated
//! pipeline in [`crate::build_cage`] and the length-checked methods on
//! [`crate::TetCage`].

use thiserror::Error;

/// Errors that can occur while building or querying a tetrahedral cage.
#[derive(Debug, Error)]
pub enum CageError {
    /// A face references a point that does not exist.
    #[error("face {face} references point {index}, but only {point_count} points exist")]
    FaceIndexOutOfRange {
        /// Index of the offending face.
        face: usize,
        /// The out-of-range point index.
        index: u32,
        /// Number of real points supplied.
        point_count: usize,
    },

    /// A vertex fan references a point that does not exist.
    #[error("vertex fan {vertex} references point {index}, but only {point_count} points exist")]
    FanIndexOutOfRange {
        /// Index of the offending fan in the fan list.
        vertex: usize,
        /// The out-of-range point index.
        index: u32,
        /// Number of real points supplied.
        point_count: usize,
    },

    /// A vertex fan holds a dangling neighbor that is not part of a pair.
    #[error("vertex fan {vertex} has {len} neighbors, expected an even count")]
    OddFanLength {
        /// Index of the offending fan in the fan list.
        vertex: usize,
        /// Number of neighbor entries in the fan.
        len: usize,
    },

    /// A weight or position array does not match the domain it maps from.
    #[error("expected {expected} values, got {actual}")]
    LengthMismatch {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// Invalid cage parameters.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl CageError {
    /// Create an invalid params error.
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }

    /// Create a length mismatch error.
    #[must_use]
    pub const fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }
}

/// Result type alias for cage operations.
pub type CageResult<T> = Result<T, CageError>;
