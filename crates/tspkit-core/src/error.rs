//! Error types for tspkit.

use thiserror::Error;

/// The one error type surfaced by `tspkit-core` and `tspkit-solver`.
///
/// Covers bad constructor arguments (`InvalidParameter`), a graph or
/// initializer that cannot be solved (`InvalidInput`), and a combination
/// catalog that failed its own self-check (`InternalInvariantViolation`).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TspError {
    /// A constructor argument is out of its valid range (k<2, passes<1,
    /// a negative improvement threshold, a missing compute function).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The input graph or an initializer's output cannot be solved: not
    /// undirected, not complete, fewer than k vertices, a non-finite or
    /// negative edge weight, or a non-Hamiltonian initial tour.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A combination catalog failed its own cardinality, length, or
    /// bound-membership self-check.
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(String),
}

/// Result type alias for tspkit operations.
pub type Result<T> = std::result::Result<T, TspError>;
