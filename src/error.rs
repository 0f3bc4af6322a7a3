//! Error taxonomy for the solver pipeline.
//!
//! Structural errors (`BasisMismatch`) halt immediately. Semantic errors
//! (`NotZeroDimensional`, `EmptyVariety`) describe the ideal itself rather
//! than a computational failure. Numerical errors (`Singular`, `Instability`)
//! describe a failure of the chosen action operator or tolerance; `Singular`
//! is fatal for that operator but the caller may retry with another
//! `Method`, while `Instability` is a warning accompanying a best-effort
//! result.

use thiserror::Error;

/// Errors that can occur while building, reducing, or solving a polynomial
/// system.
#[derive(Debug, Error)]
pub enum Error {
    /// Polynomials of different bases (Power vs. Chebyshev) were mixed.
    #[error("all polynomials must share the same basis")]
    BasisMismatch,

    /// A generator's coefficient tensor had fewer axes than the system's
    /// variable count. Not returned to callers: the builder auto-corrects
    /// by padding the tensor with leading size-1 axes (see
    /// [`crate::polynomial::Polynomial::pad_to_dim`]); this variant exists
    /// only so the padding can be logged with `Display` via `tracing`.
    #[error("polynomial has {from} axes, padded to {to} to match the system")]
    DimensionMismatch { from: usize, to: usize },

    /// The ideal generated by `polys` is not zero-dimensional: its variety
    /// is infinite, so no finite root list exists.
    #[error("ideal is not zero-dimensional; variety is infinite")]
    NotZeroDimensional,

    /// The ideal is the whole ring (it contains a nonzero constant), so its
    /// variety is empty.
    #[error("ideal has empty variety")]
    EmptyVariety,

    /// The chosen action operator (multiplication or division matrix) is
    /// singular and roots cannot be extracted from it. The caller should
    /// retry with a different `Method`.
    #[error("action matrix is singular: {detail}")]
    Singular { detail: String },

    /// A pivot fell below the numerical tolerance during reduction; the
    /// computation proceeded with a best-effort result.
    #[error("numerical instability: {detail}")]
    Instability { detail: String },

    /// At least one polynomial has no terms to work with (e.g. a
    /// degenerate construction request).
    #[error("invalid polynomial system: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
