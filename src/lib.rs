//! Numerical root-finding for zero-dimensional systems of multivariate
//! polynomials, via the Macaulay-matrix / Telen–Van Barel reduction and
//! the resulting action-matrix eigenproblem.
//!
//! The pipeline: build a [`Polynomial`] per equation in either the power
//! or Chebyshev basis, hand the system to [`solve`], and get back every
//! point of the variety as a complex coordinate vector. Internally this
//! expands the system into a Macaulay matrix at a generically-sufficient
//! degree, row-reduces it to a vector-space basis for the quotient
//! algebra, assembles a multiplication or division matrix acting on that
//! basis, and reads off roots from its eigenvectors.

pub mod action;
pub mod eigen;
pub mod error;
pub mod linalg;
pub mod macaulay;
pub mod monomial;
pub mod polynomial;
pub mod reduction;
pub mod solve;

pub use error::{Error, Result};
pub use polynomial::{Basis, Polynomial};
pub use solve::{solve, solve_with_report, Method, SolveReport};
