//! The public façade: `solve` takes a system of polynomials and a choice of
//! action operator and returns the points of its variety.

use crate::action;
use crate::eigen;
use crate::error::{Error, Result};
use crate::linalg;
use crate::macaulay;
use crate::polynomial::Polynomial;
use crate::reduction;
use num_complex::Complex64;

/// Which action operator drives the eigenproblem. Mirrors the
/// `MSmatrix` convention of the reference implementation this crate
/// generalizes: a positive value picks a multiplication-by-variable
/// matrix, zero a random linear combination of the variables, and a
/// negative value a division-by-variable matrix.
#[derive(Debug, Clone, Copy)]
pub enum Method {
    /// Multiplication by `x_0`.
    Mult,
    /// Multiplication by a random linear combination of the variables;
    /// avoids the repeated-eigenvalue degeneracies a pure coordinate
    /// variable can produce.
    MultRand,
    /// Division by `x_0` (inverse of the `x_0` multiplication matrix).
    Div,
    /// General escape hatch: `k > 0` multiplies by `x_{k-1}`, `k == 0`
    /// is [`Method::MultRand`], `k < 0` divides by `x_{-k-1}`.
    MSmatrix(i32),
}

enum ResolvedMethod {
    Mult(usize),
    MultRand,
    Div(usize),
}

impl Method {
    fn resolve(self, nvars: usize) -> ResolvedMethod {
        let k = match self {
            Method::Mult => 1,
            Method::MultRand => 0,
            Method::Div => -1,
            Method::MSmatrix(k) => k,
        };
        if k > 0 {
            ResolvedMethod::Mult(((k - 1) as usize) % nvars.max(1))
        } else if k == 0 {
            ResolvedMethod::MultRand
        } else {
            ResolvedMethod::Div(((-k - 1) as usize) % nvars.max(1))
        }
    }
}

/// Diagnostics about a completed solve, surfaced when `verbose` is set.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// The working degree the Macaulay matrix was built at.
    pub degree: usize,
    /// Size of the quotient algebra's vector-space basis (number of
    /// roots counted with multiplicity, for a reduced zero-dimensional
    /// ideal).
    pub vb_size: usize,
    /// Rough condition-number estimate of the action matrix actually
    /// used.
    pub condition_number: f64,
    /// Human-readable notes: discarded candidates, instability, etc.
    pub warnings: Vec<String>,
}

/// Solves the system `polys = 0` for all points of its (assumed
/// zero-dimensional) variety.
///
/// Fails with [`Error::BasisMismatch`] if the polynomials don't share a
/// basis, [`Error::NotZeroDimensional`] if the ideal's variety is
/// infinite, [`Error::EmptyVariety`] if the ideal is the whole ring, or
/// [`Error::Singular`] if `method` selects a non-invertible division
/// matrix.
pub fn solve(polys: &[Polynomial], method: Method, verbose: bool) -> Result<Vec<Vec<Complex64>>> {
    solve_with_report(polys, method, verbose).map(|(roots, _)| roots)
}

/// As [`solve`], but also returns a [`SolveReport`] describing the
/// computation (working degree, VB size, condition number, warnings).
pub fn solve_with_report(
    polys: &[Polynomial],
    method: Method,
    verbose: bool,
) -> Result<(Vec<Vec<Complex64>>, SolveReport)> {
    if polys.is_empty() {
        return Err(Error::InvalidInput("no polynomials given".to_string()));
    }
    let nvars = polys[0].dim();
    for p in &polys[1..] {
        polys[0].check_basis(p)?;
    }

    let degree = macaulay::find_degree(polys, None);
    if verbose {
        tracing::info!(degree, "chose Macaulay working degree");
    }

    let reduced = reduction::reduce(polys, degree, linalg::PIVOT_TOL)?;
    let vb_size = reduced.vb.len();
    if verbose {
        tracing::info!(vb_size, "computed vector-space basis for the quotient algebra");
    }

    let action_matrix = match method.resolve(nvars) {
        ResolvedMethod::Mult(var) => action::mult_matrix_var(&reduced, var)?,
        ResolvedMethod::MultRand => {
            let mut rng = rand::thread_rng();
            action::mult_matrix_random(&reduced, &mut rng)?
        }
        ResolvedMethod::Div(var) => action::div_matrix_var(&reduced, var)?,
    };

    let condition_number = linalg::estimate_condition_number(&action_matrix);
    if verbose {
        tracing::info!(condition_number, "estimated action-matrix condition number");
    }

    let candidates = eigen::extract_roots(&action_matrix, &reduced, nvars)?;

    let mut warnings = Vec::new();
    let mut roots = Vec::with_capacity(candidates.len());
    for p in candidates {
        let residual = polys
            .iter()
            .map(|poly| poly.evaluate(&p).norm())
            .fold(0.0f64, f64::max);
        if residual < linalg::ROOT_VALIDATION_TOL {
            roots.push(p);
        } else if verbose {
            warnings.push(format!(
                "discarded candidate {:?} with residual {:.3e}",
                p, residual
            ));
        }
    }
    if roots.is_empty() && verbose {
        warnings.push("no candidate root passed back-substitution validation".to_string());
    }

    Ok((
        roots,
        SolveReport {
            degree,
            vb_size,
            condition_number,
            warnings,
        },
    ))
}
