//! Action-matrix assembly: the matrix of "multiply by `f`" (or "divide by
//! `x_k`") acting on the quotient algebra in the coordinates given by its
//! vector-space basis (VB). Its eigenvectors are exactly the evaluation
//! functionals at the variety's points.

use crate::error::{Error, Result};
use crate::reduction::ReducedSystem;
use ndarray::Array2;
use ndarray_linalg::Inverse;
use rand::Rng;

/// The action matrix of multiplication by the variable `x_k` (0-indexed)
/// on the quotient algebra, in VB coordinates: column `j` is `x_k *
/// vb[j]`, reduced over `vb`.
pub fn mult_matrix_var(reduced: &ReducedSystem, var: usize) -> Result<Array2<f64>> {
    let n = reduced.vb.len();
    let mut m = Array2::<f64>::zeros((n, n));
    for (j, e) in reduced.vb.iter().enumerate() {
        let mut shifted = e.clone();
        shifted[var] += 1;
        let col = reduced.reduce_monomial(&shifted)?;
        m.column_mut(j).assign(&col);
    }
    Ok(m)
}

/// The action matrix of multiplication by a random linear combination of
/// the variables, `sum_k c_k x_k` with `c_k` drawn uniformly from `[0,
/// 1000)`, matching the reference implementation's random-`f` selection.
/// Generic enough that its eigenvalues are (almost surely) simple,
/// avoiding the repeated-eigenvalue degeneracies a pure coordinate
/// variable can hit.
pub fn mult_matrix_random<R: Rng + ?Sized>(reduced: &ReducedSystem, rng: &mut R) -> Result<Array2<f64>> {
    let nvars = reduced.vb.first().map(|v| v.len()).unwrap_or(0);
    let coeffs: Vec<f64> = (0..nvars).map(|_| rng.gen_range(0.0..1000.0)).collect();
    let n = reduced.vb.len();
    let mut m = Array2::<f64>::zeros((n, n));
    for (j, e) in reduced.vb.iter().enumerate() {
        let mut col = ndarray::Array1::<f64>::zeros(n);
        for (k, &c) in coeffs.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            let mut shifted = e.clone();
            shifted[k] += 1;
            let contribution = reduced.reduce_monomial(&shifted)?;
            col.scaled_add(c, &contribution);
        }
        m.column_mut(j).assign(&col);
    }
    Ok(m)
}

/// The action matrix of division by `x_k`, i.e. the inverse of
/// [`mult_matrix_var`]. Returns [`Error::Singular`] if that matrix is not
/// invertible (the caller should retry with a different `Method`).
pub fn div_matrix_var(reduced: &ReducedSystem, var: usize) -> Result<Array2<f64>> {
    let m = mult_matrix_var(reduced, var)?;
    m.inv().map_err(|e| Error::Singular {
        detail: format!("multiplication matrix for x_{} is not invertible: {}", var, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::{Basis, Polynomial};
    use crate::reduction::reduce;
    use ndarray::array;

    #[test]
    fn mult_matrix_for_univariate_quadratic_matches_companion_form() {
        // x^2 - 4x + 2 = 0, vb = {1, x} (see reduction.rs tests for ordering)
        let f = Polynomial::new(array![2.0, -4.0, 1.0].into_dyn(), Basis::Power);
        let reduced = reduce(&[f], 2, crate::linalg::PIVOT_TOL).unwrap();
        let m = mult_matrix_var(&reduced, 0).unwrap();
        // x*1 = x (already in vb), x*x = x^2 = 4x - 2 (mod ideal)
        assert_eq!(m.shape(), &[2, 2]);
        let trace = m[[0, 0]] + m[[1, 1]];
        // trace of companion-like matrix should equal the sum of roots, 4
        assert!((trace - 4.0).abs() < 1e-9, "trace was {}", trace);
    }
}
