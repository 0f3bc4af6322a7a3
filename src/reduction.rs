//! The Telen–Van Barel reduction: turning a Macaulay matrix at a chosen
//! working degree into a vector-space basis (VB) for the quotient algebra
//! and a reduction map expressing every eliminated monomial over that
//! basis.

use crate::error::{Error, Result};
use crate::linalg;
use crate::macaulay;
use crate::monomial::{self, Monomial};
use crate::polynomial::Polynomial;
use ndarray::{Array1, Array2};
use std::collections::HashSet;

/// The result of reducing a Macaulay matrix: a split of its columns into
/// "pivot" (eliminated) monomials and a vector-space basis (VB), plus the
/// map expressing each pivot monomial's class over the VB.
pub struct ReducedSystem {
    /// All monomials of degree `<= d`, in the Macaulay matrix's column
    /// order (grevlex descending).
    pub columns: Vec<Monomial>,
    /// The eliminated (leading-term) monomials, one per row of the
    /// row-reduced matrix, in row order.
    pub pivots: Vec<Monomial>,
    /// The quotient algebra's vector-space basis: monomials surviving
    /// reduction, i.e. standard monomials of the ideal at this degree.
    pub vb: Vec<Monomial>,
    /// `reduction_map[i]` gives `pivots[i]`'s coordinates over `vb`:
    /// `pivots[i] = sum_j reduction_map[[i, j]] * vb[j]` in the quotient
    /// algebra.
    pub reduction_map: Array2<f64>,
}

impl ReducedSystem {
    /// Index of `m` within [`vb`](Self::vb), if present.
    pub fn vb_index_of(&self, m: &[usize]) -> Option<usize> {
        self.vb.iter().position(|v| v.as_slice() == m)
    }

    /// Expresses any monomial of degree `<=` the working degree as a
    /// coordinate vector over `vb`: the unit vector if `m` is already a VB
    /// element, or the corresponding reduction-map row if `m` was
    /// eliminated as a pivot.
    pub fn reduce_monomial(&self, m: &[usize]) -> Result<Array1<f64>> {
        if let Some(i) = self.vb_index_of(m) {
            let mut v = Array1::<f64>::zeros(self.vb.len());
            v[i] = 1.0;
            return Ok(v);
        }
        match self.pivots.iter().position(|p| p.as_slice() == m) {
            Some(row) => Ok(self.reduction_map.row(row).to_owned()),
            None => Err(Error::InvalidInput(format!(
                "monomial {:?} exceeds the working degree and cannot be reduced",
                m
            ))),
        }
    }
}

/// Row-scans an already rank-revealing-reduced matrix for each row's
/// leading (first nonzero) column.
fn pivot_columns(matrix: &Array2<f64>) -> Vec<usize> {
    let (rows, cols) = matrix.dim();
    let mut pivots = Vec::new();
    let mut k = 0;
    for row in 0..rows {
        while k < cols && matrix[[row, k]] == 0.0 {
            k += 1;
        }
        if k >= cols {
            break;
        }
        pivots.push(k);
        k += 1;
    }
    pivots
}

/// Builds the Macaulay matrix for `polys` at `degree`, row-reduces it, and
/// extracts the vector-space basis and reduction map. Fails with
/// [`Error::EmptyVariety`] if the ideal contains a nonzero constant, or
/// [`Error::NotZeroDimensional`] if some variable never appears as a pure
/// power among the eliminated monomials.
pub fn reduce(polys: &[Polynomial], degree: usize, tau: f64) -> Result<ReducedSystem> {
    let mm = macaulay::build(polys, degree)?;
    let reduced = linalg::rrqr_reduce(&mm.matrix, tau, true);
    let pivot_idx = pivot_columns(&reduced);

    if let Some(const_col) = mm.columns.iter().position(|m| monomial::degree(m) == 0) {
        if let Some(row) = pivot_idx.iter().position(|&p| p == const_col) {
            let only_const = reduced
                .row(row)
                .iter()
                .enumerate()
                .all(|(j, &v)| j == const_col || v == 0.0);
            if only_const {
                return Err(Error::EmptyVariety);
            }
        }
    }

    let n = polys[0].dim();
    let mut has_pure_power = vec![false; n];
    for &p in &pivot_idx {
        let m = &mm.columns[p];
        let nonzero: Vec<usize> = (0..n).filter(|&i| m[i] > 0).collect();
        if nonzero.len() == 1 {
            has_pure_power[nonzero[0]] = true;
        }
    }
    if has_pure_power.iter().any(|&present| !present) {
        return Err(Error::NotZeroDimensional);
    }

    let pivot_set: HashSet<usize> = pivot_idx.iter().cloned().collect();
    let vb_col_index: Vec<usize> = (0..mm.columns.len())
        .filter(|j| !pivot_set.contains(j))
        .collect();
    let vb: Vec<Monomial> = vb_col_index.iter().map(|&j| mm.columns[j].clone()).collect();
    let pivots: Vec<Monomial> = pivot_idx.iter().map(|&j| mm.columns[j].clone()).collect();

    // `full_map`'s rows are the row-reduced echelon form's identity-block
    // equations, `u_pivot + sum_free X[f] * u_f = 0`; a pivot monomial's
    // class over the VB is therefore the *negated* free-column entries
    // (spec.md §4.5 step 3: "negated, divided by the pivot").
    let full_map = linalg::triangular_solve(&reduced);
    let mut reduction_map = Array2::<f64>::zeros((pivots.len(), vb.len()));
    for (out_j, &in_j) in vb_col_index.iter().enumerate() {
        reduction_map
            .column_mut(out_j)
            .assign(&full_map.column(in_j).mapv(|v| -v));
    }

    Ok(ReducedSystem {
        columns: mm.columns,
        pivots,
        vb,
        reduction_map,
    })
}
