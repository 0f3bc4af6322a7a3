//! Macaulay matrix construction: choosing the working degree and expanding
//! the generating polynomials into the linear system whose rows span the
//! degree-`d` graded piece of the ideal.

use crate::error::{Error, Result};
use crate::monomial::{self, Monomial};
use crate::polynomial::Polynomial;
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// A Macaulay matrix together with the bookkeeping needed to interpret it:
/// which monomial each column stands for (grevlex descending), and which
/// generator produced each row.
pub struct MacaulayMatrix {
    pub matrix: Array2<f64>,
    /// Column `j` is the coefficient of `columns[j]`, grevlex descending.
    pub columns: Vec<Monomial>,
    /// `row_generator[i]` is the index into the original `polys` slice that
    /// produced row `i`.
    pub row_generator: Vec<usize>,
    /// Cumulative row counts per generator, so generator `g`'s rows are
    /// `matrix.slice(s![cuts[g-1]..cuts[g], ..])` (with `cuts[-1] == 0`).
    pub cuts: Vec<usize>,
}

/// The generalized Macaulay/Bézout degree bound: sum of the `n + 1` largest
/// generator degrees, minus `n`, where `n` is the number of variables. If
/// `degree_floor` is given, the returned degree is never below it (callers
/// asking for a specific working degree via `Method`).
pub fn find_degree(polys: &[Polynomial], degree_floor: Option<usize>) -> usize {
    let n = polys[0].dim();
    let mut degrees: Vec<usize> = polys
        .iter()
        .map(|p| p.lead_term().map(|m| monomial::degree(&m)).unwrap_or(0))
        .collect();
    degrees.sort_unstable_by(|a, b| b.cmp(a));
    let max_degree = degrees.first().copied().unwrap_or(1);
    let take = (n + 1).min(degrees.len());
    let bound: usize = degrees[..take]
        .iter()
        .sum::<usize>()
        .saturating_sub(n)
        .max(max_degree);
    match degree_floor {
        Some(floor) => bound.max(floor),
        None => bound,
    }
}

/// Builds the Macaulay matrix at working degree `degree`: for each
/// generator `f`, every monomial multiplier `m` with `deg(m) <= degree -
/// deg(f)` contributes the row `m * f`, expressed over the column basis of
/// all monomials with degree `<= degree` (grevlex descending).
pub fn build(polys: &[Polynomial], degree: usize) -> Result<MacaulayMatrix> {
    if polys.is_empty() {
        return Err(Error::InvalidInput("no polynomials given".to_string()));
    }
    for p in &polys[1..] {
        polys[0].check_basis(p)?;
    }
    let n = polys.iter().map(|p| p.dim()).max().unwrap_or(0);
    let polys: Vec<Polynomial> = polys
        .iter()
        .map(|p| {
            if p.dim() < n {
                tracing::debug!(
                    "{}",
                    Error::DimensionMismatch { from: p.dim(), to: n }
                );
                p.pad_to_dim(n)
            } else {
                p.clone()
            }
        })
        .collect();
    let polys = polys.as_slice();

    let columns = monomial::mon_combos(n, degree);
    let col_index: HashMap<Monomial, usize> = columns
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, m)| (m, i))
        .collect();
    let width = columns.len();

    let mut rows: Vec<Array1<f64>> = Vec::new();
    let mut row_generator = Vec::new();
    let mut cuts = Vec::new();

    for (gi, p) in polys.iter().enumerate() {
        let lead_degree = p.lead_term().map(|m| monomial::degree(&m)).unwrap_or(0);
        if lead_degree > degree {
            return Err(Error::InvalidInput(format!(
                "generator {} has degree {} exceeding working degree {}",
                gi, lead_degree, degree
            )));
        }
        let remaining = degree - lead_degree;
        for multiplier in monomial::mon_combos(n, remaining) {
            let shifted = p.mon_mult(&multiplier);
            rows.push(polynomial_to_row(&shifted, &col_index, width)?);
            row_generator.push(gi);
        }
        cuts.push(rows.len());
    }

    let height = rows.len();
    let mut matrix = Array2::<f64>::zeros((height, width));
    for (i, row) in rows.into_iter().enumerate() {
        matrix.row_mut(i).assign(&row);
    }

    Ok(MacaulayMatrix {
        matrix,
        columns,
        row_generator,
        cuts,
    })
}

fn polynomial_to_row(
    p: &Polynomial,
    col_index: &HashMap<Monomial, usize>,
    width: usize,
) -> Result<Array1<f64>> {
    let mut row = Array1::<f64>::zeros(width);
    for (idx, &c) in p.coeff.indexed_iter() {
        if c == 0.0 {
            continue;
        }
        let m: Monomial = idx.slice().to_vec();
        match col_index.get(&m) {
            Some(&j) => row[j] = c,
            None => {
                return Err(Error::InvalidInput(format!(
                    "monomial {:?} exceeds the working degree bound",
                    m
                )))
            }
        }
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::Basis;
    use ndarray::array;

    fn poly(c: ndarray::ArrayD<f64>) -> Polynomial {
        Polynomial::new(c, Basis::Power)
    }

    #[test]
    fn find_degree_for_two_quadratics_in_two_vars() {
        // x^2 + y - 1 = 0, x + y^2 - 1 = 0: both degree 2, n = 2.
        let f = poly(array![[-1.0, 1.0], [0.0, 0.0], [1.0, 0.0]].into_dyn());
        let g = poly(array![[-1.0, 0.0, 1.0], [1.0, 0.0, 0.0]].into_dyn());
        let d = find_degree(&[f, g], None);
        // bound = (2 + 2) - 2 = 2, but n+1=3 > 2 generators, so take both degrees (2,2)
        assert_eq!(d, 2);
    }

    #[test]
    fn build_produces_expected_shape() {
        let f = poly(array![[0.0, 1.0], [1.0, 0.0]].into_dyn()); // x + y
        let mm = build(&[f], 2).unwrap();
        // columns: all monomials of degree <= 2 in 2 vars => 6
        assert_eq!(mm.columns.len(), 6);
        // rows: multipliers of degree <= 2-1=1 => 3 multipliers (1,x,y)
        assert_eq!(mm.matrix.nrows(), 3);
        assert_eq!(mm.row_generator, vec![0, 0, 0]);
        assert_eq!(mm.cuts, vec![3]);
    }

    #[test]
    fn build_rejects_mixed_basis() {
        let f = poly(array![1.0, 1.0].into_dyn());
        let g = Polynomial::new(array![1.0, 1.0].into_dyn(), Basis::Chebyshev);
        assert!(build(&[f, g], 1).is_err());
    }

    #[test]
    fn build_pads_a_generator_with_fewer_axes_than_the_system() {
        // f = x - 1 (1 variable), g = y (2 variables): f is auto-padded to
        // 2 axes with a leading size-1 axis rather than rejected.
        let f = poly(array![-1.0, 1.0].into_dyn());
        let g = poly(array![[0.0, 1.0], [0.0, 0.0]].into_dyn());
        let mm = build(&[f, g], 2).unwrap();
        assert_eq!(mm.columns[0].len(), 2);
    }

    #[test]
    fn find_degree_floors_at_single_generator_degree() {
        // x^2 - 4x + 2 in one variable: n = 1, n+1 = 2 > 1 generator, so
        // the sum-based bound alone would undershoot the generator's own
        // degree; the clamp must lift it back up to 2.
        let f = poly(array![2.0, -4.0, 1.0].into_dyn());
        assert_eq!(find_degree(&[f], None), 2);
    }
}
