//! Numerical linear-algebra primitives underlying the Macaulay reduction.
//!
//! Column-pivoted QR and the rank-revealing row reduction are hand-rolled
//! directly against `ndarray::Array2<f64>` using Householder reflections —
//! this specific decomposition (Businger–Golub pivoting) is not part of
//! `ndarray-linalg`'s public surface, so it is implemented here the same
//! way `lax` implements its own LAPACK calls: one well-isolated module that
//! every higher-level component treats as a black box.
//!
//! Tolerances are named constants rather than inline literals, per the
//! design notes: [`PIVOT_TOL`] for rank/pivot decisions, [`CLEAN_TOL`] for
//! zeroing near-zero matrix entries, [`ROOT_VALIDATION_TOL`] for the
//! façade's final back-substitution check.

use ndarray::{s, Array1, Array2, Axis};

/// Default tolerance below which an R diagonal entry is treated as
/// numerically zero when determining rank.
pub const PIVOT_TOL: f64 = 1e-10;

/// Tolerance below which matrix entries are cleaned to exact zero during
/// reduction.
pub const CLEAN_TOL: f64 = 1e-10;

/// Tolerance for the façade's back-substitution validation of candidate
/// roots (spec.md §8: a "generous numerical bound").
pub const ROOT_VALIDATION_TOL: f64 = 1e-3;

/// Sets entries with magnitude below `tau` to exactly zero.
pub fn clean_zeros(a: &Array2<f64>, tau: f64) -> Array2<f64> {
    a.mapv(|x| if x.abs() < tau { 0.0 } else { x })
}

/// Number of diagonal entries of `r` with magnitude above `tau`: the
/// numerical rank revealed by a (column-pivoted) QR factorization.
pub fn numerical_rank(r: &Array2<f64>, tau: f64) -> usize {
    r.diag().iter().filter(|&&x| x.abs() > tau).count()
}

/// Inverts a permutation given as `perm[new_index] = old_index`.
pub fn inverse_permutation(perm: &[usize]) -> Vec<usize> {
    let mut inv = vec![0usize; perm.len()];
    for (new_index, &old_index) in perm.iter().enumerate() {
        inv[old_index] = new_index;
    }
    inv
}

fn swap_columns(a: &mut Array2<f64>, i: usize, j: usize) {
    if i == j {
        return;
    }
    let ci = a.column(i).to_owned();
    let cj = a.column(j).to_owned();
    a.column_mut(i).assign(&cj);
    a.column_mut(j).assign(&ci);
}

fn householder_reflect(v: &Array1<f64>) -> bool {
    v.dot(v).sqrt() > 1e-300
}

/// Applies one Householder step eliminating the sub-diagonal of column `i`
/// in-place on `r`'s trailing block, accumulating the reflector into `q`.
fn apply_householder_step(r: &mut Array2<f64>, q: &mut Array2<f64>, i: usize) {
    let m = r.nrows();
    let x = r.slice(s![i.., i]).to_owned();
    let norm_x = x.dot(&x).sqrt();
    if norm_x < 1e-300 {
        return;
    }
    let sign = if x[0] >= 0.0 { 1.0 } else { -1.0 };
    let alpha = -sign * norm_x;
    let mut v = x;
    v[0] -= alpha;
    if !householder_reflect(&v) {
        return;
    }
    let vnorm = v.dot(&v).sqrt();
    v.mapv_inplace(|e| e / vnorm);

    // R[i.., i..] -= 2 v (v^T R[i.., i..])
    let sub = r.slice(s![i.., i..]).to_owned();
    let vt_sub = v.dot(&sub);
    let mut sub_mut = r.slice_mut(s![i.., i..]);
    for (mut row, &vk) in sub_mut.axis_iter_mut(Axis(0)).zip(v.iter()) {
        row.zip_mut_with(&vt_sub, |e, &s| *e -= 2.0 * vk * s);
    }

    // Q[.., i..] -= 2 (Q[.., i..] v) v^T
    let qsub = q.slice(s![.., i..]).to_owned();
    let qv = qsub.dot(&v);
    let mut qsub_mut = q.slice_mut(s![.., i..]);
    for (k, &vk) in v.iter().enumerate() {
        if vk == 0.0 {
            continue;
        }
        let mut col = qsub_mut.column_mut(k);
        col.zip_mut_with(&qv, |e, &s| *e -= 2.0 * vk * s);
    }
    let _ = m;
}

/// Plain Householder QR (no pivoting): returns `(Q, R)` with `A = Q R` and
/// columns left in their original order.
pub fn qr_unpivoted(a: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    let (m, k) = a.dim();
    let mut r = a.clone();
    let mut q = Array2::<f64>::eye(m);
    for i in 0..m.min(k) {
        apply_householder_step(&mut r, &mut q, i);
    }
    (q, r)
}

/// Column-pivoted (Businger–Golub) Householder QR: returns `(Q, R, perm)`
/// with `A[:, perm] = Q R`, `R` upper triangular with non-increasing
/// diagonal magnitude, and `perm[j]` the original column now in position
/// `j`.
pub fn col_pivoted_qr(a: &Array2<f64>) -> (Array2<f64>, Array2<f64>, Vec<usize>) {
    let (m, k) = a.dim();
    let mut r = a.clone();
    let mut q = Array2::<f64>::eye(m);
    let mut perm: Vec<usize> = (0..k).collect();

    for i in 0..m.min(k) {
        let mut best_j = i;
        let mut best_norm = -1.0f64;
        for j in i..k {
            let col = r.slice(s![i.., j]);
            let n = col.dot(&col);
            if n > best_norm {
                best_norm = n;
                best_j = j;
            }
        }
        if best_j != i {
            swap_columns(&mut r, i, best_j);
            perm.swap(i, best_j);
        }
        if best_norm.sqrt() < 1e-300 {
            continue;
        }
        apply_householder_step(&mut r, &mut q, i);
    }
    (q, r, perm)
}

fn gather_rows(matrix: &Array2<f64>, idxs: &[usize]) -> Array2<f64> {
    let cols = matrix.ncols();
    let mut out = Array2::<f64>::zeros((idxs.len(), cols));
    for (i, &row) in idxs.iter().enumerate() {
        out.row_mut(i).assign(&matrix.row(row));
    }
    out
}

fn gather_columns(matrix: &Array2<f64>, idxs: &[usize]) -> Array2<f64> {
    let rows = matrix.nrows();
    let mut out = Array2::<f64>::zeros((rows, idxs.len()));
    for (j, &col) in idxs.iter().enumerate() {
        out.column_mut(j).assign(&matrix.column(col));
    }
    out
}

fn reorder_columns(matrix: &Array2<f64>, idx: &[usize]) -> Array2<f64> {
    let rows = matrix.nrows();
    let mut out = Array2::<f64>::zeros((rows, idx.len()));
    for (j, &src) in idx.iter().enumerate() {
        out.column_mut(j).assign(&matrix.column(src));
    }
    out
}

/// Determines which rows of `matrix` are linearly independent using
/// rank-revealing QR. Returns `(independent_rows, dependent_rows, q)`: `q`
/// is `None` when `matrix` already has full row rank (no dependent rows to
/// locate), `Some` otherwise.
pub fn row_linear_dependencies(
    matrix: &Array2<f64>,
    tau: f64,
) -> (Vec<usize>, Vec<usize>, Option<Array2<f64>>) {
    let height = matrix.nrows();
    let (q, r, _p) = col_pivoted_qr(matrix);
    let rank = numerical_rank(&r, tau);
    let num_missing = height - rank;
    if num_missing == 0 {
        return ((0..height).collect(), Vec::new(), None);
    }

    // Last `num_missing` rows of Q^T == last `num_missing` columns of Q,
    // transposed; these span the left null space of `matrix`.
    let tail = q.slice(s![.., height - num_missing..]).t().to_owned();
    let (_q1, r1, p1) = col_pivoted_qr(&tail);
    let rank1 = numerical_rank(&r1, tau);
    let dependent = p1[..rank1].to_vec();
    let independent = p1[rank1..].to_vec();
    (independent, dependent, Some(q))
}

/// Rank-revealing row reduction: reduces `matrix` to a form where each row
/// has a unique leading (first nonzero) column, preserving row span and
/// original column order. Consolidates the reference implementation's two
/// parallel reducers into the `row_linear_dependencies`-based path.
pub fn rrqr_reduce(matrix: &Array2<f64>, tau: f64, clean: bool) -> Array2<f64> {
    let (rows, cols) = matrix.dim();
    if rows <= 1 || cols == 0 {
        return matrix.clone();
    }
    let height = rows.min(cols);
    let a = matrix.slice(s![.., ..height]).to_owned();

    let (independent, dependent, q_opt) = row_linear_dependencies(&a, tau);
    if dependent.is_empty() {
        let (_, r) = qr_unpivoted(matrix);
        return if clean { clean_zeros(&r, tau) } else { r };
    }

    let mut q = q_opt.expect("dependent rows imply Q was computed");
    if clean {
        q = clean_zeros(&q, tau);
    }

    let null_space_size = dependent.len();
    let qt_tail = q.slice(s![.., rows - null_space_size..]).t().to_owned();
    let mut sub3 = qt_tail.dot(matrix.slice(s![.., height..]));
    if clean {
        sub3 = clean_zeros(&sub3, tau);
    }
    let sub3 = rrqr_reduce(&sub3, tau, clean);

    let sub1_input = gather_rows(matrix, &independent);
    let sub1 = rrqr_reduce(&sub1_input, tau, clean);

    let mut result = Array2::<f64>::zeros((rows, cols));
    for (i, row) in sub1.outer_iter().enumerate() {
        result.row_mut(i).assign(&row);
    }
    let dep_start = independent.len();
    for (i, _) in dependent.iter().enumerate() {
        let r = dep_start + i;
        result
            .slice_mut(s![r, height..])
            .assign(&sub3.row(i.min(sub3.nrows().saturating_sub(1))));
    }
    if clean {
        clean_zeros(&result, tau)
    } else {
        result
    }
}

/// Back-substitutes an upper-triangular square system `c @ x = d` for `x`.
fn back_substitute_upper(c: &Array2<f64>, d: &Array2<f64>) -> Array2<f64> {
    let m = c.nrows();
    let p = d.ncols();
    let mut x = Array2::<f64>::zeros((m, p));
    for col in 0..p {
        for i in (0..m).rev() {
            let mut sum = d[[i, col]];
            for j in (i + 1)..m {
                sum -= c[[i, j]] * x[[j, col]];
            }
            x[[i, col]] = sum / c[[i, i]];
        }
    }
    x
}

/// Takes a matrix in row-echelon form (as produced by [`rrqr_reduce`]) and
/// reduces it to row-reduced echelon form `[I | X]` with columns restored
/// to their original identities. Square inputs are assumed to already be
/// the identity up to row reduction and return `I` directly.
pub fn triangular_solve(matrix: &Array2<f64>) -> Array2<f64> {
    let (m, n) = matrix.dim();
    if m == n {
        return Array2::eye(m);
    }

    let mut order_c = Vec::new();
    let mut order_d = Vec::new();
    let (mut j, mut k) = (0usize, 0usize);
    while j < m && k < n {
        if matrix[[j, k]] != 0.0 {
            order_c.push(k);
            j += 1;
            k += 1;
        } else {
            order_d.push(k);
            k += 1;
        }
    }
    order_d.extend(k..n);

    let c = gather_columns(matrix, &order_c);
    let d = gather_columns(matrix, &order_d);
    let x = back_substitute_upper(&c, &d);

    let rank = x.nrows();
    let mut solver = Array2::<f64>::zeros((rank, rank + x.ncols()));
    solver.slice_mut(s![.., ..rank]).assign(&Array2::eye(rank));
    solver.slice_mut(s![.., rank..]).assign(&x);

    let mut order = order_c;
    order.extend(order_d);
    let inv = inverse_permutation(&order);
    reorder_columns(&solver, &inv)
}

/// Rough condition-number estimate from a column-pivoted QR's diagonal:
/// ratio of the largest to the smallest `|R_ii|`. Used only for the
/// façade's verbose diagnostics, so a full SVD is not warranted.
pub fn estimate_condition_number(a: &Array2<f64>) -> f64 {
    let (_, r, _) = col_pivoted_qr(a);
    let mags: Vec<f64> = r.diag().iter().map(|x| x.abs()).filter(|&x| x > 0.0).collect();
    match (mags.first(), mags.last()) {
        (Some(&hi), Some(&lo)) if lo > 0.0 => hi / lo,
        _ => f64::INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn unpivoted_qr_reconstructs_matrix() {
        let a = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let (q, r) = qr_unpivoted(&a);
        let recon = q.dot(&r);
        for (x, y) in recon.iter().zip(a.iter()) {
            assert!((x - y).abs() < 1e-9, "{} vs {}", x, y);
        }
    }

    #[test]
    fn pivoted_qr_reconstructs_permuted_matrix() {
        let a = array![[1.0, 0.0, 2.0], [0.0, 0.0, 3.0], [4.0, 0.0, 5.0]];
        let (q, r, perm) = col_pivoted_qr(&a);
        let recon = q.dot(&r);
        let mut permuted = a.clone();
        for (j, &src) in perm.iter().enumerate() {
            permuted.column_mut(j).assign(&a.column(src));
        }
        for (x, y) in recon.iter().zip(permuted.iter()) {
            assert!((x - y).abs() < 1e-9, "{} vs {}", x, y);
        }
    }

    #[test]
    fn rank_deficient_matrix_detected() {
        // row 2 = 2*row 0, so rank is 2 not 3
        let a = array![[1.0, 2.0, 3.0], [0.0, 1.0, 1.0], [2.0, 4.0, 6.0]];
        let (independent, dependent, q) = row_linear_dependencies(&a, PIVOT_TOL);
        assert_eq!(dependent.len(), 1);
        assert_eq!(independent.len(), 2);
        assert!(q.is_some());
    }

    #[test]
    fn full_rank_matrix_has_no_dependents() {
        let a = array![[1.0, 0.0], [0.0, 1.0]];
        let (independent, dependent, q) = row_linear_dependencies(&a, PIVOT_TOL);
        assert_eq!(independent.len(), 2);
        assert!(dependent.is_empty());
        assert!(q.is_none());
    }

    #[test]
    fn inverse_permutation_round_trips() {
        let perm = vec![2, 0, 1];
        let inv = inverse_permutation(&perm);
        for (i, &p) in perm.iter().enumerate() {
            assert_eq!(inv[p], i);
        }
    }
}
