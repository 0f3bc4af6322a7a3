//! Eigen-decomposition of the action matrix and reconstruction of root
//! coordinates from its eigenvectors.
//!
//! This is the one place the crate consumes rather than reimplements
//! linear algebra: general eigen-decomposition of a non-symmetric matrix is
//! delegated to `ndarray-linalg`'s `Eig` (LAPACK `*geev`), since nothing
//! here needs a hand-rolled eigensolver.

use crate::error::{Error, Result};
use crate::reduction::ReducedSystem;
use ndarray::Array2;
use ndarray_linalg::Eig;
use num_complex::Complex64;

/// Decomposes the action matrix `m` and reconstructs, from each
/// eigenvector, one point of the variety.
///
/// `m`'s columns are images of VB monomials under the action (built by
/// [`crate::action`]), so an evaluation functional `e_p` — the row vector
/// `(vb_0(p), vb_1(p), ...)` at a root `p` — satisfies `e_p m = lambda
/// e_p` rather than `m e_p = lambda e_p`: it is a *left* eigenvector of
/// `m`, i.e. a right eigenvector of `m^T`. Normalizing by the constant
/// monomial's coordinate and reading off (or reducing, for variables
/// eliminated from the VB) each variable's coordinate recovers `p` itself.
pub fn extract_roots(
    m: &Array2<f64>,
    reduced: &ReducedSystem,
    nvars: usize,
) -> Result<Vec<Vec<Complex64>>> {
    let mt = m.t().to_owned();
    let (_eigvals, eigvecs) = mt.eig().map_err(|e| Error::Instability {
        detail: format!("eigen-decomposition failed: {:?}", e),
    })?;

    let zero_mon = vec![0usize; nvars];
    let one_idx = reduced.vb_index_of(&zero_mon).ok_or_else(|| Error::Instability {
        detail: "vector-space basis is missing the constant monomial".to_string(),
    })?;

    let mut roots = Vec::with_capacity(eigvecs.ncols());
    for col in 0..eigvecs.ncols() {
        let v = eigvecs.column(col);
        let denom = v[one_idx];
        if denom.norm() < 1e-10 {
            // Degenerate normalization; this eigenvector does not
            // correspond to a finite point of the variety.
            continue;
        }
        let mut point = Vec::with_capacity(nvars);
        for k in 0..nvars {
            let mut e_k = vec![0usize; nvars];
            e_k[k] = 1;
            let coord = match reduced.vb_index_of(&e_k) {
                Some(idx) => v[idx] / denom,
                None => {
                    let coefs = reduced.reduce_monomial(&e_k)?;
                    let mut acc = Complex64::new(0.0, 0.0);
                    for (j, &c) in coefs.iter().enumerate() {
                        acc += c * v[j];
                    }
                    acc / denom
                }
            };
            point.push(coord);
        }
        roots.push(point);
    }
    Ok(roots)
}
