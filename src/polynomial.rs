//! The polynomial value type: a dense coefficient tensor tagged with a basis.
//!
//! `Polynomial` is deliberately a thin data type (per spec.md's framing of it
//! as "a supporting value type, not hard engineering"): a tagged variant
//! dispatching on `Basis` rather than a trait-object class hierarchy, since
//! Power and Chebyshev share everything but `mon_mult` and `evaluate`.

use crate::error::{Error, Result};
use crate::monomial::Monomial;
use ndarray::{ArrayD, IxDyn};
use num_complex::Complex64;

/// Which monomial basis a [`Polynomial`]'s coefficient tensor is expressed
/// in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Basis {
    /// Standard monomial (power) basis: entry at `alpha` is the coefficient
    /// of `x^alpha`.
    Power,
    /// Tensor-product Chebyshev basis of the first kind: entry at `alpha`
    /// is the coefficient of `T_alpha(x) = prod_i T_{alpha_i}(x_i)`.
    Chebyshev,
}

/// A dense multivariate polynomial: an n-dimensional coefficient tensor plus
/// a basis tag.
#[derive(Debug, Clone)]
pub struct Polynomial {
    pub coeff: ArrayD<f64>,
    pub basis: Basis,
}

impl Polynomial {
    /// Builds a polynomial from a coefficient tensor. The tensor's rank is
    /// its dimension count `n`; trailing zero slices are permitted but not
    /// canonical.
    pub fn new(coeff: ArrayD<f64>, basis: Basis) -> Self {
        Polynomial { coeff, basis }
    }

    /// Number of variables (the rank of the coefficient tensor).
    pub fn dim(&self) -> usize {
        self.coeff.ndim()
    }

    /// Evaluates the polynomial at a complex point `z` (one coordinate per
    /// variable).
    pub fn evaluate(&self, z: &[Complex64]) -> Complex64 {
        assert_eq!(z.len(), self.dim(), "evaluate: dimension mismatch");
        match self.basis {
            Basis::Power => self.evaluate_power(z),
            Basis::Chebyshev => self.evaluate_chebyshev(z),
        }
    }

    fn evaluate_power(&self, z: &[Complex64]) -> Complex64 {
        let mut total = Complex64::new(0.0, 0.0);
        for (idx, &c) in self.coeff.indexed_iter() {
            if c == 0.0 {
                continue;
            }
            let mut term = Complex64::new(c, 0.0);
            for (axis, &power) in idx.slice().iter().enumerate() {
                term *= z[axis].powu(power as u32);
            }
            total += term;
        }
        total
    }

    fn evaluate_chebyshev(&self, z: &[Complex64]) -> Complex64 {
        // Precompute T_0..T_{max degree} along each axis via the standard
        // three-term recurrence, then contract against the coefficient
        // tensor.
        let shape = self.coeff.shape().to_vec();
        let tables: Vec<Vec<Complex64>> = shape
            .iter()
            .zip(z.iter())
            .map(|(&len, &zi)| chebyshev_table(zi, len))
            .collect();

        let mut total = Complex64::new(0.0, 0.0);
        for (idx, &c) in self.coeff.indexed_iter() {
            if c == 0.0 {
                continue;
            }
            let mut term = Complex64::new(c, 0.0);
            for (axis, &power) in idx.slice().iter().enumerate() {
                term *= tables[axis][power];
            }
            total += term;
        }
        total
    }

    /// Multiplies this polynomial by the monomial `x^alpha` (Power) or
    /// `T_alpha(x)` (Chebyshev), returning a new polynomial whose tensor
    /// shape has grown to accommodate the product.
    pub fn mon_mult(&self, alpha: &[usize]) -> Polynomial {
        assert_eq!(alpha.len(), self.dim(), "mon_mult: dimension mismatch");
        match self.basis {
            Basis::Power => Polynomial::new(power_shift(&self.coeff, alpha), self.basis),
            Basis::Chebyshev => {
                let mut coeff = self.coeff.clone();
                for (axis, &k) in alpha.iter().enumerate() {
                    if k > 0 {
                        coeff = chebyshev_axis_mult(&coeff, axis, k);
                    }
                }
                Polynomial::new(coeff, self.basis)
            }
        }
    }

    /// The grevlex-maximal monomial with a non-zero coefficient, i.e. the
    /// leading term.
    pub fn lead_term(&self) -> Option<Monomial> {
        let mut best: Option<Monomial> = None;
        for (idx, &c) in self.coeff.indexed_iter() {
            if c == 0.0 {
                continue;
            }
            let m: Monomial = idx.slice().to_vec();
            best = match best {
                None => Some(m),
                Some(cur) => {
                    if crate::monomial::grevlex_cmp(&m, &cur) == std::cmp::Ordering::Greater {
                        Some(m)
                    } else {
                        Some(cur)
                    }
                }
            };
        }
        best
    }

    /// The coefficient of the leading term, or `0.0` for the zero
    /// polynomial.
    pub fn lead_coeff(&self) -> f64 {
        match self.lead_term() {
            Some(m) => self.coeff[IxDyn(&m)],
            None => 0.0,
        }
    }

    /// Pads this polynomial's coefficient tensor up to rank `n` by
    /// inserting leading size-1 axes, leaving its coefficients unchanged
    /// (a no-op if it already has `n` axes). Used by the Macaulay builder
    /// when a generator was constructed with fewer variables than the rest
    /// of the system.
    pub fn pad_to_dim(&self, n: usize) -> Polynomial {
        Polynomial::new(insert_leading_axes(&self.coeff, n), self.basis)
    }

    /// Checks that `self` and `other` share a basis, returning
    /// [`Error::BasisMismatch`] if not.
    pub fn check_basis(&self, other: &Polynomial) -> Result<()> {
        if self.basis != other.basis {
            Err(Error::BasisMismatch)
        } else {
            Ok(())
        }
    }
}

/// Pads two coefficient tensors (with possibly different rank) to a common
/// rank and a common componentwise-max shape, placing each original tensor
/// at the low-index corner and zero-filling the rest.
pub fn match_size(a: &ArrayD<f64>, b: &ArrayD<f64>) -> (ArrayD<f64>, ArrayD<f64>) {
    let rank = a.ndim().max(b.ndim());
    let a = insert_leading_axes(a, rank);
    let b = insert_leading_axes(b, rank);

    let shape: Vec<usize> = (0..rank).map(|i| a.shape()[i].max(b.shape()[i])).collect();
    (pad_to(&a, &shape), pad_to(&b, &shape))
}

fn insert_leading_axes(a: &ArrayD<f64>, rank: usize) -> ArrayD<f64> {
    if a.ndim() == rank {
        return a.clone();
    }
    let mut shape = vec![1usize; rank - a.ndim()];
    shape.extend_from_slice(a.shape());
    a.clone().into_shape(IxDyn(&shape)).expect("insert_leading_axes: reshape is a no-op on size")
}

fn pad_to(a: &ArrayD<f64>, shape: &[usize]) -> ArrayD<f64> {
    if a.shape() == shape {
        return a.clone();
    }
    let mut out = ArrayD::<f64>::zeros(IxDyn(shape));
    let lens: Vec<usize> = a.shape().to_vec();
    out.slice_each_axis_mut(|ax| {
        let n = lens[ax.axis.index()] as isize;
        ndarray::Slice::from(0..n)
    })
    .assign(a);
    out
}

/// Shifts a Power-basis coefficient tensor by `alpha`: `x^alpha * p(x)`.
fn power_shift(coeff: &ArrayD<f64>, alpha: &[usize]) -> ArrayD<f64> {
    let new_shape: Vec<usize> = coeff
        .shape()
        .iter()
        .zip(alpha.iter())
        .map(|(&d, &a)| d + a)
        .collect();
    let mut out = ArrayD::<f64>::zeros(IxDyn(&new_shape));
    let alpha = alpha.to_vec();
    let old_dims: Vec<usize> = coeff.shape().to_vec();
    out.slice_each_axis_mut(|ax| {
        let a = alpha[ax.axis.index()] as isize;
        let d = old_dims[ax.axis.index()] as isize;
        ndarray::Slice::from(a..a + d)
    })
    .assign(coeff);
    out
}

/// Multiplies a Chebyshev coefficient tensor by `T_k(x_axis)`, growing the
/// given axis's length by `k`, using `2 T_a T_b = T_{a+b} + T_{|a-b|}`
/// applied to every 1-D lane along that axis.
fn chebyshev_axis_mult(coeff: &ArrayD<f64>, axis: usize, k: usize) -> ArrayD<f64> {
    use ndarray::Axis;
    let old_len = coeff.shape()[axis];
    let new_len = old_len + k;
    let mut new_shape = coeff.shape().to_vec();
    new_shape[axis] = new_len;
    let mut out = ArrayD::<f64>::zeros(IxDyn(&new_shape));

    for (lane_in, mut lane_out) in coeff
        .lanes(Axis(axis))
        .into_iter()
        .zip(out.lanes_mut(Axis(axis)))
    {
        for (j, &cj) in lane_in.iter().enumerate() {
            if cj == 0.0 {
                continue;
            }
            let half = 0.5 * cj;
            lane_out[j + k] += half;
            let diff = if j >= k { j - k } else { k - j };
            lane_out[diff] += half;
        }
    }
    out
}

/// Values `T_0(z), ..., T_{len-1}(z)` via the three-term recurrence.
fn chebyshev_table(z: Complex64, len: usize) -> Vec<Complex64> {
    let mut t = Vec::with_capacity(len);
    if len == 0 {
        return t;
    }
    t.push(Complex64::new(1.0, 0.0));
    if len > 1 {
        t.push(z);
    }
    for i in 2..len {
        let next = 2.0 * z * t[i - 1] - t[i - 2];
        t.push(next);
    }
    t
}
