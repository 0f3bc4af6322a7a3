//! Integration tests mirroring the documented test scenarios: paper
//! example in both bases, a univariate quadratic, a triangular
//! multivariate system, and the two rejection paths (non-zero-dimensional
//! ideal, empty variety), plus basis- and method-invariance checks.

use ndarray::array;
use polyroots::{solve, Basis, Error, Method, Polynomial};

fn power(c: ndarray::ArrayD<f64>) -> Polynomial {
    Polynomial::new(c, Basis::Power)
}

fn chebyshev(c: ndarray::ArrayD<f64>) -> Polynomial {
    Polynomial::new(c, Basis::Chebyshev)
}

/// p1(x,y) = y^2 + 3xy - 4x + 1, p2(x,y) = -6xy - 2x^2 + 6y + 3.
fn paper_example_power() -> Vec<Polynomial> {
    let p1 = power(array![[1.0, 0.0, 1.0], [-4.0, 3.0, 0.0]].into_dyn());
    let p2 = power(array![[3.0, 6.0], [0.0, -6.0], [-2.0, 0.0]].into_dyn());
    vec![p1, p2]
}

#[test]
fn paper_example_power_basis_has_four_roots() {
    let polys = paper_example_power();
    let roots = solve(&polys, Method::Mult, false).unwrap();
    assert_eq!(roots.len(), 4);
    for r in &roots {
        for p in &polys {
            assert!(p.evaluate(r).norm() < 1e-8);
        }
    }
}

/// The same system rewritten in the Chebyshev basis via `y^2 = (T_2(y) +
/// T_0(y))/2`, `x^2 = (T_2(x) + T_0(x))/2`, `xy = T_1(x) T_1(y)` — an
/// exact basis change of the power-basis system above, not a different
/// polynomial, so it must have the same four roots.
#[test]
fn paper_example_chebyshev_basis_has_four_roots() {
    let c1 = chebyshev(array![[1.5, 0.0, 0.5], [-4.0, 3.0, 0.0]].into_dyn());
    let c2 = chebyshev(array![[2.0, 6.0], [0.0, -6.0], [-1.0, 0.0]].into_dyn());
    let polys = vec![c1, c2];
    let roots = solve(&polys, Method::Mult, false).unwrap();
    assert_eq!(roots.len(), 4);
    for r in &roots {
        for p in &polys {
            assert!(p.evaluate(r).norm() < 1e-8);
        }
    }
}

#[test]
fn univariate_quadratic_has_closed_form_roots() {
    let f = power(array![2.0, -4.0, 1.0].into_dyn());
    let roots = solve(&[f], Method::Mult, false).unwrap();
    assert_eq!(roots.len(), 2);
    let mut xs: Vec<f64> = roots.iter().map(|r| r[0].re).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let expected = [2.0 - std::f64::consts::SQRT_2, 2.0 + std::f64::consts::SQRT_2];
    for (got, want) in xs.iter().zip(expected.iter()) {
        assert!((got - want).abs() < 1e-8);
    }
}

/// A triangular 3-variable system: `A(x) = x^2 - 1`, `B(x,y) = y^2 - x`,
/// `C(x,y,z) = z^2 - y`, each generator introducing one new variable in
/// terms of the previous. Bezout bound 2*2*2 = 8 roots. `x` alone only
/// takes 2 distinct values across those 8 roots (multiplicity 4 each), so
/// this uses `MultRand` rather than `Mult` to avoid the repeated-eigenvalue
/// degeneracy a single coordinate's action matrix would hit here.
#[test]
fn triangular_three_variable_system_solves_correctly() {
    let mut a = ndarray::ArrayD::<f64>::zeros(ndarray::IxDyn(&[3, 1, 1]));
    a[[0, 0, 0]] = -1.0;
    a[[2, 0, 0]] = 1.0;
    let mut b = ndarray::ArrayD::<f64>::zeros(ndarray::IxDyn(&[2, 3, 1]));
    b[[1, 0, 0]] = -1.0;
    b[[0, 2, 0]] = 1.0;
    let mut c = ndarray::ArrayD::<f64>::zeros(ndarray::IxDyn(&[1, 2, 3]));
    c[[0, 1, 0]] = -1.0;
    c[[0, 0, 2]] = 1.0;
    let polys = vec![power(a), power(b), power(c)];

    let roots = solve(&polys, Method::MultRand, false).unwrap();
    assert!(!roots.is_empty());
    // Filter |r| > 1 outliers as the documented scenario does, then require
    // 95% of what remains to back-substitute within tolerance.
    let kept: Vec<_> = roots
        .iter()
        .filter(|r| r.iter().map(|c| c.norm()).fold(0.0, f64::max) <= 1.0 + 1e-6)
        .collect();
    assert!(!kept.is_empty());
    let passing = kept
        .iter()
        .filter(|r| {
            polys.iter().map(|p| p.evaluate(r).norm()).fold(0.0, f64::max) < 1e-3
        })
        .count();
    assert!(passing as f64 / kept.len() as f64 >= 0.95);
}

#[test]
fn non_zero_dimensional_ideal_is_rejected() {
    let x = power(array![[0.0, 0.0], [1.0, 0.0]].into_dyn());
    let xy = power(array![[0.0, 0.0], [0.0, 1.0]].into_dyn());
    let result = solve(&[x, xy], Method::Mult, false);
    assert!(matches!(result, Err(Error::NotZeroDimensional)));
}

#[test]
fn empty_variety_is_rejected() {
    let one = power(array![1.0].into_dyn());
    let result = solve(&[one], Method::Mult, false);
    assert!(matches!(result, Err(Error::EmptyVariety)));
}

#[test]
fn method_invariance_on_univariate_quadratic() {
    let f = power(array![2.0, -4.0, 1.0].into_dyn());
    let methods = [Method::Mult, Method::MultRand, Method::Div, Method::MSmatrix(1)];
    let mut all_roots: Vec<Vec<f64>> = Vec::new();
    for m in methods {
        let roots = solve(std::slice::from_ref(&f), m, false).unwrap();
        let mut xs: Vec<f64> = roots.iter().map(|r| r[0].re).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        all_roots.push(xs);
    }
    for pair in all_roots.windows(2) {
        assert_eq!(pair[0].len(), pair[1].len());
        for (a, b) in pair[0].iter().zip(pair[1].iter()) {
            assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
        }
    }
}
