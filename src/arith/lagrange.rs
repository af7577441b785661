//! Lagrange interpolation over a backend scalar field.
//!
//! Given `k` samples `(x_j, y_j)` with pairwise distinct abscissas there is a
//! unique polynomial of degree at most `k - 1` through them. This module
//! evaluates that polynomial at arbitrary points (the barycentric form),
//! recovers its full coefficient vector, and exposes the basis weights used
//! by the combiner for exponent-domain reconstruction.
//!
//! Duplicate abscissas make a basis denominator vanish; this surfaces as a
//! failed inversion and is reported as [`Error::Interpolation`].

use super::poly::Polynomial;
use super::Scalar;
use crate::errors::Error;

/// Lagrange basis weights `λ_j(at)` for the abscissa set `xs`.
///
/// `λ_j(at) = ∏_{i≠j} (at - x_i) / (x_j - x_i)`. The weights satisfy
/// `p(at) = Σ_j y_j · λ_j(at)` for any polynomial `p` of degree below
/// `xs.len()` with `p(x_j) = y_j`.
pub fn coefficients<S: Scalar>(xs: &[S], at: &S) -> Result<Vec<S>, Error> {
    if xs.is_empty() {
        return Err(Error::Interpolation("no sample points"));
    }
    xs.iter()
        .enumerate()
        .map(|(j, xj)| {
            let mut numerator = S::one();
            let mut denominator = S::one();
            for (i, xi) in xs.iter().enumerate() {
                if i == j {
                    continue;
                }
                numerator = numerator * (*at - *xi);
                denominator = denominator * (*xj - *xi);
            }
            let inverse = denominator
                .invert()
                .ok_or(Error::Interpolation("duplicate sample abscissas"))?;
            Ok(numerator * inverse)
        })
        .collect()
}

/// Evaluates the interpolating polynomial of `points` at `z`.
///
/// Short-circuits to `y_j` when `z` equals a sample abscissa, guaranteeing
/// exact pass-through without dividing by zero.
pub fn interpolate_at<S: Scalar>(points: &[(S, S)], z: &S) -> Result<S, Error> {
    if let Some((_, y)) = points.iter().find(|(x, _)| x == z) {
        // Still reject degenerate inputs hiding behind the shortcut.
        ensure_distinct(points)?;
        return Ok(*y);
    }
    let xs: Vec<S> = points.iter().map(|(x, _)| *x).collect();
    let weights = coefficients(&xs, z)?;
    Ok(points
        .iter()
        .zip(weights.iter())
        .fold(S::zero(), |acc, ((_, y), w)| acc + *y * *w))
}

/// Recovers the full coefficient vector of the interpolating polynomial.
pub fn interpolate<S: Scalar>(points: &[(S, S)]) -> Result<Polynomial<S>, Error> {
    if points.is_empty() {
        return Err(Error::Interpolation("no sample points"));
    }
    let mut acc = Polynomial::zero();
    for (j, (xj, yj)) in points.iter().enumerate() {
        let mut basis = Polynomial::constant(S::one());
        for (i, (xi, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let inverse = (*xj - *xi)
                .invert()
                .ok_or(Error::Interpolation("duplicate sample abscissas"))?;
            // (x - x_i) / (x_j - x_i)
            basis = basis.mul(&Polynomial::new(vec![-*xi * inverse, inverse]));
        }
        acc = acc.add(&basis.scalar_mul(yj));
    }
    Ok(acc)
}

fn ensure_distinct<S: Scalar>(points: &[(S, S)]) -> Result<(), Error> {
    for (i, (xi, _)) in points.iter().enumerate() {
        if points[i + 1..].iter().any(|(xj, _)| xj == xi) {
            return Err(Error::Interpolation("duplicate sample abscissas"));
        }
    }
    Ok(())
}
