//! Polynomial arithmetic over a backend scalar field.
//!
//! Polynomials are kept in coefficient form, ascending order, with trailing
//! zero coefficients always trimmed. The degree of the zero polynomial is the
//! "minus infinity" sentinel, modeled as `None` so it can never collide with
//! a real degree in `0..threshold`.
//!
//! # Example
//!
//! ```rust
//! use quorus::arith::{Backend, Polynomial, RistrettoBackend, Scalar};
//!
//! type S = <RistrettoBackend as Backend>::Scalar;
//!
//! // p(x) = 1 + 2x + 3x^2
//! let p = Polynomial::new(vec![S::from_u64(1), S::from_u64(2), S::from_u64(3)]);
//! assert_eq!(p.degree(), Some(2));
//! assert_eq!(p.evaluate(&S::from_u64(2)), S::from_u64(17));
//! ```

use rand_core::{CryptoRng, RngCore};

use super::Scalar;

/// Univariate polynomial with trimmed coefficients.
///
/// Two polynomials over the same scalar field are equal iff their trimmed
/// coefficient vectors are equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial<S: Scalar> {
    coeffs: Vec<S>,
}

impl<S: Scalar> Polynomial<S> {
    /// Builds a polynomial, trimming trailing zero coefficients.
    pub fn new(mut coeffs: Vec<S>) -> Self {
        while coeffs.last() == Some(&S::zero()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The constant polynomial `c`.
    pub fn constant(c: S) -> Self {
        Self::new(vec![c])
    }

    /// Draws `degree + 1` uniform coefficients.
    ///
    /// The result has degree at most `degree`; with negligible probability the
    /// uniform leading coefficient is zero and trimming lowers it.
    pub fn random<R: RngCore + CryptoRng>(degree: usize, rng: &mut R) -> Self {
        let coeffs = (0..=degree).map(|_| S::random(rng)).collect();
        Self::new(coeffs)
    }

    /// Coefficients in ascending order, constant term first.
    pub fn coeffs(&self) -> &[S] {
        &self.coeffs
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Evaluates at `x` via Horner's method.
    pub fn evaluate(&self, x: &S) -> S {
        self.coeffs
            .iter()
            .rev()
            .fold(S::zero(), |acc, c| acc * *x + *c)
    }

    /// Coefficient-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        let (longer, shorter) = if self.coeffs.len() >= other.coeffs.len() {
            (&self.coeffs, &other.coeffs)
        } else {
            (&other.coeffs, &self.coeffs)
        };
        let mut coeffs = longer.clone();
        for (acc, c) in coeffs.iter_mut().zip(shorter.iter()) {
            *acc = *acc + *c;
        }
        Self::new(coeffs)
    }

    /// Convolution product.
    pub fn mul(&self, other: &Self) -> Self {
        if self.coeffs.is_empty() || other.coeffs.is_empty() {
            return Self::zero();
        }
        let mut coeffs = vec![S::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] = coeffs[i + j] + *a * *b;
            }
        }
        Self::new(coeffs)
    }

    /// Multiplies every coefficient by `k`.
    pub fn scalar_mul(&self, k: &S) -> Self {
        Self::new(self.coeffs.iter().map(|c| *c * *k).collect())
    }
}

#[cfg(test)]
#[cfg(feature = "ristretto")]
mod tests {
    use super::*;
    use crate::arith::{Backend, RistrettoBackend};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type S = <RistrettoBackend as Backend>::Scalar;

    fn poly(values: &[u64]) -> Polynomial<S> {
        Polynomial::new(values.iter().map(|&v| S::from_u64(v)).collect())
    }

    #[test]
    fn trailing_zeros_are_trimmed() {
        let p = Polynomial::new(vec![S::from_u64(5), S::zero(), S::zero()]);
        assert_eq!(p.degree(), Some(0));
        assert_eq!(p, poly(&[5]));
    }

    #[test]
    fn zero_polynomial_degree_sentinel() {
        assert_eq!(Polynomial::<S>::zero().degree(), None);
        assert_eq!(Polynomial::new(vec![S::zero()]).degree(), None);
        assert_ne!(Polynomial::<S>::zero().degree(), Some(0));
    }

    #[test]
    fn addition_cancels_leading_terms() {
        // (1 + x^2) + (2 - x^2) = 3
        let a = poly(&[1, 0, 1]);
        let b = Polynomial::new(vec![S::from_u64(2), S::zero(), -S::one()]);
        let sum = a.add(&b);
        assert_eq!(sum, poly(&[3]));
        assert_eq!(sum.degree(), Some(0));
    }

    #[test]
    fn convolution_product() {
        // (1 + x)(1 + x) = 1 + 2x + x^2
        let p = poly(&[1, 1]);
        assert_eq!(p.mul(&p), poly(&[1, 2, 1]));
        assert_eq!(p.mul(&Polynomial::zero()), Polynomial::zero());
    }

    #[test]
    fn horner_evaluation() {
        let p = poly(&[3, 0, 2]); // 3 + 2x^2
        assert_eq!(p.evaluate(&S::from_u64(4)), S::from_u64(35));
        assert_eq!(p.evaluate(&S::zero()), S::from_u64(3));
    }

    #[test]
    fn random_polynomial_has_requested_size() {
        let mut rng = StdRng::seed_from_u64(11);
        let p = Polynomial::<S>::random(4, &mut rng);
        assert_eq!(p.degree(), Some(4), "uniform leading coefficient");
    }

    #[test]
    fn scalar_multiplication_distributes() {
        let mut rng = StdRng::seed_from_u64(12);
        let p = Polynomial::<S>::random(3, &mut rng);
        let k = S::from_u64(7);
        let x = S::random(&mut rng);
        assert_eq!(p.scalar_mul(&k).evaluate(&x), p.evaluate(&x) * k);
    }
}
