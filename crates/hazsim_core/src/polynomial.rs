use crate::error::{ModelError, Result};

/// Fewest coefficients a rate/disturbance polynomial may carry (linear).
pub const MIN_COEFFICIENTS: usize = 2;
/// Most coefficients a rate/disturbance polynomial may carry (cubic).
pub const MAX_COEFFICIENTS: usize = 4;

/// A scalar polynomial `f(x) = c0 + c1·x + c2·x² + c3·x³` of degree 1–3.
///
/// The degree is fixed by the number of coefficients supplied at
/// construction; the coefficients never change afterwards. Evaluation uses
/// Horner's scheme, so linear, quadratic, and cubic inputs all go through
/// the same code path.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Builds a polynomial from its coefficients in ascending-power order.
    ///
    /// Fails with [`ModelError::UnsupportedDegree`] unless 2, 3, or 4
    /// coefficients are given.
    pub fn new(coefficients: &[f64]) -> Result<Self> {
        if !(MIN_COEFFICIENTS..=MAX_COEFFICIENTS).contains(&coefficients.len()) {
            return Err(ModelError::UnsupportedDegree {
                count: coefficients.len(),
            });
        }
        Ok(Self {
            coefficients: coefficients.to_vec(),
        })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Evaluates the polynomial at `x` (Horner's scheme).
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }
}
