use crate::error::{FunctionKind, ModelError, Result};
use crate::polynomial::Polynomial;
use crate::wiring::{DISTURBANCE_FUNCTION_COUNT, RATE_FUNCTION_COUNT};

/// The two ordered polynomial tables the equation system draws from:
/// 55 rate functions of state variables and 4 disturbance functions of time.
///
/// Both tables are immutable after construction, so a bank can be shared
/// freely across concurrent simulation requests.
#[derive(Debug, Clone)]
pub struct FunctionBank {
    rates: Vec<Polynomial>,
    disturbances: Vec<Polynomial>,
}

impl FunctionBank {
    /// Builds the bank from raw coefficient sets in wiring order.
    ///
    /// Fails with [`ModelError::FunctionCountMismatch`] unless exactly
    /// 55 rate and 4 disturbance sets are supplied, and propagates
    /// [`ModelError::UnsupportedDegree`] from any malformed set. The count
    /// check runs first so a truncated coefficient file cannot shift every
    /// later function onto the wrong equation.
    pub fn new(rate_sets: &[Vec<f64>], disturbance_sets: &[Vec<f64>]) -> Result<Self> {
        if rate_sets.len() != RATE_FUNCTION_COUNT {
            return Err(ModelError::FunctionCountMismatch {
                kind: FunctionKind::Rate,
                expected: RATE_FUNCTION_COUNT,
                actual: rate_sets.len(),
            });
        }
        if disturbance_sets.len() != DISTURBANCE_FUNCTION_COUNT {
            return Err(ModelError::FunctionCountMismatch {
                kind: FunctionKind::Disturbance,
                expected: DISTURBANCE_FUNCTION_COUNT,
                actual: disturbance_sets.len(),
            });
        }

        let rates = rate_sets
            .iter()
            .map(|set| Polynomial::new(set))
            .collect::<Result<Vec<_>>>()?;
        let disturbances = disturbance_sets
            .iter()
            .map(|set| Polynomial::new(set))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rates,
            disturbances,
        })
    }

    /// Rate function at slot `i` (0..55).
    pub fn rate(&self, i: usize) -> &Polynomial {
        &self.rates[i]
    }

    /// Disturbance function `q(i+1)` (0..4).
    pub fn disturbance(&self, i: usize) -> &Polynomial {
        &self.disturbances[i]
    }
}

#[cfg(test)]
mod tests {
    use super::FunctionBank;
    use crate::error::{FunctionKind, ModelError};
    use crate::wiring::{DISTURBANCE_FUNCTION_COUNT, RATE_FUNCTION_COUNT};

    fn linear_sets(n: usize) -> Vec<Vec<f64>> {
        (0..n).map(|i| vec![i as f64, 1.0]).collect()
    }

    #[test]
    fn builds_from_exact_counts() {
        let bank = FunctionBank::new(
            &linear_sets(RATE_FUNCTION_COUNT),
            &linear_sets(DISTURBANCE_FUNCTION_COUNT),
        )
        .unwrap();
        assert_eq!(bank.rate(54).coefficients(), &[54.0, 1.0]);
        assert_eq!(bank.disturbance(3).coefficients(), &[3.0, 1.0]);
    }

    #[test]
    fn rejects_short_rate_table() {
        let err = FunctionBank::new(
            &linear_sets(RATE_FUNCTION_COUNT - 1),
            &linear_sets(DISTURBANCE_FUNCTION_COUNT),
        )
        .unwrap_err();
        match err {
            ModelError::FunctionCountMismatch {
                kind,
                expected,
                actual,
            } => {
                assert_eq!(kind, FunctionKind::Rate);
                assert_eq!(expected, RATE_FUNCTION_COUNT);
                assert_eq!(actual, RATE_FUNCTION_COUNT - 1);
            }
            other => panic!("expected FunctionCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_disturbance_count() {
        let err = FunctionBank::new(
            &linear_sets(RATE_FUNCTION_COUNT),
            &linear_sets(DISTURBANCE_FUNCTION_COUNT + 1),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ModelError::FunctionCountMismatch {
                kind: FunctionKind::Disturbance,
                ..
            }
        ));
    }

    #[test]
    fn propagates_unsupported_degree() {
        let mut rates = linear_sets(RATE_FUNCTION_COUNT);
        rates[17] = vec![1.0];
        let err =
            FunctionBank::new(&rates, &linear_sets(DISTURBANCE_FUNCTION_COUNT)).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedDegree { count: 1 }));
    }
}
