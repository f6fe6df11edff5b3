use std::fmt;

use thiserror::Error;

/// Which of the two function tables a count mismatch refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Rate,
    Disturbance,
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionKind::Rate => write!(f, "rate"),
            FunctionKind::Disturbance => write!(f, "disturbance"),
        }
    }
}

/// Errors raised while building or running a scenario model.
///
/// Every variant is terminal for the request that triggered it; the core
/// never retries on its own.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A coefficient set has a length outside {2, 3, 4}.
    #[error("unsupported coefficient count {count}: a polynomial takes 2, 3, or 4 coefficients")]
    UnsupportedDegree { count: usize },

    /// The rate or disturbance table does not hold the fixed number of entries.
    #[error("expected exactly {expected} {kind} functions, got {actual}")]
    FunctionCountMismatch {
        kind: FunctionKind,
        expected: usize,
        actual: usize,
    },

    /// The adaptive solver diverged, starved its step size, or ran out of
    /// its step budget. No partial trajectory is returned.
    #[error("integration failed at t = {t}: {reason}")]
    Integration { t: f64, reason: String },

    /// An input vector does not match the state dimension.
    #[error("{what} must have length {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The reporting grid is too short or not strictly increasing.
    #[error("invalid time grid: {0}")]
    InvalidTimeGrid(&'static str),

    /// A solver setting (tolerance, step bound, budget) is unusable.
    #[error("invalid solver configuration: {0}")]
    InvalidSolverConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, ModelError>;
