//! Adaptive Dormand–Prince 5(4) integration driver.
//!
//! Steps are chosen by the embedded error estimate but always clamped to
//! land exactly on the next reporting-grid point, so the returned
//! trajectory has one row per requested time regardless of the internal
//! step sequence. All tolerances are explicit configuration: two runs with
//! the same inputs and the same [`SolverConfig`] produce the same
//! trajectory.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::state::StateVar;
use crate::traits::DynamicalSystem;

/// Adaptive step control settings.
///
/// Defaults are fixed here rather than inherited from any library so that
/// trajectories are reproducible across versions: rtol 1e-6, atol 1e-9,
/// automatic initial step (span / 1000), minimum step 1e-14, at most
/// 100 000 attempted steps per integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Relative tolerance on the embedded error estimate.
    pub rtol: f64,
    /// Absolute tolerance on the embedded error estimate.
    pub atol: f64,
    /// First attempted step size; 0.0 selects span / 1000.
    pub initial_step: f64,
    /// Smallest step the controller may take before the run is abandoned.
    pub min_step: f64,
    /// Budget of attempted (accepted or rejected) steps for the whole run.
    pub max_steps: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-9,
            initial_step: 0.0,
            min_step: 1e-14,
            max_steps: 100_000,
        }
    }
}

impl SolverConfig {
    fn validate(&self) -> Result<()> {
        if !self.rtol.is_finite() || self.rtol <= 0.0 {
            return Err(ModelError::InvalidSolverConfig("rtol must be finite and > 0"));
        }
        if !self.atol.is_finite() || self.atol <= 0.0 {
            return Err(ModelError::InvalidSolverConfig("atol must be finite and > 0"));
        }
        if !(self.min_step.is_finite() && self.min_step > 0.0) {
            return Err(ModelError::InvalidSolverConfig("min_step must be finite and > 0"));
        }
        if self.max_steps == 0 {
            return Err(ModelError::InvalidSolverConfig("max_steps must be > 0"));
        }
        Ok(())
    }

    fn first_step(&self, span: f64) -> f64 {
        if self.initial_step > 0.0 {
            self.initial_step.min(span)
        } else {
            (span * 1e-3).max(self.min_step)
        }
    }
}

/// State history of one integration run: one row per reporting-grid point,
/// one column per state variable. Immutable once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    times: Vec<f64>,
    states: DMatrix<f64>,
}

impl Trajectory {
    /// The reporting times, identical to the grid the caller passed in.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of reported time points.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of state columns.
    pub fn dimension(&self) -> usize {
        self.states.ncols()
    }

    /// Full state matrix (rows = time points, columns = state variables).
    pub fn states(&self) -> &DMatrix<f64> {
        &self.states
    }

    /// State vector at reporting point `i`.
    pub fn state_at(&self, i: usize) -> Vec<f64> {
        self.states.row(i).iter().copied().collect()
    }

    /// Time series of one state variable, for plotting.
    pub fn series(&self, var: StateVar) -> Vec<f64> {
        self.states.column(var.index()).iter().copied().collect()
    }
}

/// Uniformly spaced reporting grid over `[start, end]` with `points`
/// entries, matching the host's default `0.0..=1.0` in 11 steps.
pub fn uniform_grid(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let dt = (end - start) / (points - 1) as f64;
            (0..points).map(|i| start + dt * i as f64).collect()
        }
    }
}

fn validate_grid(grid: &[f64]) -> Result<()> {
    if grid.len() < 2 {
        return Err(ModelError::InvalidTimeGrid("need at least 2 time points"));
    }
    if grid.iter().any(|t| !t.is_finite()) {
        return Err(ModelError::InvalidTimeGrid("time points must be finite"));
    }
    if grid.windows(2).any(|w| w[1] <= w[0]) {
        return Err(ModelError::InvalidTimeGrid(
            "time points must be strictly increasing",
        ));
    }
    Ok(())
}

// Dormand–Prince 5(4) tableau.
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th-order weights used to advance the solution (local extrapolation).
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Difference between the 5th- and embedded 4th-order weights.
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// Integrates `system` from `grid[0]` to `grid[last]`, reporting the state
/// at every grid point.
///
/// The grid must be strictly increasing with at least two entries and need
/// not be uniform. On divergence (non-finite state), step-size underflow,
/// or an exhausted step budget the run fails with
/// [`ModelError::Integration`] and no partial trajectory escapes.
pub fn integrate<S: DynamicalSystem>(
    system: &S,
    initial_state: &[f64],
    grid: &[f64],
    config: &SolverConfig,
) -> Result<Trajectory> {
    config.validate()?;
    validate_grid(grid)?;
    let n = system.dimension();
    if initial_state.len() != n {
        return Err(ModelError::DimensionMismatch {
            what: "initial state",
            expected: n,
            actual: initial_state.len(),
        });
    }

    let mut states = DMatrix::zeros(grid.len(), n);
    for (j, &v) in initial_state.iter().enumerate() {
        states[(0, j)] = v;
    }

    let span = grid[grid.len() - 1] - grid[0];
    let mut t = grid[0];
    let mut y = initial_state.to_vec();
    let mut h = config.first_step(span);
    let mut steps_taken = 0usize;

    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut k5 = vec![0.0; n];
    let mut k6 = vec![0.0; n];
    let mut k7 = vec![0.0; n];
    let mut y_tmp = vec![0.0; n];
    let mut y_new = vec![0.0; n];

    system.apply(t, &y, &mut k1);

    for (row, &t_target) in grid.iter().enumerate().skip(1) {
        while t < t_target {
            steps_taken += 1;
            if steps_taken > config.max_steps {
                return Err(ModelError::Integration {
                    t,
                    reason: format!("step budget of {} exhausted", config.max_steps),
                });
            }

            // Clamp so an accepted step lands exactly on the grid point.
            let hits_target = h >= t_target - t;
            let h_step = if hits_target { t_target - t } else { h };

            for i in 0..n {
                y_tmp[i] = y[i] + h_step * (A21 * k1[i]);
            }
            system.apply(t + C2 * h_step, &y_tmp, &mut k2);

            for i in 0..n {
                y_tmp[i] = y[i] + h_step * (A31 * k1[i] + A32 * k2[i]);
            }
            system.apply(t + C3 * h_step, &y_tmp, &mut k3);

            for i in 0..n {
                y_tmp[i] = y[i] + h_step * (A41 * k1[i] + A42 * k2[i] + A43 * k3[i]);
            }
            system.apply(t + C4 * h_step, &y_tmp, &mut k4);

            for i in 0..n {
                y_tmp[i] = y[i]
                    + h_step * (A51 * k1[i] + A52 * k2[i] + A53 * k3[i] + A54 * k4[i]);
            }
            system.apply(t + C5 * h_step, &y_tmp, &mut k5);

            for i in 0..n {
                y_tmp[i] = y[i]
                    + h_step
                        * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
            }
            system.apply(t + h_step, &y_tmp, &mut k6);

            for i in 0..n {
                y_new[i] = y[i]
                    + h_step * (B1 * k1[i] + B3 * k3[i] + B4 * k4[i] + B5 * k5[i] + B6 * k6[i]);
            }
            // FSAL stage: derivative at the candidate end point.
            system.apply(t + h_step, &y_new, &mut k7);

            let mut err_norm = 0.0;
            for i in 0..n {
                let e = h_step
                    * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i]
                        + E7 * k7[i]);
                let scale = config.atol + config.rtol * y[i].abs().max(y_new[i].abs());
                err_norm += (e / scale) * (e / scale);
            }
            err_norm = (err_norm / n as f64).sqrt();

            if !err_norm.is_finite() || y_new.iter().any(|v| !v.is_finite()) {
                return Err(ModelError::Integration {
                    t,
                    reason: "state or error estimate became non-finite (diverging solution)"
                        .to_string(),
                });
            }

            if err_norm <= 1.0 {
                t = if hits_target { t_target } else { t + h_step };
                y.copy_from_slice(&y_new);
                k1.copy_from_slice(&k7);
            } else if h_step <= config.min_step {
                return Err(ModelError::Integration {
                    t,
                    reason: format!(
                        "step size underflow below {} without meeting tolerances",
                        config.min_step
                    ),
                });
            }

            let factor = if err_norm == 0.0 {
                MAX_FACTOR
            } else {
                (SAFETY * err_norm.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
            };
            h = (h_step * factor).max(config.min_step);
        }

        for (j, &v) in y.iter().enumerate() {
            states[(row, j)] = v;
        }
    }

    Ok(Trajectory {
        times: grid.to_vec(),
        states,
    })
}
