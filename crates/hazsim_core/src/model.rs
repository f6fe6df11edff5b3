use crate::bank::FunctionBank;
use crate::error::{ModelError, Result};
use crate::scenario::ScenarioDynamics;
use crate::solver::{integrate, SolverConfig, Trajectory};
use crate::state::STATE_DIM;

/// One fully assembled simulation request: the wired equation system plus
/// the initial state and the reference vectors the host carries alongside.
///
/// Owns no shared state; build one per request and run them in parallel
/// freely.
#[derive(Debug)]
pub struct ScenarioModel {
    dynamics: ScenarioDynamics,
    initial_state: Vec<f64>,
    max_values: Vec<f64>,
    norm_values: Option<Vec<f64>>,
}

/// Result of one integration run. `max_values` (and `norm_values`, when
/// supplied) pass through untouched: they exist for downstream
/// comparison and chart scaling, never for the equations themselves.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub trajectory: Trajectory,
    pub max_values: Vec<f64>,
    pub norm_values: Option<Vec<f64>>,
}

fn check_dim(what: &'static str, values: &[f64]) -> Result<()> {
    if values.len() != STATE_DIM {
        return Err(ModelError::DimensionMismatch {
            what,
            expected: STATE_DIM,
            actual: values.len(),
        });
    }
    Ok(())
}

impl ScenarioModel {
    /// Builds a model from raw coefficient sets (in wiring order) and the
    /// 15-element initial-state and max-value vectors.
    pub fn new(
        rate_sets: &[Vec<f64>],
        disturbance_sets: &[Vec<f64>],
        initial_state: Vec<f64>,
        max_values: Vec<f64>,
    ) -> Result<Self> {
        check_dim("initial state", &initial_state)?;
        check_dim("max values", &max_values)?;
        let bank = FunctionBank::new(rate_sets, disturbance_sets)?;
        Ok(Self {
            dynamics: ScenarioDynamics::new(bank),
            initial_state,
            max_values,
            norm_values: None,
        })
    }

    /// Attaches the optional normalization vector the host form carries.
    pub fn with_norm_values(mut self, norm_values: Vec<f64>) -> Result<Self> {
        check_dim("norm values", &norm_values)?;
        self.norm_values = Some(norm_values);
        Ok(self)
    }

    pub fn dynamics(&self) -> &ScenarioDynamics {
        &self.dynamics
    }

    pub fn initial_state(&self) -> &[f64] {
        &self.initial_state
    }

    pub fn max_values(&self) -> &[f64] {
        &self.max_values
    }

    /// Integrates the scenario over `grid`, returning the trajectory and
    /// the pass-through reference vectors.
    pub fn simulate(&self, grid: &[f64], config: &SolverConfig) -> Result<SimulationRun> {
        let trajectory = integrate(&self.dynamics, &self.initial_state, grid, config)?;
        Ok(SimulationRun {
            trajectory,
            max_values: self.max_values.clone(),
            norm_values: self.norm_values.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ScenarioModel;
    use crate::error::ModelError;
    use crate::solver::{uniform_grid, SolverConfig};
    use crate::state::STATE_DIM;
    use crate::wiring::{DISTURBANCE_FUNCTION_COUNT, RATE_FUNCTION_COUNT};

    fn coefficient_sets(rate: Vec<f64>, disturbance: Vec<f64>) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (
            vec![rate; RATE_FUNCTION_COUNT],
            vec![disturbance; DISTURBANCE_FUNCTION_COUNT],
        )
    }

    #[test]
    fn zero_model_stays_at_zero() {
        let (rates, qs) = coefficient_sets(vec![0.0, 0.0], vec![0.0, 0.0]);
        let model =
            ScenarioModel::new(&rates, &qs, vec![0.0; STATE_DIM], vec![1.0; STATE_DIM]).unwrap();
        let run = model
            .simulate(&uniform_grid(0.0, 1.0, 11), &SolverConfig::default())
            .unwrap();
        assert_eq!(run.trajectory.len(), 11);
        assert!(run.trajectory.states().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn trajectory_shape_matches_grid_and_state() {
        let (rates, qs) = coefficient_sets(vec![0.01, 0.0], vec![0.02, 0.0]);
        let model = ScenarioModel::new(
            &rates,
            &qs,
            vec![0.5; STATE_DIM],
            (1..=STATE_DIM).map(|i| i as f64).collect(),
        )
        .unwrap();
        let grid = uniform_grid(0.0, 1.0, 11);
        let run = model.simulate(&grid, &SolverConfig::default()).unwrap();
        assert_eq!(run.trajectory.states().nrows(), 11);
        assert_eq!(run.trajectory.dimension(), STATE_DIM);
        assert_eq!(run.trajectory.times(), &grid[..]);
        // Reference vector passes through untouched.
        assert_eq!(run.max_values[14], 15.0);
    }

    #[test]
    fn norm_values_pass_through_when_supplied() {
        let (rates, qs) = coefficient_sets(vec![0.0, 0.0], vec![0.0, 0.0]);
        let norms: Vec<f64> = vec![100.0; STATE_DIM];
        let model =
            ScenarioModel::new(&rates, &qs, vec![0.0; STATE_DIM], vec![1.0; STATE_DIM])
                .unwrap()
                .with_norm_values(norms.clone())
                .unwrap();
        let run = model
            .simulate(&[0.0, 1.0], &SolverConfig::default())
            .unwrap();
        assert_eq!(run.norm_values.as_deref(), Some(&norms[..]));
    }

    #[test]
    fn model_is_debug_printable() {
        // Error-path asserts rely on `Result<ScenarioModel>::unwrap_err`,
        // which needs the Ok type to be Debug.
        let (rates, qs) = coefficient_sets(vec![0.0, 0.0], vec![0.0, 0.0]);
        let model =
            ScenarioModel::new(&rates, &qs, vec![0.0; STATE_DIM], vec![1.0; STATE_DIM]).unwrap();
        let rendered = format!("{model:?}");
        assert!(rendered.contains("ScenarioModel"));
        assert!(format!("{:?}", model.dynamics()).contains("ScenarioDynamics"));
    }

    #[test]
    fn rejects_short_initial_state() {
        let (rates, qs) = coefficient_sets(vec![0.0, 0.0], vec![0.0, 0.0]);
        let err = ScenarioModel::new(&rates, &qs, vec![0.0; 14], vec![1.0; STATE_DIM]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::DimensionMismatch {
                what: "initial state",
                expected: 15,
                actual: 14,
            }
        ));
    }

    #[test]
    fn runaway_feedback_fails_with_integration_error() {
        // Cubic rate functions under constant q2 forcing set up mutual
        // positive feedback (dL2 grows with L13^3, dL13 with L2^3), which
        // blows up in finite time well inside the grid.
        let rates = vec![vec![0.0, 0.0, 0.0, 1.0]; RATE_FUNCTION_COUNT];
        let mut qs = vec![vec![0.0, 0.0]; DISTURBANCE_FUNCTION_COUNT];
        qs[1] = vec![1.0, 0.0];
        let model =
            ScenarioModel::new(&rates, &qs, vec![2.0; STATE_DIM], vec![1.0; STATE_DIM]).unwrap();
        let err = model
            .simulate(&[0.0, 1.0], &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, ModelError::Integration { .. }));
    }
}
