use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::ScenarioModel;

/// Scenario definition as submitted by the hosting layer.
///
/// Field spelling matches the form the web front end posts
/// (`startValues`, `maxValues`, `coefs`, `qcoefs`, `normValues`), so a
/// host can deserialize the request body straight into this record. The
/// core does not interpret the persisted category labels; it only needs
/// the coefficient arrays in wiring order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDefinition {
    /// Initial values of L1..L15.
    pub start_values: Vec<f64>,
    /// Reference ceilings for L1..L15, passed through for visualization.
    pub max_values: Vec<f64>,
    /// The 55 rate-function coefficient sets, in wiring order.
    pub coefs: Vec<Vec<f64>>,
    /// The 4 disturbance-function coefficient sets.
    pub qcoefs: Vec<Vec<f64>>,
    /// Optional normalization vector, passed through like `max_values`.
    #[serde(default)]
    pub norm_values: Option<Vec<f64>>,
}

impl ScenarioDefinition {
    /// Validates the definition and assembles a runnable model.
    pub fn into_model(self) -> Result<ScenarioModel> {
        let model = ScenarioModel::new(
            &self.coefs,
            &self.qcoefs,
            self.start_values,
            self.max_values,
        )?;
        match self.norm_values {
            Some(norms) => model.with_norm_values(norms),
            None => Ok(model),
        }
    }
}
