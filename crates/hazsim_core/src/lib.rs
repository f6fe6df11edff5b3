//! The `hazsim_core` crate is the computational engine of the hazsim
//! disaster-response simulator: 15 coupled nonlinear ODEs whose right-hand
//! sides are assembled from 55 polynomial rate functions of the state and
//! 4 polynomial disturbance functions of time.
//!
//! Key components:
//! - **Polynomial / FunctionBank**: typed evaluators built from raw
//!   coefficient sets, with strict degree and count validation.
//! - **Wiring**: named binding of every rate-function slot to its equation
//!   and argument, checked at compile time against the model schema.
//! - **ScenarioDynamics**: the pure derivative function implementing the
//!   [`traits::DynamicalSystem`] seam.
//! - **Solver**: an adaptive Dormand–Prince 5(4) driver with explicit,
//!   reproducible tolerances that reports exactly at the caller's grid.
//! - **ScenarioModel / ScenarioDefinition**: the request-level boundary a
//!   host feeds coefficient arrays into and receives a trajectory from.

pub mod bank;
pub mod error;
pub mod input;
pub mod model;
pub mod polynomial;
pub mod scenario;
pub mod solver;
pub mod state;
pub mod traits;
pub mod wiring;
