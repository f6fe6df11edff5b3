use crate::bank::FunctionBank;
use crate::state::STATE_DIM;
use crate::traits::DynamicalSystem;
use crate::wiring::{
    ProductTerm, ALERT_DEGRADATION, ALERT_EXPANSION, AREA_DECONTAMINATION, AREA_SPREAD,
    CLEANUP_DEMAND, CLEANUP_PROGRESS, CLOUD_TRAVEL, DECON_PRODUCTION, EQUIPMENT_DAMAGE,
    EQUIPMENT_RECOVERY, EVACUATION, EVAPORATION_SUPPRESSION, FORCE_ATTRITION, FORCE_MOBILIZATION,
    HOSPITAL_INTAKE, OUTPATIENT_INTAKE, PRIMARY_EXPOSURE, READINESS_GROWTH, RESCUER_DEPLOYMENT,
    SECONDARY_MITIGATION,
};

/// The 15-equation hazardous-release response model.
///
/// A pure function of `(t, state)`: every call evaluates the wired rate
/// and disturbance polynomials and combines them into the derivative
/// vector. The sign structure follows the model definition literally: in
/// several equations the negation wraps only the first bracketed product
/// while the trailing disturbances stay positive (e.g. dL2). That grouping
/// is part of the model, not an error, and must not be "fixed".
#[derive(Debug)]
pub struct ScenarioDynamics {
    bank: FunctionBank,
}

impl ScenarioDynamics {
    pub fn new(bank: FunctionBank) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &FunctionBank {
        &self.bank
    }

    /// Product of one wired rate-function group at the current state.
    ///
    /// Slot indices never go out of range: the bank holds exactly 55 rate
    /// functions and the wiring schema is verified to tile 0..55.
    fn product(&self, term: ProductTerm, x: &[f64]) -> f64 {
        term.args
            .iter()
            .enumerate()
            .map(|(k, var)| self.bank.rate(term.base + k).eval(x[var.index()]))
            .product()
    }
}

impl DynamicalSystem for ScenarioDynamics {
    fn dimension(&self) -> usize {
        STATE_DIM
    }

    fn apply(&self, t: f64, x: &[f64], out: &mut [f64]) {
        let q1 = self.bank.disturbance(0).eval(t);
        let q2 = self.bank.disturbance(1).eval(t);
        let q3 = self.bank.disturbance(2).eval(t);
        let q4 = self.bank.disturbance(3).eval(t);

        let p = |term: ProductTerm| self.product(term, x);

        // dL1..dL15 in state-vector order.
        out[0] = -p(EVAPORATION_SUPPRESSION);
        out[1] = p(CLEANUP_DEMAND) - (p(CLEANUP_PROGRESS) * q1 + q2 + q3 + q4);
        out[2] = p(AREA_SPREAD) - (p(AREA_DECONTAMINATION) * q1 + q3 + q4);
        out[3] = p(CLOUD_TRAVEL);
        out[4] = p(PRIMARY_EXPOSURE) * q2 - q1;
        out[5] = q2 - p(SECONDARY_MITIGATION) * q1;
        out[6] = p(OUTPATIENT_INTAKE) * q1 + q2 + q3;
        out[7] = p(HOSPITAL_INTAKE) * q1 + q2 + q3;
        out[8] = p(EQUIPMENT_DAMAGE) * q2 - p(EQUIPMENT_RECOVERY) * q1;
        out[9] = p(DECON_PRODUCTION) * q1 + q2 + q3 + q4;
        out[10] = p(FORCE_MOBILIZATION) * q1 + q3 - p(FORCE_ATTRITION) * q4;
        out[11] = p(ALERT_EXPANSION) * q1 + q2 + q3 - p(ALERT_DEGRADATION);
        out[12] = p(EVACUATION) * q2;
        out[13] = p(RESCUER_DEPLOYMENT) * q1 + q2;
        out[14] = p(READINESS_GROWTH) * q1 + q2;
    }
}

#[cfg(test)]
mod tests {
    use super::ScenarioDynamics;
    use crate::bank::FunctionBank;
    use crate::state::STATE_DIM;
    use crate::traits::DynamicalSystem;
    use crate::wiring::{DISTURBANCE_FUNCTION_COUNT, RATE_FUNCTION_COUNT};

    /// Every rate function is the identity, disturbances are the given
    /// constants. Makes each equation reduce to plain products of state
    /// components, so expected values can be computed by hand.
    fn identity_dynamics(q: [f64; DISTURBANCE_FUNCTION_COUNT]) -> ScenarioDynamics {
        let rates = vec![vec![0.0, 1.0]; RATE_FUNCTION_COUNT];
        let disturbances: Vec<Vec<f64>> = q.iter().map(|&c| vec![c, 0.0]).collect();
        ScenarioDynamics::new(FunctionBank::new(&rates, &disturbances).unwrap())
    }

    #[test]
    fn reproduces_the_equation_table() {
        let dynamics = identity_dynamics([2.0, 3.0, 5.0, 7.0]);
        // L1..L15 = 1..15, all integers so every product is exact in f64.
        let x: Vec<f64> = (1..=STATE_DIM).map(|i| i as f64).collect();
        let mut out = [0.0; STATE_DIM];
        dynamics.apply(0.0, &x, &mut out);

        let expected = [
            -1540.0,     // -(10·11·14)
            -26559.0,    // 3·7·8·9·13 - (10·11·14·15·2 + 3 + 5 + 7)
            -41.0,       // 1 - (15·2 + 5 + 7)
            1.0,         // L1
            1.0,         // 1·3 - 2
            -14781.0,    // 3 - 4·11·12·14·2
            11708.0,     // 5·6·13·15·2 + 3 + 5
            1801808.0,   // 5·6·11·13·14·15·2 + 3 + 5
            -2963.0,     // 3·13·3 - 10·11·14·2
            825.0,       // 3·9·15·2 + 3 + 5 + 7
            992.0,       // 3·13·14·2 + 5 - 15·7
            3997.0,      // 11·13·14·2 + 3 + 5 - 15
            18.0,        // 2·3·3
            3435.0,      // 11·12·13·2 + 3
            2187.0,      // 2·3·13·14·2 + 3
        ];
        assert_eq!(out, expected);
    }

    #[test]
    fn derivative_is_pure() {
        let dynamics = identity_dynamics([0.5, -1.25, 2.0, 0.75]);
        let x: Vec<f64> = (0..STATE_DIM).map(|i| 0.1 + 0.37 * i as f64).collect();
        let mut first = [0.0; STATE_DIM];
        let mut second = [0.0; STATE_DIM];
        dynamics.apply(0.42, &x, &mut first);
        dynamics.apply(0.42, &x, &mut second);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn zero_coefficients_give_zero_derivative() {
        let rates = vec![vec![0.0, 0.0]; RATE_FUNCTION_COUNT];
        let disturbances = vec![vec![0.0, 0.0]; DISTURBANCE_FUNCTION_COUNT];
        let dynamics = ScenarioDynamics::new(FunctionBank::new(&rates, &disturbances).unwrap());
        let x = [3.0; STATE_DIM];
        let mut out = [1.0; STATE_DIM];
        dynamics.apply(10.0, &x, &mut out);
        assert_eq!(out, [0.0; STATE_DIM]);
    }
}
