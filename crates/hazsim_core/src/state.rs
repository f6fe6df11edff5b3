use serde::Serialize;

/// Number of coupled state variables in the scenario model.
pub const STATE_DIM: usize = 15;

/// The 15 quantities describing the simulated scenario at a given time.
///
/// Discriminants are the positions in the state vector (L1 is index 0),
/// which is also the column order of the trajectory matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StateVar {
    /// L1: time left until the spill has fully evaporated.
    EvaporationTime = 0,
    /// L2: time left until cleanup of the release is complete.
    CleanupTime,
    /// L3: area currently contaminated.
    ContaminatedArea,
    /// L4: time until the toxic cloud reaches the populated zone.
    CloudArrivalTime,
    /// L5: casualties from the primary cloud.
    PrimaryCloudLosses,
    /// L6: casualties from the secondary cloud.
    SecondaryCloudLosses,
    /// L7: casualties receiving outpatient care.
    OutpatientCasualties,
    /// L8: casualties placed in hospital.
    HospitalizedCasualties,
    /// L9: equipment put out of action.
    DisabledEquipment,
    /// L10: stock of terrain-decontamination solutions.
    DeconSolutionStock,
    /// L11: forces and assets committed to rescue work.
    RescueForces,
    /// L12: effectiveness of the public alert system.
    AlertCoverage,
    /// L13: people inside the affected zone.
    PeopleInZone,
    /// L14: rescuers inside the affected zone.
    RescuersInZone,
    /// L15: overall readiness of the emergency-response service.
    ServiceReadiness,
}

impl StateVar {
    /// All variables in state-vector order.
    pub const ALL: [StateVar; STATE_DIM] = [
        StateVar::EvaporationTime,
        StateVar::CleanupTime,
        StateVar::ContaminatedArea,
        StateVar::CloudArrivalTime,
        StateVar::PrimaryCloudLosses,
        StateVar::SecondaryCloudLosses,
        StateVar::OutpatientCasualties,
        StateVar::HospitalizedCasualties,
        StateVar::DisabledEquipment,
        StateVar::DeconSolutionStock,
        StateVar::RescueForces,
        StateVar::AlertCoverage,
        StateVar::PeopleInZone,
        StateVar::RescuersInZone,
        StateVar::ServiceReadiness,
    ];

    /// Position of this variable in the state vector.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label for chart legends and reports.
    pub fn label(self) -> &'static str {
        match self {
            StateVar::EvaporationTime => "Evaporation time",
            StateVar::CleanupTime => "Cleanup time",
            StateVar::ContaminatedArea => "Contaminated area",
            StateVar::CloudArrivalTime => "Cloud arrival time",
            StateVar::PrimaryCloudLosses => "Primary cloud losses",
            StateVar::SecondaryCloudLosses => "Secondary cloud losses",
            StateVar::OutpatientCasualties => "Outpatient casualties",
            StateVar::HospitalizedCasualties => "Hospitalized casualties",
            StateVar::DisabledEquipment => "Disabled equipment",
            StateVar::DeconSolutionStock => "Decontamination solution stock",
            StateVar::RescueForces => "Rescue forces and assets",
            StateVar::AlertCoverage => "Alert system effectiveness",
            StateVar::PeopleInZone => "People in affected zone",
            StateVar::RescuersInZone => "Rescuers in affected zone",
            StateVar::ServiceReadiness => "Response service readiness",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StateVar, STATE_DIM};

    #[test]
    fn all_is_in_index_order() {
        for (i, var) in StateVar::ALL.iter().enumerate() {
            assert_eq!(var.index(), i);
        }
        assert_eq!(StateVar::ALL.len(), STATE_DIM);
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels: Vec<_> = StateVar::ALL.iter().map(|v| v.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), STATE_DIM);
    }
}
