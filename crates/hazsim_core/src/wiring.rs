//! Named wiring of the 55 rate functions to the 15 scenario equations.
//!
//! The coefficient input arrives as one flat list whose order is fixed by
//! the model definition. Instead of consuming that list positionally
//! inside the derivative code, every multiplicative group is bound here as
//! a named [`ProductTerm`] with an explicit slot offset. The terms must
//! tile the slot range 0..55 contiguously in declaration order; that is
//! checked at compile time, so a reordered coefficient file can fail the
//! count check but can never be wired to the wrong equation silently.

use crate::state::StateVar::{self, *};

/// Total number of rate functions the wiring consumes.
pub const RATE_FUNCTION_COUNT: usize = 55;
/// Number of disturbance (forcing) functions, evaluated against time.
pub const DISTURBANCE_FUNCTION_COUNT: usize = 4;

/// One multiplicative group of rate functions inside an equation.
///
/// Slots `base..base + args.len()` of the flat rate-function table are
/// applied to the listed state variables and the results multiplied.
#[derive(Debug, Clone, Copy)]
pub struct ProductTerm {
    pub base: usize,
    pub args: &'static [StateVar],
}

// dL1: evaporation slows as decontamination and rescue work ramp up.
pub const EVAPORATION_SUPPRESSION: ProductTerm = ProductTerm {
    base: 0,
    args: &[DeconSolutionStock, RescueForces, RescuersInZone],
};

// dL2: outstanding cleanup demand vs. cleanup progress.
pub const CLEANUP_DEMAND: ProductTerm = ProductTerm {
    base: 3,
    args: &[
        ContaminatedArea,
        OutpatientCasualties,
        HospitalizedCasualties,
        DisabledEquipment,
        PeopleInZone,
    ],
};
pub const CLEANUP_PROGRESS: ProductTerm = ProductTerm {
    base: 8,
    args: &[DeconSolutionStock, RescueForces, RescuersInZone, ServiceReadiness],
};

// dL3: contamination spreads while evaporation lasts, shrinks with response readiness.
pub const AREA_SPREAD: ProductTerm = ProductTerm {
    base: 12,
    args: &[EvaporationTime],
};
pub const AREA_DECONTAMINATION: ProductTerm = ProductTerm {
    base: 13,
    args: &[ServiceReadiness],
};

// dL4: cloud travel time tracks the remaining evaporation time.
pub const CLOUD_TRAVEL: ProductTerm = ProductTerm {
    base: 14,
    args: &[EvaporationTime],
};

// dL5: primary-cloud exposure while the spill is still evaporating.
pub const PRIMARY_EXPOSURE: ProductTerm = ProductTerm {
    base: 15,
    args: &[EvaporationTime],
};

// dL6: secondary-cloud losses suppressed by warning time and rescue capacity.
pub const SECONDARY_MITIGATION: ProductTerm = ProductTerm {
    base: 16,
    args: &[CloudArrivalTime, RescueForces, AlertCoverage, RescuersInZone],
};

// dL7: flow of casualties into outpatient care.
pub const OUTPATIENT_INTAKE: ProductTerm = ProductTerm {
    base: 20,
    args: &[PrimaryCloudLosses, SecondaryCloudLosses, PeopleInZone, ServiceReadiness],
};

// dL8: flow of casualties into hospital beds.
pub const HOSPITAL_INTAKE: ProductTerm = ProductTerm {
    base: 24,
    args: &[
        PrimaryCloudLosses,
        SecondaryCloudLosses,
        RescueForces,
        PeopleInZone,
        RescuersInZone,
        ServiceReadiness,
    ],
};

// dL9: equipment knocked out by contamination vs. recovered by decon crews.
pub const EQUIPMENT_DAMAGE: ProductTerm = ProductTerm {
    base: 30,
    args: &[ContaminatedArea, PeopleInZone],
};
pub const EQUIPMENT_RECOVERY: ProductTerm = ProductTerm {
    base: 32,
    args: &[DeconSolutionStock, RescueForces, RescuersInZone],
};

// dL10: production of decontamination solutions driven by outstanding damage.
pub const DECON_PRODUCTION: ProductTerm = ProductTerm {
    base: 35,
    args: &[ContaminatedArea, DisabledEquipment, ServiceReadiness],
};

// dL11: mobilization of rescue forces vs. attrition.
pub const FORCE_MOBILIZATION: ProductTerm = ProductTerm {
    base: 38,
    args: &[ContaminatedArea, PeopleInZone, RescuersInZone],
};
pub const FORCE_ATTRITION: ProductTerm = ProductTerm {
    base: 41,
    args: &[ServiceReadiness],
};

// dL12: alert-system buildout vs. degradation.
pub const ALERT_EXPANSION: ProductTerm = ProductTerm {
    base: 42,
    args: &[RescueForces, PeopleInZone, RescuersInZone],
};
pub const ALERT_DEGRADATION: ProductTerm = ProductTerm {
    base: 45,
    args: &[ServiceReadiness],
};

// dL13: evacuation of people from the zone.
pub const EVACUATION: ProductTerm = ProductTerm {
    base: 46,
    args: &[CleanupTime, ContaminatedArea],
};

// dL14: deployment of rescuers into the zone.
pub const RESCUER_DEPLOYMENT: ProductTerm = ProductTerm {
    base: 48,
    args: &[RescueForces, AlertCoverage, PeopleInZone],
};

// dL15: growth of overall response-service readiness.
pub const READINESS_GROWTH: ProductTerm = ProductTerm {
    base: 51,
    args: &[CleanupTime, ContaminatedArea, PeopleInZone, RescuersInZone],
};

/// Every product term, in slot order.
pub const SCHEMA: [ProductTerm; 20] = [
    EVAPORATION_SUPPRESSION,
    CLEANUP_DEMAND,
    CLEANUP_PROGRESS,
    AREA_SPREAD,
    AREA_DECONTAMINATION,
    CLOUD_TRAVEL,
    PRIMARY_EXPOSURE,
    SECONDARY_MITIGATION,
    OUTPATIENT_INTAKE,
    HOSPITAL_INTAKE,
    EQUIPMENT_DAMAGE,
    EQUIPMENT_RECOVERY,
    DECON_PRODUCTION,
    FORCE_MOBILIZATION,
    FORCE_ATTRITION,
    ALERT_EXPANSION,
    ALERT_DEGRADATION,
    EVACUATION,
    RESCUER_DEPLOYMENT,
    READINESS_GROWTH,
];

const fn schema_tiles_rate_table() -> bool {
    let mut next = 0;
    let mut i = 0;
    while i < SCHEMA.len() {
        if SCHEMA[i].base != next {
            return false;
        }
        next += SCHEMA[i].args.len();
        i += 1;
    }
    next == RATE_FUNCTION_COUNT
}

// Compile-time guard: the named terms must cover slots 0..55 exactly once,
// in declaration order, with one state-variable argument per slot.
const _: () = assert!(schema_tiles_rate_table());
