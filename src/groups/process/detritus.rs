use super::{Ambient, ScheduleFlags};
use crate::flux::Contribution;
use crate::groups::params::DetritusParams;
use crate::groups::Cohort;

/// Abiotic remineralisation fallback, active only when no bacterial group
/// is processing this box×layer:
/// `break_down = r · D`, split into DR, a DON share lumped into NH4
/// (matching the same lumping decision as the bacterial pathway), and the
/// NH4 remainder. When bacteria are active this returns a zero
/// contribution — the bacterial process functions already consume the
/// pool directly.
fn abiotic_breakdown(
    params: &DetritusParams,
    cohort: &mut Cohort,
    ambient: &Ambient,
) -> Contribution {
    if ambient.bacteria_active {
        cohort.state.mortality = 0.0;
        return Contribution::default();
    }

    let break_down = params.breakdown_rate * ambient.own_biomass;
    let to_refractory = break_down * params.f_refractory;
    let to_don = break_down * params.f_don * (1.0 - params.f_refractory);
    let to_nh = break_down - to_refractory - to_don;

    cohort.state.mortality = break_down;

    Contribution {
        nuts_prod: crate::flux::NutrientFlux {
            nh: to_nh + to_don,
            ..Default::default()
        },
        nuts_lost: crate::flux::NutrientFlux::default(),
        detritus_prod: crate::flux::DetritusFlux {
            labile: 0.0,
            refractory: to_refractory,
        },
        detritus_lost: crate::flux::DetritusFlux {
            labile: break_down,
            refractory: 0.0,
        },
    }
}

/// Abiotic breakdown of the labile detritus pool.
pub fn process_labile(
    params: &DetritusParams,
    cohort: &mut Cohort,
    ambient: &Ambient,
    flags: ScheduleFlags,
) -> Contribution {
    let _ = flags;
    abiotic_breakdown(params, cohort, ambient)
}

/// The refractory pool breaks down more slowly (a lower `breakdown_rate`
/// in its own `DetritusParams`) but through the identical kernel.
pub fn process_refractory(
    params: &DetritusParams,
    cohort: &mut Cohort,
    ambient: &Ambient,
    flags: ScheduleFlags,
) -> Contribution {
    let _ = flags;
    abiotic_breakdown(params, cohort, ambient)
}
