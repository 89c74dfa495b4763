use super::{Ambient, ScheduleFlags};
use crate::flux::Contribution;
use crate::groups::params::ConsumerParams;
use crate::groups::Cohort;
use crate::EPSILON;

/// oxygen half-saturation for the mortality gate; tied to the same oxic
/// threshold used elsewhere rather than a per-group constant.
const OXYGEN_MORTALITY_K: f64 = 2.0;

/// Holling type-II ingestion kernel shared by zooplankton, benthos,
/// cephalopods, prawns, epibenthos, and filter/sediment-epibenthic
/// feeders. Ingestion is a dome-shaped function of background prey
/// availability (`KL` sets the rise, `KU` the satiation ceiling, `ht`
/// the handling-time limiter), scaled by either an
/// ERSEM-style quadratic crowding term or a simple linear cap against an
/// area-weighted max density, then by habitat-scaled growth and
/// feeds-while-spawning/mature-fraction gating. Oxygen-driven mortality is
/// folded into the linear mortality term before the rest of the kernel
/// runs, so it is already reflected in the biomass the growth terms act
/// on.
///
/// Shared across water-column, epibenthic, and sediment-dwelling
/// invertebrate consumer kinds — only the habitat the `Ambient` snapshot
/// is drawn from differs between them.
pub fn process(
    params: &ConsumerParams,
    cohort: &mut Cohort,
    ambient: &Ambient,
    flags: ScheduleFlags,
) -> Contribution {
    let _ = flags;

    let h_o = ambient.oxygen / (OXYGEN_MORTALITY_K + ambient.oxygen + EPSILON);
    let linear_mortality = params.linear_mortality + params.oxygen_mortality_coeff * (1.0 - h_o);

    let effective_mu_max = if params.habitat_scaled_growth {
        params.mu_max * ambient.area_hab
    } else {
        params.mu_max
    };

    let prey = ambient.dl + ambient.dr + ambient.pelagic_bacteria + ambient.sediment_bacteria;
    let encounter = prey / (params.k_l + prey + EPSILON);
    let satiation = params.k_u / (params.k_u + prey + EPSILON);
    let functional_response = params.c_scalar * encounter * satiation;
    let handling_limited = functional_response / (1.0 + params.ht * functional_response);
    let mut ingestion_rate = effective_mu_max * handling_limited * params.vl;

    let density_ratio = (ambient.own_biomass / (ambient.max_density + EPSILON)).min(1.0);
    let crowding_scale = if params.ersem_crowding {
        (1.0 - density_ratio).powi(2)
    } else {
        (1.0 - density_ratio).max(0.0)
    };
    ingestion_rate *= crowding_scale;

    if ambient.is_spawning && !params.feeds_while_spawning {
        ingestion_rate *= 1.0 - params.mature_fraction;
    }

    let ingestion = ingestion_rate * ambient.own_biomass;

    let bacteria_share = ambient.pelagic_bacteria / (prey + EPSILON);
    let dl_share = ambient.dl / (prey + EPSILON);
    let dr_share = ambient.dr / (prey + EPSILON);
    let sed_share = ambient.sediment_bacteria / (prey + EPSILON);

    let graze_bacteria = ingestion * bacteria_share;
    let graze_dl = ingestion * dl_share;
    let graze_dr = ingestion * dr_share;
    let graze_sed = ingestion * sed_share;

    let growth =
        graze_bacteria * params.e1 + graze_dl * params.e2 + graze_dr * params.e3 + graze_sed * params.e4;
    let egested = ingestion - growth;
    let mortality = linear_mortality * ambient.own_biomass;

    cohort.state.growth = growth;
    cohort.state.mortality = mortality;
    cohort.state.lysis = egested;
    cohort.state.graze_live = graze_bacteria + graze_sed;

    Contribution {
        nuts_lost: crate::flux::NutrientFlux::default(),
        nuts_prod: crate::flux::NutrientFlux::default(),
        detritus_prod: crate::flux::DetritusFlux {
            labile: egested + mortality,
            refractory: 0.0,
        },
        detritus_lost: crate::flux::DetritusFlux {
            labile: graze_dl,
            refractory: graze_dr,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::cohort::Stage;

    fn params() -> ConsumerParams {
        ConsumerParams {
            c_scalar: 1.0,
            mu_max: 0.6,
            k_l: 2.0,
            k_u: 10.0,
            vl: 1.0,
            ht: 0.2,
            e1: 0.4,
            e2: 0.5,
            e3: 0.3,
            e4: 0.4,
            ersem_crowding: true,
            habitat_scaled_growth: false,
            feeds_while_spawning: false,
            mature_fraction: 0.3,
            linear_mortality: 0.01,
            oxygen_mortality_coeff: 0.05,
            k_dep: 0.0,
        }
    }

    fn ambient() -> Ambient {
        Ambient {
            dl: 5.0,
            dr: 3.0,
            pelagic_bacteria: 2.0,
            sediment_bacteria: 1.0,
            oxygen: 6.0,
            own_biomass: 4.0,
            area_hab: 1.0,
            max_density: 20.0,
            is_spawning: false,
            ..Default::default()
        }
    }

    fn flags() -> ScheduleFlags {
        ScheduleFlags {
            it_count: 1,
            is_global: true,
        }
    }

    #[test]
    fn crowding_reduces_ingestion_near_max_density() {
        let p = params();
        let mut sparse = Cohort::new(0, Stage::Adult, 1.0, 0.0);
        let mut crowded = Cohort::new(0, Stage::Adult, 1.0, 0.0);
        let sparse_ambient = Ambient {
            own_biomass: 1.0,
            ..ambient()
        };
        let crowded_ambient = Ambient {
            own_biomass: 19.0,
            ..ambient()
        };
        process(&p, &mut sparse, &sparse_ambient, flags());
        process(&p, &mut crowded, &crowded_ambient, flags());
        assert!(sparse.state.growth / sparse_ambient.own_biomass > crowded.state.growth / crowded_ambient.own_biomass);
    }

    #[test]
    fn spawning_suppresses_feeding_unless_flagged() {
        let mut p = params();
        let mut not_spawning = Cohort::new(0, Stage::Adult, 1.0, 0.0);
        let mut spawning = Cohort::new(0, Stage::Adult, 1.0, 0.0);
        let a = ambient();
        let a_spawn = Ambient {
            is_spawning: true,
            ..a
        };
        process(&p, &mut not_spawning, &a, flags());
        process(&p, &mut spawning, &a_spawn, flags());
        assert!(spawning.state.growth < not_spawning.state.growth);

        p.feeds_while_spawning = true;
        let mut spawning_allowed = Cohort::new(0, Stage::Adult, 1.0, 0.0);
        process(&p, &mut spawning_allowed, &a_spawn, flags());
        assert_eq!(spawning_allowed.state.growth, not_spawning.state.growth);
    }

    #[test]
    fn low_oxygen_raises_mortality() {
        let p = params();
        let mut hypoxic = Cohort::new(0, Stage::Adult, 1.0, 0.0);
        let mut oxic = Cohort::new(0, Stage::Adult, 1.0, 0.0);
        let hypoxic_ambient = Ambient {
            oxygen: 0.1,
            ..ambient()
        };
        process(&p, &mut hypoxic, &hypoxic_ambient, flags());
        process(&p, &mut oxic, &ambient(), flags());
        assert!(hypoxic.state.mortality > oxic.state.mortality);
    }
}
