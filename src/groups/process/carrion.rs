use super::{Ambient, ScheduleFlags};
use crate::flux::Contribution;
use crate::groups::params::CarrionParams;
use crate::groups::Cohort;

/// First-order breakdown `r_DC · DC` into DL and DR, split by
/// `f_refractory`. Unlike detritus this pathway never gates on bacterial
/// activity — carrion decomposes regardless. The dispatcher only invokes
/// this once per global iteration (`it_count == 1`) since carrion is not
/// habitat-replicated the way water-column and sediment groups are.
pub fn process(
    params: &CarrionParams,
    cohort: &mut Cohort,
    ambient: &Ambient,
    flags: ScheduleFlags,
) -> Contribution {
    if !flags.is_global_iteration() {
        return Contribution::default();
    }

    let break_down = params.breakdown_rate * ambient.own_biomass;
    let to_refractory = break_down * params.f_refractory;
    let to_labile = break_down - to_refractory;

    cohort.state.mortality = break_down;

    Contribution {
        nuts_prod: crate::flux::NutrientFlux::default(),
        nuts_lost: crate::flux::NutrientFlux::default(),
        detritus_prod: crate::flux::DetritusFlux {
            labile: to_labile,
            refractory: to_refractory,
        },
        detritus_lost: crate::flux::DetritusFlux {
            labile: 0.0,
            refractory: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::cohort::Stage;

    fn params() -> CarrionParams {
        CarrionParams {
            breakdown_rate: 0.1,
            f_refractory: 0.25,
        }
    }

    #[test]
    fn only_runs_on_the_global_iteration() {
        let p = params();
        let mut cohort = Cohort::new(0, Stage::Adult, 1.0, 0.0);
        let ambient = Ambient {
            own_biomass: 10.0,
            ..Default::default()
        };
        let skipped = process(
            &p,
            &mut cohort,
            &ambient,
            ScheduleFlags {
                it_count: 2,
                is_global: true,
            },
        );
        assert_eq!(skipped.detritus_prod.labile, 0.0);

        let counted = process(
            &p,
            &mut cohort,
            &ambient,
            ScheduleFlags {
                it_count: 1,
                is_global: true,
            },
        );
        assert!(counted.detritus_prod.labile > 0.0);
    }

    #[test]
    fn breakdown_splits_by_refractory_fraction() {
        let p = params();
        let mut cohort = Cohort::new(0, Stage::Adult, 1.0, 0.0);
        let ambient = Ambient {
            own_biomass: 10.0,
            ..Default::default()
        };
        let flags = ScheduleFlags {
            it_count: 1,
            is_global: true,
        };
        let out = process(&p, &mut cohort, &ambient, flags);
        let total = out.detritus_prod.labile + out.detritus_prod.refractory;
        assert!((total - 1.0).abs() < 1e-9);
        assert!((out.detritus_prod.refractory / total - 0.25).abs() < 1e-9);
    }
}
