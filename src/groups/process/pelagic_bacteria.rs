use super::{Ambient, ScheduleFlags};
use crate::flux::Contribution;
use crate::groups::params::BacteriaParams;
use crate::groups::Cohort;
use crate::EPSILON;

/// Colonises detritus: `growth = μ_max · (PB_DL·(1-(PB_DL/(X·DL))^k) +
/// PB_DR·(1-(PB_DR/(X·DR))^k))` gated by an oxygen `hO` term, with
/// assimilation efficiencies E3/E4 on DL/DR uptake. Products split across
/// DR, a DON-equivalent share lumped into the NH4 pool, and NH4 remainder.
/// Also mediates nitrification: `K_nit · NH · SuspSed / (K_conc+ε)`,
/// approximated here using the oxygen tracer as the oxic-conditions proxy
/// for suspended sediment exposure.
pub fn process(
    params: &BacteriaParams,
    cohort: &mut Cohort,
    ambient: &Ambient,
    flags: ScheduleFlags,
) -> Contribution {
    let k = if params.flag_kdrop { 3.0 } else { params.k };
    let pb = ambient.own_biomass;

    let sat_dl = (pb / (params.x_labile * ambient.dl + EPSILON))
        .min(1.0)
        .powf(k);
    let sat_dr = (pb / (params.x_refractory * ambient.dr + EPSILON))
        .min(1.0)
        .powf(k);
    let h_o = ambient.oxygen / (params.k_oxygen + ambient.oxygen + EPSILON);

    let growth_dl = params.mu_max * h_o * pb * (1.0 - sat_dl);
    let growth_dr = params.mu_max * h_o * pb * (1.0 - sat_dr);
    let growth = growth_dl + growth_dr;

    let gross_dl = growth_dl / params.e3_labile_efficiency.max(EPSILON);
    let gross_dr = growth_dr / params.e4_refractory_efficiency.max(EPSILON);
    let waste = (gross_dl - growth_dl) + (gross_dr - growth_dr);

    let to_refractory = waste * params.f_product_refractory;
    let to_don = waste * params.f_product_don * (1.0 - params.f_product_refractory);
    let to_nh = waste - to_refractory - to_don;

    let nitrified =
        params.k_nit * ambient.nh4 * ambient.oxygen / (params.k_conc + ambient.oxygen + EPSILON);

    cohort.state.growth = growth;
    let _ = flags;

    Contribution {
        nuts_lost: crate::flux::NutrientFlux {
            nh: nitrified,
            ..Default::default()
        },
        nuts_prod: crate::flux::NutrientFlux {
            nh: to_nh + to_don,
            no: nitrified,
            ..Default::default()
        },
        detritus_prod: crate::flux::DetritusFlux {
            labile: 0.0,
            refractory: to_refractory,
        },
        detritus_lost: crate::flux::DetritusFlux {
            labile: gross_dl,
            refractory: gross_dr,
        },
    }
}
