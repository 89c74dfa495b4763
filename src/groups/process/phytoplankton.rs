use super::{Ambient, ScheduleFlags};
use crate::flux::Contribution;
use crate::groups::params::PhytoParams;
use crate::groups::Cohort;
use crate::EPSILON;

/// diatom-ish Si:N stoichiometric ratio used to size silicate uptake
/// relative to N-based growth when a group is silicate-dependent.
const SI_N_RATIO: f64 = 0.15;

/// `μ = μ_max · hI(light) · hN(nutrients)`, Liebig-style across whichever
/// nutrients the group is limited by: light and nutrient limitation terms
/// multiply, and the nutrient term takes the minimum across active
/// limiting nutrients (the "Liebig law of the minimum").
pub fn process(
    params: &PhytoParams,
    cohort: &mut Cohort,
    ambient: &Ambient,
    flags: ScheduleFlags,
) -> Contribution {
    let h_i = ambient.light / (params.k_light + ambient.light + EPSILON);

    let n_available = ambient.nh4 + ambient.no3;
    let mut h_n = n_available / (params.k_nutrient.nh + n_available + EPSILON);
    if params.silicate_dependent {
        let h_si = ambient.si / (params.k_nutrient.si + ambient.si + EPSILON);
        h_n = h_n.min(h_si);
    }
    if params.k_nutrient.fe > 0.0 {
        let h_fe = ambient.fe / (params.k_nutrient.fe + ambient.fe + EPSILON);
        h_n = h_n.min(h_fe);
    }
    if params.k_nutrient.p > 0.0 {
        let h_p = ambient.p / (params.k_nutrient.p + ambient.p + EPSILON);
        h_n = h_n.min(h_p);
    }

    let mu = params.mu_max * h_i * h_n;
    let growth = mu * ambient.own_biomass;

    let uptake_nh = growth * (ambient.nh4 / (n_available + EPSILON));
    let uptake_no = growth - uptake_nh;
    let uptake_si = if params.silicate_dependent {
        growth * SI_N_RATIO
    } else {
        0.0
    };
    let uptake_fe = if params.k_nutrient.fe > 0.0 {
        growth * 0.01
    } else {
        0.0
    };
    let uptake_p = if params.k_nutrient.p > 0.0 {
        growth * 0.05
    } else {
        0.0
    };

    let lysis = params.lysis_rate * ambient.own_biomass;
    let mut mortality = params.sediment_mortality_rate * ambient.own_biomass;

    // bug-compat switch that zeroes mortality once growth has been
    // applied, carried as an explicit option rather than a default.
    if params.replicate_old_ppmort_bug {
        mortality = 0.0;
    }

    cohort.state.growth = growth;
    cohort.state.lysis = lysis;
    cohort.state.mortality = mortality;
    cohort.state.uptake_nh = uptake_nh;

    let mut detritus_prod = crate::flux::DetritusFlux::default();
    if let Some((leaves, roots)) = params.macrophyte_split {
        detritus_prod.labile = (lysis + mortality) * leaves;
        detritus_prod.refractory = (lysis + mortality) * roots;
    } else {
        detritus_prod.labile = lysis + mortality;
    }

    let _ = flags; // global-tally accounting happens in the dispatcher/flux layer

    Contribution {
        nuts_lost: crate::flux::NutrientFlux {
            nh: uptake_nh,
            no: uptake_no,
            si: uptake_si,
            fe: uptake_fe,
            p: uptake_p,
            c: 0.0,
        },
        nuts_prod: crate::flux::NutrientFlux::default(),
        detritus_prod,
        detritus_lost: crate::flux::DetritusFlux::default(),
    }
}
