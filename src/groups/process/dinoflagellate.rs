use super::{phytoplankton, Ambient, ScheduleFlags};
use crate::flux::Contribution;
use crate::groups::params::DinoflagellateParams;
use crate::groups::Cohort;
use crate::EPSILON;

/// Photosynthesis as `phytoplankton::process`, plus phagotrophy capped by
/// `max_phagotrophy`; grazing on bacteria, DL, and DR is reallocated via
/// `DFscale = phagotroph / totalGraze`, and nutrient-stress-sensitive
/// lysis is modulated by an effective `hN` inflated by the grazing
/// contribution.
pub fn process(
    params: &DinoflagellateParams,
    cohort: &mut Cohort,
    ambient: &Ambient,
    flags: ScheduleFlags,
) -> Contribution {
    let mut photo = phytoplankton::process(&params.photo, cohort, ambient, flags);

    let available_prey = ambient.pelagic_bacteria + ambient.dl + ambient.dr;
    let phagotroph = params.max_phagotrophy.min(available_prey) * ambient.own_biomass.min(1.0);
    let total_graze = cohort.state.growth + phagotroph + EPSILON;
    let df_scale = phagotroph / total_graze;

    // grazing draws proportionally from bacteria, DL, DR in proportion to
    // their share of the available prey pool.
    let bacteria_share = ambient.pelagic_bacteria / (available_prey + EPSILON);
    let dl_share = ambient.dl / (available_prey + EPSILON);
    let dr_share = ambient.dr / (available_prey + EPSILON);

    photo.detritus_lost.labile += phagotroph * dl_share;
    photo.detritus_lost.refractory += phagotroph * dr_share;
    let _bacteria_grazed = phagotroph * bacteria_share; // consumed from the bacterium's own biomass pool, booked by the diet resolver in the full predator/prey pass

    cohort.state.growth += phagotroph;

    // effective hN is inflated by the grazing contribution before the
    // lysis term is computed, representing reduced nutrient stress when
    // phagotrophy is supplementing photosynthesis.
    let effective_relief = 1.0 + params.lysis_stress_gain * df_scale;
    cohort.state.lysis /= effective_relief.max(EPSILON);
    photo.detritus_prod.labile = cohort.state.lysis + cohort.state.mortality;

    photo
}
