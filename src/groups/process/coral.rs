use super::{invert_consumer, phytoplankton, Ambient, ScheduleFlags};
use crate::flux::Contribution;
use crate::groups::params::CoralParams;
use crate::groups::Cohort;

/// Combines a symbiont photosynthesis component, scaled by space
/// competition against turf/algae and by the coral's current bleaching
/// health, with heterotrophic feeding via the shared invertebrate-consumer
/// kernel. Thermal stress above `bleach_threshold` bleaches the colony
/// (`health -= bleach_rate · Δtemp`); otherwise it recovers toward 1 at
/// `recovery_rate`. A rugosity value proportional to live, healthy cover
/// is emitted for other groups' habitat-scaling reads.
pub fn process(
    params: &CoralParams,
    cohort: &mut Cohort,
    ambient: &Ambient,
    flags: ScheduleFlags,
) -> Contribution {
    let delta_temp = ambient.temperature - params.bleach_threshold;
    if delta_temp > 0.0 {
        cohort.health = (cohort.health - params.bleach_rate * delta_temp).max(0.0);
    } else {
        cohort.health = (cohort.health + params.recovery_rate).min(1.0);
    }

    let mut photo = phytoplankton::process(&params.symbiont, cohort, ambient, flags);
    let scale = params.space_competition * cohort.health;
    photo.nuts_lost.nh *= scale;
    photo.nuts_lost.no *= scale;
    photo.nuts_lost.si *= scale;
    photo.nuts_lost.fe *= scale;
    photo.nuts_lost.p *= scale;
    photo.detritus_prod.labile *= scale;
    photo.detritus_prod.refractory *= scale;
    let photo_growth = cohort.state.growth * scale;
    let photo_mortality = cohort.state.mortality * scale;
    let photo_lysis = cohort.state.lysis * scale;

    let hetero = invert_consumer::process(&params.heterotroph, cohort, ambient, flags);

    cohort.state.growth += photo_growth;
    cohort.state.mortality += photo_mortality;
    cohort.state.lysis += photo_lysis;
    cohort.state.rugosity = params.space_competition * cohort.health * ambient.own_biomass;

    let mut combined = photo;
    combined.merge(&hetero);
    combined
}
