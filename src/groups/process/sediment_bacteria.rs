use super::{pelagic_bacteria, Ambient, ScheduleFlags};
use crate::flux::Contribution;
use crate::groups::params::BacteriaParams;
use crate::groups::Cohort;

/// Analogous to pelagic bacteria with sediment-specific detritus
/// affinities (`BB_DL`/`BB_DR`, carried in the same `BacteriaParams`
/// bundle since the kernel shape is identical) and oxygen dependence.
///
/// Differs from the pelagic variant only in its affinity constants and
/// the habitat its tracers are read from — the dispatcher supplies the
/// sediment-layer `Ambient` snapshot, so the kernel itself is shared.
pub fn process(
    params: &BacteriaParams,
    cohort: &mut Cohort,
    ambient: &Ambient,
    flags: ScheduleFlags,
) -> Contribution {
    pelagic_bacteria::process(params, cohort, ambient, flags)
}
