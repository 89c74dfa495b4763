//! Process dispatcher's function table: one module per `GroupKind`
//! variant, each implementing the shared `process` contract —
//! phytoplankton, dinoflagellates, pelagic and sediment bacteria,
//! invertebrate consumers, coral, labile and refractory detritus, and
//! carrion.

mod carrion;
mod coral;
mod detritus;
mod dinoflagellate;
mod invert_consumer;
mod pelagic_bacteria;
mod phytoplankton;
mod sediment_bacteria;

use crate::flux::Contribution;
use crate::groups::{Cohort, GroupKind, GroupParams};

/// Local copies of the tracer values a process function is allowed to
/// read, snapshotted at box entry
#[derive(Debug, Clone, Copy, Default)]
pub struct Ambient {
    pub nh4: f64,
    pub no3: f64,
    pub si: f64,
    pub fe: f64,
    pub p: f64,
    pub c: f64,
    pub light: f64,
    pub oxygen: f64,
    pub ph: f64,
    pub depth: f64,
    pub o2_depth: f64,
    /// box bottom depth (negative-down), used by `FunctionalGroup::gate`.
    pub botz: f64,
    /// water temperature, driving coral thermal-stress bleaching; unused
    /// by every other kind.
    pub temperature: f64,
    pub dl: f64,
    pub dr: f64,
    pub pelagic_bacteria: f64,
    pub sediment_bacteria: f64,
    pub own_biomass: f64,
    /// habitat area-weighting used by `flag_benthos_sediment_link`
    ///; 1.0 when unused.
    pub area_hab: f64,
    /// area-weighted maximum biomass density for crowding caps.
    pub max_density: f64,
    /// whether this cohort is currently spawning (gates
    /// `feeds_while_spawning`/`mature_fraction`).
    pub is_spawning: bool,
    /// whether any bacterial functional group is active in this box×layer;
    /// gates detritus's abiotic remineralisation fallback
    pub bacteria_active: bool,
}

impl Ambient {
    /// sensible defaults for fields most process functions never touch.
    pub fn water() -> Self {
        Self {
            area_hab: 1.0,
            max_density: f64::MAX,
            ..Default::default()
        }
    }
}

/// Scheduling flags every process function receives: the iteration count
/// within the step and whether this call is the one global-tally iteration.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleFlags {
    pub it_count: usize,
    pub is_global: bool,
}

impl ScheduleFlags {
    pub fn is_global_iteration(&self) -> bool {
        self.it_count == 1 && self.is_global
    }
}

/// Dispatch table entry point: routes to the process function matching
/// `kind`, mutating the cohort's scratch state and returning this call's
/// flux contribution. A group flagged inactive or out of depth range
/// (`gate_ok == false`) returns a zero contribution without touching any
/// state. Takes `kind`/`params` rather than a whole `&FunctionalGroup`
/// so callers can hold a group's cohorts mutably while still reading
/// its catalogue metadata.
pub fn dispatch(
    kind: GroupKind,
    params: &GroupParams,
    gate_ok: bool,
    cohort: &mut Cohort,
    ambient: &Ambient,
    flags: ScheduleFlags,
) -> Contribution {
    if !gate_ok {
        return Contribution::default();
    }
    match (&kind, params) {
        (GroupKind::PrimaryProducer, GroupParams::Phyto(p)) => {
            phytoplankton::process(p, cohort, ambient, flags)
        }
        (GroupKind::Dinoflagellate, GroupParams::Dinoflagellate(p)) => {
            dinoflagellate::process(p, cohort, ambient, flags)
        }
        (GroupKind::PelagicBacteria, GroupParams::PelagicBacteria(p)) => {
            pelagic_bacteria::process(p, cohort, ambient, flags)
        }
        (GroupKind::SedimentBacteria, GroupParams::SedimentBacteria(p)) => {
            sediment_bacteria::process(p, cohort, ambient, flags)
        }
        (GroupKind::InvertConsumer, GroupParams::Consumer(p)) => {
            invert_consumer::process(p, cohort, ambient, flags)
        }
        (GroupKind::Coral, GroupParams::Coral(p)) => coral::process(p, cohort, ambient, flags),
        (GroupKind::LabileDetritus, GroupParams::Detritus(p)) => {
            detritus::process_labile(p, cohort, ambient, flags)
        }
        (GroupKind::RefractoryDetritus, GroupParams::Detritus(p)) => {
            detritus::process_refractory(p, cohort, ambient, flags)
        }
        (GroupKind::Carrion, GroupParams::Carrion(p)) => {
            carrion::process(p, cohort, ambient, flags)
        }
        _ => panic!("group kind and parameter bundle disagree"),
    }
}
