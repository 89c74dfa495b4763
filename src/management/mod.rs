//! Management/HCR engine, executed on year-boundary days and on
//! multi-year reset schedules

pub mod assessment;
pub mod hcr;

pub use assessment::{AssessmentEstimate, AssessmentTool, ExternalAssessmentContext, ExternalBridge};
pub use hcr::{ftarg, mfc_scale, BrokenStick, FOnlyRescale, Tier};

use crate::fleets::{FleetId, MultiYearReset, TacRecord};
use crate::groups::GroupId;

/// how companion/basket TACs rescale a fleet's constituent species'
/// single-species allocations once the primary species' TAC is set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPolicy {
    WeakestLink,
    StrongestLink,
}

/// rescales `single_species_tac` per companion species by its configured
/// catch ratio, then picks the weakest- or strongest-link member to set
/// the shared allocation all companions share.
pub fn rescale_companion_tac(single_species_tac: &[(GroupId, f64, f64)], policy: LinkPolicy) -> f64 {
    let scaled = single_species_tac.iter().map(|&(_, tac, ratio)| tac / ratio.max(crate::EPSILON));
    match policy {
        LinkPolicy::WeakestLink => scaled.fold(f64::INFINITY, f64::min),
        LinkPolicy::StrongestLink => scaled.fold(0.0, f64::max),
    }
}

/// applies one multi-year reset tick for a stock's TAC record: if the
/// reset counter has not reached its period, the record is left
/// untouched (the previous allocation carries over); on a reset year, a
/// bulk-TAC policy multiplies the one-shot allocation by the period
/// length
pub fn apply_multi_year_reset(
    reset: &mut MultiYearReset,
    record: &mut TacRecord,
    one_shot_allocation: f64,
    bulk_tac_policy: bool,
) {
    if !reset.tick() {
        return;
    }
    record.amount_old = record.amount_now;
    record.amount_now = if bulk_tac_policy {
        one_shot_allocation * reset.period.max(1) as f64
    } else {
        one_shot_allocation
    };
}

/// Fixed, depth-based, or biomass-distribution-based MPA activation
/// trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialTrigger {
    Fixed,
    DepthBased,
    BiomassDistributionBased,
}

/// Depth bounds a `DepthBased` closure restricts itself to, and the
/// concentration share a `BiomassDistributionBased` closure requires
/// before it will fire; both ride on top of the same TAC-exceedance check
/// `Fixed` uses alone.
#[derive(Debug, Clone, Copy)]
pub struct SpatialTriggerContext {
    /// seabed depth (m) of the box the closure is being considered for.
    pub box_depth: f64,
    pub min_depth: f64,
    pub max_depth: f64,
    /// fraction of the stock's total biomass currently concentrated in
    /// the candidate closure area.
    pub biomass_share: f64,
    pub biomass_share_threshold: f64,
}

/// whether a TAC-exceedance event should activate a spatial closure for
/// this trigger kind. `Fixed` closes on quota exceedance alone; `DepthBased`
/// additionally requires the box to sit within the closure's depth band;
/// `BiomassDistributionBased` additionally requires the stock to be
/// concentrated enough in the candidate area to be worth closing.
pub fn spatial_trigger_fires(trigger: SpatialTrigger, cum_catch: f64, tac: f64, ctx: SpatialTriggerContext) -> bool {
    let quota_exceeded = cum_catch > tac;
    match trigger {
        SpatialTrigger::Fixed => quota_exceeded,
        SpatialTrigger::DepthBased => {
            quota_exceeded && ctx.box_depth >= ctx.min_depth && ctx.box_depth <= ctx.max_depth
        }
        SpatialTrigger::BiomassDistributionBased => quota_exceeded && ctx.biomass_share >= ctx.biomass_share_threshold,
    }
}

/// contaminant-based closure trigger: fires once concentration crosses
/// the configured threshold, either on a set period or continuously
/// concentration-driven.
pub fn contaminant_trigger_fires(concentration: f64, threshold: f64) -> bool {
    concentration >= threshold
}

/// per-(species, fleet) outcome of one year-boundary management pass.
#[derive(Debug, Clone, Copy)]
pub struct ManagementOutcome {
    pub tac: Option<f64>,
    pub mfc_scale: Option<f64>,
    pub close_fleet: Option<FleetId>,
}
