//! Fleet catalogue and effort bookkeeping. Mirrors `groups::registry`'s
//! stable-index catalogue shape: a `FleetRegistry` owns `Fleet` entries,
//! referenced everywhere else by `FleetId` rather than shared ownership.

pub mod harvest;
pub mod models;
pub mod mpa;
pub mod selectivity;
pub mod tac;

pub use mpa::MpaSchedule;
pub use selectivity::SelectivityCurve;
pub use tac::{MultiYearReset, TacBook, TacPolicy, TacRecord};

use crate::grid::BoxId;
use crate::groups::GroupId;
use models::EffortModel;
use std::collections::HashMap;

/// Stable index into `FleetRegistry::fleets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FleetId(pub usize);

/// Per-group parameters a fleet carries for the species it targets
#[derive(Debug, Clone)]
pub struct FleetTargetParams {
    pub selectivity: SelectivityCurve,
    pub catchability: f64,
    pub in_quota: bool,
    pub discard_fraction: f64,
}

/// Parameters driving this fleet's CPUE shot synthesis; `None` means the
/// fleet reports catch at the daily aggregate level only, with no
/// per-shot breakdown.
#[derive(Debug, Clone, Copy)]
pub struct ShotConfig {
    pub active_subfleets: usize,
    pub fishable_period_hours: f64,
    pub min_shot_length_hours: f64,
    pub guru_weight: f64,
    pub negbinom_r: f64,
    pub negbinom_p: f64,
    pub min_effort_coefft: f64,
    pub min_effort_const: f64,
    pub max_shots: usize,
}

/// Static catalogue entry
#[derive(Debug)]
pub struct Fleet {
    pub code: String,
    pub targets: HashMap<GroupId, FleetTargetParams>,
    pub ports: Vec<BoxId>,
    pub home_port_distance: HashMap<BoxId, f64>,
    pub effort_model: Box<dyn EffortModel>,
    pub speed_boat: f64,
    pub dist_peak: f64,
    pub eff_thresh: f64,
    pub test_fish_effort: f64,
    pub cap: Option<f64>,
    pub allow_aggregate_drop: bool,
    pub active: bool,
    pub shots: Option<ShotConfig>,
}

impl Fleet {
    pub fn distance_to(&self, box_id: BoxId) -> f64 {
        self.home_port_distance.get(&box_id).copied().unwrap_or(f64::MAX)
    }
}

/// Per-(box, fleet) effort state: `effort` and
/// `old_effort` reset every step, `cum_effort` accumulates across the
/// year, `ghost_effort` is the penalty-weighted series used by
/// displacement accounting.
#[derive(Debug, Clone, Default)]
pub struct EffortField {
    pub effort: HashMap<(BoxId, FleetId), f64>,
    pub old_effort: HashMap<(BoxId, FleetId), f64>,
    pub cum_effort: HashMap<(BoxId, FleetId), f64>,
    pub ghost_effort: HashMap<(BoxId, FleetId), f64>,
}

impl EffortField {
    /// `OldEffort ← Effort`; reset `Effort`
    pub fn snapshot_and_reset(&mut self) {
        self.old_effort = std::mem::take(&mut self.effort);
        self.effort.clear();
    }

    pub fn get(&self, box_id: BoxId, fleet: FleetId) -> f64 {
        self.effort.get(&(box_id, fleet)).copied().unwrap_or(0.0)
    }

    pub fn old(&self, box_id: BoxId, fleet: FleetId) -> f64 {
        self.old_effort.get(&(box_id, fleet)).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, box_id: BoxId, fleet: FleetId, value: f64) {
        self.effort.insert((box_id, fleet), value);
        *self.cum_effort.entry((box_id, fleet)).or_insert(0.0) += value;
    }

    pub fn add_ghost(&mut self, box_id: BoxId, fleet: FleetId, penalty_weighted: f64) {
        *self.ghost_effort.entry((box_id, fleet)).or_insert(0.0) += penalty_weighted;
    }

    /// resets the year-cumulative series; called at year boundaries by
    /// the management engine.
    pub fn reset_annual(&mut self) {
        self.cum_effort.clear();
        self.ghost_effort.clear();
    }
}

/// Owns the static fleet catalogue for a run: the catalogue itself is
/// static, while per-step state (effort, cumulative catch) is mutable.
#[derive(Debug, Default)]
pub struct FleetRegistry {
    fleets: Vec<Fleet>,
    by_code: HashMap<String, FleetId>,
}

impl FleetRegistry {
    pub fn register(&mut self, fleet: Fleet) -> FleetId {
        let id = FleetId(self.fleets.len());
        self.by_code.insert(fleet.code.clone(), id);
        self.fleets.push(fleet);
        id
    }

    pub fn id_of(&self, code: &str) -> Option<FleetId> {
        self.by_code.get(code).copied()
    }

    pub fn get(&self, id: FleetId) -> &Fleet {
        &self.fleets[id.0]
    }

    pub fn get_mut(&mut self, id: FleetId) -> &mut Fleet {
        &mut self.fleets[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FleetId, &Fleet)> {
        self.fleets.iter().enumerate().map(|(i, f)| (FleetId(i), f))
    }

    pub fn len(&self) -> usize {
        self.fleets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fleets.is_empty()
    }
}
