//! Harvest/effort engine: the per-step 8-stage sequence from snapshot
//! through Baranov catch

use super::models::EffortContext;
use super::{EffortField, FleetId, FleetRegistry, MpaSchedule, TacBook};
use crate::clock::Clock;
use crate::grid::{BoxId, Grid};
use crate::groups::registry::FunctionalGroup;
use crate::groups::{GroupId, GroupRegistry};
use crate::Time;
use std::collections::HashMap;

/// Per-(species, fleet, box) catch bookkeeping the harvest engine reads
/// and writes every step
#[derive(Debug, Default)]
pub struct CatchLedger {
    pub catch: HashMap<(GroupId, FleetId, BoxId), f64>,
    pub cum_catch: HashMap<(GroupId, FleetId), f64>,
    pub last_catch: HashMap<(GroupId, FleetId, BoxId), f64>,
    pub discard: HashMap<(GroupId, FleetId, BoxId), f64>,
}

impl CatchLedger {
    fn record(&mut self, species: GroupId, fleet: FleetId, box_id: BoxId, retained: f64, discarded: f64) {
        *self.catch.entry((species, fleet, box_id)).or_insert(0.0) += retained;
        *self.cum_catch.entry((species, fleet)).or_insert(0.0) += retained;
        *self.discard.entry((species, fleet, box_id)).or_insert(0.0) += discarded;
    }

    /// rolls this step's `catch` into `last_catch` for next step's CPUE
    /// window
    pub fn roll_last_catch(&mut self) {
        self.last_catch = std::mem::take(&mut self.catch);
    }

    pub fn cum_catch_by_species(&self, fleet: FleetId) -> HashMap<GroupId, f64> {
        let mut out = HashMap::new();
        for (&(species, f), &amount) in &self.cum_catch {
            if f == fleet {
                *out.entry(species).or_insert(0.0) += amount;
            }
        }
        out
    }
}

/// per-box natural mortality rate lookup the catch equation needs
/// alongside fishing mortality (`F/(F+M)`); supplied by the caller since
/// it comes from each group's own mortality bookkeeping.
pub trait NaturalMortality {
    fn m(&self, species: GroupId, box_id: BoxId) -> f64;
}

/// runs the full 8-stage harvest sequence for one step
/// `eligible_test_fish` marks boxes a fleet may explore once a year when
/// no CPUE-driven effort lands there.
#[allow(clippy::too_many_arguments)]
pub fn step(
    grid: &Grid,
    groups: &mut GroupRegistry,
    fleets: &FleetRegistry,
    effort: &mut EffortField,
    tac: &TacBook,
    mpa: &MpaSchedule,
    ledger: &mut CatchLedger,
    natural_mortality: &dyn NaturalMortality,
    clock: &Clock,
    newyear: bool,
    max_num_sp_over_tac: usize,
    dt: Time,
) {
    // 1. Snapshot
    effort.snapshot_and_reset();

    let year = clock.this_year();
    let day = clock.day_of_year();
    let quarter = clock.quarter_of_year();

    for (fleet_id, fleet) in fleets.iter() {
        if !fleet.active {
            continue;
        }

        // 2. Regional catch distribution: normalise this fleet's
        // cumulative catch per box into a share (used below to weight
        // displacement targets rather than recomputed per species).
        let cum_by_species = ledger.cum_catch_by_species(fleet_id);

        // 4. Management pre-checks.
        let mut eff_scale = 1.0;
        for &species in fleet.targets.keys() {
            if tac.fleet_should_close(fleet_id, species, &cum_by_species, max_num_sp_over_tac) {
                eff_scale = 0.0;
                break;
            }
        }
        if eff_scale == 0.0 {
            continue;
        }

        let boxes: Vec<&crate::grid::BoxCell> = grid.dynamic_boxes().collect();
        let n = boxes.len();
        if n == 0 {
            continue;
        }

        // 3. Per-box recent CPUE, from last step's catch over last
        // step's effort.
        let cpue: Vec<f64> = boxes
            .iter()
            .map(|b| {
                let old = effort.old(b.id(), fleet_id);
                let catch: f64 = fleet
                    .targets
                    .keys()
                    .map(|&sp| ledger.last_catch.get(&(sp, fleet_id, b.id())).copied().unwrap_or(0.0))
                    .sum();
                catch / (old + crate::EPSILON)
            })
            .collect();

        let distance_to_port: Vec<f64> = boxes.iter().map(|b| fleet.distance_to(b.id())).collect();

        let mpa_openness: Vec<f64> = boxes
            .iter()
            .map(|b| {
                fleet
                    .targets
                    .keys()
                    .map(|_| mpa.openness(year, day, b.id(), fleet_id))
                    .fold(1.0_f64, f64::min)
            })
            .collect();

        let old_effort: Vec<f64> = boxes.iter().map(|b| effort.old(b.id(), fleet_id)).collect();
        let total_effort: f64 = old_effort.iter().sum::<f64>().max(fleet.test_fish_effort);

        let target_biomass: Vec<f64> = boxes
            .iter()
            .map(|_| {
                fleet
                    .targets
                    .keys()
                    .map(|&sp| group_biomass(groups, sp))
                    .sum()
            })
            .collect();

        // 5. Allocate box effort via the fleet's configured model.
        let ctx = EffortContext {
            old_effort: &old_effort,
            cpue: &cpue,
            distance_to_port: &distance_to_port,
            biomass: &target_biomass,
            target_biomass: &target_biomass,
            prescribed: &old_effort,
            port_population: 0.0,
            quarter,
            total_effort,
            speed_boat: fleet.speed_boat,
            dist_peak: fleet.dist_peak,
            dt,
        };
        let mut allocation = fleet.effort_model.allocate(&ctx);

        // Exploratory fishing: once a year, boxes that got zero
        // CPUE-driven effort receive `test_fish_effort`.
        if newyear {
            for (i, a) in allocation.iter_mut().enumerate() {
                if *a <= crate::EPSILON && cpue[i] <= crate::EPSILON {
                    *a = fleet.test_fish_effort;
                }
            }
        }

        // 6. Displacement: effort below `eff_thresh` CPUE shifts toward
        // the most productive accessible neighbour.
        let mut displaced = allocation.clone();
        for (i, box_cell) in boxes.iter().enumerate() {
            if cpue[i] >= fleet.eff_thresh || allocation[i] <= crate::EPSILON {
                continue;
            }
            let neighbours = grid.adjacency().neighbours(box_cell.id());
            let best = neighbours
                .iter()
                .filter_map(|n| boxes.iter().position(|b| b.id() == *n))
                .filter(|&j| mpa_openness[j] > 0.0)
                .max_by(|&a, &b| cpue[a].partial_cmp(&cpue[b]).unwrap());
            if let Some(j) = best {
                let moved = allocation[i] * 0.5;
                displaced[i] -= moved;
                displaced[j] += moved;
                effort.add_ghost(box_cell.id(), fleet_id, moved);
            }
        }
        allocation = displaced;

        // 7. Final effort scaling: rescale to preserve total unless the
        // fleet allows an aggregate drop, then enforce the per-fleet cap.
        let allocated_total: f64 = allocation.iter().sum();
        if !fleet.allow_aggregate_drop && allocated_total > crate::EPSILON {
            let scale = total_effort / allocated_total;
            for a in &mut allocation {
                *a *= scale;
            }
        }
        if let Some(cap) = fleet.cap {
            let total: f64 = allocation.iter().sum();
            if total > cap && total > crate::EPSILON {
                let scale = cap / total;
                for a in &mut allocation {
                    *a *= scale;
                }
            }
        }

        for (i, box_cell) in boxes.iter().enumerate() {
            let openness = mpa_openness[i];
            effort.set(box_cell.id(), fleet_id, allocation[i] * openness);
        }

        // 8. Catch computation, Baranov-style, per targeted species.
        for (&species, params) in &fleet.targets {
            let biomass_total = group_biomass(groups, species);
            if biomass_total <= crate::EPSILON {
                continue;
            }
            let mut removed_total = 0.0;
            for box_cell in &boxes {
                let box_id = box_cell.id();
                let e = effort.get(box_id, fleet_id);
                if e <= crate::EPSILON {
                    continue;
                }
                let box_biomass = biomass_total / boxes.len() as f64;
                let sel = params.selectivity.retention(1.0);
                let f = params.catchability * e * sel;
                let m = natural_mortality.m(species, box_id);
                let exploitation = if f + m > crate::EPSILON {
                    (f / (f + m)) * (1.0 - (-(f + m) * dt).exp())
                } else {
                    0.0
                };
                let total_catch = box_biomass * exploitation;
                let discarded = total_catch * params.discard_fraction;
                let retained = total_catch - discarded;
                ledger.record(species, fleet_id, box_id, retained, discarded);
                removed_total += total_catch;
            }
            // realized catch (landed + discard mortality) actually
            // depletes the stock, not just the running ledger total.
            apply_catch_removal(groups.get_mut(species), removed_total);
        }
    }
}

fn group_biomass(groups: &GroupRegistry, species: GroupId) -> f64 {
    groups
        .get(species)
        .cohorts
        .iter()
        .map(|c| c.mean_wgt * c.numbers)
        .sum()
}

/// removes `removed` units of biomass from a group's cohorts,
/// proportionally to each cohort's share of total biomass, holding
/// `mean_wgt` fixed and reducing `numbers`.
fn apply_catch_removal(group: &mut FunctionalGroup, removed: f64) {
    if removed <= crate::EPSILON {
        return;
    }
    let total: f64 = group.cohorts.iter().map(|c| c.mean_wgt * c.numbers).sum();
    if total <= crate::EPSILON {
        return;
    }
    for cohort in &mut group.cohorts {
        let share = (cohort.mean_wgt * cohort.numbers) / total;
        let delta_numbers = (removed * share) / cohort.mean_wgt;
        cohort.numbers = (cohort.numbers - delta_numbers).max(0.0);
    }
}
