use crate::grid::BoxId;
use crate::groups::GroupId;
use std::collections::HashMap;

/// Per (box, group, cohort) contaminant concentration plus environmental
/// pools. Mass is conserved across mortality/predation/excretion
/// transfers by always moving a proportional share of the carrier's
/// contaminant mass alongside the biomass transfer.
#[derive(Debug, Default)]
pub struct ContaminantLedger {
    concentration: HashMap<(BoxId, GroupId, usize), f64>,
    environment: HashMap<BoxId, f64>,
}

impl ContaminantLedger {
    pub fn concentration(&self, box_id: BoxId, group: GroupId, cohort: usize) -> f64 {
        self.concentration
            .get(&(box_id, group, cohort))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set_concentration(&mut self, box_id: BoxId, group: GroupId, cohort: usize, value: f64) {
        self.concentration.insert((box_id, group, cohort), value);
    }

    /// Moves a proportional contaminant mass from a host biomass transfer
    /// of `biomass_moved` out of `biomass_before` total, from `from` to
    /// `to`. Conserves total contaminant mass: what leaves `from`'s pool
    /// arrives in `to`'s pool, nothing is created or destroyed.
    pub fn transfer(
        &mut self,
        box_id: BoxId,
        from: (GroupId, usize),
        to: (GroupId, usize),
        biomass_moved: f64,
        biomass_before: f64,
    ) {
        if biomass_before <= crate::EPSILON {
            return;
        }
        let share = (biomass_moved / biomass_before).clamp(0.0, 1.0);
        let source = self.concentration(box_id, from.0, from.1);
        let moved = source * share;
        *self.concentration.entry((box_id, from.0, from.1)).or_insert(0.0) -= moved;
        *self.concentration.entry((box_id, to.0, to.1)).or_insert(0.0) += moved;
    }

    pub fn environmental(&self, box_id: BoxId) -> f64 {
        self.environment.get(&box_id).copied().unwrap_or(0.0)
    }

    pub fn add_environmental(&mut self, box_id: BoxId, delta: f64) {
        *self.environment.entry(box_id).or_insert(0.0) += delta;
    }
}
