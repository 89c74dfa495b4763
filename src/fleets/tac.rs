use super::FleetId;
use crate::groups::GroupId;
use std::collections::HashMap;

/// Which grouping rule a TAC check applies across species
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TacPolicy {
    Simple,
    Companion,
    Basket,
    Regional,
    CommonPool,
}

/// Per (species, fleet) TAC bookkeeping
#[derive(Debug, Clone, Default)]
pub struct TacRecord {
    pub amount_now: f64,
    pub amount_old: f64,
    pub bimonthly: [f64; 6],
    pub regional_ratio: Vec<f64>,
    pub overflow: bool,
}

/// Reset counter for multi-year TAC schedules: `period` years between resets,
/// `elapsed` since the last one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiYearReset {
    pub period: u32,
    pub elapsed: u32,
}

impl MultiYearReset {
    /// whether this year is a reset year; advances `elapsed` either way.
    pub fn tick(&mut self) -> bool {
        self.elapsed += 1;
        if self.period == 0 || self.elapsed >= self.period.max(1) {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}

/// The full TAC book: one record per (species, fleet), plus the policy
/// each species is checked under and its companion/basket grouping.
#[derive(Debug, Default)]
pub struct TacBook {
    records: HashMap<(GroupId, FleetId), TacRecord>,
    policy: HashMap<GroupId, TacPolicy>,
    groupings: HashMap<GroupId, Vec<GroupId>>,
    includes_discard: HashMap<GroupId, bool>,
}

impl TacBook {
    pub fn set_record(&mut self, species: GroupId, fleet: FleetId, record: TacRecord) {
        self.records.insert((species, fleet), record);
    }

    pub fn record(&self, species: GroupId, fleet: FleetId) -> Option<&TacRecord> {
        self.records.get(&(species, fleet))
    }

    pub fn set_policy(&mut self, species: GroupId, policy: TacPolicy, grouping: Vec<GroupId>) {
        self.policy.insert(species, policy);
        self.groupings.insert(species, grouping);
    }

    pub fn set_includes_discard(&mut self, species: GroupId, include: bool) {
        self.includes_discard.insert(species, include);
    }

    /// whether catch toward this TAC should include discards;
    /// `is_species_of_concern` forces inclusion regardless of the configured
    /// flag.
    pub fn includes_discard(&self, species: GroupId, is_species_of_concern: bool) -> bool {
        is_species_of_concern || self.includes_discard.get(&species).copied().unwrap_or(false)
    }

    /// evaluates the TAC check for one fleet against a species group,
    /// counting how many species in its grouping are currently over
    /// their allocated TAC Returns `true`
    /// when the fleet should close — `max_num_sp` species over TAC.
    pub fn fleet_should_close(
        &self,
        fleet: FleetId,
        species: GroupId,
        cum_catch: &HashMap<GroupId, f64>,
        max_num_sp: usize,
    ) -> bool {
        let policy = self.policy.get(&species).copied().unwrap_or(TacPolicy::Simple);
        let members: Vec<GroupId> = match policy {
            TacPolicy::Simple => vec![species],
            _ => self
                .groupings
                .get(&species)
                .cloned()
                .unwrap_or_else(|| vec![species]),
        };
        let over_count = members
            .iter()
            .filter(|sp| {
                let catch = cum_catch.get(sp).copied().unwrap_or(0.0);
                self.records
                    .get(&(**sp, fleet))
                    .map(|r| catch >= r.amount_now)
                    .unwrap_or(false)
            })
            .count();
        over_count >= max_num_sp.max(1)
    }
}
