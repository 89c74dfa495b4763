use crate::grid::Habitat;
use crate::groups::GroupId;
use std::collections::HashMap;

/// Key a single (prey, prey-cohort, habitat) slot is tracked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MortKey {
    pub prey: GroupId,
    pub cohort: usize,
    pub habitat_tag: u8,
}

fn habitat_tag(habitat: Habitat) -> u8 {
    match habitat {
        Habitat::Water(_) => 0,
        Habitat::Sediment => 1,
        Habitat::Epibenthic => 2,
        Habitat::Ice => 3,
        Habitat::Land => 4,
    }
}

/// Per-step running total of predation mortality by (prey, cohort,
/// habitat), reset with the rest of the per-step scratch
#[derive(Debug, Default, Clone)]
pub struct TrackedMortality {
    totals: HashMap<MortKey, f64>,
}

impl TrackedMortality {
    pub fn record(&mut self, prey: GroupId, cohort: usize, habitat: Habitat, grazed: f64) {
        let key = MortKey {
            prey,
            cohort,
            habitat_tag: habitat_tag(habitat),
        };
        *self.totals.entry(key).or_insert(0.0) += grazed;
    }

    pub fn total(&self, prey: GroupId, cohort: usize, habitat: Habitat) -> f64 {
        let key = MortKey {
            prey,
            cohort,
            habitat_tag: habitat_tag(habitat),
        };
        self.totals.get(&key).copied().unwrap_or(0.0)
    }

    pub fn reset(&mut self) {
        self.totals.clear();
    }
}
