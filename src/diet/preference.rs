use crate::groups::GroupId;
use std::collections::HashMap;

/// Sparse `(predator, prey) → preference` matrix, a static parameter
/// stored as a read-only sparse matrix rather than linearised into a
/// dense ownership graph.
#[derive(Debug, Default, Clone)]
pub struct DietPreference {
    weights: HashMap<(GroupId, GroupId), f64>,
}

impl DietPreference {
    pub fn set(&mut self, predator: GroupId, prey: GroupId, weight: f64) {
        if weight > 0.0 {
            self.weights.insert((predator, prey), weight);
        } else {
            self.weights.remove(&(predator, prey));
        }
    }

    pub fn weight(&self, predator: GroupId, prey: GroupId) -> f64 {
        self.weights.get(&(predator, prey)).copied().unwrap_or(0.0)
    }

    /// prey this predator has any non-zero preference for.
    pub fn prey_of(&self, predator: GroupId) -> impl Iterator<Item = (GroupId, f64)> + '_ {
        self.weights
            .iter()
            .filter(move |((p, _), _)| *p == predator)
            .map(|((_, prey), w)| (*prey, *w))
    }
}
