use super::{AgeModel, Cohort, GroupKind, GroupParams};
use crate::tracer::TracerId;
use std::collections::HashMap;

/// Stable index into `GroupRegistry::groups`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

/// Per-habitat affinity weight; zero means the dispatcher skips this
/// group entirely in that habitat
#[derive(Debug, Clone, Copy, Default)]
pub struct HabitatAffinity {
    pub water: f64,
    pub sediment: f64,
    pub epibenthic: f64,
    pub ice: f64,
    pub land: f64,
}

/// Resolved tracer indices for this group's own pools, so process
/// functions never do name lookups in the step loop.
#[derive(Debug, Clone, Copy)]
pub struct GroupTracerIds {
    pub biomass: TracerId,
    pub struct_n: Option<TracerId>,
    pub res_n: Option<TracerId>,
    pub numbers: Option<TracerId>,
}

/// Catalogue entry: code, kind, age model, cohorts/genotypes/stocks,
/// habitat affinities, parameter bundle, tracer indices
#[derive(Debug, Clone)]
pub struct FunctionalGroup {
    pub code: String,
    pub kind: GroupKind,
    pub age_model: AgeModel,
    pub cohorts: Vec<Cohort>,
    pub num_genotypes: usize,
    pub num_stocks: usize,
    pub habitat: HabitatAffinity,
    pub params: GroupParams,
    pub tracers: GroupTracerIds,
    pub is_fished: bool,
    pub is_tac: bool,
    pub is_impacted: bool,
    pub active: bool,
    pub mindepth: f64,
    pub maxdepth: f64,
    pub maxtotdepth: f64,
}

impl FunctionalGroup {
    /// Depth/activity gate common to all consumer variants: a group acts only
    /// when active and within its depth window.
    pub fn gate(&self, botz: f64, current_depth: f64) -> bool {
        self.active
            && -botz <= self.maxtotdepth
            && self.mindepth <= current_depth
            && current_depth <= self.maxdepth
    }
}

/// Owns the static catalogue for a run, passed by `&GroupRegistry`
/// reference rather than kept as global state.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: Vec<FunctionalGroup>,
    by_code: HashMap<String, GroupId>,
}

impl GroupRegistry {
    pub fn register(&mut self, group: FunctionalGroup) -> GroupId {
        if group.habitat.land > 0.0 {
            // no habitat pass ever visits `Habitat::Land`; a positive
            // land affinity here is configured but will never fire.
            log::warn!(
                "group {} configures a land habitat affinity ({}) but the dispatcher never visits Habitat::Land; this group will never be processed there",
                group.code,
                group.habitat.land
            );
        }
        let id = GroupId(self.groups.len());
        self.by_code.insert(group.code.clone(), id);
        self.groups.push(group);
        id
    }

    pub fn id_of(&self, code: &str) -> Option<GroupId> {
        self.by_code.get(code).copied()
    }

    pub fn get(&self, id: GroupId) -> &FunctionalGroup {
        &self.groups[id.0]
    }

    pub fn get_mut(&mut self, id: GroupId) -> &mut FunctionalGroup {
        &mut self.groups[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &FunctionalGroup)> {
        self.groups.iter().enumerate().map(|(i, g)| (GroupId(i), g))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn fished(&self) -> impl Iterator<Item = (GroupId, &FunctionalGroup)> {
        self.iter().filter(|(_, g)| g.is_fished)
    }
}
