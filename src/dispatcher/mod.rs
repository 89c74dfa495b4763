//! Process dispatcher: for each box×layer×habitat×group, invokes the
//! group's process function, runs live-prey predation through the diet
//! resolver, and commits the accumulated fluxes once every group in the
//! box has been processed.
//!
//! Built around a `Registry` passed by reference and a per-step scratch
//! `FluxAccumulator` freed at box end, rather than a set of global flux
//! arrays.

use crate::diet::{self, DietPreference, PreyInfo, TrackedMortality};
use crate::flux::{commit_one, ContaminantLedger, Contribution, FluxAccumulator, NutrientTracerIds, WarningCounter};
use crate::grid::{BoxCell, Habitat};
use crate::groups::process::{self, Ambient, ScheduleFlags};
use crate::groups::{GroupId, GroupKind, GroupRegistry};
use crate::tracer::{TracerId, TracerStore};
use crate::Time;
use std::collections::HashMap;

/// resolved indices for the environmental tracers every process function
/// may read beyond the eight flux-carrying nutrient/detritus pools
///
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentTracerIds {
    pub light: TracerId,
    pub oxygen: TracerId,
    pub ph: TracerId,
    pub temperature: TracerId,
    pub o2_depth: TracerId,
}

/// processing order within a box: producers and bacteria first so
/// consumer calls see freshly computed prey-pool flux contributions at
/// the accumulator level, even though tracer *reads* stay snapshotted at
/// box entry
fn kind_priority(kind: GroupKind) -> u8 {
    match kind {
        GroupKind::PrimaryProducer | GroupKind::Dinoflagellate => 0,
        GroupKind::PelagicBacteria | GroupKind::SedimentBacteria => 1,
        GroupKind::LabileDetritus | GroupKind::RefractoryDetritus | GroupKind::Carrion => 2,
        GroupKind::InvertConsumer | GroupKind::Coral => 3,
    }
}

fn habitat_affinity(habitat: Habitat, affinity: &crate::groups::registry::HabitatAffinity) -> f64 {
    match habitat {
        Habitat::Water(_) => affinity.water,
        Habitat::Sediment => affinity.sediment,
        Habitat::Epibenthic => affinity.epibenthic,
        Habitat::Ice => affinity.ice,
        Habitat::Land => affinity.land,
    }
}

/// sum of biomass across active groups of one bacterial kind, read at the
/// given box×layer
fn bacteria_biomass(
    registry: &GroupRegistry,
    store: &TracerStore,
    box_id: crate::grid::BoxId,
    layer: usize,
    kind: GroupKind,
) -> f64 {
    registry
        .iter()
        .filter(|(_, g)| g.kind == kind && g.active)
        .map(|(_, g)| store.get(box_id, layer, g.tracers.biomass))
        .sum()
}

#[allow(clippy::too_many_arguments)]
fn build_ambient(
    store: &TracerStore,
    registry: &GroupRegistry,
    box_cell: &BoxCell,
    layer: usize,
    depth: f64,
    nutrient_ids: &NutrientTracerIds,
    env_ids: &EnvironmentTracerIds,
    own_biomass: f64,
    bacteria_active: bool,
) -> Ambient {
    let box_id = box_cell.id();
    Ambient {
        nh4: store.get(box_id, layer, nutrient_ids.nh),
        no3: store.get(box_id, layer, nutrient_ids.no),
        si: store.get(box_id, layer, nutrient_ids.si),
        fe: store.get(box_id, layer, nutrient_ids.fe),
        p: store.get(box_id, layer, nutrient_ids.p),
        c: store.get(box_id, layer, nutrient_ids.c),
        light: store.get(box_id, layer, env_ids.light),
        oxygen: store.get(box_id, layer, env_ids.oxygen),
        ph: store.get(box_id, layer, env_ids.ph),
        depth,
        o2_depth: store.get(box_id, layer, env_ids.o2_depth),
        dl: store.get(box_id, layer, nutrient_ids.dl),
        dr: store.get(box_id, layer, nutrient_ids.dr),
        pelagic_bacteria: bacteria_biomass(registry, store, box_id, layer, GroupKind::PelagicBacteria),
        sediment_bacteria: bacteria_biomass(registry, store, box_id, layer, GroupKind::SedimentBacteria),
        own_biomass,
        area_hab: 1.0,
        max_density: f64::MAX,
        is_spawning: false,
        bacteria_active,
        botz: box_cell.botz(),
        temperature: store.get(box_id, layer, env_ids.temperature),
    }
}

/// one (habitat, layer-index-into-the-tracer-store) pair the dispatcher
/// visits, top-down. Epibenthic and ice share their underlying layer's
/// tracer slot with sediment/surface respectively rather than owning a
/// distinct store row — the grid does not model them as separate
/// physical layers
fn habitats_top_down(box_cell: &BoxCell) -> Vec<(Habitat, usize, f64)> {
    let mut out = Vec::new();
    let mut cumulative = 0.0;
    let mut water: Vec<(usize, &crate::grid::Layer)> = box_cell.water_layers().collect();
    water.sort_by(|a, b| b.0.cmp(&a.0)); // surface (highest index) first
    for (idx, layer) in water {
        cumulative += layer.dz();
        out.push((Habitat::Water(idx), idx, cumulative));
    }
    if let Some((sed_idx, sed_layer)) = box_cell
        .layers()
        .iter()
        .enumerate()
        .find(|(_, l)| l.is_sediment())
    {
        out.push((Habitat::Sediment, sed_idx, cumulative + sed_layer.dz()));
        if box_cell.has_epibenthos() {
            out.push((Habitat::Epibenthic, sed_idx, cumulative));
        }
    }
    if box_cell.has_ice() {
        if let Some((surface_idx, _)) = box_cell
            .water_layers()
            .max_by_key(|(idx, _)| *idx)
        {
            out.push((Habitat::Ice, surface_idx, 0.0));
        }
    }
    out
}

/// Runs one step's worth of group processing and live-prey predation for
/// a single box, committing all per-layer flux accumulators at the end
///
#[allow(clippy::too_many_arguments)]
pub fn step_box(
    box_cell: &BoxCell,
    registry: &mut GroupRegistry,
    store: &mut TracerStore,
    preference: &DietPreference,
    mortality: &mut TrackedMortality,
    contaminants: &mut ContaminantLedger,
    contaminants_enabled: bool,
    nutrient_ids: &NutrientTracerIds,
    env_ids: &EnvironmentTracerIds,
    warnings: &mut WarningCounter,
    ratios: &crate::config::RatioConfig,
    time: Time,
    dt: Time,
) {
    let box_id = box_cell.id();
    let bacteria_active = registry.iter().any(|(_, g)| {
        matches!(g.kind, GroupKind::PelagicBacteria | GroupKind::SedimentBacteria) && g.active
    });

    let mut accumulators: HashMap<usize, FluxAccumulator> = HashMap::new();
    let flags = ScheduleFlags {
        it_count: 1,
        is_global: true,
    };

    for (habitat, layer, depth) in habitats_top_down(box_cell) {
        let mut order: Vec<_> = registry
            .iter()
            .filter(|(_, g)| habitat_affinity(habitat, &g.habitat) > 0.0)
            .map(|(id, g)| (id, kind_priority(g.kind)))
            .collect();
        order.sort_by_key(|(_, priority)| *priority);

        // snapshot prey availability for this habitat once, before any
        // predator call mutates flux accumulators, so every predator sees
        // a consistent prey field regardless of which ran earlier.
        let prey_snapshot: Vec<PreyInfo> = registry
            .iter()
            .filter(|(_, g)| habitat_affinity(habitat, &g.habitat) > 0.0)
            .flat_map(|(id, g)| {
                let kind = g.kind;
                g.cohorts.iter().map(move |c| PreyInfo {
                    prey: id,
                    cohort: c.index,
                    habitat,
                    available: store.get(box_id, layer, g.tracers.biomass),
                    kind,
                })
            })
            .collect();

        let prey_biomass_before: HashMap<(GroupId, usize), f64> = prey_snapshot
            .iter()
            .map(|p| ((p.prey, p.cohort), p.available))
            .collect();

        // resolved once per habitat, before any group in it is borrowed
        // mutably below, so the predation-transfer loop can look up a
        // prey's biomass tracer without re-borrowing `registry`.
        let biomass_tracer_of: HashMap<GroupId, TracerId> =
            registry.iter().map(|(id, g)| (id, g.tracers.biomass)).collect();

        for (group_id, _) in order {
            let own_biomass = store.get(box_id, layer, registry.get(group_id).tracers.biomass);
            let ambient = build_ambient(
                store,
                registry,
                box_cell,
                layer,
                depth,
                nutrient_ids,
                env_ids,
                own_biomass,
                bacteria_active,
            );

            let gate_ok = registry.get(group_id).gate(ambient.botz, ambient.depth);
            let kind = registry.get(group_id).kind;
            let params = registry.get(group_id).params.clone();
            let group = registry.get_mut(group_id);
            let biomass_tracer = group.tracers.biomass;
            let group_code = group.code.clone();
            let mut total = Contribution::default();
            let mut bio_delta = 0.0;
            for cohort in &mut group.cohorts {
                total.merge(&process::dispatch(kind, &params, gate_ok, cohort, &ambient, flags));
                bio_delta += cohort.state.growth - cohort.state.lysis - cohort.state.mortality;
            }
            accumulators.entry(layer).or_default().record(total, true);

            // intrinsic growth/lysis/mortality, applied straight to this
            // group's own biomass tracer rather than pooled with the
            // box's shared nutrient accumulator.
            commit_one(store, warnings, time, box_id, layer, biomass_tracer, bio_delta * dt, &group_code);

            if matches!(kind, GroupKind::InvertConsumer | GroupKind::Coral) {
                if let GroupParamsRef::Consumer(kernel) = kernel_of(&params) {
                    // sediment/epibenthic feeders see attenuated
                    // phytoplankton/dinoflagellate availability in deep,
                    // anoxic sediment; every other habitat and predator
                    // kind sees the snapshot unchanged.
                    let benthic_prey: Vec<PreyInfo>;
                    let prey_for_eat: &[PreyInfo] = if matches!(habitat, Habitat::Sediment | Habitat::Epibenthic) && kernel.k_dep > 0.0 {
                        let scalar = diet::benthic_depth_scalar(ambient.o2_depth, kernel.k_dep);
                        benthic_prey = prey_snapshot
                            .iter()
                            .map(|p| {
                                let mut p = *p;
                                if matches!(p.kind, GroupKind::PrimaryProducer | GroupKind::Dinoflagellate) {
                                    p.available *= scalar;
                                }
                                p
                            })
                            .collect();
                        &benthic_prey
                    } else {
                        &prey_snapshot
                    };

                    let group = registry.get_mut(group_id);
                    for cohort in &mut group.cohorts {
                        let (_, catch_graze, graze_live) = diet::eat(
                            group_id,
                            own_biomass,
                            prey_for_eat,
                            preference,
                            kernel,
                            mortality,
                        );
                        cohort.state.graze_live += graze_live;

                        // predator gains what it grazed from live prey;
                        // each prey slot loses the matching amount, kept
                        // as a direct transfer rather than folded into
                        // the pooled nutrient accumulator.
                        commit_one(store, warnings, time, box_id, layer, biomass_tracer, graze_live * dt, &group_code);
                        for catch in &catch_graze {
                            if let Some(&prey_tracer) = biomass_tracer_of.get(&catch.prey) {
                                commit_one(store, warnings, time, box_id, layer, prey_tracer, -(catch.grazed * dt), "predation-loss");
                            }
                        }

                        if contaminants_enabled {
                            for catch in &catch_graze {
                                let before = prey_biomass_before
                                    .get(&(catch.prey, catch.cohort))
                                    .copied()
                                    .unwrap_or(0.0);
                                contaminants.transfer(
                                    box_id,
                                    (catch.prey, catch.cohort),
                                    (group_id, cohort.index),
                                    catch.grazed,
                                    before,
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    for (layer, accumulator) in &accumulators {
        accumulator.commit(store, warnings, time, box_id, *layer, dt, nutrient_ids, ratios);
    }
}

enum GroupParamsRef {
    Consumer(diet::EatKernel),
    Other,
}

fn kernel_of(params: &crate::groups::GroupParams) -> GroupParamsRef {
    match params {
        crate::groups::GroupParams::Consumer(p) => GroupParamsRef::Consumer(p.into()),
        crate::groups::GroupParams::Coral(p) => GroupParamsRef::Consumer((&p.heterotroph).into()),
        _ => GroupParamsRef::Other,
    }
}
