//! One global step: dispatcher, harvest, and (on year boundaries)
//! management. Management runs after all physics and biology for a day
//! have committed; harvest runs after biology, before day-end reporting.

use super::RunContext;
use crate::cpue;
use crate::fleets::harvest::{self, NaturalMortality};
use crate::groups::GroupId;
use crate::{dispatcher, grid::BoxId};

/// per-step summary the caller (CLI, scenario harness) can log or assert
/// on without reaching back into `RunContext` internals.
#[derive(Debug, Clone, Copy)]
pub struct StepReport {
    pub time: crate::Time,
    pub newday: bool,
    pub newyear: bool,
    pub clamp_events: u64,
}

/// reads a species' configured linear mortality straight off its own
/// `ConsumerParams`/`CoralParams` bundle rather than threading a second
/// per-species mortality table through the harvest call: the Baranov-
/// style catch equation `B · (F/(F+M)) · (1 − exp(−(F+M)·Δt))` needs `M`
/// alongside `F`. Snapshotted into an owned map rather than borrowing
/// the registry, since `harvest::step` needs it mutably to apply
/// realized catch back to cohorts.
struct GroupLinearMortality(std::collections::HashMap<GroupId, f64>);

impl GroupLinearMortality {
    fn snapshot(registry: &crate::groups::GroupRegistry) -> Self {
        Self(
            registry
                .iter()
                .map(|(id, g)| {
                    let m = match &g.params {
                        crate::groups::GroupParams::Consumer(p) => p.linear_mortality,
                        crate::groups::GroupParams::Coral(p) => p.heterotroph.linear_mortality,
                        _ => 0.0,
                    };
                    (id, m)
                })
                .collect(),
        )
    }
}

impl NaturalMortality for GroupLinearMortality {
    fn m(&self, species: GroupId, _box_id: BoxId) -> f64 {
        self.0.get(&species).copied().unwrap_or(0.0)
    }
}

/// advances the run by one global time step
pub fn advance(ctx: &mut RunContext) -> StepReport {
    let time = ctx.clock.t();
    let dt = ctx.clock.dt();

    let transport_fluxes = ctx.transport.fluxes(&ctx.grid, &ctx.store, dt);
    crate::flux::apply_transport(&mut ctx.store, &transport_fluxes);

    ctx.mortality.reset();
    let contaminants_enabled = ctx.config.contaminants.enabled;
    for box_cell in ctx.grid.boxes().to_vec() {
        dispatcher::step_box(
            &box_cell,
            &mut ctx.groups,
            &mut ctx.store,
            &ctx.diet_preference,
            &mut ctx.mortality,
            &mut ctx.contaminants,
            contaminants_enabled,
            &ctx.nutrient_ids,
            &ctx.env_ids,
            &mut ctx.warnings,
            &ctx.config.ratios,
            time,
            dt,
        );
    }

    let boundaries = ctx.clock.advance();

    if boundaries.newday {
        let mortality = GroupLinearMortality::snapshot(&ctx.groups);
        harvest::step(
            &ctx.grid,
            &mut ctx.groups,
            &ctx.fleets,
            &mut ctx.effort,
            &ctx.tac,
            &ctx.mpa,
            &mut ctx.catch_ledger,
            &mortality,
            &ctx.clock,
            boundaries.newyear,
            ctx.config.fisheries.max_num_sp_over_tac,
            dt,
        );

        if ctx.config.fisheries.needs_shots {
            synthesize_shots(ctx);
        }

        ctx.catch_ledger.roll_last_catch();
    }

    if boundaries.newyear {
        run_management(ctx);
    }

    StepReport {
        time,
        newday: boundaries.newday,
        newyear: boundaries.newyear,
        clamp_events: ctx.warnings.clamps(),
    }
}

/// For every active fleet carrying a `ShotConfig`, converts this day's
/// fleet-level catch (still held in `catch_ledger.catch` ahead of
/// `roll_last_catch`) into a synthesised shot list plus leftover row,
/// overwriting that fleet's entry in `ctx.shots`.
fn synthesize_shots(ctx: &mut RunContext) {
    let box_ids: Vec<BoxId> = ctx.grid.dynamic_boxes().map(|b| b.id()).collect();
    if box_ids.is_empty() {
        return;
    }
    let depth_by_box: Vec<f64> = ctx.grid.dynamic_boxes().map(|b| -b.botz()).collect();

    let fleet_ids: Vec<crate::fleets::FleetId> = ctx.fleets.iter().map(|(id, _)| id).collect();
    for fleet_id in fleet_ids {
        let fleet = ctx.fleets.get(fleet_id);
        if !fleet.active {
            continue;
        }
        let Some(shot_cfg) = fleet.shots else { continue };

        let daily_catch: f64 = box_ids
            .iter()
            .flat_map(|&box_id| {
                fleet
                    .targets
                    .keys()
                    .map(move |&sp| ctx.catch_ledger.catch.get(&(sp, fleet_id, box_id)).copied().unwrap_or(0.0))
            })
            .sum();
        let effort_by_box: Vec<f64> = box_ids.iter().map(|&id| ctx.effort.get(id, fleet_id)).collect();
        let discard_fraction = if fleet.targets.is_empty() {
            0.0
        } else {
            fleet.targets.values().map(|t| t.discard_fraction).sum::<f64>() / fleet.targets.len() as f64
        };

        let inputs = cpue::ShotInputs {
            daily_catch,
            active_subfleets: shot_cfg.active_subfleets,
            fishable_period_hours: shot_cfg.fishable_period_hours,
            min_shot_length_hours: shot_cfg.min_shot_length_hours,
            effort_by_box: &effort_by_box,
            depth_by_box: &depth_by_box,
            discard_fraction,
            guru_weight: shot_cfg.guru_weight,
            negbinom_r: shot_cfg.negbinom_r,
            negbinom_p: shot_cfg.negbinom_p,
            min_effort_coefft: shot_cfg.min_effort_coefft,
            min_effort_const: shot_cfg.min_effort_const,
            max_shots: shot_cfg.max_shots,
        };
        let (shots, leftover) = cpue::synthesize(&inputs, &mut ctx.rng);
        ctx.shots.record(fleet_id, shots, leftover);
    }
}

/// year-boundary bookkeeping: resets the year-cumulative
/// effort series and logs each TAC-tracked species' year-end cumulative
/// catch. Per-stock assessments and HCR evaluation are driven by the
/// embedding application through `management::assessment`/
/// `management::hcr` directly, since they need stock-specific reference
/// points (B0, tier, break points) this generic pass doesn't own.
fn run_management(ctx: &mut RunContext) {
    ctx.effort.reset_annual();
    for (group_id, group) in ctx.groups.iter() {
        if !group.is_tac {
            continue;
        }
        let fleet = ctx.fleets.iter().find(|(_, f)| f.targets.contains_key(&group_id));
        let Some((fleet_id, _)) = fleet else { continue };
        let cum_catch = ctx.catch_ledger.cum_catch_by_species(fleet_id);
        let over_tac = cum_catch.get(&group_id).copied().unwrap_or(0.0);
        log::info!(
            "Time: {} year-end TAC check for group {}: cumulative catch {over_tac}",
            ctx.clock.t(),
            group.code
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AssessmentMode, Config, ContaminantConfig, FisheriesConfig, ManagementConfig, RatioConfig, SchedulingConfig};
    use crate::dispatcher::EnvironmentTracerIds;
    use crate::flux::NutrientTracerIds;
    use crate::grid::{Adjacency, BoxCell, BoxType, Layer};
    use crate::tracer::{TracerDef, TracerKind, TracerStore};
    use crate::Clock;

    fn empty_context() -> RunContext {
        let layers = vec![Layer::water(10.0)];
        let box0 = BoxCell::new(BoxId(0), BoxType::Dynamic, 100.0, -10.0, layers, 0);
        let adjacency = Adjacency::new(&[BoxId(0)], &[]);
        let grid = crate::grid::Grid::new(vec![box0], adjacency);

        let names = ["NH4", "NO3", "Si", "Fe", "P", "C", "DL", "DR", "Light", "Oxygen", "pH", "Temp", "O2Depth"];
        let catalogue: Vec<TracerDef> = names
            .iter()
            .map(|n| TracerDef::new(n, TracerKind::Nutrient, "mgN/m3"))
            .collect();
        let store = TracerStore::new(catalogue, &[1]);

        let nutrient_ids = NutrientTracerIds {
            nh: crate::tracer::TracerId(0),
            no: crate::tracer::TracerId(1),
            si: crate::tracer::TracerId(2),
            fe: crate::tracer::TracerId(3),
            p: crate::tracer::TracerId(4),
            c: crate::tracer::TracerId(5),
            dl: crate::tracer::TracerId(6),
            dr: crate::tracer::TracerId(7),
        };
        let env_ids = EnvironmentTracerIds {
            light: crate::tracer::TracerId(8),
            oxygen: crate::tracer::TracerId(9),
            ph: crate::tracer::TracerId(10),
            temperature: crate::tracer::TracerId(11),
            o2_depth: crate::tracer::TracerId(12),
        };

        let config = Config {
            scheduling: SchedulingConfig {
                dt_seconds: crate::SECONDS_PER_DAY,
                start_year: 2024,
                run_years: 1,
                snapshot_cadence_days: 1,
            },
            fisheries: FisheriesConfig {
                max_num_sp_over_tac: 1,
                needs_shots: false,
                flag_tac_include_discard: true,
            },
            management: ManagementConfig {
                assessment_interval_years: 1,
                multi_year_tac_period: 0,
                assessment_mode: AssessmentMode::Pseudo,
            },
            contaminants: ContaminantConfig::default(),
            ratios: RatioConfig::default(),
        };

        RunContext::new(
            Clock::new(crate::SECONDS_PER_DAY, 2024),
            grid,
            store,
            crate::groups::GroupRegistry::default(),
            crate::fleets::FleetRegistry::default(),
            config,
            1,
            nutrient_ids,
            env_ids,
        )
    }

    #[test]
    fn advancing_an_empty_run_does_not_panic_and_flags_newday() {
        let mut ctx = empty_context();
        let report = advance(&mut ctx);
        assert!(report.newday);
        assert_eq!(report.clamp_events, 0);
    }

    #[test]
    fn a_full_year_flags_exactly_one_newyear() {
        let mut ctx = empty_context();
        let mut newyear_count = 0;
        for _ in 0..crate::DAYS_PER_YEAR {
            if advance(&mut ctx).newyear {
                newyear_count += 1;
            }
        }
        assert_eq!(newyear_count, 1);
    }

    #[test]
    fn a_fleet_with_shot_config_gets_a_daily_ledger_entry() {
        use crate::fleets::models::Constant;
        use crate::fleets::{Fleet, ShotConfig};
        use std::collections::HashMap;

        let mut ctx = empty_context();
        ctx.config.fisheries.needs_shots = true;

        let fleet_id = ctx.fleets.register(Fleet {
            code: "trawl".into(),
            targets: HashMap::new(),
            ports: vec![BoxId(0)],
            home_port_distance: HashMap::new(),
            effort_model: Box::new(Constant { effort: vec![1.0] }),
            speed_boat: 10.0,
            dist_peak: 5.0,
            eff_thresh: 0.0,
            test_fish_effort: 0.0,
            cap: None,
            allow_aggregate_drop: true,
            active: true,
            shots: Some(ShotConfig {
                active_subfleets: 2,
                fishable_period_hours: 20.0,
                min_shot_length_hours: 4.0,
                guru_weight: 0.2,
                negbinom_r: 5.0,
                negbinom_p: 0.5,
                min_effort_coefft: 0.01,
                min_effort_const: 0.1,
                max_shots: 10,
            }),
        });

        advance(&mut ctx);
        assert!(ctx.shots.get(fleet_id).is_some());
    }
}
