use super::{DetritusFlux, NutrientFlux, WarningCounter};
use crate::grid::BoxId;
use crate::tracer::{TracerId, TracerStore};
use crate::Time;

/// What a single process-function call contributes to its box×habitat's
/// running totals. Process functions return this; the dispatcher routes
/// it into the right `FluxAccumulator` and, on the step's global
/// iteration (`it_count == 1`), also into the diagnostic global copies.
#[derive(Debug, Default, Clone, Copy)]
pub struct Contribution {
    pub nuts_prod: NutrientFlux,
    pub nuts_lost: NutrientFlux,
    pub detritus_prod: DetritusFlux,
    pub detritus_lost: DetritusFlux,
}

impl Contribution {
    pub fn merge(&mut self, other: &Contribution) {
        self.nuts_prod.add(&other.nuts_prod);
        self.nuts_lost.add(&other.nuts_lost);
        self.detritus_prod.add(&other.detritus_prod);
        self.detritus_lost.add(&other.detritus_lost);
    }
}

/// Per-box, per-habitat running totals for one step, held in the
/// per-step scratch arena and freed (dropped) at step end.
#[derive(Debug, Default, Clone)]
pub struct FluxAccumulator {
    pub running: Contribution,
    /// diagnostic copies, incremented exactly once per step on the
    /// `it_count == 1` iteration
    pub global: Contribution,
}

impl FluxAccumulator {
    pub fn record(&mut self, contribution: Contribution, is_global_iteration: bool) {
        self.running.merge(&contribution);
        if is_global_iteration {
            self.global.merge(&contribution);
        }
    }

    /// Commits `new = old + (prod - loss) * dt` to the six nutrient
    /// tracers and the two detritus tracers, clamping negative outcomes
    /// to 0 and recording a warning. Process functions work entirely in
    /// nitrogen currency, so `nuts_prod.c`/`nuts_lost.c` are always zero;
    /// when `ratios.track_carbon` is set, the carbon pool is instead
    /// carried as a fixed Redfield multiple of the net dissolved-nitrogen
    /// delta rather than left untouched.
    pub fn commit(
        &self,
        store: &mut TracerStore,
        warnings: &mut WarningCounter,
        time: Time,
        box_id: BoxId,
        layer: usize,
        dt: Time,
        ids: &NutrientTracerIds,
        ratios: &crate::config::RatioConfig,
    ) {
        let nh_delta = (self.running.nuts_prod.nh - self.running.nuts_lost.nh) * dt;
        let no_delta = (self.running.nuts_prod.no - self.running.nuts_lost.no) * dt;
        let si_delta = (self.running.nuts_prod.si - self.running.nuts_lost.si) * dt;
        let fe_delta = (self.running.nuts_prod.fe - self.running.nuts_lost.fe) * dt;
        let p_delta = (self.running.nuts_prod.p - self.running.nuts_lost.p) * dt;
        let c_delta = if ratios.track_carbon {
            (nh_delta + no_delta) * ratios.redfield_cn
        } else {
            (self.running.nuts_prod.c - self.running.nuts_lost.c) * dt
        };
        let dl_delta =
            (self.running.detritus_prod.labile - self.running.detritus_lost.labile) * dt;
        let dr_delta =
            (self.running.detritus_prod.refractory - self.running.detritus_lost.refractory) * dt;

        commit_one(store, warnings, time, box_id, layer, ids.nh, nh_delta, "NH4");
        commit_one(store, warnings, time, box_id, layer, ids.no, no_delta, "NO3");
        commit_one(store, warnings, time, box_id, layer, ids.si, si_delta, "Si");
        commit_one(store, warnings, time, box_id, layer, ids.fe, fe_delta, "Fe");
        commit_one(store, warnings, time, box_id, layer, ids.p, p_delta, "P");
        commit_one(store, warnings, time, box_id, layer, ids.c, c_delta, "C");
        commit_one(store, warnings, time, box_id, layer, ids.dl, dl_delta, "DL");
        commit_one(store, warnings, time, box_id, layer, ids.dr, dr_delta, "DR");
    }
}

/// Applies `delta` directly to one tracer, clamping negative outcomes to
/// 0 and recording a warning. Shared by `FluxAccumulator::commit`'s
/// per-tracer nutrient/detritus loop and the dispatcher's immediate
/// per-group biomass and predation-transfer writes, which can't go
/// through the layer-pooled accumulator since biomass is per-group
/// rather than a shared pool.
pub fn commit_one(
    store: &mut TracerStore,
    warnings: &mut WarningCounter,
    time: Time,
    box_id: BoxId,
    layer: usize,
    tracer: TracerId,
    delta: f64,
    label: &str,
) {
    let old = store.get(box_id, layer, tracer);
    let new = old + delta;
    if new < 0.0 {
        warnings.record_clamp(
            time,
            &format!("box={} layer={} tracer={label}", box_id.0, layer),
        );
        store.set(box_id, layer, tracer, 0.0);
    } else {
        store.set(box_id, layer, tracer, new);
    }
}

/// tracer ids for the six nutrients + two detritus pools, resolved once
/// at init so the commit pass never does name lookups in the step loop.
#[derive(Debug, Clone, Copy)]
pub struct NutrientTracerIds {
    pub nh: TracerId,
    pub no: TracerId,
    pub si: TracerId,
    pub fe: TracerId,
    pub p: TracerId,
    pub c: TracerId,
    pub dl: TracerId,
    pub dr: TracerId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::{TracerDef, TracerKind};

    fn ids_and_store() -> (NutrientTracerIds, TracerStore) {
        let names = ["NH4", "NO3", "Si", "Fe", "P", "C", "DL", "DR"];
        let catalogue: Vec<TracerDef> = names
            .iter()
            .map(|n| TracerDef::new(*n, TracerKind::Nutrient, "mg N/m3"))
            .collect();
        let mut store = TracerStore::new(catalogue, &[1]);
        let ids = NutrientTracerIds {
            nh: store.id_of("NH4").unwrap(),
            no: store.id_of("NO3").unwrap(),
            si: store.id_of("Si").unwrap(),
            fe: store.id_of("Fe").unwrap(),
            p: store.id_of("P").unwrap(),
            c: store.id_of("C").unwrap(),
            dl: store.id_of("DL").unwrap(),
            dr: store.id_of("DR").unwrap(),
        };
        (ids, store)
    }

    #[test]
    fn negative_outcome_clamps_to_zero_and_warns() {
        let (ids, mut store) = ids_and_store();
        store.set(BoxId(0), 0, ids.nh, 1.0);
        let mut acc = FluxAccumulator::default();
        acc.running.nuts_lost.nh = 10.0; // far more loss than stock
        let mut warnings = WarningCounter::default();
        let ratios = crate::config::RatioConfig::default();
        acc.commit(&mut store, &mut warnings, 0.0, BoxId(0), 0, 1.0, &ids, &ratios);
        assert_eq!(store.get(BoxId(0), 0, ids.nh), 0.0);
        assert_eq!(warnings.clamps(), 1);
    }

    #[test]
    fn positive_balance_commits_exactly() {
        let (ids, mut store) = ids_and_store();
        store.set(BoxId(0), 0, ids.dl, 5.0);
        let mut acc = FluxAccumulator::default();
        acc.running.detritus_prod.labile = 2.0;
        acc.running.detritus_lost.labile = 0.5;
        let mut warnings = WarningCounter::default();
        let ratios = crate::config::RatioConfig::default();
        acc.commit(&mut store, &mut warnings, 0.0, BoxId(0), 0, 1.0, &ids, &ratios);
        assert_eq!(store.get(BoxId(0), 0, ids.dl), 6.5);
        assert_eq!(warnings.clamps(), 0);
    }

    #[test]
    fn tracked_carbon_follows_redfield_ratio_of_net_nitrogen() {
        let (ids, mut store) = ids_and_store();
        store.set(BoxId(0), 0, ids.c, 0.0);
        let mut acc = FluxAccumulator::default();
        acc.running.nuts_prod.nh = 2.0;
        acc.running.nuts_prod.no = 1.0;
        let mut warnings = WarningCounter::default();
        let ratios = crate::config::RatioConfig {
            track_carbon: true,
            redfield_cn: 6.625,
        };
        acc.commit(&mut store, &mut warnings, 0.0, BoxId(0), 0, 1.0, &ids, &ratios);
        assert!((store.get(BoxId(0), 0, ids.c) - 3.0 * 6.625).abs() < 1e-9);
    }
}
