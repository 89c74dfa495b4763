use super::preference::DietPreference;
use super::tracked_mortality::TrackedMortality;
use crate::grid::Habitat;
use crate::groups::{GroupId, GroupKind};
use crate::EPSILON;

/// One prey slot's available biomass-N, as read from the box's snapshot
/// tracers
#[derive(Debug, Clone, Copy)]
pub struct PreyInfo {
    pub prey: GroupId,
    pub cohort: usize,
    pub habitat: Habitat,
    pub available: f64,
    /// the prey group's kind, so callers can single out primary
    /// producers for `benthic_depth_scalar` without a registry lookup.
    pub kind: GroupKind,
}

/// Nitrogen grazed from one prey slot this call. Total grazing pressure
/// across predators stays bounded by available biomass times a scaling
/// factor, enforced by the caller never issuing more than one `eat` call
/// per predator per step against the same snapshot.
#[derive(Debug, Clone, Copy)]
pub struct GrazeInfo {
    pub prey: GroupId,
    pub cohort: usize,
    pub habitat: Habitat,
    pub grazed: f64,
}

/// Grazing restated for contaminant/atomic-ratio bookkeeping; identical
/// magnitude to `GrazeInfo`, kept as its own type so the contaminant ledger's
/// call sites read as using the ratio-bookkeeping view rather than the growth
/// view.
#[derive(Debug, Clone, Copy)]
pub struct CatchGrazeInfo {
    pub prey: GroupId,
    pub cohort: usize,
    pub grazed: f64,
}

/// Benthic depth scalar attenuating phytoplankton availability to
/// sediment-dwelling predators: `(O2depth − KDEP) /
/// O2depth`, floored at 0 so deep, anoxic sediment simply removes that
/// prey item from the pool rather than going negative.
pub fn benthic_depth_scalar(o2_depth: f64, k_dep: f64) -> f64 {
    ((o2_depth - k_dep) / (o2_depth + EPSILON)).max(0.0)
}

/// Holling type-II ingestion kernel shared by every predator call: total
/// capacity is bounded by `{mu_max, k_l, k_u, ht, vl}` against the pooled,
/// preference-weighted prey available, then divided out across slots in
/// proportion to each slot's weighted share. This is the single
/// implementation the dispatcher's per-kind consumer variants call into
/// for live-prey predation (background detritus/bacteria consumption is
/// handled directly by the process functions in `groups::process`).
pub fn eat(
    predator: GroupId,
    predator_biomass: f64,
    prey: &[PreyInfo],
    preference: &DietPreference,
    kernel: EatKernel,
    mortality: &mut TrackedMortality,
) -> (Vec<GrazeInfo>, Vec<CatchGrazeInfo>, f64) {
    let weighted: Vec<(f64, &PreyInfo)> = prey
        .iter()
        .map(|p| (preference.weight(predator, p.prey) * p.available.max(0.0), p))
        .collect();
    let pooled: f64 = weighted.iter().map(|(w, _)| w).sum();

    let encounter = pooled / (kernel.k_l + pooled + EPSILON);
    let satiation = kernel.k_u / (kernel.k_u + pooled + EPSILON);
    let functional_response = kernel.c_scalar * encounter * satiation;
    let handling_limited = functional_response / (1.0 + kernel.ht * functional_response);
    let total_ingestion = kernel.mu_max * handling_limited * kernel.vl * predator_biomass;

    let mut graze = Vec::with_capacity(prey.len());
    let mut catch_graze = Vec::with_capacity(prey.len());
    let mut graze_live = 0.0;

    for (weight, info) in &weighted {
        if *weight <= 0.0 || pooled <= EPSILON {
            continue;
        }
        let share = weight / pooled;
        let grazed = (total_ingestion * share).min(info.available.max(0.0));
        if grazed <= 0.0 {
            continue;
        }
        mortality.record(info.prey, info.cohort, info.habitat, grazed);
        graze.push(GrazeInfo {
            prey: info.prey,
            cohort: info.cohort,
            habitat: info.habitat,
            grazed,
        });
        catch_graze.push(CatchGrazeInfo {
            prey: info.prey,
            cohort: info.cohort,
            grazed,
        });
        graze_live += grazed;
    }

    (graze, catch_graze, graze_live)
}

/// Consumer-kernel parameters `{C, μ_max, KL, KU, vl, ht}` pulled from a
/// `ConsumerParams` bundle, kept as a narrow view so `eat` doesn't need to
/// know about assimilation efficiencies or crowding — those stay in
/// `groups::process::invert_consumer`, which already applies them to the
/// predator's own growth conversion.
#[derive(Debug, Clone, Copy)]
pub struct EatKernel {
    pub c_scalar: f64,
    pub mu_max: f64,
    pub k_l: f64,
    pub k_u: f64,
    pub vl: f64,
    pub ht: f64,
    /// extra depth scalar this predator applies to phytoplankton/
    /// dinoflagellate prey availability via `benthic_depth_scalar`;
    /// zero disables it (the predator isn't a benthic feeder).
    pub k_dep: f64,
}

impl From<&crate::groups::params::ConsumerParams> for EatKernel {
    fn from(p: &crate::groups::params::ConsumerParams) -> Self {
        EatKernel {
            c_scalar: p.c_scalar,
            mu_max: p.mu_max,
            k_l: p.k_l,
            k_u: p.k_u,
            vl: p.vl,
            ht: p.ht,
            k_dep: p.k_dep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kernel() -> EatKernel {
        EatKernel {
            c_scalar: 1.0,
            mu_max: 0.5,
            k_l: 2.0,
            k_u: 10.0,
            vl: 1.0,
            ht: 0.1,
            k_dep: 0.0,
        }
    }

    #[test]
    fn grazing_never_exceeds_available_prey() {
        let mut pref = DietPreference::default();
        let predator = GroupId(0);
        let prey_a = GroupId(1);
        let prey_b = GroupId(2);
        pref.set(predator, prey_a, 1.0);
        pref.set(predator, prey_b, 0.5);
        let prey = vec![
            PreyInfo {
                prey: prey_a,
                cohort: 0,
                habitat: Habitat::Water(0),
                available: 0.2,
                kind: GroupKind::InvertConsumer,
            },
            PreyInfo {
                prey: prey_b,
                cohort: 0,
                habitat: Habitat::Water(0),
                available: 5.0,
                kind: GroupKind::InvertConsumer,
            },
        ];
        let mut mortality = TrackedMortality::default();
        let (graze, _, graze_live) = eat(predator, 10.0, &prey, &pref, kernel(), &mut mortality);
        for g in &graze {
            let available = prey.iter().find(|p| p.prey == g.prey).unwrap().available;
            assert!(g.grazed <= available + 1e-9);
        }
        assert!(graze_live > 0.0);
    }

    #[test]
    fn zero_preference_excludes_prey_entirely() {
        let pref = DietPreference::default();
        let predator = GroupId(0);
        let prey = vec![PreyInfo {
            prey: GroupId(1),
            cohort: 0,
            habitat: Habitat::Water(0),
            available: 100.0,
            kind: GroupKind::InvertConsumer,
        }];
        let mut mortality = TrackedMortality::default();
        let (graze, _, graze_live) = eat(predator, 10.0, &prey, &pref, kernel(), &mut mortality);
        assert!(graze.is_empty());
        assert_eq!(graze_live, 0.0);
    }

    #[test]
    fn depth_scalar_zero_at_kdep_and_positive_above() {
        assert_eq!(benthic_depth_scalar(50.0, 50.0), 0.0);
        assert!(benthic_depth_scalar(80.0, 50.0) > 0.0);
    }
}
