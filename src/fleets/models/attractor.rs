use super::{normalize, EffortContext, EffortModel};

/// proportional to each box's recent CPUE
#[derive(Debug, Clone)]
pub struct CpueProportional;

impl EffortModel for CpueProportional {
    fn allocate(&self, ctx: &EffortContext) -> Vec<f64> {
        let weights: Vec<f64> = ctx.cpue.iter().map(|c| c.max(0.0)).collect();
        normalize(&weights, ctx.total_effort)
    }
}

/// "ideal-free" distribution: boxes are weighted by their share of the
/// stock's target biomass, so effort tracks where the fish currently are
/// rather than where they were caught
#[derive(Debug, Clone)]
pub struct IdealFree;

impl EffortModel for IdealFree {
    fn allocate(&self, ctx: &EffortContext) -> Vec<f64> {
        let weights: Vec<f64> = ctx.target_biomass.iter().map(|b| b.max(0.0)).collect();
        normalize(&weights, ctx.total_effort)
    }
}

/// compound port×CPUE model with inertia toward last step's
/// distribution, limited by `speed_boat · Δt / DistPeak`.
#[derive(Debug, Clone)]
pub struct CpueScaledInertia;

impl EffortModel for CpueScaledInertia {
    fn allocate(&self, ctx: &EffortContext) -> Vec<f64> {
        let n = ctx.cpue.len();
        let port_weight: Vec<f64> = ctx
            .distance_to_port
            .iter()
            .map(|d| 1.0 / (1.0 + d.max(0.0)))
            .collect();
        let target: Vec<f64> = (0..n)
            .map(|i| ctx.cpue[i].max(0.0) * port_weight.get(i).copied().unwrap_or(1.0))
            .collect();
        let target = normalize(&target, ctx.total_effort);

        let max_shift = (ctx.speed_boat * ctx.dt / ctx.dist_peak.max(crate::EPSILON)).clamp(0.0, 1.0);
        (0..n)
            .map(|i| {
                let old = ctx.old_effort.get(i).copied().unwrap_or(0.0);
                old + (target[i] - old) * max_shift
            })
            .collect()
    }
}
