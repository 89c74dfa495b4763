use super::{normalize, EffortContext, EffortModel};

/// fixed effort per box, unchanging across the run.
#[derive(Debug, Clone)]
pub struct Constant {
    pub effort: Vec<f64>,
}

impl EffortModel for Constant {
    fn allocate(&self, _ctx: &EffortContext) -> Vec<f64> {
        self.effort.clone()
    }
}

/// fixed effort per box, varying by calendar quarter.
#[derive(Debug, Clone)]
pub struct ConstantPerQuarter {
    pub effort_by_quarter: [Vec<f64>; 4],
}

impl EffortModel for ConstantPerQuarter {
    fn allocate(&self, ctx: &EffortContext) -> Vec<f64> {
        self.effort_by_quarter[ctx.quarter.min(3)].clone()
    }
}

/// effort read directly from a pre-supplied schedule, one row per step.
/// The caller advances `cursor` once per step by writing a fresh
/// `prescribed` slice into the context.
#[derive(Debug, Clone)]
pub struct ArrayPrescribed;

impl EffortModel for ArrayPrescribed {
    fn allocate(&self, ctx: &EffortContext) -> Vec<f64> {
        ctx.prescribed.to_vec()
    }
}

/// identical mechanics to `ArrayPrescribed` (reads a forcing time
/// series rather than a static input array) — kept as a distinct type so
/// configuration can select it independently
#[derive(Debug, Clone)]
pub struct TimeSeriesRead;

impl EffortModel for TimeSeriesRead {
    fn allocate(&self, ctx: &EffortContext) -> Vec<f64> {
        ctx.prescribed.to_vec()
    }
}

/// redistributes total effort in proportion to last step's per-box share
///
#[derive(Debug, Clone)]
pub struct PreviousEffortWeighted;

impl EffortModel for PreviousEffortWeighted {
    fn allocate(&self, ctx: &EffortContext) -> Vec<f64> {
        normalize(ctx.old_effort, ctx.total_effort)
    }
}
