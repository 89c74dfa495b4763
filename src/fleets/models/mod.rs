//! Effort-attractor models: one per competing theory of how a fleet
//! distributes its effort across boxes each step. These share one
//! signature and differ only in body, so a trait object is the better
//! fit here rather than an enum match over variants.

mod attractor;
mod external;
mod simple;

pub use attractor::{CpueProportional, CpueScaledInertia, IdealFree};
pub use external::{DistanceToPort, Economic, PortModel, RecreationalPopulation, SinglePort};
pub use simple::{ArrayPrescribed, Constant, ConstantPerQuarter, PreviousEffortWeighted, TimeSeriesRead};

/// everything an effort model needs to read to allocate this step's
/// effort across boxes; built fresh each step from the harvest engine's
/// snapshot
#[derive(Debug, Clone)]
pub struct EffortContext<'a> {
    pub old_effort: &'a [f64],
    pub cpue: &'a [f64],
    pub distance_to_port: &'a [f64],
    pub biomass: &'a [f64],
    pub target_biomass: &'a [f64],
    pub prescribed: &'a [f64],
    pub port_population: f64,
    pub quarter: usize,
    pub total_effort: f64,
    pub speed_boat: f64,
    pub dist_peak: f64,
    pub dt: crate::Time,
}

/// box-by-box effort allocation
pub trait EffortModel: std::fmt::Debug {
    fn allocate(&self, ctx: &EffortContext) -> Vec<f64>;
}

pub(super) fn normalize(weights: &[f64], total_effort: f64) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    if sum <= crate::EPSILON {
        return vec![0.0; weights.len()];
    }
    weights.iter().map(|w| total_effort * w / sum).collect()
}
