/// Tracer kind, biomass, numbers, struct-N, res-N, detritus, nutrient, gas,
/// light, contaminant, ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracerKind {
    Biomass,
    Numbers,
    StructN,
    ResN,
    Detritus,
    Nutrient,
    Gas,
    Light,
    Contaminant,
    Ratio,
}

impl TracerKind {
    /// whether this tracer is required to stay non-negative after
    /// commit. Light and ratio tracers can legitimately be zero but are
    /// still non-negative; nothing in the catalogue is signed, so every
    /// kind is physical.
    pub fn is_physical(&self) -> bool {
        true
    }
}

/// How a tracer's per-layer values combine into a box-level total, used
/// by reporting and by habitat-scaled group growth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumPolicy {
    /// sum across layers (biomass, detritus, nutrients)
    Additive,
    /// area/volume-weighted mean across layers (pH, light)
    Intensive,
}
