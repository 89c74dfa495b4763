//! Flux accumulator: aggregates detritus/nutrient/contaminant/atomic-ratio
//! gains and losses per box×habitat during a step and commits them to the
//! tracer store at step end

mod accumulator;
mod contamination;
mod transport;
mod warning;

pub use accumulator::{commit_one, Contribution, FluxAccumulator, NutrientTracerIds};
pub use contamination::ContaminantLedger;
pub use transport::{apply as apply_transport, NoTransport, TransportDriver, TransportFlux};
pub use warning::WarningCounter;

/// the six nutrient pools names: NH4, NO3, Si, Fe, P, C.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NutrientFlux {
    pub nh: f64,
    pub no: f64,
    pub si: f64,
    pub fe: f64,
    pub p: f64,
    pub c: f64,
}

impl NutrientFlux {
    pub fn sum(&self) -> f64 {
        self.nh + self.no + self.si + self.fe + self.p + self.c
    }

    pub fn add(&mut self, other: &NutrientFlux) {
        self.nh += other.nh;
        self.no += other.no;
        self.si += other.si;
        self.fe += other.fe;
        self.p += other.p;
        self.c += other.c;
    }
}

/// labile/refractory detritus pools (DL/DR, GLOSSARY).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DetritusFlux {
    pub labile: f64,
    pub refractory: f64,
}

impl DetritusFlux {
    pub fn add(&mut self, other: &DetritusFlux) {
        self.labile += other.labile;
        self.refractory += other.refractory;
    }
}
