//! Advective/diffusive transport contract between adjacent boxes. The
//! dispatcher and flux accumulator operate strictly per-box; whatever
//! moves tracer mass across box boundaries between steps implements this
//! trait and is invoked once per step, before the dispatcher runs.

use crate::grid::{BoxId, Grid};
use crate::tracer::TracerStore;
use crate::Time;

/// one box-to-box transport contribution: `amount` of `tracer` leaving
/// `from` and arriving at `to` this step, at a given layer index (shared
/// by both boxes, since transport only moves mass between corresponding
/// layers).
#[derive(Debug, Clone, Copy)]
pub struct TransportFlux {
    pub from: BoxId,
    pub to: BoxId,
    pub layer: usize,
    pub tracer: crate::tracer::TracerId,
    pub amount: f64,
}

pub trait TransportDriver {
    /// computes this step's box-to-box fluxes without mutating the
    /// store; the caller applies them atomically afterward so every
    /// source box sees the same pre-transport snapshot.
    fn fluxes(&self, grid: &Grid, store: &TracerStore, dt: Time) -> Vec<TransportFlux>;
}

/// Standalone runs carry no circulation model: this driver always
/// returns no fluxes, so the mass-balance property (net transport delta
/// across the whole grid is exactly zero) holds trivially.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransport;

impl TransportDriver for NoTransport {
    fn fluxes(&self, _grid: &Grid, _store: &TracerStore, _dt: Time) -> Vec<TransportFlux> {
        Vec::new()
    }
}

/// applies a batch of transport fluxes to the store, debiting each
/// source box and crediting each destination box by the same amount.
pub fn apply(store: &mut TracerStore, fluxes: &[TransportFlux]) {
    for flux in fluxes {
        let current_from = store.get(flux.from, flux.layer, flux.tracer);
        store.set(flux.from, flux.layer, flux.tracer, (current_from - flux.amount).max(0.0));
        let current_to = store.get(flux.to, flux.layer, flux.tracer);
        store.set(flux.to, flux.layer, flux.tracer, current_to + flux.amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Adjacency, BoxCell, BoxType, Layer};
    use crate::tracer::{TracerDef, TracerId, TracerKind};

    #[test]
    fn no_transport_moves_nothing() {
        let box0 = BoxCell::new(BoxId(0), BoxType::Dynamic, 100.0, -10.0, vec![Layer::water(10.0)], 0);
        let adjacency = Adjacency::new(&[BoxId(0)], &[]);
        let grid = Grid::new(vec![box0], adjacency);
        let store = TracerStore::new(vec![TracerDef::new("NH4", TracerKind::Nutrient, "mgN/m3")], &[1]);

        let driver = NoTransport;
        assert!(driver.fluxes(&grid, &store, 1.0).is_empty());
    }

    #[test]
    fn apply_conserves_total_mass() {
        let mut store = TracerStore::new(vec![TracerDef::new("NH4", TracerKind::Nutrient, "mgN/m3")], &[2]);
        store.set(BoxId(0), 0, TracerId(0), 10.0);
        store.set(BoxId(1), 0, TracerId(0), 0.0);

        apply(
            &mut store,
            &[TransportFlux { from: BoxId(0), to: BoxId(1), layer: 0, tracer: TracerId(0), amount: 3.0 }],
        );

        assert_eq!(store.get(BoxId(0), 0, TracerId(0)), 7.0);
        assert_eq!(store.get(BoxId(1), 0, TracerId(0)), 3.0);
    }
}
