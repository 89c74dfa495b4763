use super::TracerDef;
use crate::grid::BoxId;
use std::collections::HashMap;

/// Stable index into the tracer catalogue — the index-based "pointer"
/// convention calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TracerId(pub usize);

/// Per-box, per-layer scalar fields, addressed by `(BoxId, layer, TracerId)`.
/// Created at init from a `TracerDef` catalogue; mutated only through
/// `set`/`add` during the flux commit pass or by the
/// (external, out of scope) transport driver between steps.
pub struct TracerStore {
    catalogue: Vec<TracerDef>,
    by_name: HashMap<String, TracerId>,
    /// `values[box][layer][tracer]`
    values: Vec<Vec<Vec<f64>>>,
}

impl TracerStore {
    pub fn new(catalogue: Vec<TracerDef>, layers_per_box: &[usize]) -> Self {
        let by_name = catalogue
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), TracerId(i)))
            .collect();
        let n = catalogue.len();
        let values = layers_per_box
            .iter()
            .map(|&nlayers| vec![vec![0.0; n]; nlayers])
            .collect();
        Self {
            catalogue,
            by_name,
            values,
        }
    }

    pub fn id_of(&self, name: &str) -> Option<TracerId> {
        self.by_name.get(name).copied()
    }

    pub fn def(&self, id: TracerId) -> &TracerDef {
        &self.catalogue[id.0]
    }

    pub fn catalogue(&self) -> &[TracerDef] {
        &self.catalogue
    }

    pub fn get(&self, box_id: BoxId, layer: usize, tracer: TracerId) -> f64 {
        self.values[box_id.0][layer][tracer.0]
    }

    pub fn set(&mut self, box_id: BoxId, layer: usize, tracer: TracerId, value: f64) {
        self.values[box_id.0][layer][tracer.0] = value;
    }

    pub fn add(&mut self, box_id: BoxId, layer: usize, tracer: TracerId, delta: f64) {
        self.values[box_id.0][layer][tracer.0] += delta;
    }

    /// box total across all of its layers, using the tracer's additive
    /// sum policy
    pub fn box_total(&self, box_id: BoxId, tracer: TracerId) -> f64 {
        self.values[box_id.0]
            .iter()
            .map(|layer| layer[tracer.0])
            .sum()
    }

    pub fn num_boxes(&self) -> usize {
        self.values.len()
    }

    pub fn num_layers(&self, box_id: BoxId) -> usize {
        self.values[box_id.0].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::TracerKind;

    fn store() -> TracerStore {
        let catalogue = vec![
            TracerDef::new("NH4", TracerKind::Nutrient, "mg N/m3"),
            TracerDef::new("DL", TracerKind::Detritus, "mg N/m3"),
        ];
        TracerStore::new(catalogue, &[2, 1])
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut store = store();
        let nh4 = store.id_of("NH4").unwrap();
        store.set(BoxId(0), 0, nh4, 1.5);
        assert_eq!(store.get(BoxId(0), 0, nh4), 1.5);
        assert_eq!(store.get(BoxId(0), 1, nh4), 0.0);
    }

    #[test]
    fn box_total_sums_all_layers() {
        let mut store = store();
        let dl = store.id_of("DL").unwrap();
        store.set(BoxId(0), 0, dl, 1.0);
        store.set(BoxId(0), 1, dl, 2.0);
        assert_eq!(store.box_total(BoxId(0), dl), 3.0);
    }
}
