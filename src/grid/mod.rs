//! Spatial grid: a finite set of polygonal boxes, each with a stack of
//! water-column layers plus one sediment layer, optional ice and
//! epibenthic habitats. Neighbour adjacency is a sparse graph built with
//! `petgraph`.

mod adjacency;
mod boxcell;
mod habitat;
mod layer;

pub use adjacency::Adjacency;
pub use boxcell::{BoxCell, BoxId, BoxType};
pub use habitat::Habitat;
pub use layer::Layer;

/// Owns the static spatial structure for a run: boxes, their layer
/// stacks, and the neighbour adjacency graph. Static for the run's
/// lifetime
pub struct Grid {
    boxes: Vec<BoxCell>,
    adjacency: Adjacency,
}

impl Grid {
    pub fn new(boxes: Vec<BoxCell>, adjacency: Adjacency) -> Self {
        for b in &boxes {
            let depth: f64 = b.layers().iter().map(Layer::dz).sum();
            debug_assert!(
                (depth - (-b.botz())).abs() < 1e-6 || b.box_type() != BoxType::Dynamic,
                "box {}: sum of layer dz must equal depth",
                b.id().0
            );
        }
        Self { boxes, adjacency }
    }

    pub fn boxes(&self) -> &[BoxCell] {
        &self.boxes
    }

    pub fn box_(&self, id: BoxId) -> &BoxCell {
        &self.boxes[id.0]
    }

    pub fn box_mut(&mut self, id: BoxId) -> &mut BoxCell {
        &mut self.boxes[id.0]
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// non-boundary, non-land boxes the dispatcher visits each step
    ///
    pub fn dynamic_boxes(&self) -> impl Iterator<Item = &BoxCell> {
        self.boxes.iter().filter(|b| b.box_type() == BoxType::Dynamic)
    }
}
