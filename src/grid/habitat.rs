/// The habitats the dispatcher visits within a box, top-down: water
/// column layers, sediment, epibenthic, and — if active — ice and land
/// `Water` carries the layer index so a group's habitat
/// affinity can vary by depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Habitat {
    Water(usize),
    Sediment,
    Epibenthic,
    Ice,
    Land,
}

impl Habitat {
    pub fn is_water(&self) -> bool {
        matches!(self, Habitat::Water(_))
    }
}
