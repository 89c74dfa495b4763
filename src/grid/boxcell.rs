use super::Layer;

/// Stable integer index into `Grid::boxes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxType {
    Dynamic,
    Boundary,
    Land,
}

/// A single polygonal box: water-column layer stack (0 deepest, surface
/// on top) plus a sediment layer, stored as the last element of `layers`
/// with `Layer::is_sediment() == true`.
#[derive(Debug, Clone)]
pub struct BoxCell {
    id: BoxId,
    box_type: BoxType,
    area: f64,
    /// depth below datum, negative down
    botz: f64,
    layers: Vec<Layer>,
    region: usize,
    has_ice: bool,
    has_epibenthos: bool,
}

impl BoxCell {
    pub fn new(
        id: BoxId,
        box_type: BoxType,
        area: f64,
        botz: f64,
        layers: Vec<Layer>,
        region: usize,
    ) -> Self {
        Self {
            id,
            box_type,
            area,
            botz,
            layers,
            region,
            has_ice: false,
            has_epibenthos: false,
        }
    }

    pub fn with_ice(mut self, has_ice: bool) -> Self {
        self.has_ice = has_ice;
        self
    }

    pub fn with_epibenthos(mut self, has_epibenthos: bool) -> Self {
        self.has_epibenthos = has_epibenthos;
        self
    }

    pub fn id(&self) -> BoxId {
        self.id
    }

    pub fn box_type(&self) -> BoxType {
        self.box_type
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn botz(&self) -> f64 {
        self.botz
    }

    pub fn region(&self) -> usize {
        self.region
    }

    pub fn has_ice(&self) -> bool {
        self.has_ice
    }

    pub fn has_epibenthos(&self) -> bool {
        self.has_epibenthos
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// water-column layers, surface first, excluding the sediment layer.
    pub fn water_layers(&self) -> impl Iterator<Item = (usize, &Layer)> {
        self.layers
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.is_sediment())
    }

    pub fn sediment(&self) -> Option<&Layer> {
        self.layers.iter().find(|l| l.is_sediment())
    }
}
