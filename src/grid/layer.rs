/// A water-column or sediment layer: depth thickness plus the tracer
/// vector addressed through `TracerStore` by (box, layer) index —
/// `Layer` itself stores only its static geometry; the tracer store owns
/// the values.
#[derive(Debug, Clone, Copy)]
pub struct Layer {
    dz: f64,
    sediment: bool,
}

impl Layer {
    pub fn water(dz: f64) -> Self {
        assert!(dz > 0.0, "water layer dz must be > 0");
        Self {
            dz,
            sediment: false,
        }
    }

    pub fn sediment(dz: f64) -> Self {
        Self { dz, sediment: true }
    }

    pub fn dz(&self) -> f64 {
        self.dz
    }

    pub fn is_sediment(&self) -> bool {
        self.sediment
    }
}
