/// Per-gear, per-size retention curve
#[derive(Debug, Clone)]
pub enum SelectivityCurve {
    Logistic { l50: f64, slope: f64 },
    DomeShaped { l50_asc: f64, slope_asc: f64, l50_desc: f64, slope_desc: f64 },
    KnifeEdge { threshold: f64 },
}

impl SelectivityCurve {
    /// retained fraction of encountered individuals at the given size.
    pub fn retention(&self, size: f64) -> f64 {
        match self {
            SelectivityCurve::Logistic { l50, slope } => {
                1.0 / (1.0 + (-slope * (size - l50)).exp())
            }
            SelectivityCurve::DomeShaped {
                l50_asc,
                slope_asc,
                l50_desc,
                slope_desc,
            } => {
                let ascending = 1.0 / (1.0 + (-slope_asc * (size - l50_asc)).exp());
                let descending = 1.0 / (1.0 + (slope_desc * (size - l50_desc)).exp());
                ascending.min(descending)
            }
            SelectivityCurve::KnifeEdge { threshold } => {
                if size >= *threshold {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}
