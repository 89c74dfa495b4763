use super::{normalize, EffortContext, EffortModel};

/// Distance/population-weighted port contribution contract: given a
/// fleet's home port and a box's coordinates, how far away it is and how
/// much of the port's population it draws on. `DistanceToPort`,
/// `RecreationalPopulation`, and `Economic` consume its output through
/// `EffortContext` rather than computing geometry themselves.
pub trait PortModel {
    /// straight-line distance from the home port to each box, in the
    /// same units as `speed_boat`/`dist_peak`.
    fn distance_to_port(&self, box_coords: &[(f64, f64)]) -> Vec<f64>;

    /// population associated with the home port driving recreational
    /// participation.
    fn port_population(&self) -> f64;
}

/// Single home port at a fixed coordinate, straight-line distance, fixed
/// population — sufficient to drive `distance_to_port` and `economic`
/// without a full port-network model.
#[derive(Debug, Clone, Copy)]
pub struct SinglePort {
    pub coords: (f64, f64),
    pub population: f64,
}

impl PortModel for SinglePort {
    fn distance_to_port(&self, box_coords: &[(f64, f64)]) -> Vec<f64> {
        box_coords
            .iter()
            .map(|(x, y)| ((x - self.coords.0).powi(2) + (y - self.coords.1).powi(2)).sqrt())
            .collect()
    }

    fn port_population(&self) -> f64 {
        self.population
    }
}

/// favours nearby boxes, attenuated by distance to the fleet's home port
///
#[derive(Debug, Clone)]
pub struct DistanceToPort {
    pub decay: f64,
}

impl EffortModel for DistanceToPort {
    fn allocate(&self, ctx: &EffortContext) -> Vec<f64> {
        let weights: Vec<f64> = ctx
            .distance_to_port
            .iter()
            .map(|d| (-self.decay * d.max(0.0)).exp())
            .collect();
        normalize(&weights, ctx.total_effort)
    }
}

/// scales total effort by the recreational population near each box's
/// port link rather than redistributing a fixed total; `participation_rate`
/// converts population into trips.
#[derive(Debug, Clone)]
pub struct RecreationalPopulation {
    pub participation_rate: f64,
}

impl EffortModel for RecreationalPopulation {
    fn allocate(&self, ctx: &EffortContext) -> Vec<f64> {
        let total = ctx.port_population * self.participation_rate;
        normalize(ctx.distance_to_port, total.max(ctx.total_effort))
    }
}

/// projects profitability per box from catch value against a per-unit
/// cost of distance, and allocates effort toward the most profitable
/// boxes
#[derive(Debug, Clone)]
pub struct Economic {
    pub price_per_tonne: f64,
    pub cost_per_distance: f64,
}

impl EffortModel for Economic {
    fn allocate(&self, ctx: &EffortContext) -> Vec<f64> {
        let profit: Vec<f64> = ctx
            .cpue
            .iter()
            .zip(ctx.distance_to_port.iter())
            .map(|(cpue, dist)| {
                (cpue * self.price_per_tonne - dist * self.cost_per_distance).max(0.0)
            })
            .collect();
        normalize(&profit, ctx.total_effort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_port_distance_grows_with_separation() {
        let port = SinglePort { coords: (0.0, 0.0), population: 5000.0 };
        let distances = port.distance_to_port(&[(0.0, 0.0), (3.0, 4.0)]);
        assert_eq!(distances[0], 0.0);
        assert_eq!(distances[1], 5.0);
        assert_eq!(port.port_population(), 5000.0);
    }

    #[test]
    fn distance_to_port_favours_closer_boxes() {
        let model = DistanceToPort { decay: 0.5 };
        let ctx = EffortContext {
            old_effort: &[],
            cpue: &[],
            distance_to_port: &[1.0, 10.0],
            biomass: &[],
            target_biomass: &[],
            prescribed: &[],
            port_population: 0.0,
            quarter: 0,
            total_effort: 5.0,
            speed_boat: 1.0,
            dist_peak: 1.0,
            dt: 1.0,
        };
        let allocation = model.allocate(&ctx);
        assert!(allocation[0] > allocation[1]);
    }

    #[test]
    fn economic_model_ignores_unprofitable_boxes() {
        let model = Economic {
            price_per_tonne: 1.0,
            cost_per_distance: 10.0,
        };
        let ctx = EffortContext {
            old_effort: &[],
            cpue: &[1.0, 1.0],
            distance_to_port: &[0.0, 100.0],
            biomass: &[],
            target_biomass: &[],
            prescribed: &[],
            port_population: 0.0,
            quarter: 0,
            total_effort: 5.0,
            speed_boat: 1.0,
            dist_peak: 1.0,
            dt: 1.0,
        };
        let allocation = model.allocate(&ctx);
        assert_eq!(allocation[1], 0.0);
    }
}
