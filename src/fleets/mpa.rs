use super::FleetId;
use crate::grid::BoxId;
use std::collections::HashMap;

/// Per-fleet, per-box, piecewise-constant-in-day access multiplier in
/// `[0, 1]` Built from input
/// plus dynamic triggers raised by the management engine
#[derive(Debug, Default, Clone)]
pub struct MpaSchedule {
    entries: HashMap<(i32, usize, BoxId, FleetId), f64>,
}

impl MpaSchedule {
    pub fn set(&mut self, year: i32, day: usize, box_id: BoxId, fleet: FleetId, value: f64) {
        self.entries
            .insert((year, day, box_id, fleet), value.clamp(0.0, 1.0));
    }

    /// closes a box to a fleet from `day` through the rest of `year`
    pub fn close_for_rest_of_year(&mut self, year: i32, from_day: usize, box_id: BoxId, fleet: FleetId) {
        for day in from_day..crate::DAYS_PER_YEAR {
            self.set(year, day, box_id, fleet, 0.0);
        }
    }

    /// access multiplier for (year, day, box, fleet); fully open (1.0)
    /// when nothing has been scheduled.
    pub fn openness(&self, year: i32, day: usize, box_id: BoxId, fleet: FleetId) -> f64 {
        self.entries
            .get(&(year, day, box_id, fleet))
            .copied()
            .unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_fully_open() {
        let schedule = MpaSchedule::default();
        assert_eq!(schedule.openness(2024, 10, BoxId(0), FleetId(0)), 1.0);
    }

    #[test]
    fn closure_persists_through_year_end() {
        let mut schedule = MpaSchedule::default();
        schedule.close_for_rest_of_year(2024, 100, BoxId(1), FleetId(2));
        assert_eq!(schedule.openness(2024, 100, BoxId(1), FleetId(2)), 0.0);
        assert_eq!(schedule.openness(2024, 364, BoxId(1), FleetId(2)), 0.0);
        assert_eq!(schedule.openness(2024, 99, BoxId(1), FleetId(2)), 1.0);
    }
}
