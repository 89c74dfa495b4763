//! CPUE shot synthesiser: for fleets with
//! `flagneed_shots_id`, converts daily fleet-level catch into a list of
//! stochastic shots. One seeded stream is threaded through, never
//! reseeded mid-run

use crate::fleets::FleetId;
use crate::rng::Stream;
use rand::Rng;
use rand_distr::{Distribution, NegativeBinomial};
use std::collections::HashMap;

/// one generated shot
#[derive(Debug, Clone, Copy)]
pub struct Shot {
    pub box_index: usize,
    pub is_guru: bool,
    pub catch: f64,
    pub discard: f64,
    pub depth: f64,
    pub effort: f64,
}

/// the terminator row plus an allocation summary
#[derive(Debug, Clone, Copy)]
pub struct Leftover {
    pub catch: f64,
    pub alloc_ratio: f64,
}

/// everything the synthesiser needs for one fleet-day
#[derive(Debug, Clone)]
pub struct ShotInputs<'a> {
    pub daily_catch: f64,
    pub active_subfleets: usize,
    pub fishable_period_hours: f64,
    pub min_shot_length_hours: f64,
    pub effort_by_box: &'a [f64],
    pub depth_by_box: &'a [f64],
    pub discard_fraction: f64,
    pub guru_weight: f64,
    pub negbinom_r: f64,
    pub negbinom_p: f64,
    pub min_effort_coefft: f64,
    pub min_effort_const: f64,
    pub max_shots: usize,
}

/// shots/day from active subfleet count, fishable period, and minimum
/// shot length
pub fn shots_per_day(inputs: &ShotInputs) -> usize {
    if inputs.min_shot_length_hours <= 0.0 {
        return 0;
    }
    let per_subfleet = (inputs.fishable_period_hours / inputs.min_shot_length_hours).floor() as usize;
    (per_subfleet * inputs.active_subfleets).min(inputs.max_shots)
}

/// selects a shot location by multinomial draw over the day's effort
/// distribution, biased to visit every box with unallocated effort at
/// least once across the run of shots
fn select_box(effort_by_box: &[f64], visited: &[bool], rng: &mut Stream) -> usize {
    if let Some(unvisited) = visited.iter().position(|&v| !v) {
        if effort_by_box[unvisited] > 0.0 {
            return unvisited;
        }
    }
    let total: f64 = effort_by_box.iter().sum();
    if total <= crate::EPSILON {
        return 0;
    }
    let draw = rng.inner().random::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, &weight) in effort_by_box.iter().enumerate() {
        cumulative += weight;
        if draw <= cumulative {
            return i;
        }
    }
    effort_by_box.len() - 1
}

/// generates up to `shots_per_day` shots for one fleet-day, returning
/// the shots plus the leftover row
pub fn synthesize(inputs: &ShotInputs, rng: &mut Stream) -> (Vec<Shot>, Leftover) {
    let n_shots = shots_per_day(inputs);
    let mut remaining_catch = inputs.daily_catch;
    let mut remaining_effort: Vec<f64> = inputs.effort_by_box.to_vec();
    let mut visited = vec![false; inputs.effort_by_box.len()];
    let mut shots = Vec::with_capacity(n_shots);

    let negbinom = NegativeBinomial::new(inputs.negbinom_r, inputs.negbinom_p);

    for _ in 0..n_shots {
        if remaining_catch <= crate::EPSILON || inputs.effort_by_box.is_empty() {
            break;
        }
        let box_index = select_box(&remaining_effort, &visited, rng);
        visited[box_index] = true;

        let is_guru = rng.inner().random::<f64>() < inputs.guru_weight;

        let base_size = match &negbinom {
            Ok(dist) => dist.sample(rng.inner()) as f64,
            Err(_) => 0.0,
        };
        let jitter = rng.inner().random::<f64>();
        let mut size = (base_size + jitter).max(0.0);
        size = size.min(remaining_catch);

        let discard_noise = 1.0 + (rng.inner().random::<f64>() - 0.5) * 0.2;
        let discard = (size * inputs.discard_fraction * discard_noise).clamp(0.0, size);

        let depth = *inputs.depth_by_box.get(box_index).unwrap_or(&0.0);

        let effort_noise = (rng.inner().random::<f64>() - 0.5) * 0.1;
        let effort = (inputs.min_effort_coefft * size + inputs.min_effort_const + effort_noise)
            .clamp(0.0, remaining_effort[box_index]);

        remaining_catch -= size;
        remaining_effort[box_index] = (remaining_effort[box_index] - effort).max(0.0);

        shots.push(Shot {
            box_index,
            is_guru,
            catch: size,
            discard,
            depth,
            effort,
        });
    }

    let allocated: f64 = shots.iter().map(|s| s.catch).sum();
    let leftover = Leftover {
        catch: inputs.daily_catch - allocated,
        alloc_ratio: if inputs.daily_catch > crate::EPSILON {
            allocated / inputs.daily_catch
        } else {
            1.0
        },
    };
    (shots, leftover)
}

/// Latest synthesised shots per fleet, overwritten each fleet-day rather
/// than accumulated; consumers that need the full-run series should copy
/// out of `by_fleet` before the next day's synthesis overwrites it.
#[derive(Debug, Default)]
pub struct ShotLedger {
    pub by_fleet: HashMap<FleetId, (Vec<Shot>, Leftover)>,
}

impl ShotLedger {
    pub fn record(&mut self, fleet: FleetId, shots: Vec<Shot>, leftover: Leftover) {
        self.by_fleet.insert(fleet, (shots, leftover));
    }

    pub fn get(&self, fleet: FleetId) -> Option<&(Vec<Shot>, Leftover)> {
        self.by_fleet.get(&fleet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(daily_catch: f64) -> ShotInputs<'static> {
        ShotInputs {
            daily_catch,
            active_subfleets: 2,
            fishable_period_hours: 20.0,
            min_shot_length_hours: 4.0,
            effort_by_box: &[1.0, 2.0, 0.5],
            depth_by_box: &[10.0, 20.0, 30.0],
            discard_fraction: 0.1,
            guru_weight: 0.3,
            negbinom_r: 5.0,
            negbinom_p: 0.5,
            min_effort_coefft: 0.01,
            min_effort_const: 0.1,
            max_shots: 10,
        }
    }

    #[test]
    fn allocated_catch_never_exceeds_daily_catch() {
        let mut rng = Stream::seeded(7);
        let (shots, leftover) = synthesize(&inputs(100.0), &mut rng);
        assert!(shots.len() <= 10);
        let allocated: f64 = shots.iter().map(|s| s.catch).sum();
        assert!(allocated <= 100.0 + 1e-9);
        assert!((leftover.catch - (100.0 - allocated)).abs() < 1e-9);
        assert!(leftover.alloc_ratio >= 0.0 && leftover.alloc_ratio <= 1.0);
    }

    #[test]
    fn zero_daily_catch_produces_no_shots() {
        let mut rng = Stream::seeded(3);
        let (shots, leftover) = synthesize(&inputs(0.0), &mut rng);
        assert!(shots.is_empty());
        assert_eq!(leftover.catch, 0.0);
    }
}
