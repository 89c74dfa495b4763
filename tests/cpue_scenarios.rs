//! One fleet with a daily catch of 100 kg for one species and a cap of
//! 10 possible shots. The synthesised shots plus the leftover row must
//! fully account for the day's catch.

use ecomse::cpue::{synthesize, ShotInputs};
use ecomse::rng::Stream;

#[test]
fn shots_plus_leftover_reconcile_to_daily_catch() {
    let inputs = ShotInputs {
        daily_catch: 100.0,
        active_subfleets: 3,
        fishable_period_hours: 24.0,
        min_shot_length_hours: 2.0,
        effort_by_box: &[1.0, 1.0, 1.0],
        depth_by_box: &[15.0, 25.0, 35.0],
        discard_fraction: 0.05,
        guru_weight: 0.2,
        negbinom_r: 8.0,
        negbinom_p: 0.4,
        min_effort_coefft: 0.005,
        min_effort_const: 0.05,
        max_shots: 10,
    };

    let mut rng = Stream::seeded(42);
    let (shots, leftover) = synthesize(&inputs, &mut rng);

    assert!(shots.len() <= 10, "more than the allowed 10 shots were generated");

    let allocated: f64 = shots.iter().map(|s| s.catch).sum();
    assert!(allocated <= 100.0 + 1e-9, "allocated catch {allocated} exceeds the daily catch");
    assert!((allocated + leftover.catch - 100.0).abs() < 1e-6, "shots plus leftover must reconcile to the daily catch");
    assert!(leftover.alloc_ratio >= 0.0 && leftover.alloc_ratio <= 1.0);
}
