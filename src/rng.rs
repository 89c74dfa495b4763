//! A single seeded PRNG threaded through the CPUE synthesiser and the
//! assessment pseudo-error injector. Never reseeded mid-run

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Wraps `SmallRng` behind a named type so call sites read as "the run's
/// stream" rather than an anonymous RNG, and so the seeding rule (one
/// seed, one stream, no reseeding) is enforced by construction.
pub struct Stream(SmallRng);

impl Stream {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}
