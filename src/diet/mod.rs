//! Diet / predation resolver: builds `PREYinfo` from a box's snapshotted
//! tracers, runs the shared `Eat` kernel per predator call, and updates
//! the tracked-mortality matrix each prey slot accumulates into

mod preference;
mod resolver;
mod tracked_mortality;

pub use preference::DietPreference;
pub use resolver::{benthic_depth_scalar, eat, CatchGrazeInfo, EatKernel, GrazeInfo, PreyInfo};
pub use tracked_mortality::TrackedMortality;
