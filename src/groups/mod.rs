//! Functional-group registry: catalogue of groups, each declaring a kind
//! (the process-function variant it dispatches to), an age model,
//! cohorts, stocks, and habitat affinities.
//!
//! Structured as a single `Registry` object owned by the simulation
//! context and passed by reference, rather than kept as global state.

pub mod cohort;
pub mod kind;
pub mod params;
pub mod process;
pub mod registry;

pub use cohort::{Cohort, Stage};
pub use kind::{AgeModel, GroupKind};
pub use params::GroupParams;
pub use registry::{FunctionalGroup, GroupId, GroupRegistry};
