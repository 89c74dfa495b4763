//! Simulation context and top-level per-step orchestration: owns every piece
//! of run state and drives dispatcher → diet → flux → harvest → management in
//! the order "Ordering guarantees" mandates.

mod step;

pub use step::StepReport;

use crate::config::Config;
use crate::cpue::ShotLedger;
use crate::diet::{DietPreference, TrackedMortality};
use crate::dispatcher::EnvironmentTracerIds;
use crate::fleets::harvest::CatchLedger;
use crate::fleets::{EffortField, FleetRegistry, MpaSchedule, TacBook};
use crate::flux::{ContaminantLedger, NoTransport, NutrientTracerIds, TransportDriver, WarningCounter};
use crate::grid::Grid;
use crate::groups::GroupRegistry;
use crate::rng::Stream;
use crate::tracer::TracerStore;
use crate::Clock;

/// Owns the static and mutable state for one run. Everything else
/// (process functions, the diet resolver, the harvest engine) borrows
/// from this rather than holding its own copy.
pub struct RunContext {
    pub clock: Clock,
    pub grid: Grid,
    pub store: TracerStore,
    pub groups: GroupRegistry,
    pub fleets: FleetRegistry,
    pub config: Config,
    pub rng: Stream,

    pub nutrient_ids: NutrientTracerIds,
    pub env_ids: EnvironmentTracerIds,
    pub diet_preference: DietPreference,
    pub mortality: TrackedMortality,
    pub contaminants: ContaminantLedger,
    pub warnings: WarningCounter,

    pub effort: EffortField,
    pub tac: TacBook,
    pub mpa: MpaSchedule,
    pub catch_ledger: CatchLedger,
    pub shots: ShotLedger,

    /// box-to-box circulation; defaults to `NoTransport` so standalone
    /// runs hold net transport at exactly zero. Swap in a real driver via
    /// `RunContext::with_transport`.
    pub transport: Box<dyn TransportDriver>,
}

impl RunContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        clock: Clock,
        grid: Grid,
        store: TracerStore,
        groups: GroupRegistry,
        fleets: FleetRegistry,
        config: Config,
        seed: u64,
        nutrient_ids: NutrientTracerIds,
        env_ids: EnvironmentTracerIds,
    ) -> Self {
        Self {
            clock,
            grid,
            store,
            groups,
            fleets,
            config,
            rng: Stream::seeded(seed),
            nutrient_ids,
            env_ids,
            diet_preference: DietPreference::default(),
            mortality: TrackedMortality::default(),
            contaminants: ContaminantLedger::default(),
            warnings: WarningCounter::default(),
            effort: EffortField::default(),
            tac: TacBook::default(),
            mpa: MpaSchedule::default(),
            catch_ledger: CatchLedger::default(),
            shots: ShotLedger::default(),
            transport: Box::new(NoTransport),
        }
    }

    /// swaps in a real circulation model in place of the default no-op.
    pub fn with_transport(mut self, transport: Box<dyn TransportDriver>) -> Self {
        self.transport = transport;
        self
    }

    /// advances the run by a single global time step; exposed for
    /// callers (benchmarks, interactive harnesses) that need finer
    /// control than `run`'s fixed horizon.
    pub fn step(&mut self) -> StepReport {
        step::advance(self)
    }

    /// runs the whole configured horizon, returning one report per step
    ///
    pub fn run(&mut self) -> Vec<StepReport> {
        let total_days = self.config.scheduling.run_years as usize * crate::DAYS_PER_YEAR;
        let steps_per_day = (crate::SECONDS_PER_DAY / self.clock.dt()).round().max(1.0) as usize;
        let mut reports = Vec::with_capacity(total_days * steps_per_day);
        for _ in 0..(total_days * steps_per_day) {
            reports.push(self.step());
        }
        reports
    }
}
