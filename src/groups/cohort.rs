/// juvenile/adult stage, used by maturity-gated spawning and feeding
/// rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Juvenile,
    Adult,
}

/// One age/size class within a functional group. `numbers` is only
/// meaningful for age models that track numbers
#[derive(Debug, Clone)]
pub struct Cohort {
    pub index: usize,
    pub stage: Stage,
    pub mean_wgt: f64,
    pub numbers: f64,
    /// per-step scratch, reset at step start and written by the process
    /// function
    pub state: CohortState,
    /// persistent health scalar in `[0, 1]`, carried across steps rather
    /// than reset with the rest of `state`. Only coral currently uses it
    /// (symbiont fraction surviving bleaching); other kinds leave it at 1.
    pub health: f64,
}

impl Cohort {
    pub fn new(index: usize, stage: Stage, mean_wgt: f64, numbers: f64) -> Self {
        assert!(numbers >= 0.0, "cohort numbers must be non-negative");
        if numbers > 0.0 {
            assert!(mean_wgt > 0.0, "mean_wgt must be > 0 when numbers > 0");
        }
        Self {
            index,
            stage,
            mean_wgt,
            numbers,
            state: CohortState::default(),
            health: 1.0,
        }
    }

    pub fn reset_state(&mut self) {
        self.state = CohortState::default();
    }
}

/// Per-step scratch: growth, lysis, mortality, and nutrient uptake
/// accumulated by the process function before the flux commit pass
///
#[derive(Debug, Clone, Copy, Default)]
pub struct CohortState {
    pub growth: f64,
    pub lysis: f64,
    pub mortality: f64,
    pub uptake_nh: f64,
    pub graze_live: f64,
    /// structural habitat index produced by coral; zero for every other kind.
    pub rugosity: f64,
}
