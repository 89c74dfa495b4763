//! Assessment-file emitter and reader: a typed, sentinel-terminated writer
//! for the `starter`/`data`/`control`/`forecast` bundle, and a marker-line
//! scanner for the tool's `Report.sso`/`ss3.par` output. Implemented as a
//! small typed writer that takes a structured record and serialises it
//! in one place.

mod reader;
mod writer;

pub use reader::{read_report, ReportValues};
pub use writer::write_bundle;

/// One year × one catch observation, data-block row.
#[derive(Debug, Clone, Copy)]
pub struct CatchRow {
    pub year: i32,
    pub season: u8,
    pub fleet: usize,
    pub catch: f64,
    pub catch_se: f64,
}

/// A length- or age-composition row: proportions-at-bin plus the
/// terminator length sentinel rows are padded with
#[derive(Debug, Clone)]
pub struct CompositionRow {
    pub year: i32,
    pub fleet: usize,
    pub bins: Vec<f64>,
}

/// control-file priors/phases block: growth and maturity parameters,
/// selectivity patterns, variance adjustments, lambdas.
#[derive(Debug, Clone, Default)]
pub struct ControlParams {
    pub growth_params: Vec<(String, f64, i32)>,
    pub maturity_params: Vec<(String, f64)>,
    pub selectivity_patterns: Vec<String>,
    pub variance_adjustments: Vec<f64>,
    pub lambdas: Vec<f64>,
}

/// forecast-file control-rule parameters: benchmark years, control-rule
/// parameters, per-fleet next-year catches.
#[derive(Debug, Clone, Default)]
pub struct ForecastParams {
    pub benchmark_years: (i32, i32),
    pub b_ref_a: f64,
    pub b_ref_b: f64,
    pub b_lim: f64,
    pub next_year_catch_by_fleet: Vec<f64>,
}

/// The complete input bundle for one stock × one assessment year
#[derive(Debug, Clone, Default)]
pub struct AssessmentBundle {
    pub stock_code: String,
    pub year: i32,
    pub catches: Vec<CatchRow>,
    pub cpue_index: Vec<(i32, f64)>,
    pub discards: Vec<CatchRow>,
    pub length_comp: Vec<CompositionRow>,
    pub age_comp: Vec<CompositionRow>,
    pub env_covariates: Vec<(i32, f64)>,
    pub control: ControlParams,
    pub forecast: ForecastParams,
}
