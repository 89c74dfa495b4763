pub mod assessment_files;
pub mod clock;
pub mod config;
pub mod cpue;
pub mod diet;
pub mod dispatcher;
pub mod error;
pub mod fleets;
pub mod flux;
pub mod grid;
pub mod groups;
pub mod management;
pub mod reports;
pub mod rng;
pub mod sim;
pub mod tracer;

pub use clock::Clock;

/// dimensional analysis types, matching the units the original box model
/// tracked: biomass/detritus/nutrients in mg N (or equivalent), time in
/// seconds, fishing mortality and growth rates as instantaneous yr^-1.
pub type Time = f64;
pub type Mass = f64;
pub type Rate = f64;
pub type Fraction = f64;

/// seconds in a day; the clock's dt is commonly 12h or 1 day
pub const SECONDS_PER_DAY: Time = 86_400.0;
pub const DAYS_PER_YEAR: usize = 365;

/// numerical guard used throughout the process functions and diet
/// resolver to avoid division by zero on empty prey/nutrient pools
///
pub const EPSILON: f64 = 1e-9;

/// initialise logging: a combined Info-level terminal logger plus a
/// Debug-level file logger under `logs/`. Every clamp/warning/
/// assessment-failure event funnels through `log` so it ends up here
/// with a `Time: <t> ...` prefix.
#[cfg(feature = "cli")]
pub fn init_logging() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves forward")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// progress bar for long batch loops: CPUE shot generation, multi-year
/// runs.
#[cfg(feature = "cli")]
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan} {pos}/{len}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let bar = indicatif::ProgressBar::new(n as u64);
    bar.set_style(style);
    bar
}
