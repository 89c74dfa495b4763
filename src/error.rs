//! Error kinds for the two classes of failure distinguishes: configuration
//! errors (fatal at init) and assessment failures (per-stock, recoverable,
//! never abort the simulation loop). Numerical clamp events are not
//! `Result`-based — see `flux::WarningCounter`.

use thiserror::Error;

/// Fatal at init: a missing required parameter, a negative physical
/// constant, or an array-size mismatch, each identifying the offending
/// parameter and source file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required parameter `{parameter}` in {file}")]
    MissingParameter { file: String, parameter: String },

    #[error("parameter `{parameter}` in {file} must be positive, got {value}")]
    NonPositive {
        file: String,
        parameter: String,
        value: f64,
    },

    #[error("array size mismatch in {file}: `{parameter}` expected {expected}, got {actual}")]
    SizeMismatch {
        file: String,
        parameter: String,
        expected: usize,
        actual: usize,
    },

    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// Per-stock, recoverable: the external assessment tool did not produce
/// the expected output file or marker line. The management engine sets
/// `assess_fail` for the stock, logs via `log::warn!`, and reuses the
/// previous year's TAC/F
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("assessment tool for stock {stock} exited with status {status}")]
    ToolFailed { stock: String, status: i32 },

    #[error("expected output file {path} was not produced by the assessment tool")]
    MissingOutput { path: String },

    #[error("marker line `{marker}` not found while parsing {path}")]
    MissingMarker { path: String, marker: String },

    #[error("failed to tokenize row following marker `{marker}` in {path}: {detail}")]
    MalformedRow {
        path: String,
        marker: String,
        detail: String,
    },

    #[error("io error operating on assessment bundle directory {dir}: {source}")]
    Io {
        dir: String,
        #[source]
        source: std::io::Error,
    },
}
