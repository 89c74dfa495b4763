use crate::error::AssessmentError;
use std::path::Path;

/// the values the management engine pulls out of a completed external
/// assessment run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportValues {
    pub est_b_curr: f64,
    pub est_depletion: f64,
    pub rbc: f64,
    pub converged: bool,
}

const REPORT_FILE: &str = "Report.sso";
const PAR_FILE: &str = "ss3.par";
const MARKER_FORECAST: &str = "FORECAST:_With_F_to_match_adjusted_catch";
const MARKER_BIOLOGY: &str = "Biology_at_age_in_endyr_with_CV=f(LAA)";
const MARKER_CONVERGENCE: &str = "MGparm[16]";
const NO_ROW_AFTER_MARKER: &str = const_format::concatcp!("no row follows marker in ", REPORT_FILE, "/", PAR_FILE);

/// Scans `Report.sso`/`ss3.par` in `dir` for the three marker lines and
/// tokenises the row immediately following each
pub fn read_report(dir: &Path) -> Result<ReportValues, AssessmentError> {
    let report_path = dir.join(REPORT_FILE);
    let report = std::fs::read_to_string(&report_path).map_err(|_| AssessmentError::MissingOutput {
        path: report_path.display().to_string(),
    })?;

    let est_b_curr = row_after_marker(&report, &report_path, MARKER_FORECAST)?
        .first()
        .copied()
        .ok_or_else(|| malformed(&report_path, MARKER_FORECAST, "empty row"))?;
    let est_depletion = row_after_marker(&report, &report_path, MARKER_BIOLOGY)?
        .first()
        .copied()
        .ok_or_else(|| malformed(&report_path, MARKER_BIOLOGY, "empty row"))?;

    let par_path = dir.join(PAR_FILE);
    let par = std::fs::read_to_string(&par_path).map_err(|_| AssessmentError::MissingOutput {
        path: par_path.display().to_string(),
    })?;
    let convergence_row = row_after_marker(&par, &par_path, MARKER_CONVERGENCE)?;
    let converged = convergence_row.first().copied().unwrap_or(0.0) >= 1.0;
    let rbc = convergence_row.get(1).copied().unwrap_or(0.0);

    Ok(ReportValues {
        est_b_curr,
        est_depletion,
        rbc,
        converged,
    })
}

fn malformed(path: &Path, marker: &str, detail: &str) -> AssessmentError {
    AssessmentError::MalformedRow {
        path: path.display().to_string(),
        marker: marker.to_string(),
        detail: detail.to_string(),
    }
}

fn row_after_marker(text: &str, path: &Path, marker: &str) -> Result<Vec<f64>, AssessmentError> {
    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        if line.trim_start().starts_with(marker) {
            let row = lines.next().ok_or_else(|| malformed(path, marker, NO_ROW_AFTER_MARKER))?;
            return row
                .split_whitespace()
                .map(|tok| tok.parse::<f64>().map_err(|e| malformed(path, marker, &e.to_string())))
                .collect();
        }
    }
    Err(AssessmentError::MissingMarker {
        path: path.display().to_string(),
        marker: marker.to_string(),
    })
}
