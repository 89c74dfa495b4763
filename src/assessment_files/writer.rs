use super::AssessmentBundle;
use crate::error::AssessmentError;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

fn io_err(dir: &Path, source: std::io::Error) -> AssessmentError {
    AssessmentError::Io {
        dir: dir.display().to_string(),
        source,
    }
}

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<(), AssessmentError> {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).map_err(|e| io_err(dir, e))?;
    file.write_all(contents.as_bytes()).map_err(|e| io_err(dir, e))
}

/// Emits `starter.ss`, `<code>.dat`, `<code>.ctl`, `forecast.ss` into
/// `dir`
pub fn write_bundle(bundle: &AssessmentBundle, dir: &Path) -> Result<(), AssessmentError> {
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    write_file(dir, "starter.ss", &starter(bundle))?;
    write_file(dir, &format!("{}.dat", bundle.stock_code), &data_file(bundle))?;
    write_file(dir, &format!("{}.ctl", bundle.stock_code), &control_file(bundle))?;
    write_file(dir, "forecast.ss", &forecast_file(bundle))?;
    Ok(())
}

fn starter(bundle: &AssessmentBundle) -> String {
    format!(
        "#starter file for {}\n{}.dat\n{}.ctl\n0 # run display detail\n1 # detailed age-structure report\n",
        bundle.stock_code, bundle.stock_code, bundle.stock_code
    )
}

fn data_file(bundle: &AssessmentBundle) -> String {
    let mut out = String::new();
    writeln!(out, "#data file for {}, year {}", bundle.stock_code, bundle.year).unwrap();

    writeln!(out, "#_catches").unwrap();
    for row in &bundle.catches {
        writeln!(out, "{} {} {} {} {}", row.year, row.season, row.fleet, row.catch, row.catch_se).unwrap();
    }
    // terminator row the reader scans for to find the block's end.
    writeln!(out, "-9999 0 0 0 0").unwrap();

    writeln!(out, "#_cpue_index").unwrap();
    for &(year, value) in &bundle.cpue_index {
        writeln!(out, "{} {}", year, value).unwrap();
    }
    writeln!(out, "-9999 0").unwrap();

    writeln!(out, "#_discards").unwrap();
    for row in &bundle.discards {
        writeln!(out, "{} {} {} {} {}", row.year, row.season, row.fleet, row.catch, row.catch_se).unwrap();
    }
    writeln!(out, "-9999 0 0 0 0").unwrap();

    writeln!(out, "#_length_composition").unwrap();
    for row in &bundle.length_comp {
        write_composition_row(&mut out, row);
    }
    writeln!(out, "{}", composition_terminator(bundle.length_comp.first())).unwrap();

    writeln!(out, "#_age_composition").unwrap();
    for row in &bundle.age_comp {
        write_composition_row(&mut out, row);
    }
    writeln!(out, "{}", composition_terminator(bundle.age_comp.first())).unwrap();

    writeln!(out, "#_environmental_covariates").unwrap();
    for &(year, value) in &bundle.env_covariates {
        writeln!(out, "{} {}", year, value).unwrap();
    }
    writeln!(out, "-9999 0").unwrap();

    out
}

fn write_composition_row(out: &mut String, row: &super::CompositionRow) {
    write!(out, "{} {}", row.year, row.fleet).unwrap();
    for bin in &row.bins {
        write!(out, " {bin}").unwrap();
    }
    writeln!(out).unwrap();
}

/// a sentinel row of length `2*N_bins + k`; `k = 2` for the leading `-9999`
/// and trailing year/fleet slots this format already carries.
fn composition_terminator(sample: Option<&super::CompositionRow>) -> String {
    let n_bins = sample.map(|r| r.bins.len()).unwrap_or(0);
    let mut row = vec!["-9999".to_string()];
    row.extend(std::iter::repeat("0".to_string()).take(2 * n_bins + 1));
    row.join(" ")
}

fn control_file(bundle: &AssessmentBundle) -> String {
    let mut out = String::new();
    writeln!(out, "#control file for {}", bundle.stock_code).unwrap();
    writeln!(out, "#_growth_parameters").unwrap();
    for (name, value, phase) in &bundle.control.growth_params {
        writeln!(out, "{name} {value} {phase}").unwrap();
    }
    writeln!(out, "#_maturity_parameters").unwrap();
    for (name, value) in &bundle.control.maturity_params {
        writeln!(out, "{name} {value}").unwrap();
    }
    writeln!(out, "#_selectivity_patterns").unwrap();
    for pattern in &bundle.control.selectivity_patterns {
        writeln!(out, "{pattern}").unwrap();
    }
    writeln!(out, "#_variance_adjustments").unwrap();
    for value in &bundle.control.variance_adjustments {
        writeln!(out, "{value}").unwrap();
    }
    writeln!(out, "#_lambdas").unwrap();
    for value in &bundle.control.lambdas {
        writeln!(out, "{value}").unwrap();
    }
    writeln!(out, "999 # end of control file").unwrap();
    out
}

fn forecast_file(bundle: &AssessmentBundle) -> String {
    let mut out = String::new();
    let f = &bundle.forecast;
    writeln!(out, "#forecast file for {}", bundle.stock_code).unwrap();
    writeln!(out, "{} {} # benchmark years", f.benchmark_years.0, f.benchmark_years.1).unwrap();
    writeln!(out, "{} {} {} # BrefA BrefB Blim", f.b_ref_a, f.b_ref_b, f.b_lim).unwrap();
    writeln!(out, "#_next_year_catch_by_fleet").unwrap();
    for catch in &f.next_year_catch_by_fleet {
        writeln!(out, "{catch}").unwrap();
    }
    writeln!(out, "999 # end of forecast file").unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment_files::CatchRow;

    #[test]
    fn catch_block_ends_with_sentinel() {
        let bundle = AssessmentBundle {
            stock_code: "FVB".into(),
            year: 2024,
            catches: vec![CatchRow {
                year: 2023,
                season: 1,
                fleet: 0,
                catch: 100.0,
                catch_se: 0.1,
            }],
            ..Default::default()
        };
        let text = data_file(&bundle);
        assert!(text.contains("-9999 0 0 0 0"));
    }

    #[test]
    fn composition_terminator_has_expected_length() {
        let row = super::super::CompositionRow {
            year: 2023,
            fleet: 0,
            bins: vec![0.1, 0.2, 0.3],
        };
        let terminator = composition_terminator(Some(&row));
        let n_tokens = terminator.split_whitespace().count();
        assert_eq!(n_tokens, 2 * row.bins.len() + 2);
    }
}
