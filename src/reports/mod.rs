//! Output writers: a tracer snapshot writer, a
//! catch/discard/effort report, and the `${run}HarvestIndx.txt`
//! performance-measure file.

use std::io::Write;
use std::path::Path;

/// one row of the tracer snapshot. Kept as a named-column row rather
/// than a NetCDF binding so the writer has no extra native dependency;
/// column names are the contract the cadence promise is about, not the
/// container format.
#[derive(Debug, Clone)]
pub struct SnapshotRow {
    pub time: f64,
    pub variable: String,
    pub box_id: usize,
    pub layer: usize,
    pub value: f64,
}

/// abstraction over where a snapshot lands, so the simulation loop
/// doesn't know whether it's writing text, a future binary format, or
/// (in tests) an in-memory buffer.
pub trait SnapshotWriter {
    fn write_snapshot(&mut self, rows: &[SnapshotRow]) -> std::io::Result<()>;
}

/// one row per (time, box, layer, variable), tab-separated, matching the
/// variable-name/unit contract
pub struct TextSnapshotWriter {
    file: std::fs::File,
    header_written: bool,
}

impl TextSnapshotWriter {
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            file: std::fs::File::create(path)?,
            header_written: false,
        })
    }
}

impl SnapshotWriter for TextSnapshotWriter {
    fn write_snapshot(&mut self, rows: &[SnapshotRow]) -> std::io::Result<()> {
        if !self.header_written {
            writeln!(self.file, "Time\tVariable\tBox\tLayer\tValue")?;
            self.header_written = true;
        }
        for row in rows {
            writeln!(
                self.file,
                "{}\t{}\t{}\t{}\t{}",
                row.time, row.variable, row.box_id, row.layer, row.value
            )?;
        }
        Ok(())
    }
}

/// newline-delimited JSON variant of `TextSnapshotWriter`, for consumers
/// that want to stream snapshot rows into a JSON-aware pipeline instead
/// of parsing tab-separated text.
pub struct JsonSnapshotWriter {
    file: std::fs::File,
}

impl JsonSnapshotWriter {
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            file: std::fs::File::create(path)?,
        })
    }
}

impl SnapshotWriter for JsonSnapshotWriter {
    fn write_snapshot(&mut self, rows: &[SnapshotRow]) -> std::io::Result<()> {
        for row in rows {
            let line = serde_json::json!({
                "time": row.time,
                "variable": row.variable,
                "box": row.box_id,
                "layer": row.layer,
                "value": row.value,
            });
            writeln!(self.file, "{line}")?;
        }
        Ok(())
    }
}

/// one (time, fleet, species) catch/discard/effort row: a per-fleet,
/// per-group annual catch/discards/effort report, one row per (time,
/// fleet) or (time, fleet, species).
#[derive(Debug, Clone)]
pub struct CatchReportRow {
    pub time: f64,
    pub fleet: String,
    pub species: String,
    pub catch: f64,
    pub discard: f64,
    pub effort: f64,
}

pub fn write_catch_report(path: impl AsRef<Path>, rows: &[CatchReportRow]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "Time\tFleet\tSpecies\tCatch\tDiscard\tEffort")?;
    for row in rows {
        writeln!(
            file,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.time, row.fleet, row.species, row.catch, row.discard, row.effort
        )?;
    }
    Ok(())
}

/// one row of `${run}HarvestIndx.txt`
#[derive(Debug, Clone)]
pub struct HarvestIndexRow {
    pub time: f64,
    pub fishery: String,
    pub harvest_index_columns: Vec<f64>,
    pub mgmt_stability: f64,
    pub mgmt_access: f64,
    pub mgmt_cost: f64,
    pub first_index: f64,
}

pub fn write_harvest_index(run_name: &str, dir: impl AsRef<Path>, rows: &[HarvestIndexRow]) -> std::io::Result<()> {
    let path = dir.as_ref().join(format!("{run_name}HarvestIndx.txt"));
    let mut file = std::fs::File::create(path)?;
    write!(file, "Time\tFishery")?;
    let n_index_cols = rows.first().map(|r| r.harvest_index_columns.len()).unwrap_or(0);
    for i in 0..n_index_cols {
        write!(file, "\tHarvestIndex{i}")?;
    }
    writeln!(file, "\tmgmtStability\tmgmtAccess\tmgmtCost\t1stindx")?;

    for row in rows {
        write!(file, "{}\t{}", row.time, row.fishery)?;
        for value in &row.harvest_index_columns {
            write!(file, "\t{value}")?;
        }
        writeln!(
            file,
            "\t{}\t{}\t{}\t{}",
            row.mgmt_stability, row.mgmt_access, row.mgmt_cost, row.first_index
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_writer_writes_header_once() {
        let path = std::env::temp_dir().join(format!("ecomse-snapshot-test-{}.txt", std::process::id()));
        let mut writer = TextSnapshotWriter::create(&path).unwrap();
        let rows = vec![SnapshotRow {
            time: 0.0,
            variable: "NH4".into(),
            box_id: 0,
            layer: 0,
            value: 0.14,
        }];
        writer.write_snapshot(&rows).unwrap();
        writer.write_snapshot(&rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("Time\tVariable").count(), 1);
        assert_eq!(text.matches("NH4").count(), 2);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn json_snapshot_writer_emits_one_object_per_row() {
        let path = std::env::temp_dir().join(format!("ecomse-snapshot-test-{}.jsonl", std::process::id()));
        let mut writer = JsonSnapshotWriter::create(&path).unwrap();
        let rows = vec![SnapshotRow {
            time: 0.0,
            variable: "NH4".into(),
            box_id: 0,
            layer: 0,
            value: 0.14,
        }];
        writer.write_snapshot(&rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(parsed["variable"], "NH4");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn harvest_index_header_lists_requested_columns() {
        let dir = std::env::temp_dir();
        let rows = vec![HarvestIndexRow {
            time: 1.0,
            fishery: "trawl".into(),
            harvest_index_columns: vec![1.0, 2.0],
            mgmt_stability: 0.9,
            mgmt_access: 0.8,
            mgmt_cost: 0.1,
            first_index: 1.0,
        }];
        write_harvest_index("test_run", &dir, &rows).unwrap();
        let text = std::fs::read_to_string(dir.join("test_runHarvestIndx.txt")).unwrap();
        assert!(text.starts_with("Time\tFishery\tHarvestIndex0\tHarvestIndex1"));
        std::fs::remove_file(dir.join("test_runHarvestIndx.txt")).unwrap();
    }
}
