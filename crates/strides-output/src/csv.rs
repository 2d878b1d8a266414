//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `route.csv`: the latest route snapshot, replaced on every step
//! - `steps.csv`: one summary row per growth step, appended
//!
//! A map viewer can poll `route.csv` while the route grows.  Each snapshot is
//! written to a sibling temp file and renamed over the old one, so a reader
//! never sees a half-written file.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, PathPointRow, StepSummaryRow};

pub const SNAPSHOT_FILE: &str = "route.csv";
pub const STEPS_FILE: &str = "steps.csv";

const SNAPSHOT_HEADER: [&str; 5] = ["lat", "lon", "sz", "names", "len_cat"];

/// Writes route output to two CSV files.
pub struct CsvWriter {
    snapshot_path: PathBuf,
    steps:         Writer<File>,
    finished:      bool,
}

impl CsvWriter {
    /// Create `dir` if needed, write an empty snapshot and open the step log.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut steps = Writer::from_path(dir.join(STEPS_FILE))?;
        steps.write_record(["iteration", "nodes", "total_km", "streets_completed", "branch_budget", "score"])?;
        steps.flush()?;

        let mut writer = Self {
            snapshot_path: dir.join(SNAPSHOT_FILE),
            steps,
            finished: false,
        };
        writer.write_points(&[])?;
        Ok(writer)
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }
}

impl OutputWriter for CsvWriter {
    fn write_points(&mut self, rows: &[PathPointRow]) -> OutputResult<()> {
        let tmp = self.snapshot_path.with_extension("csv.tmp");
        {
            let mut w = Writer::from_path(&tmp)?;
            w.write_record(SNAPSHOT_HEADER)?;
            for row in rows {
                w.write_record(&[
                    row.lat.to_string(),
                    row.lon.to_string(),
                    row.marker_size.to_string(),
                    row.label.clone(),
                    row.sequence.to_string(),
                ])?;
            }
            w.flush()?;
        }
        fs::rename(&tmp, &self.snapshot_path)?;
        log::trace!("wrote {} points to {}", rows.len(), self.snapshot_path.display());
        Ok(())
    }

    fn write_step(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.steps.write_record(&[
            row.iteration.to_string(),
            row.nodes.to_string(),
            format!("{:.4}", row.total_km),
            row.streets_completed.to_string(),
            row.branch_budget.to_string(),
            format!("{:.6}", row.score),
        ])?;
        // Flushed per step so the log is readable while the route grows.
        self.steps.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.steps.flush()?;
        Ok(())
    }
}
