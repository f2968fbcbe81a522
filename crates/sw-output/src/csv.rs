//! CSV output backend.
//!
//! One file, one row per reporting step:
//!
//! ```text
//! step,a0_x,a0_y,a1_x,a1_y,...
//! 0,3.25,7.5,1.125,4.0,...
//! ```

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;
use sw_core::{DVec2, Step};

use crate::OutputResult;
use crate::writer::OutputWriter;

/// Writes agent positions to a single CSV file.
pub struct CsvWriter {
    rows:     Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create (or truncate) the file at `path`, creating missing parent
    /// directories, and write the header for `agent_count` agents.
    pub fn new(path: &Path, agent_count: usize) -> OutputResult<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let mut rows = Writer::from_path(path)?;
        rows.write_record(header(agent_count))?;
        Ok(Self { rows, finished: false })
    }
}

fn header(agent_count: usize) -> Vec<String> {
    let mut fields = Vec::with_capacity(1 + 2 * agent_count);
    fields.push("step".to_string());
    for i in 0..agent_count {
        fields.push(format!("a{i}_x"));
        fields.push(format!("a{i}_y"));
    }
    fields
}

impl OutputWriter for CsvWriter {
    /// Fails with a CSV error if `positions` does not match the header width.
    fn write_step(&mut self, step: Step, positions: &[DVec2]) -> OutputResult<()> {
        let mut record = Vec::with_capacity(1 + 2 * positions.len());
        record.push(step.0.to_string());
        for p in positions {
            record.push(p.x.to_string());
            record.push(p.y.to_string());
        }
        self.rows.write_record(&record)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.rows.flush()?;
        Ok(())
    }
}
