//! CSV output backend.
//!
//! Creates `<name>.csv` in the output directory up front.  `places.csv` is
//! only created once the first batch of place rows arrives, so runs without
//! place reporting leave no empty file behind.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;
use log::debug;

use crate::writer::OutputWriter;
use crate::{OutputResult, PlaceRow, SummaryRow};

const SUMMARY_HEADER: [&str; 8] = [
    "step",
    "time_hours",
    "date",
    "susceptible",
    "diseased",
    "immune",
    "recovered",
    "dead",
];

const PLACES_HEADER: [&str; 5] = ["step", "place_id", "category", "occupants", "contamination"];

/// Writes simulation output to CSV files.
pub struct CsvWriter {
    summary:  Writer<File>,
    dir:      PathBuf,
    places:   Option<Writer<File>>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir/<name>.csv` and write its header row.  `dir` must exist.
    pub fn new(dir: &Path, name: &str) -> OutputResult<Self> {
        let path = dir.join(format!("{name}.csv"));
        let mut summary = Writer::from_path(&path)?;
        summary.write_record(SUMMARY_HEADER)?;
        debug!("writing summary to {}", path.display());

        Ok(Self {
            summary,
            dir:      dir.to_path_buf(),
            places:   None,
            finished: false,
        })
    }

    fn places_writer(&mut self) -> OutputResult<&mut Writer<File>> {
        let w = match self.places.take() {
            Some(w) => w,
            None => {
                let mut w = Writer::from_path(self.dir.join("places.csv"))?;
                w.write_record(PLACES_HEADER)?;
                w
            }
        };
        Ok(self.places.insert(w))
    }
}

impl OutputWriter for CsvWriter {
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.step.to_string(),
            row.time_hours.to_string(),
            row.date.clone(),
            row.susceptible.to_string(),
            row.diseased.to_string(),
            row.immune.to_string(),
            row.recovered.to_string(),
            row.dead.to_string(),
        ])?;
        Ok(())
    }

    fn write_places(&mut self, rows: &[PlaceRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let w = self.places_writer()?;
        for row in rows {
            w.write_record(&[
                row.step.to_string(),
                row.place_id.to_string(),
                row.category.clone(),
                row.occupants.to_string(),
                row.contamination.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summary.flush()?;
        if let Some(w) = self.places.as_mut() {
            w.flush()?;
        }
        Ok(())
    }
}
