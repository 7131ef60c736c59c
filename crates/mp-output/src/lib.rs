//! `mp-output` — simulation output writers for the mopatop epidemic model.
//!
//! | Writer        | Files created                                           |
//! |---------------|---------------------------------------------------------|
//! | [`CsvWriter`] | `<outputFile>.csv`, plus `places.csv` when place reporting is on |
//!
//! Writers implement [`OutputWriter`] and are driven by [`SummaryReporter`],
//! which implements `mp_sim::Reporter`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mp_output::{CsvWriter, SummaryReporter};
//!
//! let writer = CsvWriter::new(&config.output_directory, &config.output_file)?;
//! let mut reporter = SummaryReporter::new(writer);
//! sim.run(config.n_steps, &mut reporter)?;
//! if let Some(e) = reporter.take_error() {
//!     log::error!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod reporter;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use reporter::SummaryReporter;
pub use row::{PlaceRow, SummaryRow};
pub use writer::OutputWriter;
