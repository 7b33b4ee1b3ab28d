//! `lift-output` — status trace writers for the lift controller workspace.
//!
//! [`CsvStatusWriter`] implements `lift_control::StatusObserver`: subscribe it
//! to a lift and every published status becomes one row of
//! `sequence,floor,direction`.  The file is flushed when the lift is
//! disposed.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_output::CsvStatusWriter;
//!
//! let writer = CsvStatusWriter::create(Path::new("./lift_status.csv"))?;
//! lift.subscribe(Box::new(writer));
//! ```

pub mod csv;
pub mod error;


pub use csv::CsvStatusWriter;
pub use error::{OutputError, OutputResult};
