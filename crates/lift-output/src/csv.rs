//! CSV status trace.
//!
//! One row per published status:
//!
//! ```text
//! sequence,floor,direction
//! 0,0,up
//! 1,1,up
//! ```

use std::fs::File;
use std::io;
use std::path::Path;

use csv::Writer;
use lift_control::StatusObserver;
use lift_core::LiftStatus;
use tracing::{debug, warn};

use crate::{OutputError, OutputResult};

/// Writes every published [`LiftStatus`] as a CSV row.
///
/// The observer interface cannot return errors, so a failed write is logged
/// and counted; [`failed_writes`](Self::failed_writes) exposes the count.
pub struct CsvStatusWriter<W: io::Write + Send> {
    writer:   Writer<W>,
    sequence: u64,
    failures: u64,
    finished: bool,
}

impl CsvStatusWriter<File> {
    /// Create (or truncate) the file at `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let writer = Writer::from_path(path)?;
        debug!(path = %path.display(), "opened status trace");
        Self::with_writer(writer)
    }
}

impl<W: io::Write + Send> CsvStatusWriter<W> {
    /// Wrap an arbitrary sink and write the header row.
    pub fn new(inner: W) -> OutputResult<Self> {
        Self::with_writer(Writer::from_writer(inner))
    }

    fn with_writer(mut writer: Writer<W>) -> OutputResult<Self> {
        writer.write_record(["sequence", "floor", "direction"])?;
        Ok(Self {
            writer,
            sequence: 0,
            failures: 0,
            finished: false,
        })
    }

    /// Rows written so far, header excluded.
    pub fn rows(&self) -> u64 {
        self.sequence
    }

    pub fn failed_writes(&self) -> u64 {
        self.failures
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Append one status row.
    pub fn write_status(&mut self, status: &LiftStatus) -> OutputResult<()> {
        self.writer.write_record(&[
            self.sequence.to_string(),
            status.current_floor.0.to_string(),
            status.current_direction.as_str().to_owned(),
        ])?;
        self.sequence += 1;
        Ok(())
    }

    /// Flush buffered rows.  Idempotent: later calls are no-ops.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying sink.
    pub fn into_inner(mut self) -> OutputResult<W> {
        self.finish()?;
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl<W: io::Write + Send> StatusObserver for CsvStatusWriter<W> {
    fn on_status(&mut self, status: LiftStatus) {
        if self.finished {
            return;
        }
        if let Err(e) = self.write_status(&status) {
            self.failures += 1;
            warn!(%status, error = %e, "failed to write status row");
        }
    }

    fn on_completed(&mut self) {
        match self.finish() {
            Ok(()) => debug!(rows = self.sequence, "status trace flushed"),
            Err(e) => {
                self.failures += 1;
                warn!(error = %e, "failed to flush status trace");
            }
        }
    }
}
