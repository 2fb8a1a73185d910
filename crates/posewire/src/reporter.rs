//! Console debug output for each sample sent.

use std::io::Write;

use posewire_protocol::{PoseReport, PoseSample, ReportMode};

use crate::error::{BridgeError, BridgeResult};

/// Writes a [`PoseReport`] per sample to an output stream.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
    mode: ReportMode,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, mode: ReportMode) -> Self {
        Self { out, mode }
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    pub fn report(&mut self, sample: &PoseSample) -> BridgeResult<()> {
        write!(self.out, "{}", PoseReport::new(sample, self.mode)).map_err(BridgeError::IoError)?;
        self.out.flush().map_err(BridgeError::IoError)
    }

    /// Terminate the last report line.
    pub fn finish(&mut self) -> BridgeResult<()> {
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
