//! The sample → frame → transport loop.

use std::io::Write;

use posewire_protocol::FrameEncoder;
use tracing::{debug, info};

use crate::error::BridgeResult;
use crate::reporter::ConsoleReporter;
use crate::source::PoseSource;
use crate::transport::Transport;

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames_sent: u64,
    pub bytes_sent: u64,
}

/// Pulls samples from a source, encodes them and writes each frame before
/// pulling the next one.
pub struct Bridge<S, T> {
    source: S,
    transport: T,
    encoder: FrameEncoder,
    reporter: Option<ConsoleReporter<Box<dyn Write>>>,
    max_frames: Option<u64>,
    stats: RunStats,
}

impl<S: PoseSource, T: Transport> Bridge<S, T> {
    pub fn new(source: S, transport: T, encoder: FrameEncoder) -> Self {
        Self {
            source,
            transport,
            encoder,
            reporter: None,
            max_frames: None,
            stats: RunStats::default(),
        }
    }

    pub fn with_reporter(mut self, reporter: ConsoleReporter<Box<dyn Write>>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// One cycle. Returns `Ok(false)` once the source is exhausted.
    ///
    /// The frame is fully written before the report is printed, so a
    /// transport failure never produces a report for an unsent frame.
    pub fn step(&mut self) -> BridgeResult<bool> {
        let Some(sample) = self.source.next_sample()? else {
            return Ok(false);
        };

        let encoded = self.encoder.encode(&sample)?;
        self.transport.send_frame(&encoded)?;

        let byte_count = u64::try_from(encoded.bytes().len()).unwrap_or(u64::MAX);
        self.stats.frames_sent = self.stats.frames_sent.saturating_add(1);
        self.stats.bytes_sent = self.stats.bytes_sent.saturating_add(byte_count);
        debug!(
            frame = self.stats.frames_sent,
            bytes = byte_count,
            tokens = %encoded.tokens(),
            "Frame sent"
        );

        if let Some(reporter) = self.reporter.as_mut() {
            reporter.report(&sample)?;
        }
        Ok(true)
    }

    /// Run until the source ends or `max_frames` is reached.
    pub fn run(&mut self) -> BridgeResult<RunStats> {
        info!(
            transport = self.transport.name(),
            layout = %self.encoder.layout(),
            strict = self.encoder.is_strict(),
            "Bridge started"
        );

        let outcome = self.run_steps();
        // Terminate the last report line before any error is printed.
        let finished = match self.reporter.as_mut() {
            Some(reporter) => reporter.finish(),
            None => Ok(()),
        };
        outcome.and(finished)?;

        info!(
            frames = self.stats.frames_sent,
            bytes = self.stats.bytes_sent,
            "Bridge stopped"
        );
        Ok(self.stats)
    }

    fn run_steps(&mut self) -> BridgeResult<()> {
        while self
            .max_frames
            .is_none_or(|max| self.stats.frames_sent < max)
        {
            if !self.step()? {
                debug!("Pose source exhausted");
                break;
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn into_parts(self) -> (S, T) {
        (self.source, self.transport)
    }
}
