//! Pose sources.
//!
//! The tracking camera itself is driven by an external process that prints
//! one JSON pose per line; the bridge reads that stream from stdin or a file.
//! Each line is either a sensor-style object
//! (`{"translation":[..],"velocity":[..],"acceleration":[..],"angular_velocity":[..]}`)
//! or a flat array of 12 numbers. Blank lines and `#` comments are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use posewire_protocol::PoseSample;
use tracing::debug;

use crate::error::{BridgeError, BridgeResult};

/// Supplies one pose sample per cycle.
pub trait PoseSource {
    /// Block until the next sample is available. `Ok(None)` ends the stream.
    fn next_sample(&mut self) -> BridgeResult<Option<PoseSample>>;
}

impl<S: PoseSource + ?Sized> PoseSource for Box<S> {
    fn next_sample(&mut self) -> BridgeResult<Option<PoseSample>> {
        (**self).next_sample()
    }
}

/// JSON-lines reader over any buffered input.
#[derive(Debug)]
pub struct JsonLinesSource<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Lines consumed so far, including skipped ones.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> PoseSource for JsonLinesSource<R> {
    fn next_sample(&mut self) -> BridgeResult<Option<PoseSample>> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_line(&mut self.buf)
                .map_err(BridgeError::Source)?;
            if read == 0 {
                return Ok(None);
            }
            self.line = self.line.saturating_add(1);

            let text = self.buf.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let sample = serde_json::from_str(text).map_err(|source| BridgeError::SourceParse {
                line: self.line,
                source,
            })?;
            return Ok(Some(sample));
        }
    }
}

/// Replays a fixed list of samples; backs the `encode` subcommand.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    samples: std::collections::VecDeque<PoseSample>,
}

impl ReplaySource {
    pub fn new(samples: impl IntoIterator<Item = PoseSample>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl PoseSource for ReplaySource {
    fn next_sample(&mut self) -> BridgeResult<Option<PoseSample>> {
        Ok(self.samples.pop_front())
    }
}

/// Open the configured input: a file path, or stdin when `None`.
pub fn open_source(input: Option<&Path>) -> BridgeResult<Box<dyn PoseSource>> {
    match input {
        Some(path) => {
            let file = File::open(path).map_err(BridgeError::Source)?;
            debug!("Reading poses from {:?}", path);
            Ok(Box::new(JsonLinesSource::new(BufReader::new(file))))
        }
        None => {
            debug!("Reading poses from stdin");
            Ok(Box::new(JsonLinesSource::new(std::io::stdin().lock())))
        }
    }
}
