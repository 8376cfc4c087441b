//! Frame tape: the persisted projection of past generations.
//!
//! Each frame stores the alive/dead projection of a snapshot as a
//! bitset (`s == 1` reads as alive), the generation number, and
//! optional per-cell 8-bit metrics. Two-state rules round-trip exactly;
//! deeper decay chains keep their alive projection and drop the decay
//! detail, which keeps the wire size at one bit per cell.
//!
//! Tapes are gzipped JSON lines, one frame per line, append-only.

use crate::error::{IoError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

/// One recorded generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub generation: u64,
    pub width: u32,
    pub height: u32,
    /// Alive bitset, LSB-first within each byte, row-major cell order.
    pub bits: Vec<u8>,
    /// Optional per-cell 8-bit metric plane (renderer heat, age, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<u8>>,
}

impl Frame {
    /// Packs a snapshot's alive projection into a frame.
    pub fn pack(snapshot: &[u16], width: u32, height: u32, generation: u64) -> Result<Self> {
        let cells = width as usize * height as usize;
        if snapshot.len() != cells {
            return Err(IoError::dimension_mismatch(format!(
                "{} cells for a {width}x{height} grid",
                snapshot.len()
            )));
        }
        let mut bits = vec![0u8; cells.div_ceil(8)];
        for (i, &s) in snapshot.iter().enumerate() {
            if s == 1 {
                bits[i >> 3] |= 1 << (i & 7);
            }
        }
        Ok(Self {
            generation,
            width,
            height,
            bits,
            metrics: None,
        })
    }

    /// Attaches a per-cell metric plane.
    pub fn with_metrics(mut self, metrics: Vec<u8>) -> Result<Self> {
        let cells = self.width as usize * self.height as usize;
        if metrics.len() != cells {
            return Err(IoError::dimension_mismatch(format!(
                "{} metric bytes for a {}x{} grid",
                metrics.len(),
                self.width,
                self.height
            )));
        }
        self.metrics = Some(metrics);
        Ok(self)
    }

    /// Unpacks the alive projection back into cell states (0 or 1).
    #[must_use]
    pub fn unpack(&self) -> Vec<u16> {
        let cells = self.width as usize * self.height as usize;
        (0..cells)
            .map(|i| u16::from(self.bits[i >> 3] >> (i & 7) & 1))
            .collect()
    }

    /// Number of alive cells in the frame.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        let cells = self.width as usize * self.height as usize;
        let mut count = self
            .bits
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum::<usize>();
        // Guard against set padding bits in a foreign frame.
        let tail = cells % 8;
        if tail != 0 {
            if let Some(&last) = self.bits.last() {
                count -= (last >> tail).count_ones() as usize;
            }
        }
        count
    }

    /// Validates the bitset length against the declared dimensions.
    pub fn validate(&self) -> Result<()> {
        let cells = self.width as usize * self.height as usize;
        if self.bits.len() != cells.div_ceil(8) {
            return Err(IoError::corrupt(format!(
                "frame {} carries {} bitset bytes for a {}x{} grid",
                self.generation,
                self.bits.len(),
                self.width,
                self.height
            )));
        }
        if let Some(metrics) = &self.metrics {
            if metrics.len() != cells {
                return Err(IoError::corrupt(format!(
                    "frame {} carries {} metric bytes for a {}x{} grid",
                    self.generation,
                    metrics.len(),
                    self.width,
                    self.height
                )));
            }
        }
        Ok(())
    }
}

/// Appends frames to a gzipped JSON-lines tape file.
pub struct TapeWriter {
    encoder: GzEncoder<BufWriter<File>>,
    frames: u64,
}

impl TapeWriter {
    /// Creates (truncates) a tape at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            encoder: GzEncoder::new(BufWriter::new(file), Compression::default()),
            frames: 0,
        })
    }

    /// Appends one frame.
    pub fn append(&mut self, frame: &Frame) -> Result<()> {
        frame.validate()?;
        let json = serde_json::to_string(frame)?;
        self.encoder.write_all(json.as_bytes())?;
        self.encoder.write_all(b"\n")?;
        self.frames += 1;
        Ok(())
    }

    /// Number of frames appended so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Flushes and closes the tape.
    pub fn finish(self) -> Result<()> {
        self.encoder.finish()?.flush()?;
        Ok(())
    }
}

/// Iterates frames from a gzipped JSON-lines tape file.
pub struct TapeReader {
    lines: Lines<BufReader<GzDecoder<File>>>,
}

impl TapeReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(GzDecoder::new(file)).lines(),
        })
    }
}

impl Iterator for TapeReader {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e.into())),
        };
        if line.trim().is_empty() {
            return self.next();
        }
        let frame: Frame = match serde_json::from_str(&line) {
            Ok(frame) => frame,
            Err(e) => return Some(Err(IoError::from(e).with_context("reading frame"))),
        };
        Some(frame.validate().map(|()| frame))
    }
}
