//! Line accumulation for the serial command stream
//!
//! Bytes are fed one at a time as they arrive from the UART. A line is
//! complete when `\n` is seen. The buffer is bounded: a line longer than
//! [`MAX_LINE_LEN`] is dropped in its entirety, up to and including its
//! terminator, so the tail of an overlong line is never mistaken for a
//! command.

use heapless::{String, Vec};

/// Line terminator
pub const LINE_END: u8 = b'\n';

/// Maximum line length in bytes, terminator excluded
pub const MAX_LINE_LEN: usize = 64;

/// A complete line, terminator stripped
pub type Line = String<MAX_LINE_LEN>;

/// Errors that can occur while accumulating a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded `MAX_LINE_LEN`; bytes are discarded until the next terminator
    Overflow,
    /// Completed line is not valid UTF-8
    InvalidUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccumulateState {
    /// Collecting bytes of the current line
    Collecting,
    /// Overflowed, skipping to the next terminator
    Discarding,
}

/// Byte-at-a-time line assembler
#[derive(Debug, Clone)]
pub struct LineAccumulator {
    state: AccumulateState,
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl Default for LineAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            state: AccumulateState::Collecting,
            buffer: Vec::new(),
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.state = AccumulateState::Collecting;
        self.buffer.clear();
    }

    /// Number of bytes buffered for the current line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty
    /// line, `Ok(None)` when more bytes are needed, or `Err` when the
    /// current line has to be dropped. Overflow is reported once, on the
    /// byte that overflows.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        match self.state {
            AccumulateState::Discarding => {
                if byte == LINE_END {
                    self.reset();
                }
                Ok(None)
            }
            AccumulateState::Collecting => {
                if byte == LINE_END {
                    return self.finish();
                }

                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.state = AccumulateState::Discarding;
                    return Err(LineError::Overflow);
                }
                Ok(None)
            }
        }
    }

    /// Feed multiple bytes
    ///
    /// Returns the first complete line found, if any.
    /// Remaining bytes after a complete line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Line>, LineError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn finish(&mut self) -> Result<Option<Line>, LineError> {
        if self.buffer.is_empty() {
            return Ok(None);
        }

        let bytes = core::mem::take(&mut self.buffer);
        match String::from_utf8(bytes) {
            Ok(line) => Ok(Some(line)),
            Err(_) => Err(LineError::InvalidUtf8),
        }
    }
}
