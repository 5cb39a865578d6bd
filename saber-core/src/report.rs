//! Status reports
//!
//! Every recognized command yields exactly one report (a load yields a
//! second one when the trigger closes). Reports render to the single text
//! line sent back over the serial link.

use core::fmt::{self, Write};

use heapless::String;

use crate::traits::{Channel, ServoError};

/// Maximum rendered report length in bytes
pub const MAX_REPORT_LEN: usize = 64;

/// Outcome of a launcher operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// Load started: trigger open, closing after the wait
    LoadStarted { wait_ms: u32 },
    /// Load finished: trigger closed
    Loaded,
    /// Trigger released
    Launched,
    /// Launch refused, trigger already open
    AlreadyOpen,
    /// Trigger closed
    Locked,
    /// Lock refused, trigger already closed
    AlreadyClosed,
    /// Aim moved to the upper limit
    AimedUp,
    /// Aim-up refused, already at the upper limit
    AlreadyUp,
    /// Aim moved to the lower limit
    AimedDown,
    /// Aim-down refused, already at the lower limit
    AlreadyDown,
    /// Aim moved to an absolute pulse width
    Aimed { pulse_us: u16 },
    /// Absolute aim value outside the travel limits
    InvalidAimValue(i32),
    /// Aim stop outside `1..=step_max`
    InvalidStepValue(i32),
    /// Operation refused while a load is in progress
    Busy,
    /// Driver rejected the write; logical state unchanged
    ServoFault { channel: Channel, error: ServoError },
}

impl Report {
    /// Check if this report describes a refused or failed operation
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Report::AlreadyOpen
                | Report::AlreadyClosed
                | Report::AlreadyUp
                | Report::AlreadyDown
                | Report::InvalidAimValue(_)
                | Report::InvalidStepValue(_)
                | Report::Busy
                | Report::ServoFault { .. }
        )
    }

    /// Render to a status line, without terminator
    pub fn render(&self) -> String<MAX_REPORT_LEN> {
        let mut line = String::new();
        // Longest message is well under MAX_REPORT_LEN
        let _ = write!(line, "{}", self);
        line
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::LoadStarted { wait_ms } => {
                write!(f, "Loading: trigger open, locking in {} ms", wait_ms)
            }
            Report::Loaded => f.write_str("Loaded: trigger locked"),
            Report::Launched => f.write_str("Launched: trigger open"),
            Report::AlreadyOpen => f.write_str("Launch failed: trigger already open"),
            Report::Locked => f.write_str("Locked: trigger closed"),
            Report::AlreadyClosed => f.write_str("Lock failed: trigger already closed"),
            Report::AimedUp => f.write_str("Aimed up"),
            Report::AlreadyUp => f.write_str("Aim failed: already up"),
            Report::AimedDown => f.write_str("Aimed down"),
            Report::AlreadyDown => f.write_str("Aim failed: already down"),
            Report::Aimed { pulse_us } => write!(f, "Aimed at {} us", pulse_us),
            Report::InvalidAimValue(value) => write!(f, "Invalid aiming value: {}", value),
            Report::InvalidStepValue(step) => write!(f, "Invalid step value: {}", step),
            Report::Busy => f.write_str("Busy: load in progress"),
            Report::ServoFault { channel, error } => {
                write!(f, "Servo fault on {} channel: {}", channel, error)
            }
        }
    }
}
