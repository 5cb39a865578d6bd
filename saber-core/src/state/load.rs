//! Timed load sequence
//!
//! A load opens the trigger, holds it open for the calibrated wait, then
//! closes it. Instead of blocking the only execution context for the wait,
//! the sequence is split in two phases: the opening write arms a deadline,
//! and a later clock check performs the closing write. While armed the
//! launcher reports busy and refuses every other operation.

/// Load sequence phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadPhase {
    /// No load in progress
    #[default]
    Idle,
    /// Trigger opened at `opened_ms`, waiting to close
    Waiting {
        /// Clock reading when the open pulse was written
        opened_ms: u32,
    },
}

impl LoadPhase {
    /// Check if a load is in progress
    pub fn is_busy(&self) -> bool {
        matches!(self, LoadPhase::Waiting { .. })
    }

    /// Milliseconds left before the trigger may close
    ///
    /// `None` when idle, `Some(0)` once the wait has elapsed. The clock is
    /// a free-running millisecond counter; wrap-around is handled. A
    /// reading slightly behind `opened_ms` counts as no time elapsed.
    pub fn remaining_ms(&self, now_ms: u32, load_time_ms: u32) -> Option<u32> {
        match *self {
            LoadPhase::Idle => None,
            LoadPhase::Waiting { opened_ms } => {
                let elapsed = (now_ms.wrapping_sub(opened_ms) as i32).max(0) as u32;
                Some(load_time_ms.saturating_sub(elapsed))
            }
        }
    }
}

/// Millisecond stamp for arming a deadline, rounded up from `micros`
///
/// Pairing a rounded-up start with rounded-down readings from
/// [`elapsed_stamp`] means a wait counted in whole milliseconds never ends
/// before that much real time has passed.
pub const fn arm_stamp(micros: u64) -> u32 {
    micros.div_ceil(1000) as u32
}

/// Millisecond stamp for checking a deadline, rounded down from `micros`
pub const fn elapsed_stamp(micros: u64) -> u32 {
    (micros / 1000) as u32
}
