//! Servo calibration
//!
//! Pulse widths are in microseconds of high time per 20 ms servo frame.
//! Values are specific to one mechanical build and are set once at build
//! time; nothing mutates them at runtime.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::state::LockState;

/// Errors in a calibration set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Aim lower limit is not below the upper limit
    EmptyAimRange,
    /// Fewer than two aim stops (the step mapping needs a non-empty domain)
    TooFewSteps,
    /// Trigger open and closed positions are identical
    TriggerPositionsEqual,
    /// Load wait is zero
    ZeroLoadTime,
}

/// Launcher calibration constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Calibration {
    /// Trigger servo pulse holding the arm locked
    pub trigger_closed_us: u16,
    /// Trigger servo pulse releasing the arm
    pub trigger_open_us: u16,
    /// Aim servo upper travel limit
    pub aim_up_us: u16,
    /// Aim servo lower travel limit
    pub aim_down_us: u16,
    /// Number of discrete aim stops for `aim-step`
    pub step_max: u8,
    /// Time the trigger stays open during a load, in ms
    pub load_time_ms: u32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Calibration {
    /// Shipped calibration for the reference build
    pub const DEFAULT: Self = Self {
        trigger_closed_us: 1700,
        trigger_open_us: 1100,
        aim_up_us: 1340,
        aim_down_us: 1000,
        step_max: 10,
        load_time_ms: 5000,
    };

    /// Check internal consistency
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.aim_down_us >= self.aim_up_us {
            return Err(ConfigError::EmptyAimRange);
        }
        if self.step_max < 2 {
            return Err(ConfigError::TooFewSteps);
        }
        if self.trigger_closed_us == self.trigger_open_us {
            return Err(ConfigError::TriggerPositionsEqual);
        }
        if self.load_time_ms == 0 {
            return Err(ConfigError::ZeroLoadTime);
        }
        Ok(())
    }

    /// Trigger pulse for a lock state
    pub const fn trigger_pulse(&self, state: LockState) -> u16 {
        match state {
            LockState::Open => self.trigger_open_us,
            LockState::Closed => self.trigger_closed_us,
        }
    }

    /// Accept an absolute aim value if it lies within the travel limits
    pub fn aim_pulse(&self, value: i32) -> Option<u16> {
        let lo = self.aim_down_us as i32;
        let hi = self.aim_up_us as i32;
        if (lo..=hi).contains(&value) {
            Some(value as u16)
        } else {
            None
        }
    }

    /// Map an aim stop in `1..=step_max` onto the aim travel range
    ///
    /// Affine map with integer truncation: stop 1 is the lower limit,
    /// stop `step_max` is the upper limit.
    pub fn step_pulse(&self, step: i32) -> Option<u16> {
        let max = self.step_max as i32;
        if step < 1 || step > max {
            return None;
        }

        let lo = self.aim_down_us as i32;
        let hi = self.aim_up_us as i32;
        Some((lo + (step - 1) * (hi - lo) / (max - 1)) as u16)
    }
}
