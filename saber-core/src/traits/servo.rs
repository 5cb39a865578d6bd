//! Servo driver trait
//!
//! A hobby servo is positioned by the width of a periodic pulse. The core
//! only ever speaks in microseconds of pulse width; converting that into
//! timer counts is the driver's concern.

use core::fmt;

/// Servo channels on the launcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Lock servo holding the launch arm
    Trigger,
    /// Elevation servo
    Aim,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Trigger => f.write_str("trigger"),
            Channel::Aim => f.write_str("aim"),
        }
    }
}

/// Errors that can occur when writing a servo pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError {
    /// Pulse width outside the servo's safe envelope
    OutOfRange,
    /// Underlying PWM peripheral rejected the duty cycle
    Pwm,
}

impl fmt::Display for ServoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServoError::OutOfRange => f.write_str("pulse out of range"),
            ServoError::Pwm => f.write_str("pwm error"),
        }
    }
}

/// Trait for a single servo output
///
/// Writing the same pulse twice is allowed and re-issues the hardware
/// write. Implementations hold the pulse until the next write.
pub trait ServoDriver {
    /// Set the pulse width in microseconds
    fn set_pulse_width(&mut self, pulse_us: u16) -> Result<(), ServoError>;

    /// Last pulse width successfully written, if any
    fn pulse_width(&self) -> Option<u16>;
}
