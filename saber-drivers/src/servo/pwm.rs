//! PWM servo driver
//!
//! Drives a hobby servo from any PWM channel implementing
//! [`embedded_hal::pwm::SetDutyCycle`]. The channel must already run at
//! the servo frame rate (typically 50 Hz, a 20 ms period); this driver only
//! converts pulse widths into duty counts.
//!
//! # Usage
//!
//! ```ignore
//! let mut servo = PwmServo::new(pwm_channel, PwmServoConfig::default());
//! servo.set_pulse_width(1500)?; // center
//! ```

use embedded_hal::pwm::SetDutyCycle;
use saber_core::traits::{ServoDriver, ServoError};

/// PWM servo configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmServoConfig {
    /// PWM period in µs (20 000 for 50 Hz)
    pub period_us: u32,
    /// Shortest pulse the servo accepts without hitting its end stop
    pub min_pulse_us: u16,
    /// Longest pulse the servo accepts without hitting its end stop
    pub max_pulse_us: u16,
}

impl Default for PwmServoConfig {
    fn default() -> Self {
        Self {
            period_us: 20_000,
            min_pulse_us: 500,
            max_pulse_us: 2500,
        }
    }
}

/// Servo on a single PWM channel
pub struct PwmServo<P> {
    pwm: P,
    config: PwmServoConfig,
    /// Last pulse written, `None` before the first write
    pulse_us: Option<u16>,
}

impl<P: SetDutyCycle> PwmServo<P> {
    /// Create a servo driver; the output stays untouched until the first write
    pub fn new(pwm: P, config: PwmServoConfig) -> Self {
        Self {
            pwm,
            config,
            pulse_us: None,
        }
    }

    /// Release the PWM channel
    pub fn into_inner(self) -> P {
        self.pwm
    }

    /// Convert a pulse width to duty counts for this channel
    fn duty_for(&self, pulse_us: u16) -> u16 {
        let max_duty = self.pwm.max_duty_cycle() as u32;
        let duty = pulse_us as u32 * max_duty / self.config.period_us.max(1);
        duty.min(max_duty) as u16
    }
}

impl<P: SetDutyCycle> ServoDriver for PwmServo<P> {
    fn set_pulse_width(&mut self, pulse_us: u16) -> Result<(), ServoError> {
        if pulse_us < self.config.min_pulse_us || pulse_us > self.config.max_pulse_us {
            return Err(ServoError::OutOfRange);
        }

        let duty = self.duty_for(pulse_us);
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| ServoError::Pwm)?;
        self.pulse_us = Some(pulse_us);
        Ok(())
    }

    fn pulse_width(&self) -> Option<u16> {
        self.pulse_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::pwm::{Error, ErrorKind, ErrorType};

    #[derive(Debug)]
    struct MockError;

    impl Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// PWM channel with a 1 MHz counter (one count per µs)
    struct MockPwm {
        max: u16,
        duty: u16,
        writes: usize,
        fail: bool,
    }

    impl MockPwm {
        fn new(max: u16) -> Self {
            Self {
                max,
                duty: 0,
                writes: 0,
                fail: false,
            }
        }
    }

    impl ErrorType for MockPwm {
        type Error = MockError;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.duty = duty;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_one_count_per_microsecond() {
        let mut servo = PwmServo::new(MockPwm::new(20_000), PwmServoConfig::default());
        servo.set_pulse_width(1340).unwrap();
        assert_eq!(servo.pulse_width(), Some(1340));
        assert_eq!(servo.into_inner().duty, 1340);
    }

    #[test]
    fn test_scales_to_counter_resolution() {
        // 16-bit counter over the 20 ms frame
        let mut servo = PwmServo::new(MockPwm::new(u16::MAX), PwmServoConfig::default());
        servo.set_pulse_width(1500).unwrap();
        // 1500 * 65535 / 20000 = 4915.125
        assert_eq!(servo.into_inner().duty, 4915);
    }

    #[test]
    fn test_out_of_envelope_rejected() {
        let mut servo = PwmServo::new(MockPwm::new(20_000), PwmServoConfig::default());
        assert_eq!(servo.set_pulse_width(499), Err(ServoError::OutOfRange));
        assert_eq!(servo.set_pulse_width(2501), Err(ServoError::OutOfRange));
        assert_eq!(servo.pulse_width(), None);
        assert_eq!(servo.into_inner().writes, 0);
    }

    #[test]
    fn test_envelope_edges_accepted() {
        let mut servo = PwmServo::new(MockPwm::new(20_000), PwmServoConfig::default());
        assert_eq!(servo.set_pulse_width(500), Ok(()));
        assert_eq!(servo.set_pulse_width(2500), Ok(()));
    }

    #[test]
    fn test_repeat_write_reissued() {
        let mut servo = PwmServo::new(MockPwm::new(20_000), PwmServoConfig::default());
        servo.set_pulse_width(1200).unwrap();
        servo.set_pulse_width(1200).unwrap();
        assert_eq!(servo.into_inner().writes, 2);
    }

    #[test]
    fn test_pwm_error_mapped() {
        let mut pwm = MockPwm::new(20_000);
        pwm.fail = true;
        let mut servo = PwmServo::new(pwm, PwmServoConfig::default());
        assert_eq!(servo.set_pulse_width(1500), Err(ServoError::Pwm));
        assert_eq!(servo.pulse_width(), None);
    }
}
