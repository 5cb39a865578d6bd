//! Firmware configuration
//!
//! Calibration comes from launcher.toml, validated and turned into a
//! constant by the build script. Servo timing and pin wiring are board
//! constants.

use saber_core::config::Calibration;
use saber_drivers::servo::PwmServoConfig;

include!(concat!(env!("OUT_DIR"), "/calibration.rs"));

// The build script already checked this; keep the guarantee local
const _: () = assert!(CALIBRATION.validate().is_ok());

/// Servo frame and safe pulse envelope shared by both channels
pub const SERVO_CONFIG: PwmServoConfig = PwmServoConfig {
    period_us: 20_000,
    min_pulse_us: 500,
    max_pulse_us: 2500,
};

// Every calibrated position must be reachable by the servo driver
const _: () = assert!(
    CALIBRATION.aim_down_us >= SERVO_CONFIG.min_pulse_us
        && CALIBRATION.aim_up_us <= SERVO_CONFIG.max_pulse_us
);
const _: () = assert!(
    CALIBRATION.trigger_closed_us >= SERVO_CONFIG.min_pulse_us
        && CALIBRATION.trigger_closed_us <= SERVO_CONFIG.max_pulse_us
        && CALIBRATION.trigger_open_us >= SERVO_CONFIG.min_pulse_us
        && CALIBRATION.trigger_open_us <= SERVO_CONFIG.max_pulse_us
);

/// PWM slice clock divider: 125 MHz / 125 = 1 MHz, one count per µs
pub const PWM_DIVIDER: u8 = 125;

/// PWM counter wrap for a 20 ms frame at 1 MHz
pub const PWM_TOP: u16 = 19_999;

/// Serial link baud rate
pub const BAUD_RATE: u32 = 115_200;
