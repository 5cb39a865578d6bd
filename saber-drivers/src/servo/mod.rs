//! Servo driver implementations
//!
//! - PWM servos: any `embedded_hal` PWM channel running at the servo frame rate

pub mod pwm;

pub use pwm::{PwmServo, PwmServoConfig};
