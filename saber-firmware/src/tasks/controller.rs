//! Main controller task
//!
//! Owns the launcher. Takes one line at a time from the RX task, runs it
//! to completion and publishes the report. A load in progress is finished
//! before the next line is taken, so commands never overlap.

use defmt::*;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Instant, Timer};

use saber_core::state::{arm_stamp, elapsed_stamp};
use saber_core::{interpreter, Launcher, Report};
use saber_drivers::servo::PwmServo;

use crate::channels::{LINE_CHANNEL, STATUS_CHANNEL};

/// Servo channel type on this board
pub type BoardServo = PwmServo<PwmOutput<'static>>;

/// Launcher wired to the board's two PWM outputs
pub type SaberLauncher = Launcher<BoardServo, BoardServo>;

/// Controller task - main command loop
#[embassy_executor::task]
pub async fn controller_task(mut launcher: SaberLauncher) {
    info!("Controller task started");

    // Bring the hardware in line with the initial logical state
    match launcher.home() {
        Ok(()) => info!(
            "Servos homed: trigger {:?}, aim {} us",
            launcher.lock_state(),
            launcher.aim_position()
        ),
        Err(e) => error!("Failed to home servos: {:?}", e),
    }

    loop {
        // Finish a pending load before accepting anything else
        if let Some(remaining) = launcher.load_remaining_ms(elapsed_ms()) {
            Timer::after_millis(remaining as u64).await;
            if let Some(report) = launcher.tick(elapsed_ms()) {
                publish(report).await;
            }
            continue;
        }

        let line = LINE_CHANNEL.receive().await;

        match interpreter::execute(&mut launcher, &line, arm_ms()) {
            Some(report) => publish(report).await,
            None => debug!("Ignoring unrecognized line: {}", line.as_str()),
        }
    }
}

/// Milliseconds since boot rounded up, for arming the load deadline
fn arm_ms() -> u32 {
    arm_stamp(Instant::now().as_micros())
}

/// Milliseconds since boot rounded down, for checking the load deadline
fn elapsed_ms() -> u32 {
    elapsed_stamp(Instant::now().as_micros())
}

/// Log a report and queue it for the serial link
async fn publish(report: Report) {
    if report.is_failure() {
        warn!("{:?}", report);
    } else {
        info!("{:?}", report);
    }
    STATUS_CHANNEL.send(report).await;
}
