//! Launcher controller
//!
//! Owns the two servo channels and the logical state behind them: the
//! trigger lock state, the aim position and the load phase. Every operation
//! is guarded and returns a [`Report`]; invalid requests are reported
//! no-ops, never errors.
//!
//! # Usage
//!
//! ```ignore
//! let mut launcher = Launcher::new(CALIBRATION, trigger, aim)?;
//! launcher.home()?;
//!
//! let report = launcher.lock();
//!
//! // Load is two-phase: start it, then poll the clock
//! launcher.load(now_ms());
//! while launcher.is_busy() {
//!     if let Some(report) = launcher.tick(now_ms()) {
//!         // trigger closed
//!     }
//! }
//! ```

use crate::config::{Calibration, ConfigError};
use crate::report::Report;
use crate::state::{LoadPhase, LockState, TriggerAction};
use crate::traits::{Channel, ServoDriver, ServoError};

/// Two-servo launcher controller
pub struct Launcher<T, A> {
    calibration: Calibration,
    /// Lock servo
    trigger: T,
    /// Elevation servo
    aim: A,
    /// Last commanded trigger position
    lock: LockState,
    /// Last commanded aim pulse width
    aim_position: u16,
    /// Load sequence phase
    load: LoadPhase,
}

impl<T: ServoDriver, A: ServoDriver> Launcher<T, A> {
    /// Create a launcher with the trigger open and aim at the upper limit
    ///
    /// No pulse is written; call [`Launcher::home`] to bring the hardware
    /// into line with the initial state.
    pub fn new(calibration: Calibration, trigger: T, aim: A) -> Result<Self, ConfigError> {
        calibration.validate()?;

        Ok(Self {
            calibration,
            trigger,
            aim,
            lock: LockState::Open,
            aim_position: calibration.aim_up_us,
            load: LoadPhase::Idle,
        })
    }

    /// Drive both servos to the current logical state
    pub fn home(&mut self) -> Result<(), ServoError> {
        self.trigger
            .set_pulse_width(self.calibration.trigger_pulse(self.lock))?;
        self.aim.set_pulse_width(self.aim_position)
    }

    /// Get the trigger lock state
    pub fn lock_state(&self) -> LockState {
        self.lock
    }

    /// Get the aim position (pulse width in µs)
    pub fn aim_position(&self) -> u16 {
        self.aim_position
    }

    /// Get the load phase
    pub fn load_phase(&self) -> LoadPhase {
        self.load
    }

    /// Check if a load is in progress
    pub fn is_busy(&self) -> bool {
        self.load.is_busy()
    }

    /// Milliseconds until the load sequence may close the trigger
    pub fn load_remaining_ms(&self, now_ms: u32) -> Option<u32> {
        self.load.remaining_ms(now_ms, self.calibration.load_time_ms)
    }

    /// Get the trigger servo driver
    pub fn trigger_servo(&self) -> &T {
        &self.trigger
    }

    /// Get the aim servo driver
    pub fn aim_servo(&self) -> &A {
        &self.aim
    }

    /// Start a load: open the trigger and arm the closing deadline
    ///
    /// Unconditional apart from the busy guard. The closing write happens
    /// in [`Launcher::tick`] once `load_time_ms` has elapsed.
    pub fn load(&mut self, now_ms: u32) -> Report {
        if self.is_busy() {
            return Report::Busy;
        }

        if let Err(report) = self.drive_trigger(LockState::Open) {
            return report;
        }

        self.load = LoadPhase::Waiting { opened_ms: now_ms };
        Report::LoadStarted {
            wait_ms: self.calibration.load_time_ms,
        }
    }

    /// Advance the load sequence
    ///
    /// Returns a report when the trigger closes (or fails to). Call
    /// periodically, or once after sleeping for `load_remaining_ms`.
    pub fn tick(&mut self, now_ms: u32) -> Option<Report> {
        match self.load_remaining_ms(now_ms) {
            Some(0) => {
                // The sequence ends here whether or not the write succeeds
                self.load = LoadPhase::Idle;
                Some(match self.drive_trigger(LockState::Closed) {
                    Ok(()) => Report::Loaded,
                    Err(report) => report,
                })
            }
            _ => None,
        }
    }

    /// Release the trigger
    pub fn launch(&mut self) -> Report {
        self.guarded_trigger(TriggerAction::Release)
    }

    /// Close the trigger
    pub fn lock(&mut self) -> Report {
        self.guarded_trigger(TriggerAction::Engage)
    }

    /// Aim to the upper travel limit
    pub fn aim_up(&mut self) -> Report {
        if self.is_busy() {
            return Report::Busy;
        }
        let limit = self.calibration.aim_up_us;
        if self.aim_position == limit {
            return Report::AlreadyUp;
        }
        match self.drive_aim(limit) {
            Ok(()) => Report::AimedUp,
            Err(report) => report,
        }
    }

    /// Aim to the lower travel limit
    pub fn aim_down(&mut self) -> Report {
        if self.is_busy() {
            return Report::Busy;
        }
        let limit = self.calibration.aim_down_us;
        if self.aim_position == limit {
            return Report::AlreadyDown;
        }
        match self.drive_aim(limit) {
            Ok(()) => Report::AimedDown,
            Err(report) => report,
        }
    }

    /// Aim to an absolute pulse width
    ///
    /// No redundancy guard: repeating the current position re-issues the
    /// write.
    pub fn aim_micro(&mut self, value: i32) -> Report {
        if self.is_busy() {
            return Report::Busy;
        }
        let Some(pulse_us) = self.calibration.aim_pulse(value) else {
            return Report::InvalidAimValue(value);
        };
        match self.drive_aim(pulse_us) {
            Ok(()) => Report::Aimed { pulse_us },
            Err(report) => report,
        }
    }

    /// Aim to one of the discrete stops
    pub fn aim_step(&mut self, step: i32) -> Report {
        match self.calibration.step_pulse(step) {
            Some(pulse_us) => self.aim_micro(pulse_us as i32),
            None if self.is_busy() => Report::Busy,
            None => Report::InvalidStepValue(step),
        }
    }

    fn guarded_trigger(&mut self, action: TriggerAction) -> Report {
        if self.is_busy() {
            return Report::Busy;
        }

        let Some(next) = self.lock.transition(action) else {
            return match action {
                TriggerAction::Release => Report::AlreadyOpen,
                TriggerAction::Engage => Report::AlreadyClosed,
            };
        };

        match self.drive_trigger(next) {
            Ok(()) => match next {
                LockState::Open => Report::Launched,
                LockState::Closed => Report::Locked,
            },
            Err(report) => report,
        }
    }

    /// Write the trigger pulse for `state`, updating the lock on success
    fn drive_trigger(&mut self, state: LockState) -> Result<(), Report> {
        self.trigger
            .set_pulse_width(self.calibration.trigger_pulse(state))
            .map_err(|error| Report::ServoFault {
                channel: Channel::Trigger,
                error,
            })?;
        self.lock = state;
        Ok(())
    }

    /// Write an aim pulse, updating the position on success
    fn drive_aim(&mut self, pulse_us: u16) -> Result<(), Report> {
        self.aim
            .set_pulse_width(pulse_us)
            .map_err(|error| Report::ServoFault {
                channel: Channel::Aim,
                error,
            })?;
        self.aim_position = pulse_us;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Servo that records every pulse written
    #[derive(Default)]
    struct RecordingServo {
        writes: Vec<u16, 16>,
        fail: Option<ServoError>,
    }

    impl ServoDriver for RecordingServo {
        fn set_pulse_width(&mut self, pulse_us: u16) -> Result<(), ServoError> {
            if let Some(error) = self.fail {
                return Err(error);
            }
            self.writes.push(pulse_us).unwrap();
            Ok(())
        }

        fn pulse_width(&self) -> Option<u16> {
            self.writes.last().copied()
        }
    }

    fn launcher() -> Launcher<RecordingServo, RecordingServo> {
        Launcher::new(
            Calibration::DEFAULT,
            RecordingServo::default(),
            RecordingServo::default(),
        )
        .unwrap()
    }

    fn trigger_writes(l: &Launcher<RecordingServo, RecordingServo>) -> &[u16] {
        &l.trigger_servo().writes
    }

    fn aim_writes(l: &Launcher<RecordingServo, RecordingServo>) -> &[u16] {
        &l.aim_servo().writes
    }

    #[test]
    fn test_initial_state() {
        let l = launcher();
        assert_eq!(l.lock_state(), LockState::Open);
        assert_eq!(l.aim_position(), 1340);
        assert_eq!(l.load_phase(), LoadPhase::Idle);
        assert!(trigger_writes(&l).is_empty());
        assert!(aim_writes(&l).is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_calibration() {
        let bad = Calibration {
            step_max: 0,
            ..Calibration::DEFAULT
        };
        let result = Launcher::new(bad, RecordingServo::default(), RecordingServo::default());
        assert!(matches!(result, Err(ConfigError::TooFewSteps)));
    }

    #[test]
    fn test_home_writes_initial_positions() {
        let mut l = launcher();
        l.home().unwrap();
        assert_eq!(trigger_writes(&l), &[1100]);
        assert_eq!(aim_writes(&l), &[1340]);
    }

    #[test]
    fn test_launch_when_open_is_refused() {
        let mut l = launcher();
        assert_eq!(l.launch(), Report::AlreadyOpen);
        assert!(trigger_writes(&l).is_empty());
        assert_eq!(l.lock_state(), LockState::Open);
    }

    #[test]
    fn test_lock_then_launch() {
        let mut l = launcher();
        assert_eq!(l.lock(), Report::Locked);
        assert_eq!(l.lock_state(), LockState::Closed);
        assert_eq!(l.launch(), Report::Launched);
        assert_eq!(l.lock_state(), LockState::Open);
        assert_eq!(trigger_writes(&l), &[1700, 1100]);
    }

    #[test]
    fn test_double_lock() {
        let mut l = launcher();
        assert_eq!(l.lock(), Report::Locked);
        assert_eq!(l.lock(), Report::AlreadyClosed);
        assert_eq!(trigger_writes(&l), &[1700]);
    }

    #[test]
    fn test_load_sequence() {
        let mut l = launcher();
        l.lock();

        assert_eq!(l.load(10_000), Report::LoadStarted { wait_ms: 5000 });
        assert_eq!(l.lock_state(), LockState::Open);
        assert!(l.is_busy());
        assert_eq!(l.load_remaining_ms(12_000), Some(3000));

        // Not yet
        assert_eq!(l.tick(14_999), None);
        assert_eq!(trigger_writes(&l), &[1700, 1100]);

        assert_eq!(l.tick(15_000), Some(Report::Loaded));
        assert_eq!(l.lock_state(), LockState::Closed);
        assert!(!l.is_busy());
        assert_eq!(trigger_writes(&l), &[1700, 1100, 1700]);

        // Finished sequence does not fire again
        assert_eq!(l.tick(20_000), None);
    }

    #[test]
    fn test_load_from_open_rewrites_open() {
        let mut l = launcher();
        l.load(0);
        assert_eq!(trigger_writes(&l), &[1100]);
    }

    #[test]
    fn test_busy_during_load() {
        let mut l = launcher();
        l.load(0);

        assert_eq!(l.launch(), Report::Busy);
        assert_eq!(l.lock(), Report::Busy);
        assert_eq!(l.load(100), Report::Busy);
        assert_eq!(l.aim_down(), Report::Busy);
        assert_eq!(l.aim_up(), Report::Busy);
        assert_eq!(l.aim_micro(1200), Report::Busy);
        assert_eq!(l.aim_step(3), Report::Busy);
        assert_eq!(l.aim_step(99), Report::Busy);

        assert_eq!(trigger_writes(&l), &[1100]);
        assert!(aim_writes(&l).is_empty());
    }

    #[test]
    fn test_aim_up_idempotent() {
        let mut l = launcher();
        assert_eq!(l.aim_up(), Report::AlreadyUp);
        assert_eq!(l.aim_down(), Report::AimedDown);
        assert_eq!(l.aim_up(), Report::AimedUp);
        assert_eq!(l.aim_up(), Report::AlreadyUp);
        assert_eq!(aim_writes(&l), &[1000, 1340]);
    }

    #[test]
    fn test_aim_down_idempotent() {
        let mut l = launcher();
        assert_eq!(l.aim_down(), Report::AimedDown);
        assert_eq!(l.aim_down(), Report::AlreadyDown);
        assert_eq!(aim_writes(&l), &[1000]);
    }

    #[test]
    fn test_aim_micro_valid() {
        let mut l = launcher();
        assert_eq!(l.aim_micro(1200), Report::Aimed { pulse_us: 1200 });
        assert_eq!(l.aim_position(), 1200);
        // Repeat re-issues the write
        assert_eq!(l.aim_micro(1200), Report::Aimed { pulse_us: 1200 });
        assert_eq!(aim_writes(&l), &[1200, 1200]);
    }

    #[test]
    fn test_aim_micro_out_of_range() {
        let mut l = launcher();
        assert_eq!(l.aim_micro(9999), Report::InvalidAimValue(9999));
        assert_eq!(l.aim_micro(0), Report::InvalidAimValue(0));
        assert_eq!(l.aim_position(), 1340);
        assert!(aim_writes(&l).is_empty());
    }

    #[test]
    fn test_aim_step_delegates() {
        let mut l = launcher();
        assert_eq!(l.aim_step(1), Report::Aimed { pulse_us: 1000 });
        assert_eq!(l.aim_step(10), Report::Aimed { pulse_us: 1340 });
        assert_eq!(aim_writes(&l), &[1000, 1340]);
    }

    #[test]
    fn test_aim_step_invalid_single_report() {
        let mut l = launcher();
        assert_eq!(l.aim_step(0), Report::InvalidStepValue(0));
        assert_eq!(l.aim_step(11), Report::InvalidStepValue(11));
        assert!(aim_writes(&l).is_empty());
    }

    #[test]
    fn test_servo_fault_keeps_state() {
        let mut l = Launcher::new(
            Calibration::DEFAULT,
            RecordingServo {
                fail: Some(ServoError::Pwm),
                ..Default::default()
            },
            RecordingServo {
                fail: Some(ServoError::OutOfRange),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(
            l.lock(),
            Report::ServoFault {
                channel: Channel::Trigger,
                error: ServoError::Pwm,
            }
        );
        assert_eq!(l.lock_state(), LockState::Open);

        assert_eq!(
            l.aim_micro(1100),
            Report::ServoFault {
                channel: Channel::Aim,
                error: ServoError::OutOfRange,
            }
        );
        assert_eq!(l.aim_position(), 1340);

        // A load that cannot open never arms
        assert!(matches!(l.load(0), Report::ServoFault { .. }));
        assert!(!l.is_busy());
    }
}
