//! Command interpreter
//!
//! Turns one complete input line into at most one launcher operation.
//! Unrecognized lines are dropped without a report so that tooling reading
//! the status stream only ever sees answers to real commands.

use saber_protocol::Command;

use crate::launcher::Launcher;
use crate::report::Report;
use crate::traits::ServoDriver;

/// Parse a line and run the matching launcher operation
///
/// `now_ms` is the current reading of the millisecond clock, used to arm
/// the load deadline.
pub fn execute<T, A>(launcher: &mut Launcher<T, A>, line: &str, now_ms: u32) -> Option<Report>
where
    T: ServoDriver,
    A: ServoDriver,
{
    dispatch(launcher, Command::parse(line), now_ms)
}

/// Run the launcher operation for an already parsed command
pub fn dispatch<T, A>(
    launcher: &mut Launcher<T, A>,
    command: Command,
    now_ms: u32,
) -> Option<Report>
where
    T: ServoDriver,
    A: ServoDriver,
{
    let report = match command {
        Command::Load => launcher.load(now_ms),
        Command::Launch => launcher.launch(),
        Command::Lock => launcher.lock(),
        Command::AimUp => launcher.aim_up(),
        Command::AimDown => launcher.aim_down(),
        Command::AimStep(step) => launcher.aim_step(step),
        Command::AimMicro(value) => launcher.aim_micro(value),
        Command::Unrecognized => return None,
    };
    Some(report)
}
