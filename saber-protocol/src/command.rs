//! Command grammar
//!
//! Maps one trimmed text line to exactly one [`Command`]. Matching is
//! ordered: exact tokens first, then the two parameterized prefixes.
//! Anything else is [`Command::Unrecognized`].

/// Exact token: open the trigger, wait, then lock it again
pub const TOKEN_LOAD: &str = "saber:load";
/// Exact token: release the trigger
pub const TOKEN_LAUNCH: &str = "saber:launch";
/// Exact token: close the trigger
pub const TOKEN_LOCK: &str = "saber:lock";
/// Exact token: aim to the upper travel limit
pub const TOKEN_AIM_UP: &str = "saber:aim-up";
/// Exact token: aim to the lower travel limit
pub const TOKEN_AIM_DOWN: &str = "saber:aim-down";
/// Prefix token: absolute aim in pulse-width microseconds
pub const PREFIX_AIM_MICRO: &str = "saber:aim-micro:";
/// Prefix token: aim to one of the discrete stops
pub const PREFIX_AIM_STEP: &str = "saber:aim-step:";

/// A decoded command line
///
/// Parameters are carried unvalidated. Range checks belong to the
/// launcher, which knows the calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `saber:load`
    Load,
    /// `saber:launch`
    Launch,
    /// `saber:lock`
    Lock,
    /// `saber:aim-up`
    AimUp,
    /// `saber:aim-down`
    AimDown,
    /// `saber:aim-step:<n>`
    AimStep(i32),
    /// `saber:aim-micro:<v>`
    AimMicro(i32),
    /// Anything that does not match the grammar
    Unrecognized,
}

impl Command {
    /// Parse a line into a command
    ///
    /// Total: every input maps to exactly one variant. A parameter that is
    /// not a valid integer becomes `0`.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        match line {
            TOKEN_LOAD => return Command::Load,
            TOKEN_LAUNCH => return Command::Launch,
            TOKEN_LOCK => return Command::Lock,
            TOKEN_AIM_UP => return Command::AimUp,
            TOKEN_AIM_DOWN => return Command::AimDown,
            _ => {}
        }

        if let Some(rest) = line.strip_prefix(PREFIX_AIM_MICRO) {
            return Command::AimMicro(parse_param(rest));
        }
        if let Some(rest) = line.strip_prefix(PREFIX_AIM_STEP) {
            return Command::AimStep(parse_param(rest));
        }

        Command::Unrecognized
    }
}

/// Integer parameter, or 0 when malformed or out of `i32` range
fn parse_param(text: &str) -> i32 {
    text.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_tokens() {
        assert_eq!(Command::parse("saber:load"), Command::Load);
        assert_eq!(Command::parse("saber:launch"), Command::Launch);
        assert_eq!(Command::parse("saber:lock"), Command::Lock);
        assert_eq!(Command::parse("saber:aim-up"), Command::AimUp);
        assert_eq!(Command::parse("saber:aim-down"), Command::AimDown);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(Command::parse("  saber:lock\r"), Command::Lock);
        assert_eq!(Command::parse("\tsaber:aim-step:3 \r\n"), Command::AimStep(3));
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert_eq!(Command::parse("SABER:LOAD"), Command::Unrecognized);
        assert_eq!(Command::parse("saber:Launch"), Command::Unrecognized);
    }

    #[test]
    fn test_exact_tokens_reject_suffix() {
        assert_eq!(Command::parse("saber:aim-upx"), Command::Unrecognized);
        assert_eq!(Command::parse("saber:load now"), Command::Unrecognized);
    }

    #[test]
    fn test_aim_micro_parameter() {
        assert_eq!(Command::parse("saber:aim-micro:1200"), Command::AimMicro(1200));
        assert_eq!(Command::parse("saber:aim-micro:-5"), Command::AimMicro(-5));
    }

    #[test]
    fn test_aim_step_parameter() {
        assert_eq!(Command::parse("saber:aim-step:1"), Command::AimStep(1));
        assert_eq!(Command::parse("saber:aim-step:10"), Command::AimStep(10));
    }

    #[test]
    fn test_malformed_parameter_is_zero() {
        assert_eq!(Command::parse("saber:aim-micro:abc"), Command::AimMicro(0));
        assert_eq!(Command::parse("saber:aim-step:"), Command::AimStep(0));
        assert_eq!(Command::parse("saber:aim-step:4x"), Command::AimStep(0));
        assert_eq!(
            Command::parse("saber:aim-micro:99999999999"),
            Command::AimMicro(0)
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(Command::parse("garbage:nonsense"), Command::Unrecognized);
        assert_eq!(Command::parse(""), Command::Unrecognized);
        assert_eq!(Command::parse("saber:aim-micro"), Command::Unrecognized);
    }
}
