//! Trigger lock state machine
//!
//! The lock state is the last commanded trigger position. There is no
//! feedback sensor, so it is never read back from hardware.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trigger lock states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LockState {
    /// Trigger released, arm free. Matches the servo's power-on position.
    #[default]
    Open,
    /// Trigger engaged, arm held
    Closed,
}

/// Guarded trigger actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerAction {
    /// Open the trigger (launch)
    Release,
    /// Close the trigger (lock)
    Engage,
}

impl LockState {
    /// Next state for a guarded action
    ///
    /// Returns `None` when the action would be redundant: releasing an
    /// open trigger or engaging a closed one.
    pub fn transition(self, action: TriggerAction) -> Option<Self> {
        use LockState::*;
        use TriggerAction::*;

        match (self, action) {
            (Closed, Release) => Some(Open),
            (Open, Engage) => Some(Closed),
            (Open, Release) | (Closed, Engage) => None,
        }
    }
}
