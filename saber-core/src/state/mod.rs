//! Trigger state
//!
//! The lock servo is modelled as an explicit two-state machine. The load
//! sequence is a separate timed phase layered on top of it.

pub mod load;
pub mod lock;

pub use load::{arm_stamp, elapsed_stamp, LoadPhase};
pub use lock::{LockState, TriggerAction};
