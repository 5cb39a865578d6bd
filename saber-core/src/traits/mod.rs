//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod servo;

pub use servo::{Channel, ServoDriver, ServoError};
