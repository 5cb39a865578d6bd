//! Board-agnostic core logic for the launcher firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Servo driver trait
//! - Trigger lock state machine and the timed load sequence
//! - Launcher controller (guards, aim range mapping)
//! - Command interpreter (line to launcher operation)
//! - Status reports
//! - Calibration definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod interpreter;
pub mod launcher;
pub mod report;
pub mod state;
pub mod traits;

pub use launcher::Launcher;
pub use report::Report;
