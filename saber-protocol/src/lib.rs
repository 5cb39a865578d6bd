//! Saber Serial Command Protocol
//!
//! This crate defines the text protocol spoken between a host (terminal,
//! script, ground station) and the launcher controller over UART.
//!
//! # Protocol Overview
//!
//! Every command is a single ASCII line terminated by `\n`:
//! ```text
//! saber:load
//! saber:launch
//! saber:lock
//! saber:aim-up
//! saber:aim-down
//! saber:aim-step:<integer>
//! saber:aim-micro:<integer>
//! ```
//!
//! Tokens are case-sensitive. Leading and trailing whitespace (including a
//! trailing `\r`) is ignored. The controller answers each recognized command
//! with one human-readable status line and stays silent on anything else.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;

pub use command::Command;
pub use line::{Line, LineAccumulator, LineError, MAX_LINE_LEN};
