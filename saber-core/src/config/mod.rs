//! Configuration types
//!
//! Calibration is fixed at build time. The firmware build script generates
//! a [`Calibration`] constant from its TOML file; this module defines the
//! type and its validation.

pub mod calibration;

pub use calibration::*;
