//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in saber-core:
//!
//! - Servo drivers (PWM pulse-width output)

#![no_std]
#![deny(unsafe_code)]

pub mod servo;
