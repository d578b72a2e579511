//! RP2040 services shared by both halves.
#![no_std]

pub mod clock;
pub mod serial;
