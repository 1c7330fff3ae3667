//! RP2040 register file for the GPIB bus layer
//!
//! This crate maps the `gpib-hal` port registers onto the RP2040 GPIO
//! block:
//!
//! - Pin ownership and validation against a board profile
//! - SIO-backed [`gpib_hal::PortRegisters`] with atomic set/clear updates
//! - Bus construction for the board selected at build time

#![no_std]

#[cfg(feature = "board")]
pub mod bus;
pub mod pins;
pub mod sio;

pub use pins::{BusPins, PinError};
pub use sio::Rp2040Ports;
