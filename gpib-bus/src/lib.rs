//! Board-agnostic GPIB physical bus layer
//!
//! This crate turns logical GPIB line operations into masked register
//! updates on whichever host board the build targets:
//!
//! - Logical line layout of the control byte
//! - Pin maps compiled from per-board line tables
//! - Board profile catalogue and build-time board selection
//! - The [`GpibBus`] operations used by the protocol engine
//!
//! Register access goes through [`gpib_hal::PortRegisters`], so the same
//! engine serves native AVR ports, RP2040/ESP32 GPIO banks and the
//! MCP23S17 expander.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bits;
#[cfg(feature = "board")]
pub mod board;
pub mod bus;
pub mod lines;
pub mod mapping;
pub mod profile;

pub use bus::{GpibBus, PortBus};
pub use lines::{ControlLine, LineMode};
pub use mapping::{Fragment, LineMapping, PinMap, Polarity};
pub use profile::{BoardId, BoardProfile, HostFamily};
