//! Device drivers for the GPIB bus layer
//!
//! Register files for hosts that are not memory-mapped, built on
//! `embedded-hal` 1.0:
//!
//! - MCP23S17 16-bit SPI port expander
//! - level-shifter enable line (feature `level-shifter`)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod expander;
#[cfg(any(feature = "level-shifter", test))]
pub mod level_shifter;

#[cfg(any(feature = "level-shifter", test))]
pub use level_shifter::LevelShifter;
