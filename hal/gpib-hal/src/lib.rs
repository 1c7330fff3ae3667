//! GPIB Hardware Abstraction Layer
//!
//! This crate defines the register-level view of a host board that the
//! GPIB bus layer drives. Every supported host, whether it exposes native
//! 8-bit ports, a flat 32-bit GPIO bank or a remote SPI port expander,
//! implements [`PortRegisters`], and the board-agnostic mapping engine in
//! `gpib-bus` works purely in terms of it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Protocol engine (external)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gpib-bus (profiles + mapping engine)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gpib-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ gpib-hal-     │       │ gpib-drivers  │
//! │    rp2040     │       │  (mcp23s17)   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`port::PortRegisters`] - Masked access to direction, output, input
//!   and pull-up registers of a host port
//! - [`spi::SpiConfig`] - Clocking of serial-attached port controllers

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod port;
pub mod spi;

// Re-export key items at crate root for convenience
pub use port::{masked_update, PortId, PortRegisters, PullupModel, Register};
pub use spi::{ClockMode, SpiConfig};
