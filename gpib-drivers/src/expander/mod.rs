//! Port expander implementations

pub mod mcp23s17;

pub use mcp23s17::{Mcp23s17, Mcp23s17Config, Mcp23s17Error, PinChangeFlag};
