//! MCP23S17 expander layout
//!
//! Port A carries the control byte and port B the data byte, both in
//! natural bit order.

use gpib_hal::PortId::{A, B};

use super::{control_lines, data_lines, BoardId, BoardProfile, HostFamily};

/// AR488 on an MCP23S17 expander
pub const MCP23S17: BoardProfile = BoardProfile::new(
    BoardId::Mcp23s17,
    "MCP23S17",
    HostFamily::Mcp23s17,
    data_lines([(B, 0), (B, 1), (B, 2), (B, 3), (B, 4), (B, 5), (B, 6), (B, 7)]),
    control_lines([(A, 0), (A, 1), (A, 2), (A, 3), (A, 4), (A, 5), (A, 6), (A, 7)]),
);
