//! Logical GPIB lines
//!
//! The control byte layout is fixed for every board:
//!
//! | bit | 7   | 6   | 5   | 4   | 3   | 2    | 1    | 0   |
//! |-----|-----|-----|-----|-----|-----|------|------|-----|
//! |     | ATN | SRQ | REN | EOI | DAV | NRFD | NDAC | IFC |
//!
//! Control state bits are physical levels (0 = LOW, 1 = HIGH). Control
//! direction bits are 0 = input with pull-up, 1 = output. Data byte bit 0
//! is DIO1.

/// IFC (Interface Clear)
pub const IFC: u8 = 1 << 0;
/// NDAC (Not Data Accepted)
pub const NDAC: u8 = 1 << 1;
/// NRFD (Not Ready For Data)
pub const NRFD: u8 = 1 << 2;
/// DAV (Data Valid)
pub const DAV: u8 = 1 << 3;
/// EOI (End Or Identify)
pub const EOI: u8 = 1 << 4;
/// REN (Remote Enable)
pub const REN: u8 = 1 << 5;
/// SRQ (Service Request)
pub const SRQ: u8 = 1 << 6;
/// ATN (Attention)
pub const ATN: u8 = 1 << 7;

/// Handshake lines
pub const HANDSHAKE: u8 = DAV | NRFD | NDAC;
/// Every control line
pub const ALL: u8 = 0xFF;

/// A single control line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ControlLine {
    Ifc = 0,
    Ndac = 1,
    Nrfd = 2,
    Dav = 3,
    Eoi = 4,
    Ren = 5,
    Srq = 6,
    Atn = 7,
}

impl ControlLine {
    /// All lines in control-byte bit order
    pub const ALL: [ControlLine; 8] = [
        ControlLine::Ifc,
        ControlLine::Ndac,
        ControlLine::Nrfd,
        ControlLine::Dav,
        ControlLine::Eoi,
        ControlLine::Ren,
        ControlLine::Srq,
        ControlLine::Atn,
    ];

    /// Bit position in the control byte
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Single-bit mask in the control byte
    pub const fn mask(self) -> u8 {
        1 << self.index()
    }

    /// Line at a control-byte bit position
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Signal name as printed on the connector
    pub fn name(self) -> &'static str {
        match self {
            ControlLine::Ifc => "IFC",
            ControlLine::Ndac => "NDAC",
            ControlLine::Nrfd => "NRFD",
            ControlLine::Dav => "DAV",
            ControlLine::Eoi => "EOI",
            ControlLine::Ren => "REN",
            ControlLine::Srq => "SRQ",
            ControlLine::Atn => "ATN",
        }
    }
}

/// Line mode for a direction change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineMode {
    /// Input with pull-up enabled
    Input,
    /// Driven output, pull-up disabled
    Output,
}

impl LineMode {
    /// Direction bits for `lines` in this mode (1 = output)
    pub const fn direction_bits(self, lines: u8) -> u8 {
        match self {
            LineMode::Input => 0,
            LineMode::Output => lines,
        }
    }
}
