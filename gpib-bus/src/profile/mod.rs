//! Board profiles
//!
//! Each supported board is a [`BoardProfile`]: a name, the host family and
//! one [`PinMap`] each for the data and control bytes. Data lines are always
//! inverted, control lines are always direct.

pub mod avr;
pub mod esp32;
pub mod expander;
pub mod rp2040;

use gpib_hal::{PortId, PullupModel};

use crate::mapping::{LineMapping, PinMap, Polarity};

/// Microcontroller family hosting the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostFamily {
    /// Classic 8-bit AVR (ATmega)
    Avr,
    /// AVR-DX with per-pin control registers
    AvrDx,
    /// MCP23S17 SPI expander
    Mcp23s17,
    /// RP2040 single-cycle IO block
    Rp2040,
    /// ESP32 family
    Esp32,
}

impl HostFamily {
    /// How this family enables input pull-ups
    pub const fn pullup_model(self) -> PullupModel {
        match self {
            HostFamily::Avr => PullupModel::OutputLatch,
            _ => PullupModel::Independent,
        }
    }
}

/// Identifier of a supported board layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardId {
    Uno,
    Nano,
    Mega2560D,
    Mega2560E1,
    Mega2560E2,
    Mega32u4Micro,
    Mega32u4LeonardoR3,
    Mega644pMcgraw,
    Mega328pbAlt,
    PoeEthernet,
    Mcp23s17,
    RasPicoL1,
    RasPicoL2,
    NanoRp2040Connect,
    Esp32DevKit1,
    Esp32Dev,
    Esp32Lolin32,
    Esp32S2_161,
    Esp32WilhelmR4,
    Esp32WilhelmR5,
}

/// Static description of one board
#[derive(Debug, Clone, Copy)]
pub struct BoardProfile {
    pub id: BoardId,
    pub name: &'static str,
    pub family: HostFamily,
    /// DIO1..DIO8
    pub data: PinMap,
    /// Control byte lines (IFC at bit 0 .. ATN at bit 7)
    pub control: PinMap,
}

impl BoardProfile {
    /// Build a profile, failing const evaluation if the data and control
    /// tables share a physical pin
    pub const fn new(
        id: BoardId,
        name: &'static str,
        family: HostFamily,
        data: PinMap,
        control: PinMap,
    ) -> Self {
        if data.overlaps(&control) {
            panic!("data and control lines share a physical pin");
        }
        Self {
            id,
            name,
            family,
            data,
            control,
        }
    }

    /// Pull-up model of the host
    pub const fn pullup_model(&self) -> PullupModel {
        self.family.pullup_model()
    }
}

const fn table(pins: [(PortId, u8); 8], polarity: Polarity) -> PinMap {
    let mut lines = [LineMapping::direct(PortId::A, 0); 8];
    let mut i = 0;
    while i < 8 {
        lines[i] = LineMapping {
            port: pins[i].0,
            bit: pins[i].1,
            polarity,
        };
        i += 1;
    }
    PinMap::new(lines)
}

const fn gpio_table(pins: [u8; 8], polarity: Polarity) -> PinMap {
    let mut lines = [LineMapping::direct(PortId::A, 0); 8];
    let mut i = 0;
    while i < 8 {
        lines[i] = LineMapping::gpio(pins[i], polarity);
        i += 1;
    }
    PinMap::new(lines)
}

/// Data table from `(port, bit)` pairs, DIO1 first
pub const fn data_lines(pins: [(PortId, u8); 8]) -> PinMap {
    table(pins, Polarity::Inverted)
}

/// Control table from `(port, bit)` pairs, IFC first
pub const fn control_lines(pins: [(PortId, u8); 8]) -> PinMap {
    table(pins, Polarity::Direct)
}

/// Data table from flat GPIO numbers, DIO1 first
pub const fn gpio_data_lines(pins: [u8; 8]) -> PinMap {
    gpio_table(pins, Polarity::Inverted)
}

/// Control table from flat GPIO numbers, IFC first
pub const fn gpio_control_lines(pins: [u8; 8]) -> PinMap {
    gpio_table(pins, Polarity::Direct)
}

/// Every profile in the catalogue
pub const ALL: [&BoardProfile; 20] = [
    &avr::UNO,
    &avr::NANO,
    &avr::MEGA2560_D,
    &avr::MEGA2560_E1,
    &avr::MEGA2560_E2,
    &avr::MEGA32U4_MICRO,
    &avr::MEGA32U4_LEONARDO_R3,
    &avr::MEGA644P_MCGRAW,
    &avr::MEGA328PB_ALT,
    &avr::POE_ETHERNET,
    &expander::MCP23S17,
    &rp2040::RAS_PICO_L1,
    &rp2040::RAS_PICO_L2,
    &rp2040::NANO_RP2040_CONNECT,
    &esp32::DEVKIT1,
    &esp32::ESP32_DEV,
    &esp32::LOLIN32,
    &esp32::S2_161,
    &esp32::WILHELM_R4,
    &esp32::WILHELM_R5,
];

/// Look up a profile by identifier
pub fn find(id: BoardId) -> Option<&'static BoardProfile> {
    ALL.iter().copied().find(|p| p.id == id)
}
