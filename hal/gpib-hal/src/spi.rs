//! SPI clocking for serial-attached port controllers
//!
//! Transfers go through `embedded_hal::spi::SpiBus`. This only describes
//! how board setup code must clock the host peripheral before handing it
//! to a driver.

/// Clock modes an MCP23S17 accepts (CPOL and CPHA equal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClockMode {
    /// CPOL=0, CPHA=0
    Mode0,
    /// CPOL=1, CPHA=1
    Mode3,
}

impl ClockMode {
    /// Clock line idles high
    pub const fn idle_high(self) -> bool {
        matches!(self, ClockMode::Mode3)
    }

    /// Data sampled on the second clock edge
    pub const fn second_edge(self) -> bool {
        matches!(self, ClockMode::Mode3)
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    pub mode: ClockMode,
}

impl SpiConfig {
    /// Highest clock the expander supports at 5 V
    pub const MAX_FREQUENCY: u32 = 10_000_000;

    /// Same configuration with the frequency limited to [`Self::MAX_FREQUENCY`]
    pub fn clamped(self) -> Self {
        Self {
            frequency: self.frequency.min(Self::MAX_FREQUENCY),
            ..self
        }
    }
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 2_000_000, // 16 MHz AVR core clock / 8
            mode: ClockMode::Mode0,
        }
    }
}
