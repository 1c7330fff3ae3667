//! Port register abstractions
//!
//! A host board is modelled as a set of ports, each with four registers
//! that are up to 32 bits wide. Native 8-bit AVR ports only use the low
//! byte; flat GPIO namespaces use [`PortId::Gpio`] banks of 32 pins.

/// Physical port identifier
///
/// Letters follow the AVR and MCP23S17 datasheets. Flat GPIO namespaces
/// (RP2040, ESP32) are split into 32-pin banks: GPIO `n` lives in bank
/// `n / 32`, bit `n % 32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortId {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    J,
    K,
    L,
    /// 32-pin GPIO bank
    Gpio(u8),
}

impl PortId {
    /// Port of a GPIO number in a flat namespace
    pub const fn gpio_bank(gpio: u8) -> Self {
        PortId::Gpio(gpio / 32)
    }

    /// Number of usable bits in this port
    pub const fn width(self) -> u8 {
        match self {
            PortId::Gpio(_) => 32,
            _ => 8,
        }
    }

    /// Compare two ports in a const context
    pub const fn same_as(self, other: PortId) -> bool {
        match (self, other) {
            (PortId::Gpio(a), PortId::Gpio(b)) => a == b,
            (PortId::Gpio(_), _) | (_, PortId::Gpio(_)) => false,
            _ => self.letter_index() == other.letter_index(),
        }
    }

    const fn letter_index(self) -> u8 {
        match self {
            PortId::A => 0,
            PortId::B => 1,
            PortId::C => 2,
            PortId::D => 3,
            PortId::E => 4,
            PortId::F => 5,
            PortId::G => 6,
            PortId::H => 7,
            PortId::J => 8,
            PortId::K => 9,
            PortId::L => 10,
            PortId::Gpio(bank) => 11 + bank,
        }
    }
}

/// Register selector within a port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Data direction: 1 = output, 0 = input
    ///
    /// Hosts whose hardware encodes direction the other way round
    /// translate at their [`PortRegisters`] implementation.
    Direction,
    /// Output latch
    Output,
    /// Sampled pin levels (read-only)
    Input,
    /// Pull-up enable: 1 = enabled
    Pullup,
}

/// How a host enables input pull-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PullupModel {
    /// The output latch doubles as the pull-up enable while a pin is an
    /// input (classic AVR `PORTx`). [`Register::Pullup`] aliases
    /// [`Register::Output`], and an output pin has no pull-up to clear.
    OutputLatch,
    /// Pull-ups are controlled separately from the output latch
    /// (AVR-DX `PINnCTRL`, MCP23S17 `GPPU`, RP2040 pads).
    Independent,
}

/// Apply a masked update to a register value
///
/// Bits set in `mask` take their value from `value`; all other bits keep
/// their value from `current`.
#[inline]
pub const fn masked_update(current: u32, mask: u32, value: u32) -> u32 {
    (current & !mask) | (value & mask)
}

/// Register file of a host board
///
/// Implementations own the physical registers for the lifetime of the bus
/// and perform no locking; callers serialize access.
pub trait PortRegisters {
    /// Error type for register access
    ///
    /// Native register files use `core::convert::Infallible`.
    type Error;

    /// How this host enables pull-ups
    fn pullup_model(&self) -> PullupModel;

    /// Read a register
    fn read(&mut self, port: PortId, reg: Register) -> Result<u32, Self::Error>;

    /// Write a whole register
    fn write(&mut self, port: PortId, reg: Register, value: u32) -> Result<(), Self::Error>;

    /// Change only the bits selected by `mask`
    ///
    /// The default is a read-modify-write. Hosts with atomic set/clear
    /// registers should override it. A zero mask performs no access.
    fn modify(
        &mut self,
        port: PortId,
        reg: Register,
        mask: u32,
        value: u32,
    ) -> Result<(), Self::Error> {
        if mask == 0 {
            return Ok(());
        }
        let current = self.read(port, reg)?;
        self.write(port, reg, masked_update(current, mask, value))
    }
}

impl<T: PortRegisters + ?Sized> PortRegisters for &mut T {
    type Error = T::Error;

    fn pullup_model(&self) -> PullupModel {
        (**self).pullup_model()
    }

    fn read(&mut self, port: PortId, reg: Register) -> Result<u32, Self::Error> {
        (**self).read(port, reg)
    }

    fn write(&mut self, port: PortId, reg: Register, value: u32) -> Result<(), Self::Error> {
        (**self).write(port, reg, value)
    }

    fn modify(
        &mut self,
        port: PortId,
        reg: Register,
        mask: u32,
        value: u32,
    ) -> Result<(), Self::Error> {
        (**self).modify(port, reg, mask, value)
    }
}
