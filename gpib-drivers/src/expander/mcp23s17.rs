//! MCP23S17 16-bit SPI port expander
//!
//! Port A carries the GPIB control lines and port B the data lines. The
//! device is used in its power-on register layout (`IOCON.BANK = 0`), so
//! A and B registers sit at consecutive addresses.
//!
//! # SPI Protocol
//!
//! Every register access is one three-byte transaction with chip select
//! held low:
//! - Opcode: `0b0100_AAA_R` (`AAA` hardware address, `R` = 1 for read)
//! - Register address
//! - Data byte (sent on write, clocked in on read)
//!
//! # Direction
//!
//! `IODIR` uses 1 for input. The [`PortRegisters`] implementation flips it
//! so callers always see 1 = output.
//!
//! # Pin change
//!
//! With interrupts enabled on EOI, SRQ and ATN, the INTA output goes low
//! on a change. The interrupt handler only raises a [`PinChangeFlag`];
//! [`Mcp23s17::service_pin_change`] later reads `INTCAPA`, which also
//! clears the interrupt.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use gpib_bus::lines::{ATN, EOI, SRQ};
use gpib_hal::{PortId, PortRegisters, PullupModel, Register, SpiConfig};
use portable_atomic::{AtomicBool, Ordering};

/// MCP23S17 register addresses (`IOCON.BANK = 0`)
pub mod reg {
    /// Port A direction (1 = input)
    pub const IODIRA: u8 = 0x00;
    /// Port B direction (1 = input)
    pub const IODIRB: u8 = 0x01;
    /// Port A interrupt-on-change enable
    pub const GPINTENA: u8 = 0x04;
    /// Port A interrupt compare mode
    pub const INTCONA: u8 = 0x08;
    /// Configuration (shared by both ports)
    pub const IOCON: u8 = 0x0A;
    /// Port A pull-up enable
    pub const GPPUA: u8 = 0x0C;
    /// Port B pull-up enable
    pub const GPPUB: u8 = 0x0D;
    /// Port A interrupt flags
    pub const INTFA: u8 = 0x0E;
    /// Port A levels captured at interrupt
    pub const INTCAPA: u8 = 0x10;
    /// Port A pin levels
    pub const GPIOA: u8 = 0x12;
    /// Port B pin levels
    pub const GPIOB: u8 = 0x13;
    /// Port A output latch
    pub const OLATA: u8 = 0x14;
    /// Port B output latch
    pub const OLATB: u8 = 0x15;
}

/// Write opcode with address 0
pub const OPCODE_WRITE: u8 = 0b0100_0000;
/// Read opcode with address 0
pub const OPCODE_READ: u8 = 0b0100_0001;

/// IOCON.HAEN: honour the hardware address pins
pub const IOCON_HAEN: u8 = 0b0000_1000;

/// Registers reached through [`PortRegisters`]
const MAPPED: [u8; 8] = [
    reg::IODIRA,
    reg::IODIRB,
    reg::OLATA,
    reg::OLATB,
    reg::GPIOA,
    reg::GPIOB,
    reg::GPPUA,
    reg::GPPUB,
];

// The pin change path must never read a register the bus writes or samples
const _: () = {
    let mut i = 0;
    while i < MAPPED.len() {
        assert!(
            MAPPED[i] != reg::INTCAPA,
            "INTCAPA overlaps a register used by the bus"
        );
        i += 1;
    }
};

/// MCP23S17 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mcp23s17Config {
    /// Hardware address (A2..A0 pins, 0-7)
    pub address: u8,
    /// SPI clocking for the host peripheral (mode 0 or 3, up to 10 MHz)
    pub spi: SpiConfig,
    /// Port A lines that raise INTA on change (control byte layout)
    pub interrupt_pins: u8,
}

impl Default for Mcp23s17Config {
    fn default() -> Self {
        Self {
            address: 0,
            spi: SpiConfig::default(),
            interrupt_pins: EOI | SRQ | ATN,
        }
    }
}

impl Mcp23s17Config {
    /// Opcode for this device
    pub fn opcode(&self, read: bool) -> u8 {
        let base = if read { OPCODE_READ } else { OPCODE_WRITE };
        base | (self.address & 0x07) << 1
    }
}

/// MCP23S17 driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mcp23s17Error<S, P> {
    /// SPI transfer failed
    Spi(S),
    /// Chip select pin could not be driven
    ChipSelect(P),
    /// The expander only has ports A and B
    UnmappedPort(PortId),
}

/// Flag raised from the INTA interrupt handler
///
/// Signalling does not touch the SPI bus; the main loop takes the flag
/// and calls [`Mcp23s17::service_pin_change`].
pub struct PinChangeFlag(AtomicBool);

impl PinChangeFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Mark a pin change as pending
    pub fn signal(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clear the flag, returning whether a change was pending
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for PinChangeFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// MCP23S17 driver
pub struct Mcp23s17<SPI, CS> {
    spi: SPI,
    cs: CS,
    config: Mcp23s17Config,
    /// Port A levels from the last serviced pin change
    capture: u8,
}

impl<SPI, CS> Mcp23s17<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Create a driver without touching the device
    pub fn new(spi: SPI, cs: CS, config: Mcp23s17Config) -> Self {
        Self {
            spi,
            cs,
            config,
            capture: 0,
        }
    }

    /// Configure the device
    ///
    /// Enables hardware addressing, selects compare-with-previous
    /// interrupts and enables interrupts on the configured control lines.
    pub fn init(&mut self) -> Result<(), Mcp23s17Error<SPI::Error, CS::Error>> {
        self.cs.set_high().map_err(Mcp23s17Error::ChipSelect)?;
        self.write_register(reg::IOCON, IOCON_HAEN)?;
        self.write_register(reg::INTCONA, 0x00)?;
        self.write_register(reg::GPINTENA, self.config.interrupt_pins)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "MCP23S17 at address {} ready, interrupts {=u8:08b}",
            self.config.address,
            self.config.interrupt_pins
        );

        Ok(())
    }

    pub fn config(&self) -> &Mcp23s17Config {
        &self.config
    }

    /// Read one register
    pub fn read_register(&mut self, register: u8) -> Result<u8, Mcp23s17Error<SPI::Error, CS::Error>> {
        let mut frame = [self.config.opcode(true), register, 0x00];
        self.transaction(&mut frame)?;
        Ok(frame[2])
    }

    /// Write one register
    pub fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Mcp23s17Error<SPI::Error, CS::Error>> {
        let mut frame = [self.config.opcode(false), register, value];
        self.transaction(&mut frame)
    }

    /// Read the levels captured at the last interrupt and clear it
    pub fn service_pin_change(&mut self) -> Result<u8, Mcp23s17Error<SPI::Error, CS::Error>> {
        let captured = self.read_register(reg::INTCAPA)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("MCP23S17 pin change {=u8:08b}", captured);
        self.capture = captured;
        Ok(captured)
    }

    /// Port A levels from the last serviced pin change
    pub fn last_capture(&self) -> u8 {
        self.capture
    }

    /// Give back the bus and chip select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    /// One select/transfer/deselect cycle
    ///
    /// Chip select is released even when the transfer fails.
    fn transaction(&mut self, frame: &mut [u8; 3]) -> Result<(), Mcp23s17Error<SPI::Error, CS::Error>> {
        self.cs.set_low().map_err(Mcp23s17Error::ChipSelect)?;
        let transfer = self
            .spi
            .transfer_in_place(frame)
            .and_then(|()| self.spi.flush())
            .map_err(Mcp23s17Error::Spi);
        let release = self.cs.set_high().map_err(Mcp23s17Error::ChipSelect);
        #[cfg(feature = "defmt")]
        if transfer.is_err() {
            defmt::warn!("MCP23S17 transfer to register {=u8:#04x} failed", frame[1]);
        }
        transfer?;
        release
    }

    fn address(port: PortId, register: Register) -> Result<u8, Mcp23s17Error<SPI::Error, CS::Error>> {
        let offset = match port {
            PortId::A => 0,
            PortId::B => 1,
            other => return Err(Mcp23s17Error::UnmappedPort(other)),
        };
        let base = match register {
            Register::Direction => reg::IODIRA,
            // Latch, so inputs never leak into a read-modify-write
            Register::Output => reg::OLATA,
            Register::Input => reg::GPIOA,
            Register::Pullup => reg::GPPUA,
        };
        Ok(base + offset)
    }
}

impl<SPI, CS> PortRegisters for Mcp23s17<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = Mcp23s17Error<SPI::Error, CS::Error>;

    fn pullup_model(&self) -> PullupModel {
        PullupModel::Independent
    }

    fn read(&mut self, port: PortId, register: Register) -> Result<u32, Self::Error> {
        let value = self.read_register(Self::address(port, register)?)?;
        let value = match register {
            Register::Direction => !value,
            _ => value,
        };
        Ok(value as u32)
    }

    fn write(&mut self, port: PortId, register: Register, value: u32) -> Result<(), Self::Error> {
        let value = value as u8;
        let value = match register {
            Register::Direction => !value,
            _ => value,
        };
        self.write_register(Self::address(port, register)?, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::spi::{ErrorKind, ErrorType};
    use gpib_bus::profile::expander::MCP23S17;
    use gpib_bus::{GpibBus, PortBus};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockSpiError;

    impl embedded_hal::spi::Error for MockSpiError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Simulated MCP23S17 behind an SPI bus
    struct MockSpi {
        registers: [u8; 0x16],
        frames: Vec<[u8; 3]>,
        fail: bool,
    }

    impl MockSpi {
        fn new() -> Self {
            let mut registers = [0u8; 0x16];
            // Power-on: all pins inputs
            registers[reg::IODIRA as usize] = 0xFF;
            registers[reg::IODIRB as usize] = 0xFF;
            Self {
                registers,
                frames: Vec::new(),
                fail: false,
            }
        }

        fn pins(&self, port: usize) -> u8 {
            let dir = self.registers[reg::IODIRA as usize + port];
            let latch = self.registers[reg::OLATA as usize + port];
            let pullup = self.registers[reg::GPPUA as usize + port];
            (latch & !dir) | (pullup & dir)
        }
    }

    impl ErrorType for MockSpi {
        type Error = MockSpiError;
    }

    impl SpiBus for MockSpi {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), MockSpiError> {
            unreachable!("driver only uses transfer_in_place")
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), MockSpiError> {
            unreachable!("driver only uses transfer_in_place")
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), MockSpiError> {
            unreachable!("driver only uses transfer_in_place")
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), MockSpiError> {
            if self.fail {
                return Err(MockSpiError);
            }
            let frame = [words[0], words[1], words[2]];
            self.frames.push(frame);
            let register = words[1] as usize;
            if words[0] & 0x01 != 0 {
                words[2] = match words[1] {
                    reg::GPIOA => self.pins(0),
                    reg::GPIOB => self.pins(1),
                    _ => self.registers[register],
                };
            } else {
                self.registers[register] = words[2];
            }
            Ok(())
        }

        fn flush(&mut self) -> Result<(), MockSpiError> {
            Ok(())
        }
    }

    /// Chip select pin recording its level and select count
    struct MockCs {
        high: bool,
        selects: usize,
    }

    impl MockCs {
        fn new() -> Self {
            Self {
                high: true,
                selects: 0,
            }
        }
    }

    impl embedded_hal::digital::ErrorType for MockCs {
        type Error = Infallible;
    }

    impl OutputPin for MockCs {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            self.selects += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    fn expander() -> Mcp23s17<MockSpi, MockCs> {
        Mcp23s17::new(MockSpi::new(), MockCs::new(), Mcp23s17Config::default())
    }

    #[test]
    fn test_register_round_trip() {
        let mut mcp = expander();
        mcp.write_register(reg::OLATA, 0x3C).unwrap();
        assert_eq!(mcp.read_register(reg::OLATA).unwrap(), 0x3C);
    }

    #[test]
    fn test_frame_layout() {
        let config = Mcp23s17Config {
            address: 5,
            ..Default::default()
        };
        let mut mcp = Mcp23s17::new(MockSpi::new(), MockCs::new(), config);
        mcp.write_register(reg::GPPUB, 0xA5).unwrap();
        mcp.read_register(reg::GPIOA).unwrap();

        let (spi, cs) = mcp.release();
        assert_eq!(spi.frames[0], [0b0100_1010, reg::GPPUB, 0xA5]);
        assert_eq!(spi.frames[1][..2], [0b0100_1011, reg::GPIOA]);
        assert_eq!(cs.selects, 2);
        assert!(cs.high);
    }

    #[test]
    fn test_address_is_three_bits() {
        let config = Mcp23s17Config {
            address: 0x0F,
            ..Default::default()
        };
        assert_eq!(config.opcode(false), 0b0100_1110);
        assert_eq!(config.opcode(true), 0b0100_1111);
    }

    #[test]
    fn test_init_sequence() {
        let mut mcp = expander();
        mcp.init().unwrap();
        let (spi, _) = mcp.release();
        assert_eq!(
            spi.frames,
            [
                [OPCODE_WRITE, reg::IOCON, 0b0000_1000],
                [OPCODE_WRITE, reg::INTCONA, 0x00],
                [OPCODE_WRITE, reg::GPINTENA, 0b1101_0000],
            ]
        );
    }

    #[test]
    fn test_direction_is_inverted_at_boundary() {
        let mut mcp = expander();
        // Power-on IODIR = 0xFF reads back as all inputs
        assert_eq!(mcp.read(PortId::A, Register::Direction).unwrap(), 0x00);

        mcp.write(PortId::B, Register::Direction, 0x0F).unwrap();
        assert_eq!(mcp.read_register(reg::IODIRB).unwrap(), 0xF0);
        assert_eq!(mcp.read(PortId::B, Register::Direction).unwrap(), 0x0F);
    }

    #[test]
    fn test_output_uses_latch() {
        let mut mcp = expander();
        mcp.write(PortId::A, Register::Output, 0x81).unwrap();
        mcp.read(PortId::A, Register::Output).unwrap();
        let (spi, _) = mcp.release();
        assert!(spi.frames.iter().all(|f| f[1] == reg::OLATA));
    }

    #[test]
    fn test_unmapped_port() {
        let mut mcp = expander();
        assert_eq!(
            mcp.read(PortId::C, Register::Input),
            Err(Mcp23s17Error::UnmappedPort(PortId::C))
        );
    }

    #[test]
    fn test_spi_error_releases_chip_select() {
        let mut spi = MockSpi::new();
        spi.fail = true;
        let mut mcp = Mcp23s17::new(spi, MockCs::new(), Mcp23s17Config::default());
        assert_eq!(
            mcp.read_register(reg::GPIOB),
            Err(Mcp23s17Error::Spi(MockSpiError))
        );
        let (_, cs) = mcp.release();
        assert!(cs.high);
        assert_eq!(cs.selects, 1);
    }

    #[test]
    fn test_pin_change_reads_capture_only() {
        let mut spi = MockSpi::new();
        spi.registers[reg::INTCAPA as usize] = 0b0110_0000;
        let mut mcp = Mcp23s17::new(spi, MockCs::new(), Mcp23s17Config::default());
        assert_eq!(mcp.last_capture(), 0);

        assert_eq!(mcp.service_pin_change().unwrap(), 0b0110_0000);
        assert_eq!(mcp.last_capture(), 0b0110_0000);

        let (spi, _) = mcp.release();
        assert_eq!(spi.frames.len(), 1);
        assert_eq!(spi.frames[0][1], reg::INTCAPA);
    }

    #[test]
    fn test_pin_change_flag() {
        static FLAG: PinChangeFlag = PinChangeFlag::new();
        assert!(!FLAG.take());
        FLAG.signal();
        assert!(FLAG.is_pending());
        assert!(FLAG.take());
        assert!(!FLAG.is_pending());
    }

    #[test]
    fn test_bus_over_expander() {
        let mut mcp = expander();
        mcp.init().unwrap();
        let mut bus = PortBus::new(mcp, &MCP23S17);

        for value in [0x00, 0xFF, 0x55, 0xAA, 0x81, 0x18, 0x3C] {
            bus.drive_data_bus(value).unwrap();
            assert_eq!(bus.read_data_bus().unwrap(), value);
        }

        bus.prepare_data_bus_for_input().unwrap();
        bus.set_control_direction(0xFF, 0xFF).unwrap();
        bus.set_control_state(0x35, 0xFF).unwrap();
        bus.set_control_state(0x80, 0x80).unwrap();
        assert!(bus.pin_state(7).unwrap());
        assert!(!bus.pin_state(1).unwrap());
        assert!(!bus.pin_state(8).unwrap());

        let (spi, _) = bus.release().release();
        assert_eq!(spi.registers[reg::IODIRB as usize], 0xFF);
        assert_eq!(spi.registers[reg::GPPUB as usize], 0xFF);
        assert_eq!(spi.registers[reg::IODIRA as usize], 0x00);
        assert_eq!(spi.registers[reg::GPPUA as usize], 0x00);
        assert_eq!(spi.registers[reg::OLATA as usize], 0xB5);
    }
}
