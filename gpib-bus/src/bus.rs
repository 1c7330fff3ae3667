//! Bus operations
//!
//! [`GpibBus`] is the interface the protocol engine drives. [`PortBus`]
//! implements it for any [`PortRegisters`] register file by applying the
//! pin maps of a [`BoardProfile`].

use gpib_hal::{PortRegisters, PullupModel, Register};

use crate::lines::LineMode;
use crate::mapping::PinMap;
use crate::profile::BoardProfile;

/// Physical GPIB bus operations
///
/// Callers serialize access; implementations perform no locking.
pub trait GpibBus {
    /// Error type of the underlying register access
    type Error;

    /// Make all data lines inputs with pull-ups
    fn prepare_data_bus_for_input(&mut self) -> Result<(), Self::Error>;

    /// Sample the data lines as a logical byte
    ///
    /// Does not change line direction.
    fn read_data_bus(&mut self) -> Result<u8, Self::Error>;

    /// Drive a logical byte onto the data lines
    fn drive_data_bus(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Set the level of the control lines in `mask` to the matching bits
    /// of `bits` (1 = HIGH)
    fn set_control_state(&mut self, bits: u8, mask: u8) -> Result<(), Self::Error>;

    /// Set the direction of the control lines in `mask` (1 = output)
    ///
    /// Inputs get their pull-up enabled and outputs get it disabled in the
    /// same call.
    fn set_control_direction(&mut self, bits: u8, mask: u8) -> Result<(), Self::Error>;

    /// Put every control line in `lines` into `mode`
    fn set_control_mode(&mut self, lines: u8, mode: LineMode) -> Result<(), Self::Error> {
        self.set_control_direction(mode.direction_bits(lines), lines)
    }

    /// Level of the control line at bit `pin` of the control byte
    ///
    /// Returns `false` for `pin > 7`.
    fn pin_state(&mut self, pin: u8) -> Result<bool, Self::Error>;
}

/// GPIB bus on a board's register file
pub struct PortBus<R> {
    registers: R,
    profile: &'static BoardProfile,
}

impl<R: PortRegisters> PortBus<R> {
    /// Bind a register file to a board profile
    pub fn new(registers: R, profile: &'static BoardProfile) -> Self {
        #[cfg(feature = "defmt")]
        defmt::debug!("GPIB bus on {}", profile.name);
        Self { registers, profile }
    }

    /// Bind a register file to the board selected at build time
    #[cfg(feature = "board")]
    pub fn active(registers: R) -> Self {
        Self::new(registers, crate::board::ACTIVE)
    }

    /// Board profile in use
    pub fn profile(&self) -> &'static BoardProfile {
        self.profile
    }

    pub fn registers(&self) -> &R {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.registers
    }

    /// Give back the register file
    pub fn release(self) -> R {
        self.registers
    }

    fn write_levels(&mut self, map: &PinMap, bits: u8, mask: u8) -> Result<(), R::Error> {
        for fragment in map.scatter_levels(bits, mask) {
            self.registers
                .modify(fragment.port, Register::Output, fragment.mask, fragment.value)?;
        }
        Ok(())
    }

    /// Change direction with the paired pull-up update
    ///
    /// With independent pull-ups, lines turning into inputs get their
    /// pull-up before the direction flips and outputs lose it afterwards,
    /// so no line floats. With the output latch as pull-up enable, the
    /// latch of new inputs is set once they are inputs, so it never
    /// drives the line.
    ///
    /// Clearing output pull-ups after the switch, not before it, departs
    /// from the RP2040 sequence of the AR488 firmware.
    fn write_direction(&mut self, map: &PinMap, bits: u8, mask: u8) -> Result<(), R::Error> {
        let inputs = !bits & mask;
        let outputs = bits & mask;
        let model = self.registers.pullup_model();

        if model == PullupModel::Independent {
            self.write_pullups(map, inputs, true)?;
        }
        for fragment in map.scatter(bits, mask) {
            self.registers
                .modify(fragment.port, Register::Direction, fragment.mask, fragment.value)?;
        }
        match model {
            PullupModel::Independent => self.write_pullups(map, outputs, false),
            PullupModel::OutputLatch => self.write_pullups(map, inputs, true),
        }
    }

    fn write_pullups(&mut self, map: &PinMap, lines: u8, enable: bool) -> Result<(), R::Error> {
        let bits = if enable { 0xFF } else { 0x00 };
        for fragment in map.scatter(bits, lines) {
            self.registers
                .modify(fragment.port, Register::Pullup, fragment.mask, fragment.value)?;
        }
        Ok(())
    }
}

impl<R: PortRegisters> GpibBus for PortBus<R> {
    type Error = R::Error;

    fn prepare_data_bus_for_input(&mut self) -> Result<(), Self::Error> {
        let profile = self.profile;
        self.write_direction(&profile.data, 0x00, 0xFF)
    }

    fn read_data_bus(&mut self) -> Result<u8, Self::Error> {
        let profile = self.profile;
        profile
            .data
            .gather_levels(|port| self.registers.read(port, Register::Input))
    }

    fn drive_data_bus(&mut self, value: u8) -> Result<(), Self::Error> {
        let profile = self.profile;
        // Levels first so the lines come up with the right value
        self.write_levels(&profile.data, value, 0xFF)?;
        self.write_direction(&profile.data, 0xFF, 0xFF)
    }

    fn set_control_state(&mut self, bits: u8, mask: u8) -> Result<(), Self::Error> {
        let profile = self.profile;
        self.write_levels(&profile.control, bits, mask)
    }

    fn set_control_direction(&mut self, bits: u8, mask: u8) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("control direction {=u8:08b} mask {=u8:08b}", bits, mask);
        let profile = self.profile;
        self.write_direction(&profile.control, bits, mask)
    }

    fn pin_state(&mut self, pin: u8) -> Result<bool, Self::Error> {
        let Some(line) = self.profile.control.line(pin) else {
            return Ok(false);
        };
        let levels = self.registers.read(line.port, Register::Input)?;
        Ok(levels & line.port_mask() != 0)
    }
}
