//! Simulated register file
//!
//! [`SimPorts`] behaves like a host with ports A-L and two 32-pin GPIO
//! banks. Pin levels are derived from the registers: an output pin reads
//! back its latch, an input pin reads high when its pull-up is enabled and
//! no other device holds it low.

use crate::port::{PortId, PortRegisters, PullupModel, Register};

const SLOTS: usize = 13;

/// Error from the simulated register file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimError {
    /// Port not present in the simulation
    UnknownPort(PortId),
}

#[derive(Debug, Clone, Copy, Default)]
struct SimPort {
    direction: u32,
    output: u32,
    pullup: u32,
    held_low: u32,
}

/// Simulated host ports
#[derive(Debug, Clone)]
pub struct SimPorts {
    model: PullupModel,
    ports: [SimPort; SLOTS],
    accesses: usize,
}

impl SimPorts {
    /// Create a register file with every register cleared
    pub fn new(model: PullupModel) -> Self {
        Self {
            model,
            ports: [SimPort::default(); SLOTS],
            accesses: 0,
        }
    }

    fn slot(port: PortId) -> Result<usize, SimError> {
        let slot = match port {
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
            PortId::Gpio(0) => 11,
            PortId::Gpio(1) => 12,
            PortId::Gpio(_) => return Err(SimError::UnknownPort(port)),
        };
        Ok(slot)
    }

    fn width_mask(port: PortId) -> u32 {
        match port.width() {
            32 => u32::MAX,
            bits => (1u32 << bits) - 1,
        }
    }

    /// Inspect a register without counting an access
    ///
    /// `Input` returns the derived pin levels.
    pub fn peek(&self, port: PortId, reg: Register) -> u32 {
        let Ok(slot) = Self::slot(port) else {
            return 0;
        };
        let p = &self.ports[slot];
        let pullup = match self.model {
            PullupModel::OutputLatch => p.output,
            PullupModel::Independent => p.pullup,
        };
        match reg {
            Register::Direction => p.direction,
            Register::Output => p.output,
            Register::Pullup => pullup,
            Register::Input => {
                let driven = p.direction & p.output;
                let pulled = !p.direction & pullup & !p.held_low;
                (driven | pulled) & Self::width_mask(port)
            }
        }
    }

    /// Set a register without counting an access
    pub fn poke(&mut self, port: PortId, reg: Register, value: u32) {
        if let Ok(slot) = Self::slot(port) {
            self.store(slot, reg, value & Self::width_mask(port));
        }
    }

    /// Hold input pins low from outside, as another bus device would
    pub fn hold_low(&mut self, port: PortId, mask: u32) {
        if let Ok(slot) = Self::slot(port) {
            self.ports[slot].held_low = mask;
        }
    }

    /// Level of a single pin
    pub fn level(&self, port: PortId, bit: u8) -> bool {
        self.peek(port, Register::Input) & (1 << bit) != 0
    }

    /// Number of register reads and writes performed through the trait
    pub fn accesses(&self) -> usize {
        self.accesses
    }

    /// Reset the access counter
    pub fn reset_accesses(&mut self) {
        self.accesses = 0;
    }

    fn store(&mut self, slot: usize, reg: Register, value: u32) {
        let p = &mut self.ports[slot];
        match reg {
            Register::Direction => p.direction = value,
            Register::Output => p.output = value,
            Register::Pullup => match self.model {
                PullupModel::OutputLatch => p.output = value,
                PullupModel::Independent => p.pullup = value,
            },
            // Pin levels are read-only
            Register::Input => {}
        }
    }
}

impl PortRegisters for SimPorts {
    type Error = SimError;

    fn pullup_model(&self) -> PullupModel {
        self.model
    }

    fn read(&mut self, port: PortId, reg: Register) -> Result<u32, Self::Error> {
        Self::slot(port)?;
        self.accesses += 1;
        Ok(self.peek(port, reg))
    }

    fn write(&mut self, port: PortId, reg: Register, value: u32) -> Result<(), Self::Error> {
        let slot = Self::slot(port)?;
        self.accesses += 1;
        self.store(slot, reg, value & Self::width_mask(port));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_reads_back_latch() {
        let mut sim = SimPorts::new(PullupModel::Independent);
        sim.write(PortId::C, Register::Direction, 0xFF).unwrap();
        sim.write(PortId::C, Register::Output, 0x5A).unwrap();
        assert_eq!(sim.read(PortId::C, Register::Input).unwrap(), 0x5A);
    }

    #[test]
    fn test_input_with_pullup_reads_high() {
        let mut sim = SimPorts::new(PullupModel::Independent);
        sim.write(PortId::D, Register::Pullup, 0x0F).unwrap();
        assert_eq!(sim.read(PortId::D, Register::Input).unwrap(), 0x0F);

        sim.hold_low(PortId::D, 0x01);
        assert_eq!(sim.read(PortId::D, Register::Input).unwrap(), 0x0E);
    }

    #[test]
    fn test_output_latch_aliases_pullup() {
        let mut sim = SimPorts::new(PullupModel::OutputLatch);
        sim.write(PortId::B, Register::Pullup, 0x30).unwrap();
        assert_eq!(sim.peek(PortId::B, Register::Output), 0x30);
    }

    #[test]
    fn test_narrow_port_truncates() {
        let mut sim = SimPorts::new(PullupModel::OutputLatch);
        sim.write(PortId::A, Register::Output, 0x1FF).unwrap();
        assert_eq!(sim.peek(PortId::A, Register::Output), 0xFF);
    }

    #[test]
    fn test_access_counting() {
        let mut sim = SimPorts::new(PullupModel::Independent);
        sim.modify(PortId::Gpio(0), Register::Output, 0, 0).unwrap();
        assert_eq!(sim.accesses(), 0);

        sim.modify(PortId::Gpio(0), Register::Output, 0x10, 0x10).unwrap();
        assert_eq!(sim.accesses(), 2);
        assert_eq!(sim.peek(PortId::Gpio(0), Register::Output), 0x10);
    }

    #[test]
    fn test_unknown_bank() {
        let mut sim = SimPorts::new(PullupModel::Independent);
        assert_eq!(
            sim.read(PortId::Gpio(2), Register::Input),
            Err(SimError::UnknownPort(PortId::Gpio(2)))
        );
    }
}
