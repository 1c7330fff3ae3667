//! SIO-backed register file
//!
//! GPIO bank 0 is driven through the single-cycle IO block. Masked
//! updates of direction and output use the `SET`/`CLR` aliases, so each
//! one is two stores and never a read-modify-write. Pull-ups live in the
//! pad control registers, one per pin.
//!
//! Every access is confined to the pins in [`BusPins`]; other ports read
//! as zero and ignore writes.

use core::convert::Infallible;

use embassy_rp::pac;
use embassy_time::{block_for, Duration};
use gpib_hal::{PortId, PortRegisters, PullupModel, Register};

use crate::pins::BusPins;

/// Time for the lines to settle after the pull-ups come on
const SETTLE: Duration = Duration::from_millis(200);

const BANK: usize = 0;

/// RP2040 GPIO bank 0 as a [`PortRegisters`] register file
pub struct Rp2040Ports {
    pins: BusPins,
}

impl Rp2040Ports {
    pub fn new(pins: BusPins) -> Self {
        Self { pins }
    }

    /// Route the bus pins to SIO as inputs with pull-ups and let them
    /// settle
    ///
    /// Blocks for 200 ms.
    pub fn init(&mut self) {
        let mask = self.pins.mask();
        pac::SIO.gpio_oe(BANK).value_clr().write_value(mask);
        for gpio in self.pins.gpios() {
            let n = gpio as usize;
            pac::PADS_BANK0.gpio(n).modify(|w| {
                w.set_ie(true);
                w.set_od(false);
                w.set_pue(true);
                w.set_pde(false);
            });
            pac::IO_BANK0
                .gpio(n)
                .ctrl()
                .write(|w| w.set_funcsel(pac::io::vals::Gpio0ctrlFuncsel::SIO_0 as _));
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("GPIB pins {=u32:#010x} on SIO, settling", mask);

        block_for(SETTLE);
    }

    /// Give back the pins
    pub fn release(self) -> BusPins {
        self.pins
    }

    fn owned(&self, port: PortId) -> u32 {
        match port {
            PortId::Gpio(0) => self.pins.mask(),
            _ => 0,
        }
    }

    fn pullups(&self) -> u32 {
        self.pins
            .gpios()
            .filter(|&gpio| pac::PADS_BANK0.gpio(gpio as usize).read().pue())
            .fold(0, |acc, gpio| acc | 1 << gpio)
    }
}

impl PortRegisters for Rp2040Ports {
    type Error = Infallible;

    fn pullup_model(&self) -> PullupModel {
        PullupModel::Independent
    }

    fn read(&mut self, port: PortId, reg: Register) -> Result<u32, Infallible> {
        let owned = self.owned(port);
        if owned == 0 {
            return Ok(0);
        }
        let value = match reg {
            Register::Direction => pac::SIO.gpio_oe(BANK).value().read(),
            Register::Output => pac::SIO.gpio_out(BANK).value().read(),
            Register::Input => pac::SIO.gpio_in(BANK).read(),
            Register::Pullup => self.pullups(),
        };
        Ok(value & owned)
    }

    fn write(&mut self, port: PortId, reg: Register, value: u32) -> Result<(), Infallible> {
        self.modify(port, reg, u32::MAX, value)
    }

    fn modify(&mut self, port: PortId, reg: Register, mask: u32, value: u32) -> Result<(), Infallible> {
        let mask = mask & self.owned(port);
        if mask == 0 {
            return Ok(());
        }
        let set = value & mask;
        let clear = !value & mask;
        match reg {
            Register::Direction => {
                let oe = pac::SIO.gpio_oe(BANK);
                oe.value_set().write_value(set);
                oe.value_clr().write_value(clear);
            }
            Register::Output => {
                let out = pac::SIO.gpio_out(BANK);
                out.value_set().write_value(set);
                out.value_clr().write_value(clear);
            }
            Register::Pullup => {
                for gpio in self.pins.gpios().filter(|&g| mask & 1 << g != 0) {
                    pac::PADS_BANK0.gpio(gpio as usize).modify(|w| {
                        w.set_pue(set & 1 << gpio != 0);
                        w.set_pde(false);
                    });
                }
            }
            // Pin levels are read-only
            Register::Input => {}
        }
        Ok(())
    }
}
