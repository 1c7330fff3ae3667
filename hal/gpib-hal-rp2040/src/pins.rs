//! Bus pin ownership
//!
//! The GPIB lines of an RP2040 board are fixed by its profile. [`BusPins`]
//! holds the matching pin peripherals so nothing else in the firmware can
//! reconfigure them while the bus is live.

use embassy_rp::gpio::{AnyPin, Pin};
use embassy_rp::Peri;
use gpib_bus::BoardProfile;
use gpib_hal::PortId;
use heapless::Vec;

/// Number of user GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Error when claiming the bus pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin supplied twice
    AlreadyTaken(u8),
    /// Pin is not a GPIB line on this board
    NotOnBus(u8),
    /// GPIB line with no pin supplied
    Missing(u8),
    /// Profile uses pins outside GPIO bank 0
    UnsupportedBoard,
}

/// GPIO mask of every GPIB line in a profile
pub fn profile_mask(profile: &BoardProfile) -> Result<u32, PinError> {
    let mut mask = 0;
    for fragment in profile
        .data
        .port_masks()
        .iter()
        .chain(profile.control.port_masks().iter())
    {
        if fragment.port != PortId::Gpio(0) {
            return Err(PinError::UnsupportedBoard);
        }
        mask |= fragment.mask;
    }
    if mask >> GPIO_COUNT != 0 {
        return Err(PinError::InvalidPin(31 - mask.leading_zeros() as u8));
    }
    Ok(mask)
}

/// Add one pin to `claimed`, rejecting repeats and pins outside `expected`
fn claim_pin(claimed: &mut u32, gpio: u8, expected: u32) -> Result<(), PinError> {
    if gpio >= GPIO_COUNT {
        return Err(PinError::InvalidPin(gpio));
    }
    let bit = 1 << gpio;
    if *claimed & bit != 0 {
        return Err(PinError::AlreadyTaken(gpio));
    }
    if expected & bit == 0 {
        return Err(PinError::NotOnBus(gpio));
    }
    *claimed |= bit;
    Ok(())
}

/// Check that `gpios` is exactly the set in `expected`
pub fn check_claim(gpios: impl IntoIterator<Item = u8>, expected: u32) -> Result<u32, PinError> {
    let mut claimed = 0u32;
    for gpio in gpios {
        claim_pin(&mut claimed, gpio, expected)?;
    }
    check_complete(claimed, expected)
}

fn check_complete(claimed: u32, expected: u32) -> Result<u32, PinError> {
    let missing = expected & !claimed;
    if missing != 0 {
        return Err(PinError::Missing(missing.trailing_zeros() as u8));
    }
    Ok(claimed)
}

/// Pins of the GPIB lines, owned for the lifetime of the bus
pub struct BusPins {
    pins: Vec<Peri<'static, AnyPin>, 16>,
    mask: u32,
}

impl BusPins {
    /// Take ownership of the sixteen GPIB pins of `profile`
    ///
    /// Order does not matter, but every line must be present exactly once.
    pub fn claim(
        pins: impl IntoIterator<Item = Peri<'static, AnyPin>>,
        profile: &BoardProfile,
    ) -> Result<Self, PinError> {
        let expected = profile_mask(profile)?;
        let mut held = Vec::new();
        let mut mask = 0;
        for pin in pins {
            let gpio = pin.pin();
            claim_pin(&mut mask, gpio, expected)?;
            // Sixteen distinct bus pins at most, so a full vector means a repeat
            held.push(pin).map_err(|_| PinError::AlreadyTaken(gpio))?;
        }
        let mask = check_complete(mask, expected)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("GPIB pins claimed for {}: {=u32:#010x}", profile.name, mask);

        Ok(Self { pins: held, mask })
    }

    /// GPIO mask of the owned pins
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// GPIO numbers of the owned pins
    pub fn gpios(&self) -> impl Iterator<Item = u8> + '_ {
        self.pins.iter().map(|p| p.pin())
    }

    /// Give the pins back
    pub fn release(self) -> Vec<Peri<'static, AnyPin>, 16> {
        self.pins
    }
}
