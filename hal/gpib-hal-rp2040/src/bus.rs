//! Bus for the board selected at build time

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;
use gpib_bus::board::ACTIVE;
use gpib_bus::{HostFamily, PortBus};

use crate::pins::{BusPins, PinError};
use crate::sio::Rp2040Ports;

const _: () = assert!(
    matches!(ACTIVE.family, HostFamily::Rp2040),
    "gpib-hal-rp2040 needs an RP2040 board feature"
);

/// Claim the bus pins, initialise them and bind the active profile
///
/// Blocks for the 200 ms settle time of [`Rp2040Ports::init`].
pub fn active_bus(
    pins: impl IntoIterator<Item = Peri<'static, AnyPin>>,
) -> Result<PortBus<Rp2040Ports>, PinError> {
    let pins = BusPins::claim(pins, ACTIVE)?;
    let mut ports = Rp2040Ports::new(pins);
    ports.init();
    Ok(PortBus::active(ports))
}
