//! Bus transceiver enable
//!
//! Boards with level shifters between the host pins and the GPIB connector
//! gate them with one active-high enable line. The line is held beside the
//! bus: shut the shifters off and the host pins are isolated from the
//! connector without touching the port registers.

use embedded_hal::digital::OutputPin;

/// Level-shifter enable line
pub struct LevelShifter<P> {
    pin: P,
    enabled: bool,
}

impl<P: OutputPin> LevelShifter<P> {
    /// Take the enable pin and switch the shifters on
    pub fn new(pin: P) -> Result<Self, P::Error> {
        let mut shifter = Self {
            pin,
            enabled: false,
        };
        shifter.set_enabled(true)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("level shifters on");

        Ok(shifter)
    }

    /// Connect (`true`) or isolate (`false`) the bus
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), P::Error> {
        if enabled {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.enabled = enabled;
        Ok(())
    }

    pub fn enable(&mut self) -> Result<(), P::Error> {
        self.set_enabled(true)
    }

    pub fn disable(&mut self) -> Result<(), P::Error> {
        self.set_enabled(false)
    }

    /// Last level written to the enable line
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Give back the pin, leaving its level as is
    pub fn release(self) -> P {
        self.pin
    }
}
