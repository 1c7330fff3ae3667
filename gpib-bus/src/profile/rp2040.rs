//! RP2040 layouts on the flat GPIO namespace

use super::{gpio_control_lines, gpio_data_lines, BoardId, BoardProfile, HostFamily};

/// RAS Pico layout 1: data on GPIO6-13, control on GPIO14-21
pub const RAS_PICO_L1: BoardProfile = BoardProfile::new(
    BoardId::RasPicoL1,
    "RAS_PICO_L1",
    HostFamily::Rp2040,
    gpio_data_lines([6, 7, 8, 9, 10, 11, 12, 13]),
    gpio_control_lines([14, 15, 16, 17, 18, 19, 20, 21]),
);

/// RAS Pico layout 2: data on GPIO14-21, control on GPIO6-13
pub const RAS_PICO_L2: BoardProfile = BoardProfile::new(
    BoardId::RasPicoL2,
    "RAS_PICO_L2",
    HostFamily::Rp2040,
    gpio_data_lines([14, 15, 16, 17, 18, 19, 20, 21]),
    gpio_control_lines([6, 7, 8, 9, 10, 11, 12, 13]),
);

/// Arduino Nano RP2040 Connect
pub const NANO_RP2040_CONNECT: BoardProfile = BoardProfile::new(
    BoardId::NanoRp2040Connect,
    "NANO_RP2040_CONNECT",
    HostFamily::Rp2040,
    gpio_data_lines([21, 20, 19, 18, 17, 16, 15, 25]),
    gpio_control_lines([27, 28, 29, 12, 13, 4, 6, 7]),
);
