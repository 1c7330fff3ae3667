//! Native AVR layouts
//!
//! Pin assignments follow the AR488 published wiring for each board.

use gpib_hal::PortId::{A, B, C, D, E, F, G, H, L};

use super::{control_lines, data_lines, BoardId, BoardProfile, HostFamily};

/// Arduino Uno (ATmega328P)
pub const UNO: BoardProfile = BoardProfile::new(
    BoardId::Uno,
    "UNO",
    HostFamily::Avr,
    data_lines([(C, 0), (C, 1), (C, 2), (C, 3), (C, 4), (C, 5), (D, 4), (D, 5)]),
    control_lines([(B, 0), (B, 1), (B, 2), (B, 3), (B, 4), (D, 3), (D, 2), (D, 7)]),
);

/// Arduino Nano, same wiring as the Uno
pub const NANO: BoardProfile = BoardProfile::new(
    BoardId::Nano,
    "NANO",
    HostFamily::Avr,
    UNO.data,
    UNO.control,
);

/// Mega 2560, data on PORTF
pub const MEGA2560_D: BoardProfile = BoardProfile::new(
    BoardId::Mega2560D,
    "MEGA2560_D",
    HostFamily::Avr,
    data_lines([(F, 0), (F, 1), (F, 2), (F, 3), (F, 4), (F, 5), (F, 6), (F, 7)]),
    control_lines([(H, 0), (H, 1), (H, 3), (H, 4), (H, 5), (H, 6), (B, 4), (B, 5)]),
);

/// Mega 2560, odd pins of the end header
pub const MEGA2560_E1: BoardProfile = BoardProfile::new(
    BoardId::Mega2560E1,
    "MEGA2560_E1",
    HostFamily::Avr,
    data_lines([(C, 7), (C, 5), (C, 3), (C, 1), (A, 0), (A, 2), (A, 4), (A, 6)]),
    control_lines([(L, 1), (L, 3), (L, 5), (L, 7), (G, 1), (D, 7), (B, 3), (B, 1)]),
);

/// Mega 2560, even pins of the end header
pub const MEGA2560_E2: BoardProfile = BoardProfile::new(
    BoardId::Mega2560E2,
    "MEGA2560_E2",
    HostFamily::Avr,
    data_lines([(C, 0), (C, 2), (C, 4), (C, 6), (A, 7), (A, 5), (A, 3), (A, 1)]),
    control_lines([(L, 0), (L, 2), (L, 4), (L, 6), (G, 0), (G, 2), (B, 2), (B, 0)]),
);

/// Micro (ATmega32u4)
pub const MEGA32U4_MICRO: BoardProfile = BoardProfile::new(
    BoardId::Mega32u4Micro,
    "MEGA32U4_MICRO",
    HostFamily::Avr,
    data_lines([(D, 0), (B, 1), (B, 2), (B, 3), (B, 4), (B, 5), (B, 6), (D, 7)]),
    control_lines([(D, 4), (F, 4), (F, 5), (F, 6), (F, 7), (C, 6), (E, 6), (D, 1)]),
);

/// Leonardo R3 (ATmega32u4)
pub const MEGA32U4_LEONARDO_R3: BoardProfile = BoardProfile::new(
    BoardId::Mega32u4LeonardoR3,
    "MEGA32U4_LR3",
    HostFamily::Avr,
    data_lines([(F, 7), (F, 6), (F, 5), (F, 4), (F, 1), (F, 0), (D, 4), (C, 6)]),
    control_lines([(B, 4), (B, 5), (B, 6), (B, 7), (D, 6), (D, 0), (D, 1), (E, 6)]),
);

/// McGraw ATmega644P board
pub const MEGA644P_MCGRAW: BoardProfile = BoardProfile::new(
    BoardId::Mega644pMcgraw,
    "MEGA644P_MCGRAW",
    HostFamily::Avr,
    data_lines([(D, 2), (D, 3), (D, 4), (D, 5), (D, 6), (D, 7), (C, 0), (C, 1)]),
    control_lines([(C, 6), (C, 5), (C, 4), (C, 3), (C, 2), (A, 0), (C, 7), (A, 7)]),
);

/// Alternative ATmega328PB wiring using PORTE
pub const MEGA328PB_ALT: BoardProfile = BoardProfile::new(
    BoardId::Mega328pbAlt,
    "328PB_ALT",
    HostFamily::Avr,
    data_lines([(C, 0), (C, 1), (C, 2), (C, 3), (C, 4), (C, 5), (E, 2), (E, 3)]),
    control_lines([(D, 5), (D, 6), (D, 7), (B, 0), (B, 1), (D, 2), (D, 3), (D, 4)]),
);

/// PoE Ethernet GPIB adapter (AVR128DB)
pub const POE_ETHERNET: BoardProfile = BoardProfile::new(
    BoardId::PoeEthernet,
    "POE_ETHERNET",
    HostFamily::AvrDx,
    data_lines([(D, 0), (D, 1), (D, 2), (D, 3), (D, 4), (D, 5), (D, 6), (D, 7)]),
    control_lines([(C, 4), (C, 3), (C, 2), (C, 1), (C, 0), (C, 7), (C, 5), (C, 6)]),
);
