//! Build-time board selection
//!
//! Exactly one `board-*` feature must be enabled. [`ACTIVE`] resolves to
//! that board's profile; any other feature count stops the build with a
//! const-evaluation panic.

use crate::profile::{avr, esp32, expander, rp2040, BoardProfile};

const CANDIDATES: &[(bool, &BoardProfile)] = &[
    (cfg!(feature = "board-uno"), &avr::UNO),
    (cfg!(feature = "board-nano"), &avr::NANO),
    (cfg!(feature = "board-mega2560-d"), &avr::MEGA2560_D),
    (cfg!(feature = "board-mega2560-e1"), &avr::MEGA2560_E1),
    (cfg!(feature = "board-mega2560-e2"), &avr::MEGA2560_E2),
    (cfg!(feature = "board-mega32u4-micro"), &avr::MEGA32U4_MICRO),
    (cfg!(feature = "board-mega32u4-leonardo-r3"), &avr::MEGA32U4_LEONARDO_R3),
    (cfg!(feature = "board-mega644p-mcgraw"), &avr::MEGA644P_MCGRAW),
    (cfg!(feature = "board-328pb-alt"), &avr::MEGA328PB_ALT),
    (cfg!(feature = "board-poe-ethernet"), &avr::POE_ETHERNET),
    (cfg!(feature = "board-mcp23s17"), &expander::MCP23S17),
    (cfg!(feature = "board-ras-pico-l1"), &rp2040::RAS_PICO_L1),
    (cfg!(feature = "board-ras-pico-l2"), &rp2040::RAS_PICO_L2),
    (cfg!(feature = "board-nano-rp2040-connect"), &rp2040::NANO_RP2040_CONNECT),
    (cfg!(feature = "board-esp32-devkit1"), &esp32::DEVKIT1),
    (cfg!(feature = "board-esp32-dev"), &esp32::ESP32_DEV),
    (cfg!(feature = "board-esp32-lolin32"), &esp32::LOLIN32),
    (cfg!(feature = "board-esp32-s2-161"), &esp32::S2_161),
    (cfg!(feature = "board-esp32-wilhelm-r4"), &esp32::WILHELM_R4),
    (cfg!(feature = "board-esp32-wilhelm-r5"), &esp32::WILHELM_R5),
];

const fn select(candidates: &[(bool, &'static BoardProfile)]) -> &'static BoardProfile {
    let mut selected = None;
    let mut i = 0;
    while i < candidates.len() {
        if candidates[i].0 {
            if selected.is_some() {
                panic!("more than one board selected: enable exactly one `board-*` feature of gpib-bus");
            }
            selected = Some(candidates[i].1);
        }
        i += 1;
    }
    match selected {
        Some(profile) => profile,
        None => panic!("no board selected: enable exactly one `board-*` feature of gpib-bus"),
    }
}

/// Profile of the board this build targets
pub const ACTIVE: &BoardProfile = select(CANDIDATES);

// Evaluate the selection even if nothing downstream reads ACTIVE
const _: &BoardProfile = ACTIVE;
