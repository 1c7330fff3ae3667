//! ESP32 family layouts
//!
//! GPIO 32 and above live in the second 32-pin bank.

use super::{gpio_control_lines, gpio_data_lines, BoardId, BoardProfile, HostFamily};

/// ESP32 DevKit1
pub const DEVKIT1: BoardProfile = BoardProfile::new(
    BoardId::Esp32DevKit1,
    "ESP32_DEVKIT1_WROOM_32",
    HostFamily::Esp32,
    gpio_data_lines([32, 33, 25, 26, 27, 14, 4, 13]),
    gpio_control_lines([23, 22, 21, 19, 18, 17, 5, 16]),
);

/// Generic ESP32 dev module
pub const ESP32_DEV: BoardProfile = BoardProfile::new(
    BoardId::Esp32Dev,
    "ESP32_ESP32DEV",
    HostFamily::Esp32,
    gpio_data_lines([33, 32, 26, 25, 14, 27, 13, 12]),
    gpio_control_lines([22, 21, 19, 18, 17, 23, 16, 4]),
);

/// Wemos Lolin32
pub const LOLIN32: BoardProfile = BoardProfile::new(
    BoardId::Esp32Lolin32,
    "ESP32_LOLIN32_161",
    HostFamily::Esp32,
    gpio_data_lines([32, 33, 25, 26, 27, 14, 12, 13]),
    gpio_control_lines([21, 19, 23, 18, 17, 22, 4, 16]),
);

/// ESP32-S2 mini
pub const S2_161: BoardProfile = BoardProfile::new(
    BoardId::Esp32S2_161,
    "ESP32_S2_161",
    HostFamily::Esp32,
    gpio_data_lines([1, 2, 3, 4, 5, 6, 7, 8]),
    gpio_control_lines([10, 11, 12, 13, 14, 9, 16, 15]),
);

/// Wilhelm ESP32-S3 adapter, revision 4
pub const WILHELM_R4: BoardProfile = BoardProfile::new(
    BoardId::Esp32WilhelmR4,
    "ESP32_S3_WILHELM_R4",
    HostFamily::Esp32,
    gpio_data_lines([8, 9, 10, 11, 12, 13, 14, 15]),
    gpio_control_lines([38, 33, 34, 40, 35, 26, 37, 36]),
);

/// Wilhelm ESP32-S3 adapter, revision 5
pub const WILHELM_R5: BoardProfile = BoardProfile::new(
    BoardId::Esp32WilhelmR5,
    "ESP32_S3_WILHELM_R5",
    HostFamily::Esp32,
    gpio_data_lines([8, 9, 10, 11, 12, 13, 14, 15]),
    gpio_control_lines([4, 33, 34, 5, 35, 21, 37, 36]),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::move_bits;
    use crate::profile::tests::assert_fragments;
    use gpib_hal::PortId::Gpio;

    #[test]
    fn test_devkit1_split_banks() {
        for b in 0..=255u8 {
            let n = !b;
            assert_fragments(
                &DEVKIT1.data.scatter_levels(b, 0xFF),
                &[
                    (Gpio(1), 0x03, move_bits(n, 0x03, 0)),
                    (
                        Gpio(0),
                        0x7 << 25 | 1 << 14 | 1 << 4 | 1 << 13,
                        move_bits(n, 0x1C, 23) | move_bits(n, 0x20, 9) | move_bits(n, 0x40, -2) | move_bits(n, 0x80, 6),
                    ),
                ],
            );
        }
    }

    #[test]
    fn test_wilhelm_r4_control_high_bank() {
        for b in 0..=255u8 {
            assert_fragments(
                &WILHELM_R4.control.scatter(b, 0xFF),
                &[
                    (
                        Gpio(1),
                        1 << 6 | 0x3 << 1 | 1 << 8 | 1 << 3 | 0x3 << 4,
                        move_bits(b, 0x01, 6)
                            | move_bits(b, 0x06, 0)
                            | move_bits(b, 0x08, 5)
                            | move_bits(b, 0x10, -1)
                            | move_bits(b, 0x40, -1)
                            | move_bits(b, 0x80, -3),
                    ),
                    (Gpio(0), 1 << 26, move_bits(b, 0x20, 21)),
                ],
            );
        }
    }

    #[test]
    fn test_s2_contiguous_data() {
        for b in 0..=255u8 {
            assert_fragments(
                &S2_161.data.scatter_levels(b, 0xFF),
                &[(Gpio(0), 0xFF << 1, move_bits(!b, 0xFF, 1))],
            );
        }
        assert_eq!(S2_161.data.segment_count(), 1);
    }
}
