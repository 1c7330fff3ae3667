//! Bit manipulation helpers
//!
//! Pure functions used by the mapping engine to move logical bits to
//! their physical positions and back.

/// Reverse the bit order of a byte
///
/// Nibble swap, then pair swap, then bit swap. Involutive:
/// `reverse_bits(reverse_bits(x)) == x`.
#[inline]
pub const fn reverse_bits(byte: u8) -> u8 {
    let b = (byte & 0xF0) >> 4 | (byte & 0x0F) << 4;
    let b = (b & 0xCC) >> 2 | (b & 0x33) << 2;
    (b & 0xAA) >> 1 | (b & 0x55) << 1
}

/// Shift left for positive `by`, right for negative `by`
///
/// `by` must be in `-31..=31`.
#[inline]
pub const fn shift(value: u32, by: i8) -> u32 {
    if by >= 0 {
        value << by as u32
    } else {
        value >> by.unsigned_abs() as u32
    }
}

/// Select `mask` bits of `value` and move them by `by` positions
#[inline]
pub const fn move_bits(value: u8, mask: u8, by: i8) -> u32 {
    shift((value & mask) as u32, by)
}
