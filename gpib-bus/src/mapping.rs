//! Logical-to-physical pin mapping
//!
//! A [`PinMap`] is built from eight `(port, bit, polarity)` triples, one
//! per logical bit. At compile time it is reduced to *segments*: runs of
//! consecutive logical bits that land on consecutive physical bits of one
//! port, either in the same order or reversed. Applying a map is then one
//! shift (or one [`reverse_bits`] plus shift) per segment, which is the
//! same arithmetic a hand-written per-board routine would use.
//!
//! # Example
//!
//! The 644P McGraw layout puts IFC..EOI on PC6..PC2. That run is
//! descending, so the whole group is moved with
//! `reverse_bits(bits & 0x1F) >> 1`.

use gpib_hal::PortId;
use heapless::Vec;

use crate::bits::{reverse_bits, shift};

/// Electrical polarity of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Logical 1 is a HIGH pin
    Direct,
    /// Logical 1 is a LOW pin (GPIB data lines)
    Inverted,
}

/// Physical location of one logical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineMapping {
    /// Port holding the line
    pub port: PortId,
    /// Bit index within the port
    pub bit: u8,
    /// Electrical polarity
    pub polarity: Polarity,
}

impl LineMapping {
    /// Line with direct polarity
    pub const fn direct(port: PortId, bit: u8) -> Self {
        Self {
            port,
            bit,
            polarity: Polarity::Direct,
        }
    }

    /// Line with inverted polarity
    pub const fn inverted(port: PortId, bit: u8) -> Self {
        Self {
            port,
            bit,
            polarity: Polarity::Inverted,
        }
    }

    /// Line on a flat GPIO namespace
    pub const fn gpio(gpio: u8, polarity: Polarity) -> Self {
        Self {
            port: PortId::gpio_bank(gpio),
            bit: gpio % 32,
            polarity,
        }
    }

    /// Single-bit mask within the port register
    pub const fn port_mask(&self) -> u32 {
        1 << self.bit
    }

    const fn same_pin(&self, other: &LineMapping) -> bool {
        self.port.same_as(other.port) && self.bit == other.bit
    }
}

/// Table of the eight lines of one logical byte, indexed by bit position
pub type LineTable = [LineMapping; 8];

/// Masked register update for one port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fragment {
    /// Target port
    pub port: PortId,
    /// Physical bits to change
    pub mask: u32,
    /// New values for the bits in `mask`
    pub value: u32,
}

/// Per-port fragments of one logical update
pub type Fragments = Vec<Fragment, 8>;

#[derive(Debug, Clone, Copy)]
struct Segment {
    /// Index into `PinMap::ports`
    port: u8,
    logical_mask: u8,
    by: i8,
    reversed: bool,
}

impl Segment {
    const EMPTY: Segment = Segment {
        port: 0,
        logical_mask: 0,
        by: 0,
        reversed: false,
    };

    #[inline]
    fn place(&self, byte: u8) -> u32 {
        let selected = byte & self.logical_mask;
        if self.reversed {
            shift(reverse_bits(selected) as u32, self.by)
        } else {
            shift(selected as u32, self.by)
        }
    }

    #[inline]
    fn take(&self, port_value: u32) -> u8 {
        let aligned = shift(port_value, -self.by) as u8;
        if self.reversed {
            reverse_bits(aligned) & self.logical_mask
        } else {
            aligned & self.logical_mask
        }
    }
}

/// Compiled mapping of one logical byte onto host ports
#[derive(Debug, Clone, Copy)]
pub struct PinMap {
    lines: LineTable,
    inverted: u8,
    ports: [PortId; 8],
    port_count: u8,
    segments: [Segment; 8],
    segment_count: u8,
}

impl PinMap {
    /// Compile a line table
    ///
    /// Panics during const evaluation if a bit index does not fit its port
    /// or two lines share a physical pin, so a bad table fails the build.
    pub const fn new(lines: LineTable) -> Self {
        let mut inverted = 0u8;
        let mut ports = [PortId::A; 8];
        let mut port_count = 0usize;

        let mut i = 0;
        while i < 8 {
            let line = lines[i];
            if line.bit >= line.port.width() {
                panic!("pin bit index exceeds port width");
            }
            let mut j = 0;
            while j < i {
                if lines[j].same_pin(&line) {
                    panic!("two logical lines mapped to the same physical pin");
                }
                j += 1;
            }
            if matches!(line.polarity, Polarity::Inverted) {
                inverted |= 1 << i;
            }
            if Self::find_port(&ports, port_count, line.port) == usize::MAX {
                ports[port_count] = line.port;
                port_count += 1;
            }
            i += 1;
        }

        let mut segments = [Segment::EMPTY; 8];
        let mut segment_count = 0usize;
        // Current run: first logical bit, length and direction (+1 / -1 / 0 = undecided)
        let mut start = 0usize;
        let mut len = 0usize;
        let mut step = 0i8;

        let mut i = 0;
        while i <= 8 {
            let extends = if i == 8 || len == 0 {
                false
            } else {
                let prev = lines[i - 1];
                let line = lines[i];
                let up = line.bit == prev.bit + 1;
                let down = line.bit + 1 == prev.bit;
                line.port.same_as(prev.port)
                    && ((up && step >= 0) || (down && step <= 0))
            };

            if extends {
                if step == 0 {
                    step = if lines[i].bit > lines[i - 1].bit { 1 } else { -1 };
                }
                len += 1;
            } else {
                if len > 0 {
                    let first = lines[start];
                    let logical_mask = (((1u16 << len) - 1) << start) as u8;
                    let reversed = step < 0;
                    let by = if reversed {
                        first.bit as i8 + start as i8 - 7
                    } else {
                        first.bit as i8 - start as i8
                    };
                    segments[segment_count] = Segment {
                        port: Self::find_port(&ports, port_count, first.port) as u8,
                        logical_mask,
                        by,
                        reversed,
                    };
                    segment_count += 1;
                }
                start = i;
                len = 1;
                step = 0;
            }
            i += 1;
        }

        Self {
            lines,
            inverted,
            ports,
            port_count: port_count as u8,
            segments,
            segment_count: segment_count as u8,
        }
    }

    const fn find_port(ports: &[PortId; 8], count: usize, port: PortId) -> usize {
        let mut i = 0;
        while i < count {
            if ports[i].same_as(port) {
                return i;
            }
            i += 1;
        }
        usize::MAX
    }

    /// True if any physical pin is used by both maps
    pub const fn overlaps(&self, other: &PinMap) -> bool {
        let mut i = 0;
        while i < 8 {
            let mut j = 0;
            while j < 8 {
                if self.lines[i].same_pin(&other.lines[j]) {
                    return true;
                }
                j += 1;
            }
            i += 1;
        }
        false
    }

    /// Mapping of a logical bit position (0-7)
    pub fn line(&self, index: u8) -> Option<&LineMapping> {
        self.lines.get(index as usize)
    }

    /// All line mappings in logical bit order
    pub fn lines(&self) -> &LineTable {
        &self.lines
    }

    /// Logical bits with inverted polarity
    pub const fn inverted_mask(&self) -> u8 {
        self.inverted
    }

    /// Distinct ports touched by this map
    pub fn ports(&self) -> &[PortId] {
        &self.ports[..self.port_count as usize]
    }

    /// Number of shift/reverse segments after compilation
    pub const fn segment_count(&self) -> usize {
        self.segment_count as usize
    }

    fn segments(&self) -> &[Segment] {
        &self.segments[..self.segment_count as usize]
    }

    /// Split a masked logical update into per-port fragments, applying
    /// line polarity to `bits`
    ///
    /// Used for pin levels. Ports with nothing to change are omitted, so a
    /// zero mask yields no fragments.
    pub fn scatter_levels(&self, bits: u8, mask: u8) -> Fragments {
        self.scatter(bits ^ self.inverted, mask)
    }

    /// Split a masked logical update into per-port fragments as-is
    ///
    /// Used for direction and pull-up bits, which have no polarity.
    pub fn scatter(&self, bits: u8, mask: u8) -> Fragments {
        let mut fragments = Fragments::new();
        if mask == 0 {
            return fragments;
        }
        for (index, &port) in self.ports().iter().enumerate() {
            let mut fragment = Fragment {
                port,
                mask: 0,
                value: 0,
            };
            for segment in self.segments().iter().filter(|s| s.port as usize == index) {
                fragment.mask |= segment.place(mask);
                fragment.value |= segment.place(bits);
            }
            fragment.value &= fragment.mask;
            if fragment.mask != 0 {
                // At most eight ports, so this cannot overflow
                let _ = fragments.push(fragment);
            }
        }
        fragments
    }

    /// Physical pins of every line, per port
    pub fn port_masks(&self) -> Fragments {
        self.scatter(0, 0xFF)
    }

    /// Assemble a logical byte from port values, applying line polarity
    ///
    /// `read` is called once per distinct port.
    pub fn gather_levels<E>(
        &self,
        read: impl FnMut(PortId) -> Result<u32, E>,
    ) -> Result<u8, E> {
        Ok(self.gather(read)? ^ self.inverted)
    }

    /// Assemble a logical byte from port values as-is
    pub fn gather<E>(&self, mut read: impl FnMut(PortId) -> Result<u32, E>) -> Result<u8, E> {
        let mut byte = 0u8;
        for (index, &port) in self.ports().iter().enumerate() {
            let value = read(port)?;
            for segment in self.segments().iter().filter(|s| s.port as usize == index) {
                byte |= segment.take(value);
            }
        }
        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use proptest::prelude::*;

    use crate::bits::move_bits;

    const UNO_CONTROL: PinMap = PinMap::new([
        LineMapping::direct(PortId::B, 0),
        LineMapping::direct(PortId::B, 1),
        LineMapping::direct(PortId::B, 2),
        LineMapping::direct(PortId::B, 3),
        LineMapping::direct(PortId::B, 4),
        LineMapping::direct(PortId::D, 3),
        LineMapping::direct(PortId::D, 2),
        LineMapping::direct(PortId::D, 7),
    ]);

    const DESCENDING: PinMap = PinMap::new([
        LineMapping::direct(PortId::C, 6),
        LineMapping::direct(PortId::C, 5),
        LineMapping::direct(PortId::C, 4),
        LineMapping::direct(PortId::C, 3),
        LineMapping::direct(PortId::C, 2),
        LineMapping::direct(PortId::A, 0),
        LineMapping::direct(PortId::C, 7),
        LineMapping::direct(PortId::A, 7),
    ]);

    const WIDE: PinMap = PinMap::new([
        LineMapping::gpio(14, Polarity::Inverted),
        LineMapping::gpio(15, Polarity::Inverted),
        LineMapping::gpio(16, Polarity::Inverted),
        LineMapping::gpio(17, Polarity::Inverted),
        LineMapping::gpio(18, Polarity::Inverted),
        LineMapping::gpio(19, Polarity::Inverted),
        LineMapping::gpio(20, Polarity::Inverted),
        LineMapping::gpio(21, Polarity::Inverted),
    ]);

    fn fragment_for(fragments: &Fragments, port: PortId) -> Option<Fragment> {
        fragments.iter().find(|f| f.port == port).copied()
    }

    #[test]
    fn test_segment_compilation() {
        // PB0..PB4 ascending, PD3/PD2 descending pair, PD7 alone
        assert_eq!(UNO_CONTROL.segment_count(), 3);
        assert_eq!(UNO_CONTROL.ports(), &[PortId::B, PortId::D]);
        // One contiguous run
        assert_eq!(WIDE.segment_count(), 1);
        assert_eq!(WIDE.inverted_mask(), 0xFF);
    }

    #[test]
    fn test_scatter_single_port_run() {
        let fragments = UNO_CONTROL.scatter(0b0001_0101, 0b0001_1111);
        assert_eq!(fragments.len(), 1);
        let b = fragment_for(&fragments, PortId::B).unwrap();
        assert_eq!(b.mask, 0x1F);
        assert_eq!(b.value, 0b0001_0101);
    }

    #[test]
    fn test_scatter_zero_mask_is_empty() {
        assert!(UNO_CONTROL.scatter(0xFF, 0).is_empty());
        assert!(WIDE.scatter_levels(0xFF, 0).is_empty());
    }

    #[test]
    fn test_scatter_matches_uno_arithmetic() {
        for bits in 0..=255u8 {
            let fragments = UNO_CONTROL.scatter(bits, 0xFF);
            let d = fragment_for(&fragments, PortId::D).unwrap();
            let expected = move_bits(bits, 0x80, 0) | move_bits(bits, 0x40, -4) | move_bits(bits, 0x20, -2);
            assert_eq!(d.value, expected);
            assert_eq!(d.mask, 0b1000_1100);
        }
    }

    #[test]
    fn test_descending_run_uses_reverse() {
        for bits in 0..=255u8 {
            let fragments = DESCENDING.scatter(bits, 0xFF);
            let c = fragment_for(&fragments, PortId::C).unwrap();
            let expected = ((reverse_bits(bits & 0x1F) >> 1) as u32) | move_bits(bits, 0x40, 1);
            assert_eq!(c.value, expected);
        }
    }

    #[test]
    fn test_wide_levels_are_inverted_and_offset() {
        let fragments = WIDE.scatter_levels(0x0F, 0xFF);
        let g = fragment_for(&fragments, PortId::Gpio(0)).unwrap();
        assert_eq!(g.mask, 0x00FF << 14);
        assert_eq!(g.value, 0x00F0 << 14);
    }

    #[test]
    fn test_gather_reads_each_port_once() {
        let mut reads = 0;
        let byte = DESCENDING
            .gather(|_port| {
                reads += 1;
                Ok::<u32, Infallible>(0xFF)
            })
            .unwrap();
        assert_eq!(byte, 0xFF);
        assert_eq!(reads, 2);
    }

    #[test]
    fn test_overlap_detection() {
        assert!(!UNO_CONTROL.overlaps(&WIDE));
        assert!(UNO_CONTROL.overlaps(&UNO_CONTROL));
    }

    #[test]
    fn test_port_masks() {
        let masks = DESCENDING.port_masks();
        assert_eq!(fragment_for(&masks, PortId::A).unwrap().mask, 0x81);
        assert_eq!(fragment_for(&masks, PortId::C).unwrap().mask, 0xFC);
    }

    fn gather_from(map: &PinMap, fragments: &Fragments) -> u8 {
        map.gather(|port| {
            Ok::<u32, Infallible>(fragment_for(fragments, port).map_or(0, |f| f.value))
        })
        .unwrap()
    }

    proptest! {
        #[test]
        fn scatter_gather_round_trip(bits in any::<u8>()) {
            for map in [&UNO_CONTROL, &DESCENDING, &WIDE] {
                let fragments = map.scatter(bits, 0xFF);
                prop_assert_eq!(gather_from(map, &fragments), bits);
            }
        }

        #[test]
        fn levels_round_trip(bits in any::<u8>()) {
            let fragments = WIDE.scatter_levels(bits, 0xFF);
            let levels = WIDE
                .gather_levels(|port| {
                    Ok::<u32, Infallible>(fragment_for(&fragments, port).map_or(0, |f| f.value))
                })
                .unwrap();
            prop_assert_eq!(levels, bits);
        }

        #[test]
        fn scatter_respects_mask(bits in any::<u8>(), mask in any::<u8>()) {
            let fragments = DESCENDING.scatter(bits, mask);
            let touched = DESCENDING.gather(|port| {
                Ok::<u32, Infallible>(fragment_for(&fragments, port).map_or(0, |f| f.mask))
            }).unwrap();
            prop_assert_eq!(touched, mask);
        }
    }
}
