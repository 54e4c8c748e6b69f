// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! MSB-first bit cursors.
//!
//! Fields are packed tightly with no alignment between them. The writer
//! flattens to the minimal byte buffer, zero-padding the final byte. The
//! reader never fails: bits past the end read as zero and clear
//! [`BitReader::in_bounds`], which is how callers detect end of stream.

/// Widest field a single read or write handles.
pub const MAX_FIELD_BITS: u32 = 32;

/// Append-only bit buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitWriter {
    buf: Vec<u8>,
    len: usize,
}

impl BitWriter {
    /// Create an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `nbits` of `value`, most significant bit first.
    ///
    /// `nbits` is clamped to [`MAX_FIELD_BITS`]; higher bits of `value` are
    /// ignored.
    pub fn write(&mut self, nbits: u32, value: u32) {
        for i in (0..nbits.min(MAX_FIELD_BITS)).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
    }

    /// Append a single flag bit.
    pub fn write_bool(&mut self, flag: bool) {
        self.push_bit(flag);
    }

    fn push_bit(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.buf.push(0);
        }
        if bit {
            if let Some(last) = self.buf.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.len += 1;
    }

    /// Number of bits written.
    pub fn bit_len(&self) -> usize {
        self.len
    }

    /// Written bits as bytes, final byte zero-padded.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }

    /// Consume the writer and return the buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Read cursor over existing bytes.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first bit of `bytes`.
    #[must_use]
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn bit_at(&self, pos: usize) -> bool {
        self.bytes
            .get(pos / 8)
            .is_some_and(|byte| byte & (0x80 >> (pos % 8)) != 0)
    }

    /// Consume the next `nbits` (clamped to [`MAX_FIELD_BITS`]) as an
    /// unsigned integer. Bits beyond the supplied data read as zero.
    pub fn read(&mut self, nbits: u32) -> u32 {
        let mut value = 0u32;
        for _ in 0..nbits.min(MAX_FIELD_BITS) {
            value = (value << 1) | u32::from(self.bit_at(self.pos));
            self.pos += 1;
        }
        value
    }

    /// Consume one flag bit.
    pub fn read_bool(&mut self) -> bool {
        self.read(1) == 1
    }

    /// `false` once any read has consumed bits past the end of the data.
    ///
    /// The cursor only moves forward, so once this turns `false` it stays
    /// `false`.
    pub fn in_bounds(&self) -> bool {
        self.pos <= self.total_bits()
    }

    /// Bits left before the end of the data (zero once out of bounds).
    pub fn remaining(&self) -> usize {
        self.total_bits().saturating_sub(self.pos)
    }

    /// Bits consumed so far, including any past the end.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn total_bits(&self) -> usize {
        self.bytes.len() * 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_msb_first_without_alignment() {
        let mut w = BitWriter::new();
        w.write(1, 0);
        w.write(3, 0b101);
        w.write(6, 0b11_0001);
        assert_eq!(w.bit_len(), 10);
        assert_eq!(w.into_bytes(), vec![0b0101_1100, 0b0100_0000]);
    }

    #[test]
    fn empty_writer_has_no_bytes() {
        assert!(BitWriter::new().to_bytes().is_empty());
    }

    #[test]
    fn full_width_fields_round_trip() {
        let mut w = BitWriter::new();
        w.write(1, 1);
        w.write(32, 0xDEAD_BEEF);
        w.write(32, u32::MAX);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 9);

        let mut r = BitReader::from_bytes(&bytes);
        assert_eq!(r.read(1), 1);
        assert_eq!(r.read(32), 0xDEAD_BEEF);
        assert_eq!(r.read(32), u32::MAX);
        assert!(r.in_bounds());
        assert_eq!(r.remaining(), 7);
    }

    #[test]
    fn high_bits_beyond_width_are_dropped() {
        let mut w = BitWriter::new();
        w.write(4, 0xFF);
        let bytes = w.into_bytes();
        assert_eq!(bytes, vec![0b1111_0000]);
    }

    #[test]
    fn reading_exactly_to_the_end_stays_in_bounds() {
        let bytes = [0xAB];
        let mut r = BitReader::from_bytes(&bytes);
        assert_eq!(r.read(8), 0xAB);
        assert!(r.in_bounds());
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn reading_past_the_end_zero_fills_and_flags() {
        let bytes = [0xFF];
        let mut r = BitReader::from_bytes(&bytes);
        assert_eq!(r.read(4), 0xF);
        assert_eq!(r.read(8), 0xF0);
        assert!(!r.in_bounds());
        assert_eq!(r.read(1), 0);
        assert!(!r.in_bounds());
        assert_eq!(r.position(), 13);
    }

    #[test]
    fn bools_are_single_bits() {
        let mut w = BitWriter::new();
        w.write_bool(true);
        w.write_bool(false);
        w.write_bool(true);
        let bytes = w.into_bytes();
        let mut r = BitReader::from_bytes(&bytes);
        assert!(r.read_bool());
        assert!(!r.read_bool());
        assert!(r.read_bool());
    }
}
