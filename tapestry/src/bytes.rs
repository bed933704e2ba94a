//! Integer encodings used on the tape.
//!
//! Two variable-length forms share the same byte layout (7 value bits per
//! byte, high bit set on continuation bytes):
//!
//! - the *forward* form is read left to right. The least-significant group
//!   comes first and every byte but the last carries the flag.
//! - the *trailing* form is written after the data it measures and read
//!   right to left. The most-significant group comes first without the flag
//!   and every following byte carries it, so a backward scan stops at the
//!   first unflagged byte.
//!
//! Both are capped at [`MAX_VARINT`]. Fixed-width fields are stored little
//! endian, one byte per `encode_intN` call.

use crate::error::{Error, Result};

/// Largest value either variable-length form can hold (21 bits, 3 bytes).
pub(crate) const MAX_VARINT: usize = (1 << 21) - 1;

/// Largest value a fixed 2-byte field can hold.
pub(crate) const MAX_INT2: usize = 0xFFFF;

/// Largest value a fixed 3-byte field can hold.
pub(crate) const MAX_INT3: usize = 0xFF_FFFF;

const FLAG: u8 = 0x80;
const MASK: usize = 0x7F;

#[inline]
pub(crate) fn encode_int0(value: usize) -> u8 {
    value as u8
}

#[inline]
pub(crate) fn encode_int1(value: usize) -> u8 {
    (value >> 8) as u8
}

#[inline]
pub(crate) fn encode_int2(value: usize) -> u8 {
    (value >> 16) as u8
}

/// Decodes a fixed 2-byte field.
#[inline]
pub(crate) fn decode_int(b0: u8, b1: u8) -> usize {
    (b0 as usize) | ((b1 as usize) << 8)
}

/// Decodes a fixed 3-byte field.
#[inline]
pub(crate) fn decode_int3(b0: u8, b1: u8, b2: u8) -> usize {
    (b0 as usize) | ((b1 as usize) << 8) | ((b2 as usize) << 16)
}

/// Checks that `value` fits a fixed 2-byte field.
#[inline]
pub(crate) fn check_int2(value: usize) -> Result<usize> {
    if value > MAX_INT2 {
        return Err(Error::DocumentTooLarge { length: value });
    }
    Ok(value)
}

/// Appends `value` in forward form.
pub(crate) fn encode_offset(out: &mut Vec<u8>, value: usize) -> Result<()> {
    if value > MAX_VARINT {
        return Err(Error::DocumentTooLarge { length: value });
    }

    let mut rest = value;
    loop {
        let byte = (rest & MASK) as u8;
        rest >>= 7;
        if rest == 0 {
            out.push(byte);
            return Ok(());
        }
        out.push(byte | FLAG);
    }
}

/// Reads a forward-form value starting at `index`.
///
/// Returns the value and the index just past its last byte.
pub(crate) fn decode_offset(bytes: &[u8], index: usize) -> (usize, usize) {
    let mut value = 0;
    let mut shift = 0;
    let mut index = index;
    loop {
        let byte = bytes[index];
        index += 1;
        value |= ((byte as usize) & MASK) << shift;
        if byte & FLAG == 0 {
            return (value, index);
        }
        shift += 7;
    }
}

/// Returns the index just past a forward-form value starting at `index`.
pub(crate) fn skip_offset(bytes: &[u8], index: usize) -> usize {
    let mut index = index;
    while bytes[index] & FLAG != 0 {
        index += 1;
    }
    index + 1
}

/// Appends `value` in trailing form.
pub(crate) fn encode_common_end(out: &mut Vec<u8>, value: usize) -> Result<()> {
    if value > MAX_VARINT {
        return Err(Error::DocumentTooLarge { length: value });
    }

    if value < (1 << 7) {
        out.push(value as u8);
    } else if value < (1 << 14) {
        out.push((value >> 7) as u8);
        out.push(((value & MASK) as u8) | FLAG);
    } else {
        out.push((value >> 14) as u8);
        out.push((((value >> 7) & MASK) as u8) | FLAG);
        out.push(((value & MASK) as u8) | FLAG);
    }
    Ok(())
}

/// Reads a trailing-form value whose last byte sits at `last`, scanning
/// backward.
///
/// Returns the value and the index of its first (unflagged) byte.
pub(crate) fn decode_common_end(bytes: &[u8], last: usize) -> (usize, usize) {
    let mut value = 0;
    let mut shift = 0;
    let mut index = last;
    loop {
        let byte = bytes[index];
        value |= ((byte as usize) & MASK) << shift;
        if byte & FLAG == 0 || index == 0 {
            return (value, index);
        }
        shift += 7;
        index -= 1;
    }
}

/// Returns the index just past a trailing-form value whose first byte sits
/// at `first`, scanning forward.
pub(crate) fn skip_common_end(bytes: &[u8], first: usize) -> usize {
    let mut index = first + 1;
    while index < bytes.len() && bytes[index] & FLAG != 0 {
        index += 1;
    }
    index
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_offset_widths() {
        for (value, width) in [(0, 1), (0x7F, 1), (0x80, 2), (0x3FFF, 2), (0x4000, 3)] {
            let mut out = Vec::new();
            encode_offset(&mut out, value).unwrap();
            assert_eq!(out.len(), width, "value {value}");
            assert_eq!(decode_offset(&out, 0), (value, width));
            assert_eq!(skip_offset(&out, 0), width);
        }
    }

    #[test]
    fn test_offset_least_significant_first() {
        let mut out = Vec::new();
        encode_offset(&mut out, 0x81).unwrap();
        assert_eq!(out, [0x81, 0x01]);
    }

    #[test]
    fn test_common_end_reads_backward() {
        let mut out = vec![0x7F];
        encode_common_end(&mut out, 300).unwrap();
        // most-significant group first, unflagged
        assert_eq!(out, [0x7F, 0x02, 0xAC]);
        assert_eq!(decode_common_end(&out, 2), (300, 1));
        assert_eq!(skip_common_end(&out, 1), 3);
    }

    #[test]
    fn test_common_end_max() {
        let mut out = Vec::new();
        encode_common_end(&mut out, MAX_VARINT).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(decode_common_end(&out, 2), (MAX_VARINT, 0));
    }

    #[test]
    fn test_varint_cap() {
        let mut out = Vec::new();
        assert!(matches!(
            encode_offset(&mut out, MAX_VARINT + 1),
            Err(Error::DocumentTooLarge { .. })
        ));
        assert!(matches!(
            encode_common_end(&mut out, MAX_VARINT + 1),
            Err(Error::DocumentTooLarge { .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_fixed_ints() {
        let value = 0x0A0B0C;
        let bytes = [encode_int0(value), encode_int1(value), encode_int2(value)];
        assert_eq!(bytes, [0x0C, 0x0B, 0x0A]);
        assert_eq!(decode_int3(bytes[0], bytes[1], bytes[2]), value);
        assert_eq!(decode_int(0x34, 0x12), 0x1234);
        assert!(check_int2(MAX_INT2).is_ok());
        assert!(check_int2(MAX_INT2 + 1).is_err());
    }
}
