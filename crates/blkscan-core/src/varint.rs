//! Bitcoin variable-length integer codec.
//!
//! A varint is 1–9 bytes: a tag byte below 0xFD is the value itself;
//! 0xFD, 0xFE, and 0xFF announce a little-endian u16, u32, or u64 payload.
//!
//! Decoding is tolerant: historical chain data may carry non-minimal
//! encodings (e.g. `FD 01 00` for 1) and the protocol accepts them.
//! Encoding always emits the shortest legal form, so re-serializing a
//! record that used a non-minimal varint produces different bytes; the
//! Merkle check then rejects the block rather than silently passing it.

use crate::error::DecodeError;
use crate::reader::ByteReader;
use std::io::{Read, Seek};

/// Decode one varint from the cursor.
pub fn read_varint<R: Read + Seek>(r: &mut ByteReader<R>) -> Result<u64, DecodeError> {
    let offset = r.position();
    let tag = r.read_u8()?;
    if tag < 0xFD {
        Ok(u64::from(tag))
    } else if tag == 0xFD {
        Ok(u64::from(r.read_u16_le()?))
    } else if tag == 0xFE {
        Ok(u64::from(r.read_u32_le()?))
    } else if tag == 0xFF {
        r.read_u64_le()
    } else {
        Err(DecodeError::CorruptVarint { tag, offset })
    }
}

/// Append the shortest legal encoding of `value` to `out`.
pub fn push_varint(out: &mut Vec<u8>, value: u64) {
    if value < 0xFD {
        out.push(value as u8);
    } else if value <= u64::from(u16::MAX) {
        out.push(0xFD);
        out.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= u64::from(u32::MAX) {
        out.push(0xFE);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        out.push(0xFF);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Encoded length of `value` in bytes (1, 3, 5, or 9).
pub fn varint_len(value: u64) -> usize {
    if value < 0xFD {
        1
    } else if value <= u64::from(u16::MAX) {
        3
    } else if value <= u64::from(u32::MAX) {
        5
    } else {
        9
    }
}

/// Encode `value` into a fresh vector. Convenience for tests and benches.
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(varint_len(value));
    push_varint(&mut out, value);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn decode(bytes: &[u8]) -> u64 {
        let mut r = ByteReader::new(Cursor::new(bytes)).unwrap();
        read_varint(&mut r).unwrap()
    }

    // --- Boundary vectors ---

    #[test]
    fn one_byte_form() {
        assert_eq!(decode(&[0x00]), 0);
        assert_eq!(decode(&[0x7F]), 127);
        assert_eq!(decode(&[0xFC]), 252);
    }

    #[test]
    fn u16_form() {
        assert_eq!(decode(&[0xFD, 0xFD, 0x00]), 253);
        assert_eq!(decode(&[0xFD, 0xFF, 0xFF]), 65_535);
    }

    #[test]
    fn u32_form() {
        assert_eq!(decode(&[0xFE, 0x00, 0x00, 0x01, 0x00]), 65_536);
        assert_eq!(decode(&[0xFE, 0xFF, 0xFF, 0xFF, 0xFF]), 4_294_967_295);
    }

    #[test]
    fn u64_form() {
        assert_eq!(
            decode(&[0xFF, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]),
            4_294_967_296
        );
        assert_eq!(decode(&[0xFF; 9]), u64::MAX);
    }

    // --- Tolerant decode ---

    #[test]
    fn non_minimal_encoding_decodes() {
        // 1 stored in the u16 form; legal on disk, never emitted by encode.
        assert_eq!(decode(&[0xFD, 0x01, 0x00]), 1);
        assert_eq!(encode_varint(1), vec![0x01]);
    }

    // --- Canonical encode ---

    #[test]
    fn encode_boundary_values() {
        assert_eq!(encode_varint(252), vec![0xFC]);
        assert_eq!(encode_varint(253), vec![0xFD, 0xFD, 0x00]);
        assert_eq!(encode_varint(65_535), vec![0xFD, 0xFF, 0xFF]);
        assert_eq!(encode_varint(65_536), vec![0xFE, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(
            encode_varint(4_294_967_296),
            vec![0xFF, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn varint_len_matches_encoding() {
        for v in [0, 252, 253, 65_535, 65_536, 4_294_967_295, 4_294_967_296, u64::MAX] {
            assert_eq!(varint_len(v), encode_varint(v).len(), "length mismatch for {v}");
        }
    }

    // --- Truncation ---

    #[test]
    fn truncated_payload_errors() {
        let mut r = ByteReader::new(Cursor::new(&[0xFD, 0x01][..])).unwrap();
        assert!(read_varint(&mut r).is_err());
    }

    proptest! {
        #[test]
        fn round_trip(v in any::<u64>()) {
            let encoded = encode_varint(v);
            let mut r = ByteReader::new(Cursor::new(encoded.as_slice())).unwrap();
            prop_assert_eq!(read_varint(&mut r).unwrap(), v);
            prop_assert_eq!(r.remaining(), 0);
        }

        #[test]
        fn shortest_form(v in any::<u64>()) {
            let expected = match v {
                0..=0xFC => 1,
                0xFD..=0xFFFF => 3,
                0x1_0000..=0xFFFF_FFFF => 5,
                _ => 9,
            };
            prop_assert_eq!(encode_varint(v).len(), expected);
        }
    }
}
