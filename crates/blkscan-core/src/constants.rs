//! Wire-format constants for the block storage format.

/// Network magic prefixing every block record, as a little-endian u32.
pub const MAGIC: u32 = 0xD9B4_BEF9;

/// The magic number as it appears on disk.
pub const MAGIC_BYTES: [u8; 4] = [0xF9, 0xBE, 0xB4, 0xD9];

/// Serialized block header length in bytes.
pub const HEADER_LEN: usize = 80;

/// Length of the `magic || size` prefix in front of every block payload.
pub const BLOCK_PREFIX_LEN: u64 = 8;

/// Compact difficulty of the genesis block, the easiest the network allows.
///
/// The target expanded from this value is the reference point for the
/// difficulty quotient shown by explorers.
pub const GENESIS_BITS: u32 = 0x1D00_FFFF;

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn magic_bytes_match_u32() { assert_eq!(u32::from_le_bytes(MAGIC_BYTES), MAGIC); }
    #[test]
    fn prefix_is_magic_plus_size() { assert_eq!(BLOCK_PREFIX_LEN, 4 + 4); }
}
