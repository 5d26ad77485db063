//! Error types for block-file decoding.
//!
//! Three layers mirror the decoding pipeline: [`DecodeError`] for byte-level
//! failures, [`BlockError`] for block-level integrity failures, and
//! [`StreamError`] tagging a failure with the index of the offending block.
//! A partial tail at the end of a file is *not* an error; the block decoder
//! signals it as a clean end-of-stream (`Ok(None)`).

use thiserror::Error;

use crate::hashing::Hash256;
use crate::target::Target;

/// Byte-level decoding failure.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Fewer bytes remain than the requested field needs.
    #[error("truncated input at byte {offset}: wanted {wanted} byte(s), {remaining} remain")]
    Truncated { offset: u64, wanted: u64, remaining: u64 },

    /// Varint tag byte outside the four legal cases. Unreachable for a u8
    /// tag; retained so the decoder stays total if the encoding grows.
    #[error("corrupt varint tag {tag:#04x} at byte {offset}")]
    CorruptVarint { tag: u8, offset: u64 },

    /// The underlying byte source failed.
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}

/// Block-level integrity failure.
#[derive(Error, Debug)]
pub enum BlockError {
    /// The record did not begin with the expected network magic.
    #[error("bad magic {found:#010x} at byte {offset}")]
    BadMagic { offset: u64, found: u32 },

    /// The header hash exceeds the target derived from `bits`.
    #[error("proof of work failed: hash {hash} exceeds target {target}")]
    BadProofOfWork { hash: Hash256, target: Target },

    /// The Merkle root recomputed from the transactions differs from the
    /// root declared in the header.
    #[error("merkle root mismatch: computed {computed}, declared {declared}")]
    BadMerkleRoot { computed: Hash256, declared: Hash256 },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A [`BlockError`] annotated with the zero-based index of the block the
/// stream driver was decoding when it failed.
#[derive(Error, Debug)]
#[error("block {index}: {source}")]
pub struct StreamError {
    pub index: u64,
    #[source]
    pub source: BlockError,
}
