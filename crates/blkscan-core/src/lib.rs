//! # blkscan-core
//! Decoder for the Bitcoin block storage format (`blk*.dat` files).
//!
//! A `blk*.dat` file is a sequence of `magic || size || payload` records
//! where each payload holds an 80-byte header and a varint-counted list of
//! transactions. [`stream::BlockStream`] walks such a file, decoding each
//! block and verifying its two cryptographic commitments: the header hash
//! against the proof-of-work target expanded from the compact `bits` field,
//! and the Merkle root recomputed from the canonical transaction bytes
//! against the root declared in the header.

pub mod address;
pub mod block;
pub mod constants;
pub mod error;
pub mod hashing;
pub mod merkle;
pub mod reader;
pub mod script;
pub mod stream;
pub mod target;
pub mod transaction;
pub mod varint;

mod serde_hex;
