//! Block record decoding and integrity verification.
//!
//! Each record in a `blk*.dat` file is `magic || size || payload`, the
//! payload being an 80-byte header followed by a varint-counted transaction
//! list. Decoding verifies two commitments before a block is handed out:
//!
//! - the header hash, read as a little-endian 256-bit integer, must not
//!   exceed the target expanded from the compact `bits` field;
//! - the Merkle root recomputed from the canonical transaction bytes must
//!   equal the root declared in the header.
//!
//! A file that ends mid-record (fewer than 8 prefix bytes, or fewer than
//! `size` payload bytes) is a legal partial tail, signalled as `Ok(None)`.

use serde::Serialize;
use std::io::{Read, Seek};

use crate::constants::{BLOCK_PREFIX_LEN, HEADER_LEN, MAGIC};
use crate::error::BlockError;
use crate::hashing::{double_sha256, Hash256};
use crate::merkle::merkle_root;
use crate::reader::ByteReader;
use crate::target::Target;
use crate::transaction::Transaction;
use crate::varint::{push_varint, read_varint};

/// The fixed 80-byte block header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlockHeader {
    pub version: u32,
    /// Hash of the previous block header, raw on-disk order.
    pub prev_hash: Hash256,
    /// Declared Merkle root over the block's transactions, raw on-disk
    /// order.
    pub merkle_root: Hash256,
    /// Unix timestamp in seconds.
    pub timestamp: u32,
    /// Compact difficulty target.
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    fn decode<R: Read + Seek>(r: &mut ByteReader<R>) -> Result<Self, BlockError> {
        Ok(Self {
            version: r.read_u32_le()?,
            prev_hash: Hash256(r.read_fixed::<32>()?),
            merkle_root: Hash256(r.read_fixed::<32>()?),
            timestamp: r.read_u32_le()?,
            bits: r.read_u32_le()?,
            nonce: r.read_u32_le()?,
        })
    }

    /// Canonical 80-byte serialization, the exact bytes that were on disk.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..36].copy_from_slice(self.prev_hash.as_bytes());
        bytes[36..68].copy_from_slice(self.merkle_root.as_bytes());
        bytes[68..72].copy_from_slice(&self.timestamp.to_le_bytes());
        bytes[72..76].copy_from_slice(&self.bits.to_le_bytes());
        bytes[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        bytes
    }

    /// The block hash: double-SHA-256 of the canonical header bytes.
    pub fn hash(&self) -> Hash256 {
        double_sha256(&self.to_bytes())
    }

    /// The proof-of-work target expanded from `bits`.
    pub fn target(&self) -> Target {
        Target::from_compact(self.bits)
    }
}

/// A fully decoded and verified block record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Network magic as read from disk; always [`MAGIC`] once decoded.
    pub magic: u32,
    /// Declared payload size in bytes.
    pub size: u32,
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Decode the next block record at the cursor.
    ///
    /// `Ok(None)` means a clean end of stream: fewer than 8 bytes remain,
    /// or the declared payload runs past the end of the source (a partial
    /// tail from an interrupted write). Both terminate a scan without
    /// error.
    pub fn decode<R: Read + Seek>(r: &mut ByteReader<R>) -> Result<Option<Self>, BlockError> {
        if r.remaining() < BLOCK_PREFIX_LEN {
            return Ok(None);
        }

        let offset = r.position();
        let magic = r.read_u32_le()?;
        if magic != MAGIC {
            return Err(BlockError::BadMagic {
                offset,
                found: magic,
            });
        }
        let size = r.read_u32_le()?;
        if r.remaining() < u64::from(size) {
            tracing::debug!(
                offset,
                declared = size,
                remaining = r.remaining(),
                "partial tail, stopping"
            );
            return Ok(None);
        }

        let payload_start = r.position();
        let header = BlockHeader::decode(r)?;
        let hash = header.hash();
        let target = header.target();
        if !target.allows(&hash) {
            return Err(BlockError::BadProofOfWork { hash, target });
        }

        let tx_count = read_varint(r)?;
        let mut transactions = Vec::new();
        for _ in 0..tx_count {
            transactions.push(Transaction::decode(r)?);
        }

        let digests: Vec<Hash256> = transactions.iter().map(Transaction::txid).collect();
        let computed = merkle_root(&digests);
        if computed != header.merkle_root {
            return Err(BlockError::BadMerkleRoot {
                computed,
                declared: header.merkle_root,
            });
        }

        let consumed = r.position() - payload_start;
        if consumed != u64::from(size) {
            tracing::warn!(
                offset,
                declared = size,
                consumed,
                "payload size mismatch"
            );
        }

        Ok(Some(Self {
            magic,
            size,
            header,
            transactions,
        }))
    }

    /// The block hash, recomputed from the header.
    pub fn hash(&self) -> Hash256 {
        self.header.hash()
    }

    /// The coinbase transaction, when the block has any transactions.
    pub fn coinbase(&self) -> Option<&Transaction> {
        self.transactions.first()
    }

    /// Re-serialize the whole record (`magic || size || payload`) with
    /// canonical varints.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(BLOCK_PREFIX_LEN as usize + self.size as usize);
        out.extend_from_slice(&self.magic.to_le_bytes());
        out.extend_from_slice(&self.size.to_le_bytes());
        out.extend_from_slice(&self.header.to_bytes());
        push_varint(&mut out, self.transactions.len() as u64);
        for tx in &self.transactions {
            out.extend_from_slice(&tx.to_bytes());
        }
        out
    }
}
