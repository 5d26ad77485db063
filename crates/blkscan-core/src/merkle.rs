//! Merkle root over an ordered transaction list.
//!
//! Leaves are the double-SHA-256 digests of the canonical transaction
//! bytes, in block order. Each level pairs digests left to right and hashes
//! `double_sha256(left || right)`; a level with an odd count duplicates its
//! last digest first. The duplication applies at *every* odd level, not
//! only the bottom one. The resulting root is in the same on-disk
//! (little-endian) byte order as the header field it is checked against.

use crate::hashing::{double_sha256, Hash256};

/// Compute the Merkle root of an ordered digest list.
///
/// Returns [`Hash256::ZERO`] for an empty list; a real block always has at
/// least the coinbase transaction.
pub fn merkle_root(digests: &[Hash256]) -> Hash256 {
    if digests.is_empty() {
        return Hash256::ZERO;
    }

    let mut layer = digests.to_vec();
    while layer.len() > 1 {
        layer = next_layer(&layer);
    }
    layer[0]
}

/// Hash one level of the tree into the next.
fn next_layer(layer: &[Hash256]) -> Vec<Hash256> {
    let mut next = Vec::with_capacity(layer.len().div_ceil(2));
    let mut i = 0;
    while i < layer.len() {
        let left = &layer[i];
        let right = if i + 1 < layer.len() { &layer[i + 1] } else { left };
        next.push(hash_pair(left, right));
        i += 2;
    }
    next
}

fn hash_pair(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_bytes());
    buf[32..].copy_from_slice(right.as_bytes());
    double_sha256(&buf)
}
