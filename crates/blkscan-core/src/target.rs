//! Proof-of-work target expansion.
//!
//! The header's 4-byte compact `bits` field packs a 256-bit target as
//! `coefficient * 2^(8*(exponent-3))`, with the exponent in the top byte
//! of the u32 and the 24-bit coefficient below it. A block is valid when
//! its header hash, interpreted as a little-endian 256-bit integer, is at
//! most the target.
//!
//! The expansion works directly on the u32 by shifting; the on-disk byte
//! view of `bits` is never re-sliced, so the two possible readings of the
//! field cannot disagree.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::constants::GENESIS_BITS;
use crate::hashing::Hash256;

/// A 256-bit proof-of-work target in little-endian byte order.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Target([u8; 32]);

impl Target {
    /// Expand the compact `bits` field into the full 256-bit target.
    ///
    /// Exponents below 3 shift the coefficient right instead; coefficient
    /// bytes that would land beyond the 256-bit range are dropped. Neither
    /// case occurs in legal mainnet headers, but the expansion stays total.
    pub fn from_compact(bits: u32) -> Self {
        let exponent = (bits >> 24) as usize;
        let coefficient = bits & 0x00FF_FFFF;
        let mut bytes = [0u8; 32];

        if exponent <= 3 {
            let shifted = coefficient >> (8 * (3 - exponent));
            bytes[..4].copy_from_slice(&shifted.to_le_bytes());
        } else {
            let coef = coefficient.to_le_bytes();
            for (i, &b) in coef[..3].iter().enumerate() {
                let pos = exponent - 3 + i;
                if pos < 32 {
                    bytes[pos] = b;
                }
            }
        }
        Self(bytes)
    }

    /// Whether `hash`, read as a little-endian 256-bit integer, is at most
    /// this target.
    pub fn allows(&self, hash: &Hash256) -> bool {
        for i in (0..32).rev() {
            if hash.0[i] != self.0[i] {
                return hash.0[i] < self.0[i];
            }
        }
        true
    }

    /// The target bytes in little-endian order.
    pub fn as_le_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Difficulty relative to the genesis target: how many times harder
    /// this target is than the easiest the network ever allowed.
    pub fn difficulty(&self) -> f64 {
        let own = self.to_f64();
        if own == 0.0 {
            return f64::INFINITY;
        }
        Target::from_compact(GENESIS_BITS).to_f64() / own
    }

    fn to_f64(&self) -> f64 {
        self.0
            .iter()
            .rev()
            .fold(0.0, |acc, &b| acc * 256.0 + f64::from(b))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter().rev() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({self})")
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
