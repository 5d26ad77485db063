//! Base58Check address derivation.
//!
//! A legacy Bitcoin address is `Base58(version || payload || checksum)`
//! where the payload is a 20-byte hash160 and the checksum is the first
//! four bytes of the double-SHA-256 of everything before it. Version 0x00
//! produces the familiar `1...` pay-to-pubkey-hash addresses; version 0x05
//! the `3...` pay-to-script-hash ones.

use crate::hashing::{double_sha256, hash160};

/// Mainnet pay-to-pubkey-hash address version byte.
pub const P2PKH_VERSION: u8 = 0x00;

/// Mainnet pay-to-script-hash address version byte.
pub const P2SH_VERSION: u8 = 0x05;

/// Encode a 20-byte hash160 as a Base58Check address under `version`.
pub fn hash160_to_address(version: u8, hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(25);
    payload.push(version);
    payload.extend_from_slice(hash);
    let checksum = double_sha256(&payload);
    payload.extend_from_slice(&checksum.as_bytes()[..4]);
    bs58::encode(payload).into_string()
}

/// Derive the pay-to-pubkey-hash address controlled by a public key.
///
/// Accepts both uncompressed (65-byte, `04...`) and compressed (33-byte)
/// keys; the hash commits to whichever form the script carried.
pub fn pubkey_to_address(pubkey: &[u8]) -> String {
    hash160_to_address(P2PKH_VERSION, &hash160(pubkey))
}
