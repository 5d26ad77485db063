//! Transaction decoding and canonical re-serialization.
//!
//! A transaction is self-delimiting: its length is only known by decoding
//! it, because input and output scripts carry varint lengths. The decoder
//! reads fields strictly in wire order. [`Transaction::to_bytes`] emits the
//! same fields back with shortest-form varints; for the canonically encoded
//! transactions that make up real chain data this reproduces the input
//! byte-for-byte, which is what the Merkle check relies on.

use serde::Serialize;
use std::io::{Read, Seek};

use crate::error::DecodeError;
use crate::hashing::{double_sha256, Hash256};
use crate::reader::ByteReader;
use crate::script::{classify, ScriptKind};
use crate::varint::{push_varint, read_varint, varint_len};

/// A transaction input spending a previous output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TxInput {
    /// Previous transaction hash, raw on-disk order. For coinbase inputs
    /// this field carries arbitrary miner data, not a hash.
    pub prev_tx_hash: Hash256,
    /// Output index in the previous transaction; `0xFFFFFFFF` marks the
    /// coinbase.
    pub prev_index: u32,
    /// Signature script, opaque bytes.
    #[serde(serialize_with = "crate::serde_hex::serialize")]
    pub signature_script: Vec<u8>,
    pub sequence: u32,
}

impl TxInput {
    /// Previous-output index reserved for the coinbase input.
    pub const COINBASE_INDEX: u32 = 0xFFFF_FFFF;

    pub fn is_coinbase(&self) -> bool {
        self.prev_index == Self::COINBASE_INDEX
    }

    /// The miner-supplied bytes in the previous-hash slot of a coinbase
    /// input. `None` for regular inputs.
    pub fn coinbase_data(&self) -> Option<&[u8; 32]> {
        self.is_coinbase().then(|| self.prev_tx_hash.as_bytes())
    }

    fn decode<R: Read + Seek>(r: &mut ByteReader<R>) -> Result<Self, DecodeError> {
        let prev_tx_hash = Hash256(r.read_fixed::<32>()?);
        let prev_index = r.read_u32_le()?;
        let script_len = read_varint(r)?;
        let signature_script = r.read_bytes(script_len)?;
        let sequence = r.read_u32_le()?;
        Ok(Self {
            prev_tx_hash,
            prev_index,
            signature_script,
            sequence,
        })
    }

    fn push_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.prev_tx_hash.as_bytes());
        out.extend_from_slice(&self.prev_index.to_le_bytes());
        push_varint(out, self.signature_script.len() as u64);
        out.extend_from_slice(&self.signature_script);
        out.extend_from_slice(&self.sequence.to_le_bytes());
    }

    fn serialized_len(&self) -> usize {
        32 + 4 + varint_len(self.signature_script.len() as u64) + self.signature_script.len() + 4
    }
}

/// A transaction output creating a spendable coin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TxOutput {
    /// Value in satoshi.
    pub value: u64,
    /// Pubkey script, opaque bytes.
    #[serde(serialize_with = "crate::serde_hex::serialize")]
    pub pubkey_script: Vec<u8>,
}

impl TxOutput {
    /// Classify the pubkey script shape.
    pub fn script_kind(&self) -> ScriptKind {
        classify(&self.pubkey_script)
    }

    fn decode<R: Read + Seek>(r: &mut ByteReader<R>) -> Result<Self, DecodeError> {
        let value = r.read_u64_le()?;
        let script_len = read_varint(r)?;
        let pubkey_script = r.read_bytes(script_len)?;
        Ok(Self {
            value,
            pubkey_script,
        })
    }

    fn push_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.value.to_le_bytes());
        push_varint(out, self.pubkey_script.len() as u64);
        out.extend_from_slice(&self.pubkey_script);
    }

    fn serialized_len(&self) -> usize {
        8 + varint_len(self.pubkey_script.len() as u64) + self.pubkey_script.len()
    }
}

/// A fully decoded transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
}

impl Transaction {
    /// Decode one transaction at the cursor.
    pub fn decode<R: Read + Seek>(r: &mut ByteReader<R>) -> Result<Self, DecodeError> {
        let version = r.read_u32_le()?;
        let input_count = read_varint(r)?;
        let mut inputs = Vec::new();
        for _ in 0..input_count {
            inputs.push(TxInput::decode(r)?);
        }
        let output_count = read_varint(r)?;
        let mut outputs = Vec::new();
        for _ in 0..output_count {
            outputs.push(TxOutput::decode(r)?);
        }
        let lock_time = r.read_u32_le()?;
        Ok(Self {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    /// Canonical serialization: the wire fields in order with shortest-form
    /// varints. Byte-identical to the on-disk record for canonical input.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        out.extend_from_slice(&self.version.to_le_bytes());
        push_varint(&mut out, self.inputs.len() as u64);
        for input in &self.inputs {
            input.push_bytes(&mut out);
        }
        push_varint(&mut out, self.outputs.len() as u64);
        for output in &self.outputs {
            output.push_bytes(&mut out);
        }
        out.extend_from_slice(&self.lock_time.to_le_bytes());
        out
    }

    /// Serialized length in bytes.
    pub fn serialized_len(&self) -> usize {
        4 + varint_len(self.inputs.len() as u64)
            + self.inputs.iter().map(TxInput::serialized_len).sum::<usize>()
            + varint_len(self.outputs.len() as u64)
            + self.outputs.iter().map(TxOutput::serialized_len).sum::<usize>()
            + 4
    }

    /// Transaction ID: double-SHA-256 of the canonical bytes, in on-disk
    /// order.
    pub fn txid(&self) -> Hash256 {
        double_sha256(&self.to_bytes())
    }

    /// Whether this is the block's coinbase: a single input with the
    /// reserved previous-output index.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].is_coinbase()
    }

    /// Sum of all output values. `None` on overflow.
    pub fn total_output_value(&self) -> Option<u64> {
        self.outputs
            .iter()
            .try_fold(0u64, |acc, out| acc.checked_add(out.value))
    }
}
