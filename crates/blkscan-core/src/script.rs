//! Output-script classification and script rendering.
//!
//! Classification is purely shape-based: the leading opcode and well-known
//! length patterns decide the kind, and the payload (pubkey or 20-byte
//! hash) is extracted. Unrecognized scripts are surfaced as
//! [`ScriptKind::Nonstandard`] with their raw bytes; classification never
//! fails.
//!
//! Input scripts are not classified. For display, [`split_signature_script`]
//! recognizes the common `<DER signature + sighash byte> <pubkey>` layout;
//! coinbase inputs are opaque miner data and must be short-circuited by the
//! caller before reaching it.

use serde::Serialize;

use crate::address::{hash160_to_address, pubkey_to_address, P2PKH_VERSION, P2SH_VERSION};

pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xA9;
pub const OP_CHECKSIG: u8 = 0xAC;

/// Signature-hash byte committing to all inputs and outputs.
pub const SIGHASH_ALL: u8 = 0x01;

/// Highest direct push opcode: 0x01..=0x4B push that many bytes.
const MAX_DIRECT_PUSH: u8 = 0x4B;

/// The recognized shape of an output script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScriptKind {
    /// Legacy pay-to-pubkey: `<push pubkey> OP_CHECKSIG`.
    PayToPubkey {
        #[serde(serialize_with = "crate::serde_hex::serialize")]
        pubkey: Vec<u8>,
    },
    /// `OP_DUP OP_HASH160 <push 20> OP_EQUALVERIFY OP_CHECKSIG`.
    PayToPubkeyHash {
        #[serde(serialize_with = "crate::serde_hex::serialize")]
        hash: [u8; 20],
    },
    /// `OP_HASH160 <push 20> OP_EQUAL`.
    PayToScriptHash {
        #[serde(serialize_with = "crate::serde_hex::serialize")]
        hash: [u8; 20],
    },
    /// Anything else; the raw bytes are kept for display.
    Nonstandard {
        #[serde(serialize_with = "crate::serde_hex::serialize")]
        raw: Vec<u8>,
    },
}

impl ScriptKind {
    /// Short label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            ScriptKind::PayToPubkey { .. } => "pay-to-pubkey (P2PK)",
            ScriptKind::PayToPubkeyHash { .. } => "pay-to-pubkey-hash (P2PKH)",
            ScriptKind::PayToScriptHash { .. } => "pay-to-script-hash (P2SH)",
            ScriptKind::Nonstandard { .. } => "nonstandard",
        }
    }

    /// The Base58Check address this script pays to, if it has one.
    pub fn address(&self) -> Option<String> {
        match self {
            ScriptKind::PayToPubkey { pubkey } => Some(pubkey_to_address(pubkey)),
            ScriptKind::PayToPubkeyHash { hash } => {
                Some(hash160_to_address(P2PKH_VERSION, hash))
            }
            ScriptKind::PayToScriptHash { hash } => {
                Some(hash160_to_address(P2SH_VERSION, hash))
            }
            ScriptKind::Nonstandard { .. } => None,
        }
    }
}

/// Classify an output script by its leading opcode and length pattern.
pub fn classify(script: &[u8]) -> ScriptKind {
    // OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG
    if script.len() == 25
        && script[0] == OP_DUP
        && script[1] == OP_HASH160
        && script[2] == 20
        && script[23] == OP_EQUALVERIFY
        && script[24] == OP_CHECKSIG
    {
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&script[3..23]);
        return ScriptKind::PayToPubkeyHash { hash };
    }

    // OP_HASH160 <20> OP_EQUAL
    if script.len() == 23 && script[0] == OP_HASH160 && script[1] == 20 && script[22] == OP_EQUAL
    {
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&script[2..22]);
        return ScriptKind::PayToScriptHash { hash };
    }

    // <push N> <N bytes> OP_CHECKSIG — the obsolete direct-to-pubkey form.
    // Any plausible push opcode is accepted here so unknown leading bytes
    // in that range never fall through to a crash.
    if let Some((&push, rest)) = script.split_first() {
        if (0x01..=MAX_DIRECT_PUSH).contains(&push) {
            let n = push as usize;
            if rest.len() == n + 1 && rest[n] == OP_CHECKSIG {
                return ScriptKind::PayToPubkey {
                    pubkey: rest[..n].to_vec(),
                };
            }
        }
    }

    ScriptKind::Nonstandard {
        raw: script.to_vec(),
    }
}

/// The pieces of a standard signature script, for display only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigScriptParts {
    /// DER-encoded signature including the trailing sighash byte.
    pub signature: Vec<u8>,
    /// The pubkey push following the signature, when present.
    pub pubkey: Option<Vec<u8>>,
}

/// Split a signature script into signature and pubkey.
///
/// Recognizes `<push n: sig ending in SIGHASH_ALL> [<push m: pubkey>]`.
/// Returns `None` when the script does not match; callers fall back to
/// rendering raw hex. Never call this for coinbase inputs — their script
/// bytes are arbitrary miner data.
pub fn split_signature_script(script: &[u8]) -> Option<SigScriptParts> {
    let n = *script.first()? as usize;
    let sig = script.get(1..1 + n)?;
    if *sig.last()? != SIGHASH_ALL {
        return None;
    }
    let pubkey = match script.get(1 + n) {
        Some(&m) => script.get(2 + n..2 + n + m as usize).map(<[u8]>::to_vec),
        None => None,
    };
    Some(SigScriptParts {
        signature: sig.to_vec(),
        pubkey,
    })
}

/// Render a script as assembly for diagnostics.
///
/// Pushes appear as hex data, known opcodes by name, unknown ones as
/// `OP_UNKNOWN_0x..`. A push running past the end of the script renders
/// whatever bytes remain; the renderer never fails.
pub fn script_asm(script: &[u8]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut i = 0usize;
    while i < script.len() {
        let op = script[i];
        i += 1;
        let push_len = match op {
            0x01..=MAX_DIRECT_PUSH => Some(op as usize),
            // OP_PUSHDATA1 / 2 / 4
            0x4C => take_le(script, &mut i, 1),
            0x4D => take_le(script, &mut i, 2),
            0x4E => take_le(script, &mut i, 4),
            _ => None,
        };
        match push_len {
            Some(len) => {
                let end = (i + len).min(script.len());
                parts.push(hex::encode(&script[i..end]));
                i = end;
            }
            None => parts.push(match opcode_name(op) {
                Some(name) => name.to_string(),
                None => format!("OP_UNKNOWN_{op:#04x}"),
            }),
        }
    }
    parts.join(" ")
}

/// Read a little-endian push length of `width` bytes for OP_PUSHDATA.
fn take_le(script: &[u8], i: &mut usize, width: usize) -> Option<usize> {
    let bytes = script.get(*i..*i + width)?;
    *i += width;
    let mut len = 0usize;
    for (k, &b) in bytes.iter().enumerate() {
        len |= (b as usize) << (8 * k);
    }
    Some(len)
}

/// Standard name of an opcode, if it has one.
///
/// Direct pushes (0x01–0x4B) have no names; they are data lengths.
pub fn opcode_name(op: u8) -> Option<&'static str> {
    let name = match op {
        0x00 => "OP_0",
        0x4C => "OP_PUSHDATA1",
        0x4D => "OP_PUSHDATA2",
        0x4E => "OP_PUSHDATA4",
        0x4F => "OP_1NEGATE",
        0x50 => "OP_RESERVED",
        0x51 => "OP_1",
        0x52 => "OP_2",
        0x53 => "OP_3",
        0x54 => "OP_4",
        0x55 => "OP_5",
        0x56 => "OP_6",
        0x57 => "OP_7",
        0x58 => "OP_8",
        0x59 => "OP_9",
        0x5A => "OP_10",
        0x5B => "OP_11",
        0x5C => "OP_12",
        0x5D => "OP_13",
        0x5E => "OP_14",
        0x5F => "OP_15",
        0x60 => "OP_16",
        0x61 => "OP_NOP",
        0x62 => "OP_VER",
        0x63 => "OP_IF",
        0x64 => "OP_NOTIF",
        0x65 => "OP_VERIF",
        0x66 => "OP_VERNOTIF",
        0x67 => "OP_ELSE",
        0x68 => "OP_ENDIF",
        0x69 => "OP_VERIFY",
        0x6A => "OP_RETURN",
        0x6B => "OP_TOALTSTACK",
        0x6C => "OP_FROMALTSTACK",
        0x6D => "OP_2DROP",
        0x6E => "OP_2DUP",
        0x6F => "OP_3DUP",
        0x70 => "OP_2OVER",
        0x71 => "OP_2ROT",
        0x72 => "OP_2SWAP",
        0x73 => "OP_IFDUP",
        0x74 => "OP_DEPTH",
        0x75 => "OP_DROP",
        0x76 => "OP_DUP",
        0x77 => "OP_NIP",
        0x78 => "OP_OVER",
        0x79 => "OP_PICK",
        0x7A => "OP_ROLL",
        0x7B => "OP_ROT",
        0x7C => "OP_SWAP",
        0x7D => "OP_TUCK",
        0x7E => "OP_CAT",
        0x7F => "OP_SUBSTR",
        0x80 => "OP_LEFT",
        0x81 => "OP_RIGHT",
        0x82 => "OP_SIZE",
        0x83 => "OP_INVERT",
        0x84 => "OP_AND",
        0x85 => "OP_OR",
        0x86 => "OP_XOR",
        0x87 => "OP_EQUAL",
        0x88 => "OP_EQUALVERIFY",
        0x89 => "OP_RESERVED1",
        0x8A => "OP_RESERVED2",
        0x8B => "OP_1ADD",
        0x8C => "OP_1SUB",
        0x8D => "OP_2MUL",
        0x8E => "OP_2DIV",
        0x8F => "OP_NEGATE",
        0x90 => "OP_ABS",
        0x91 => "OP_NOT",
        0x92 => "OP_0NOTEQUAL",
        0x93 => "OP_ADD",
        0x94 => "OP_SUB",
        0x95 => "OP_MUL",
        0x96 => "OP_DIV",
        0x97 => "OP_MOD",
        0x98 => "OP_LSHIFT",
        0x99 => "OP_RSHIFT",
        0x9A => "OP_BOOLAND",
        0x9B => "OP_BOOLOR",
        0x9C => "OP_NUMEQUAL",
        0x9D => "OP_NUMEQUALVERIFY",
        0x9E => "OP_NUMNOTEQUAL",
        0x9F => "OP_LESSTHAN",
        0xA0 => "OP_GREATERTHAN",
        0xA1 => "OP_LESSTHANOREQUAL",
        0xA2 => "OP_GREATERTHANOREQUAL",
        0xA3 => "OP_MIN",
        0xA4 => "OP_MAX",
        0xA5 => "OP_WITHIN",
        0xA6 => "OP_RIPEMD160",
        0xA7 => "OP_SHA1",
        0xA8 => "OP_SHA256",
        0xA9 => "OP_HASH160",
        0xAA => "OP_HASH256",
        0xAB => "OP_CODESEPARATOR",
        0xAC => "OP_CHECKSIG",
        0xAD => "OP_CHECKSIGVERIFY",
        0xAE => "OP_CHECKMULTISIG",
        0xAF => "OP_CHECKMULTISIGVERIFY",
        0xB0 => "OP_NOP1",
        0xB1 => "OP_CHECKLOCKTIMEVERIFY",
        0xB2 => "OP_CHECKSEQUENCEVERIFY",
        0xB3 => "OP_NOP4",
        0xB4 => "OP_NOP5",
        0xB5 => "OP_NOP6",
        0xB6 => "OP_NOP7",
        0xB7 => "OP_NOP8",
        0xB8 => "OP_NOP9",
        0xB9 => "OP_NOP10",
        _ => return None,
    };
    Some(name)
}
