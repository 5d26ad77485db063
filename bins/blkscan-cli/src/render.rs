//! Explorer-style listing of decoded blocks.
//!
//! Hashes print in reversed (big-endian) hex, the convention block
//! explorers use; `Hash256`'s `Display` already does the reversal.

use chrono::DateTime;

use blkscan_core::block::Block;
use blkscan_core::script::{script_asm, split_signature_script};
use blkscan_core::transaction::{Transaction, TxInput, TxOutput};

const SATOSHI_PER_BTC: f64 = 100_000_000.0;

pub fn print_block(block: &Block, index: u64) {
    println!("#################### Blocks[{index}] ####################");
    println!("  Magic No:          {:#010X}", block.magic);
    println!("  Blocksize (bytes): {}", block.size);
    println!("  Block Hash:        {} (derived from header)", block.hash());
    println!(
        "  Target:            {} (derived from bits)",
        block.header.target()
    );
    println!();
    println!("  Version            {}", block.header.version);
    println!("  Prev. Block Hash   {}", block.header.prev_hash);
    println!("  Merkle Root Hash   {} (verified)", block.header.merkle_root);
    println!(
        "  Timestamp          {} / {:#x} / {}",
        block.header.timestamp,
        block.header.timestamp,
        format_utc(block.header.timestamp)
    );
    println!(
        "  Difficulty         {:.2} ({:#010x} bits)",
        block.header.target().difficulty(),
        block.header.bits
    );
    println!("  Nonce              {}", block.header.nonce);
    println!();
    println!("  Transaction Count: {}", block.transactions.len());
    for (i, tx) in block.transactions.iter().enumerate() {
        print_transaction(tx, i);
    }
}

fn print_transaction(tx: &Transaction, index: usize) {
    println!("    ##### Transactions[{index}] #####");
    println!("      Txid:            {}", tx.txid());
    println!("      Version:         {}", tx.version);
    println!("      Input Count:     {}", tx.inputs.len());
    for (i, input) in tx.inputs.iter().enumerate() {
        print_input(input, i);
    }
    println!("      Output Count:    {}", tx.outputs.len());
    for (i, output) in tx.outputs.iter().enumerate() {
        print_output(output, i);
    }
    println!("      Lock Time:       {}", tx.lock_time);
}

fn print_input(input: &TxInput, index: usize) {
    println!("      ## Inputs[{index}] ##");
    match input.coinbase_data() {
        Some(data) => {
            println!("        Out Index:       coinbase (special index)");
            println!("        Coinbase Text:   {}", hex::encode(data));
            println!(
                "        ScriptSig (hex): {}",
                hex::encode(&input.signature_script)
            );
        }
        None => {
            println!("        Prev. Tx Hash:   {}", input.prev_tx_hash);
            println!("        Out Index:       {}", input.prev_index);
            match split_signature_script(&input.signature_script) {
                Some(parts) => {
                    println!("        Signature:       {}", hex::encode(&parts.signature));
                    if let Some(pubkey) = &parts.pubkey {
                        println!("        Pubkey:          {}", hex::encode(pubkey));
                    }
                }
                None => println!(
                    "        ScriptSig (hex): {}",
                    hex::encode(&input.signature_script)
                ),
            }
        }
    }
    println!("        Sequence:        {}", input.sequence);
}

fn print_output(output: &TxOutput, index: usize) {
    let kind = output.script_kind();
    println!("      ## Outputs[{index}] ##");
    println!(
        "        Value:           {} satoshi ({} BTC)",
        output.value,
        output.value as f64 / SATOSHI_PER_BTC
    );
    println!("        Script Type:     {}", kind.label());
    println!(
        "        Assembly:        {}",
        script_asm(&output.pubkey_script)
    );
    if let Some(address) = kind.address() {
        println!("        Address:         {address}");
    }
}

fn format_utc(timestamp: u32) -> String {
    DateTime::from_timestamp(i64::from(timestamp), 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "invalid timestamp".to_string())
}
