//! Stream driver: walk a file of consecutive block records.
//!
//! Blocks are emitted in file order. The format is not seekable — each
//! record's size field names only its own payload — so skipping still fully
//! decodes (and verifies) the skipped blocks. The driver stops cleanly at a
//! partial tail and fuses after the first failure.

use std::io::{Read, Seek};

use crate::block::Block;
use crate::error::{DecodeError, StreamError};
use crate::reader::ByteReader;

/// Iterator over the blocks of a `blk*.dat` byte source.
///
/// Yields `Ok(Block)` for every verified block in the emission window and
/// at most one `Err(StreamError)`; after an error, or after the window is
/// exhausted, the iterator returns `None` forever.
pub struct BlockStream<R> {
    reader: ByteReader<R>,
    /// Index of the next block to decode.
    index: u64,
    /// Number of leading blocks to decode but not emit.
    start: u64,
    /// Emission budget; `None` emits to end of stream.
    remaining: Option<u64>,
    done: bool,
}

impl<R: Read + Seek> BlockStream<R> {
    /// Start a scan at the current position of `source`.
    pub fn new(source: R) -> Result<Self, DecodeError> {
        Ok(Self {
            reader: ByteReader::new(source)?,
            index: 0,
            start: 0,
            remaining: None,
            done: false,
        })
    }

    /// Restrict emission to `count` blocks starting at block `start`.
    ///
    /// The first `start` blocks are still decoded and verified; `None` for
    /// `count` emits everything from `start` to the end of the stream.
    pub fn with_range(mut self, start: u64, count: Option<u64>) -> Self {
        self.start = start;
        self.remaining = count;
        self
    }

    /// Number of blocks decoded so far, including skipped ones.
    pub fn blocks_parsed(&self) -> u64 {
        self.index
    }
}

impl<R: Read + Seek> Iterator for BlockStream<R> {
    type Item = Result<Block, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.remaining == Some(0) {
            return None;
        }
        loop {
            match Block::decode(&mut self.reader) {
                Ok(Some(block)) => {
                    let index = self.index;
                    self.index += 1;
                    if index < self.start {
                        tracing::debug!(index, "skipping block before start");
                        continue;
                    }
                    if let Some(remaining) = &mut self.remaining {
                        *remaining -= 1;
                    }
                    return Some(Ok(block));
                }
                Ok(None) => {
                    tracing::debug!(parsed = self.index, "end of stream");
                    self.done = true;
                    return None;
                }
                Err(source) => {
                    self.done = true;
                    return Some(Err(StreamError {
                        index: self.index,
                        source,
                    }));
                }
            }
        }
    }
}
