//! Cursor over a seekable byte source.
//!
//! All integers in the block storage format are little-endian and unsigned;
//! this module is the single place where endianness is handled. The total
//! source length is measured once at construction so that the stream driver
//! can distinguish a partial tail from a corrupt record without consuming
//! bytes.

use std::io::{Read, Seek, SeekFrom};

use crate::error::DecodeError;

/// Stateful cursor with typed little-endian reads.
///
/// Every read fails with [`DecodeError::Truncated`] when fewer bytes remain
/// than requested, carrying the current offset for diagnostics.
pub struct ByteReader<R> {
    inner: R,
    pos: u64,
    len: u64,
}

impl<R: Read + Seek> ByteReader<R> {
    /// Wrap a byte source, measuring its total length.
    ///
    /// The source is left positioned where it was; reading starts there.
    pub fn new(mut inner: R) -> Result<Self, DecodeError> {
        let pos = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(pos))?;
        Ok(Self { inner, pos, len })
    }

    /// Current offset from the start of the source.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Total length of the source in bytes.
    pub fn length(&self) -> u64 {
        self.len
    }

    /// Bytes left between the cursor and the end of the source.
    pub fn remaining(&self) -> u64 {
        self.len - self.pos
    }

    fn require(&self, wanted: u64) -> Result<(), DecodeError> {
        if self.remaining() < wanted {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                wanted,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read exactly `N` raw bytes, no endian interpretation.
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        self.require(N as u64)?;
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        self.pos += N as u64;
        Ok(buf)
    }

    /// Read `len` raw bytes into a vector.
    pub fn read_bytes(&mut self, len: u64) -> Result<Vec<u8>, DecodeError> {
        self.require(len)?;
        let mut buf = vec![0u8; len as usize];
        self.inner.read_exact(&mut buf)?;
        self.pos += len;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_fixed::<1>()?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_fixed::<2>()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_fixed::<4>()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_fixed::<8>()?))
    }
}
