//! Instruction data parsing and packing
//!
//! Every Harbor instruction is a one-byte discriminator optionally followed
//! by a little-endian `u64` argument.

use crate::error::HarborError;

/// Read a u8 from instruction data
#[inline]
pub fn read_u8(data: &[u8], offset: usize) -> Result<u8, HarborError> {
    data.get(offset).copied().ok_or(HarborError::InvalidInstruction)
}

/// Read a u64 (little-endian) from instruction data
#[inline]
pub fn read_u64(data: &[u8], offset: usize) -> Result<u64, HarborError> {
    read_bytes::<8>(data, offset).map(u64::from_le_bytes)
}

/// Read a fixed-size byte array from instruction data
#[inline]
pub fn read_bytes<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], HarborError> {
    let end = offset.checked_add(N).ok_or(HarborError::InvalidInstruction)?;
    let slice = data.get(offset..end).ok_or(HarborError::InvalidInstruction)?;
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(slice);
    Ok(bytes)
}

/// Discriminator followed by a u64 argument
#[inline]
pub fn pack_u64(discriminator: u8, value: u64) -> [u8; 9] {
    let mut out = [0u8; 9];
    out[0] = discriminator;
    out[1..].copy_from_slice(&value.to_le_bytes());
    out
}

/// Sequential reader over instruction data
pub struct InstructionReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> InstructionReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, HarborError> {
        let val = read_u8(self.data, self.offset)?;
        self.offset += 1;
        Ok(val)
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, HarborError> {
        let val = read_u64(self.data, self.offset)?;
        self.offset += 8;
        Ok(val)
    }

    #[inline]
    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], HarborError> {
        let val = read_bytes(self.data, self.offset)?;
        self.offset += N;
        Ok(val)
    }

    /// Fail if unread bytes remain
    #[inline]
    pub fn finish(&self) -> Result<(), HarborError> {
        if self.remaining() != 0 {
            return Err(HarborError::InvalidInstruction);
        }
        Ok(())
    }
}
