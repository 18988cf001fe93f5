//! Forward-only little-endian reader over an in-memory byte buffer.

use crate::core::error::{Error, Result};

/// Cursor over a byte slice that decodes fixed-size little-endian fields.
///
/// Every read either consumes exactly the requested number of bytes or
/// fails with [`Error::Format`] without advancing.
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Take the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::Format(format!(
                "unexpected end of stream reading {} at offset {}: need {} bytes, {} available",
                what,
                self.pos,
                len,
                self.remaining()
            )));
        }
        let data: &'a [u8] = self.data;
        let bytes = &data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N, what)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        Ok(buf)
    }

    pub fn read_u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.read_array::<1>(what)?[0])
    }

    pub fn read_i8(&mut self, what: &str) -> Result<i8> {
        Ok(i8::from_le_bytes(self.read_array(what)?))
    }

    pub fn read_u16(&mut self, what: &str) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array(what)?))
    }

    pub fn read_i16(&mut self, what: &str) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array(what)?))
    }

    pub fn read_u32(&mut self, what: &str) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array(what)?))
    }

    pub fn read_i32(&mut self, what: &str) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array(what)?))
    }

    pub fn read_f32(&mut self, what: &str) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array(what)?))
    }

    /// Read `N` consecutive `i8` values.
    pub fn read_i8_array<const N: usize>(&mut self, what: &str) -> Result<[i8; N]> {
        let bytes = self.read_array::<N>(what)?;
        Ok(bytes.map(|b| b as i8))
    }

    /// Read `N` consecutive `i16` values.
    pub fn read_i16_array<const N: usize>(&mut self, what: &str) -> Result<[i16; N]> {
        let mut out = [0i16; N];
        for value in out.iter_mut() {
            *value = self.read_i16(what)?;
        }
        Ok(out)
    }

    /// Read `N` consecutive `f32` values.
    pub fn read_f32_array<const N: usize>(&mut self, what: &str) -> Result<[f32; N]> {
        let mut out = [0f32; N];
        for value in out.iter_mut() {
            *value = self.read_f32(what)?;
        }
        Ok(out)
    }

    /// Read `count` fixed-size records of `record_size` bytes each.
    ///
    /// The whole span is bounds-checked up front so a truncated array fails
    /// before any element is decoded.
    pub fn read_records<T>(
        &mut self,
        count: usize,
        record_size: usize,
        what: &str,
        mut decode: impl FnMut(&mut BinaryReader<'a>) -> Result<T>,
    ) -> Result<Vec<T>> {
        let total = count.checked_mul(record_size).ok_or_else(|| {
            Error::Format(format!("{} array of {} records overflows", what, count))
        })?;
        let span = self.read_bytes(total, what)?;

        let mut sub = BinaryReader::new(span);
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(decode(&mut sub)?);
        }
        Ok(out)
    }

    /// Read `count` little-endian `u16` values.
    pub fn read_u16_vec(&mut self, count: usize, what: &str) -> Result<Vec<u16>> {
        self.read_records(count, 2, what, |r| r.read_u16(what))
    }
}

/// Extract `width` bits starting at bit `lo` (bit 0 = least significant).
pub fn bits(value: u32, lo: u32, width: u32) -> u32 {
    (value >> lo) & ((1u32 << width) - 1)
}

/// Sign-extend the low `width` bits of `value`.
pub fn sign_extend(value: u32, width: u32) -> i32 {
    let shift = 32 - width;
    ((value << shift) as i32) >> shift
}
