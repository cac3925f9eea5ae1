use std::convert::TryFrom;

use byteorder::{BigEndian, ByteOrder};

use super::{EncodeError, Error};

/// Growable buffer that packets are written into
///
/// All integers are written big-endian. Every method returns the writer so
/// calls can be chained; the ones that can reject their input return it
/// wrapped in a `Result`.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> ByteWriter {
        ByteWriter::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> ByteWriter {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn byte(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn short(&mut self, v: u16) -> &mut Self {
        let mut bytes = [0u8; 2];
        BigEndian::write_u16(&mut bytes, v);
        self.bytes(&bytes)
    }

    pub fn long(&mut self, v: u32) -> &mut Self {
        let mut bytes = [0u8; 4];
        BigEndian::write_u32(&mut bytes, v);
        self.bytes(&bytes)
    }

    /// Writes a count or length as a 16 bit integer
    ///
    /// Fails instead of wrapping when `v` is larger than 65535.
    pub fn short_len(&mut self, v: usize) -> Result<&mut Self, Error> {
        let v = u16::try_from(v).map_err(|_| EncodeError::OutOfRange {
            value: v as u64,
            bits: 16,
        })?;
        Ok(self.short(v))
    }

    pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(data);
        self
    }

    /// Current size of the packet, which is also the offset the next
    /// write lands at
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
