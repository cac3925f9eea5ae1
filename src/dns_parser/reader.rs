use byteorder::{BigEndian, ByteOrder};

use super::Error;

/// Forward-only cursor over a received packet
///
/// The reader always keeps the whole packet around, even when it is limited
/// to a part of it (see `sub_reader`), because compressed names may point
/// anywhere before the current position.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    pub(crate) original: &'a [u8],
    pub(crate) pos: usize,
    end: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> ByteReader<'a> {
        ByteReader {
            original: data,
            pos: 0,
            end: data.len(),
        }
    }

    /// A reader starting at `pos` of `original`
    pub(crate) fn at(original: &'a [u8], pos: usize) -> ByteReader<'a> {
        ByteReader {
            original,
            pos,
            end: original.len(),
        }
    }

    /// Offset of the cursor from the start of the packet
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.end
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], Error> {
        if self.remaining() < needed {
            return Err(Error::TruncatedInput {
                offset: self.pos,
                needed,
            });
        }
        let data = &self.original[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(data)
    }

    pub fn byte(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }

    pub fn short(&mut self) -> Result<u16, Error> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    pub fn long(&mut self) -> Result<u32, Error> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }

    /// Borrows the next `len` bytes and skips past them
    pub fn slice(&mut self, len: usize) -> Result<&'a [u8], Error> {
        self.take(len)
    }

    /// Everything between the cursor and the end, without consuming it
    pub fn rest(&self) -> &'a [u8] {
        &self.original[self.pos..self.end]
    }

    /// Splits off a reader limited to the next `len` bytes and skips past
    /// them
    pub fn sub_reader(&mut self, len: usize) -> Result<ByteReader<'a>, Error> {
        let start = self.pos;
        self.take(len)?;
        Ok(ByteReader {
            original: self.original,
            pos: start,
            end: start + len,
        })
    }

    /// Reads one character string: a length byte followed by that many
    /// bytes
    pub fn read_string(&mut self) -> Result<String, Error> {
        let len = self.byte()? as usize;
        let data = self.take(len)?;
        Ok(String::from_utf8_lossy(data).into_owned())
    }

    /// Reads character strings until the reader is exhausted or an empty
    /// string is found
    pub fn read_string_list(&mut self) -> Result<Vec<String>, Error> {
        let mut strings = Vec::new();
        while !self.is_at_end() {
            let s = self.read_string()?;
            if s.is_empty() {
                break;
            }
            strings.push(s);
        }
        Ok(strings)
    }
}
