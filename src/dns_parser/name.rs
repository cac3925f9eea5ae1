use std::str::from_utf8;

use super::{ByteReader, ByteWriter, EncodeError, Error, NameError};

/// Labels are limited to 63 bytes, the length byte has two bits of tag.
pub const MAX_LABEL_LEN: usize = 63;

/// Names are limited to 255 bytes on the wire, length bytes and the root
/// label included.
pub const MAX_NAME_LEN: usize = 255;

/// Largest offset a compression pointer can hold.
pub const MAX_POINTER_OFFSET: u16 = 0x3fff;

/// How many compression pointers a single name may follow.
pub const MAX_POINTER_JUMPS: usize = 64;

const POINTER_TAG: u8 = 0b1100_0000;

impl ByteWriter {
    /// Writes a dot-separated name as a sequence of labels
    ///
    /// Without `pointer` the name is terminated by the root label. With it,
    /// the name is terminated by a compression pointer to `pointer`, which
    /// must be the offset of an already written name that is the suffix of
    /// this one. An empty `name` (or `"."`) writes just the terminator.
    pub fn name(&mut self, name: &str, pointer: Option<u16>) -> Result<&mut Self, Error> {
        let name = name.strip_suffix('.').unwrap_or(name);
        let labels: Vec<&str> = if name.is_empty() {
            Vec::new()
        } else {
            name.split('.').collect()
        };
        for label in &labels {
            if label.is_empty() {
                return Err(EncodeError::EmptyLabel.into());
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(EncodeError::LabelTooLong(label.len()).into());
            }
        }
        if let Some(offset) = pointer {
            if offset > MAX_POINTER_OFFSET {
                return Err(EncodeError::PointerOutOfRange(offset).into());
            }
        }

        for label in labels {
            self.byte(label.len() as u8).bytes(label.as_bytes());
        }
        match pointer {
            Some(offset) => self.short(u16::from(POINTER_TAG) << 8 | offset),
            None => self.byte(0),
        };
        Ok(self)
    }
}

impl<'a> ByteReader<'a> {
    /// Reads a possibly compressed name and returns it dot-separated
    ///
    /// Pointers are resolved against the whole packet and may only refer
    /// to data before the pointer itself. The resolved name may not be
    /// longer than `MAX_NAME_LEN` in uncompressed form.
    pub fn read_name(&mut self) -> Result<String, Error> {
        let mut labels = Vec::new();
        let mut wire_len = 1;
        self.read_labels(&mut labels, &mut wire_len, 0)?;
        Ok(labels.join("."))
    }

    fn read_labels(
        &mut self,
        labels: &mut Vec<String>,
        wire_len: &mut usize,
        jumps: usize,
    ) -> Result<(), Error> {
        loop {
            let at = self.pos;
            let len = self.byte()?;
            if len == 0 {
                return Ok(());
            }
            match len & POINTER_TAG {
                0 => {
                    *wire_len += 1 + len as usize;
                    if *wire_len > MAX_NAME_LEN {
                        return Err(NameError::NameTooLong.into());
                    }
                    let data = self.slice(len as usize)?;
                    let label = from_utf8(data).map_err(|_| NameError::InvalidLabel)?;
                    labels.push(label.to_owned());
                }
                POINTER_TAG => {
                    let low = self.byte()?;
                    let target = usize::from(len & !POINTER_TAG) << 8 | usize::from(low);
                    if target >= at {
                        return Err(NameError::ForwardPointer { at, target }.into());
                    }
                    if jumps >= MAX_POINTER_JUMPS {
                        return Err(NameError::TooManyPointers.into());
                    }
                    return ByteReader::at(self.original, target)
                        .read_labels(labels, wire_len, jumps + 1);
                }
                _ => return Err(NameError::UnknownLabelFormat(len).into()),
            }
        }
    }
}
