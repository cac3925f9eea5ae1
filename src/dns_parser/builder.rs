use super::{ByteWriter, Error, Message, Section};

impl Message {
    /// Serializes the message for sending over UDP
    ///
    /// Section counts are taken from the records actually present. Only
    /// questions can be written so far: any record in the answer, authority
    /// or additional section fails with `UnsupportedOperation`.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        let mut out = ByteWriter::new();
        out.short(self.id).short(self.flags);
        for &section in Section::ALL.iter() {
            out.short_len(self.section_len(section))?;
        }

        for &section in Section::ALL.iter() {
            for record in self.section(section) {
                if section != Section::Question {
                    // TODO: write ttl and rdata once RRData can be encoded
                    // back to the exact wire layout
                    return Err(Error::UnsupportedOperation(section));
                }
                out.name(&record.name, None)?
                    .short(record.typ.code())
                    .short(record.class);
            }
        }

        Ok(out.into_bytes())
    }
}
