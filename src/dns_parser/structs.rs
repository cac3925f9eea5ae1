use log::trace;

use super::{ByteReader, Error, RRData, Registry, Section, Type};
use crate::txt::{self, Properties};

/// A DNS message
///
/// The section counts of the header are not stored, they are always the
/// lengths of the section vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub id: u16,
    /// Opcode, response code and the flag bits, kept as they are on the wire
    pub flags: u16,
    pub(crate) questions: Vec<Record>,
    pub(crate) answers: Vec<Record>,
    pub(crate) nameservers: Vec<Record>,
    pub(crate) additional: Vec<Record>,
}

impl Message {
    pub fn new(id: u16, flags: u16) -> Message {
        Message {
            id,
            flags,
            ..Message::default()
        }
    }

    pub fn section(&self, section: Section) -> &[Record] {
        match section {
            Section::Question => &self.questions,
            Section::Answer => &self.answers,
            Section::Authority => &self.nameservers,
            Section::Additional => &self.additional,
        }
    }

    fn section_mut(&mut self, section: Section) -> &mut Vec<Record> {
        match section {
            Section::Question => &mut self.questions,
            Section::Answer => &mut self.answers,
            Section::Authority => &mut self.nameservers,
            Section::Additional => &mut self.additional,
        }
    }

    pub fn section_len(&self, section: Section) -> usize {
        self.section(section).len()
    }

    /// Appends `record` to the end of `section`
    pub fn push_record(&mut self, section: Section, record: Record) {
        self.section_mut(section).push(record);
    }

    /// Records of `section` in wire order, only those of type `filter` if
    /// one is given
    pub fn records(
        &self,
        section: Section,
        filter: Option<Type>,
    ) -> impl Iterator<Item = &Record> + '_ {
        self.section(section)
            .iter()
            .filter(move |record| filter.map_or(true, |typ| record.typ == typ))
    }

    pub fn for_each_record<F>(&self, section: Section, filter: Option<Type>, callback: F)
    where
        F: FnMut(&Record),
    {
        self.records(section, filter).for_each(callback)
    }
}

/// TTL and data of an answer, authority or additional record
#[derive(Debug, Clone, PartialEq)]
struct ResourceData {
    ttl: u32,
    raw: Vec<u8>,
    decoded: Option<RRData>,
}

/// A single entry of any message section
///
/// Questions only have a name, type and class. All other records also
/// carry a TTL and their RDATA, which is decoded when the record is
/// created if the registry knows the type.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub typ: Type,
    pub class: u16,
    data: Option<ResourceData>,
}

impl Record {
    pub fn question<N: Into<String>>(name: N, typ: Type, class: u16) -> Record {
        Record {
            name: name.into(),
            typ,
            class,
            data: None,
        }
    }

    /// Creates an answer-family record, decoding `rdata` with the standard
    /// decoders
    pub fn answer<N: Into<String>>(
        name: N,
        typ: Type,
        class: u16,
        ttl: u32,
        rdata: Vec<u8>,
    ) -> Result<Record, Error> {
        Record::answer_with(name, typ, class, ttl, rdata, &Registry::default())
    }

    /// Like `answer`, with an explicit decoder registry
    ///
    /// Compressed names inside `rdata` can only refer to `rdata` itself.
    pub fn answer_with<N: Into<String>>(
        name: N,
        typ: Type,
        class: u16,
        ttl: u32,
        rdata: Vec<u8>,
        registry: &Registry,
    ) -> Result<Record, Error> {
        let decoded = registry.decode(typ, &mut ByteReader::new(&rdata))?;
        Ok(Record::with_data(name.into(), typ, class, ttl, rdata, decoded))
    }

    /// Creates a record from RDATA found inside a packet
    pub(crate) fn from_rdata(
        name: String,
        typ: Type,
        class: u16,
        ttl: u32,
        rdata: ByteReader<'_>,
        registry: &Registry,
    ) -> Result<Record, Error> {
        let raw = rdata.rest().to_vec();
        let decoded = registry.decode(typ, &mut rdata.clone())?;
        Ok(Record::with_data(name, typ, class, ttl, raw, decoded))
    }

    fn with_data(
        name: String,
        typ: Type,
        class: u16,
        ttl: u32,
        raw: Vec<u8>,
        decoded: Option<RRData>,
    ) -> Record {
        match decoded {
            Some(ref data) => trace!("type: {}, name: {}, data: {}", typ, name, data),
            None => trace!("type: {}, name: {}, {} bytes not decoded", typ, name, raw.len()),
        }
        Record {
            name,
            typ,
            class,
            data: Some(ResourceData { ttl, raw, decoded }),
        }
    }

    pub fn is_question(&self) -> bool {
        self.data.is_none()
    }

    pub fn ttl(&self) -> Option<u32> {
        self.data.as_ref().map(|data| data.ttl)
    }

    pub fn raw_payload(&self) -> Option<&[u8]> {
        self.data.as_ref().map(|data| &data.raw[..])
    }

    pub fn decoded_payload(&self) -> Option<&RRData> {
        self.data.as_ref().and_then(|data| data.decoded.as_ref())
    }

    /// Reads the raw RDATA as a single uncompressed name
    pub fn as_name(&self) -> Option<Result<String, Error>> {
        self.raw_payload()
            .map(|raw| ByteReader::new(raw).read_name())
    }

    /// The key/value pairs of a decoded TXT record
    pub fn txt_properties(&self) -> Option<Properties> {
        match self.decoded_payload() {
            Some(RRData::TXT(tokens)) => Some(txt::parse_properties(&tokens[..])),
            _ => None,
        }
    }
}
