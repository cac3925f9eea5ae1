use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;

use super::{ByteReader, Error, Type};

/// The enumeration that represents known types of DNS resource records data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RRData {
    A(Ipv4Addr),
    PTR(String),
    SRV {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    /// The raw character strings, usually `key=value` or a bare `key`
    TXT(Vec<String>),
}

impl RRData {
    pub fn typ(&self) -> Type {
        match *self {
            RRData::A(..) => Type::A,
            RRData::PTR(..) => Type::PTR,
            RRData::SRV { .. } => Type::SRV,
            RRData::TXT(..) => Type::TXT,
        }
    }
}

impl fmt::Display for RRData {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RRData::A(ip) => write!(fmt, "{}", ip),
            RRData::PTR(ref name) => fmt.write_str(name),
            RRData::SRV {
                priority,
                weight,
                port,
                ref target,
            } => write!(fmt, "{} {} {} {}", priority, weight, port, target),
            RRData::TXT(ref strings) => write!(fmt, "{:?}", strings),
        }
    }
}

/// Decodes the RDATA of one record type
///
/// The reader is limited to the RDATA but names inside it can still refer
/// back into the rest of the packet.
pub type Decoder = fn(&mut ByteReader<'_>) -> Result<RRData, Error>;

fn parse_a(rdata: &mut ByteReader<'_>) -> Result<RRData, Error> {
    if rdata.remaining() != 4 {
        return Err(Error::WrongRdataLength {
            typ: Type::A,
            len: rdata.remaining(),
        });
    }
    Ok(RRData::A(Ipv4Addr::from(rdata.long()?)))
}

fn parse_ptr(rdata: &mut ByteReader<'_>) -> Result<RRData, Error> {
    Ok(RRData::PTR(rdata.read_name()?))
}

fn parse_srv(rdata: &mut ByteReader<'_>) -> Result<RRData, Error> {
    Ok(RRData::SRV {
        priority: rdata.short()?,
        weight: rdata.short()?,
        port: rdata.short()?,
        target: rdata.read_name()?,
    })
}

fn parse_txt(rdata: &mut ByteReader<'_>) -> Result<RRData, Error> {
    Ok(RRData::TXT(rdata.read_string_list()?))
}

/// Table of RDATA decoders keyed by numeric type code
///
/// Build one up front and share it by reference; lookups never mutate it.
#[derive(Clone)]
pub struct Registry {
    decoders: HashMap<u16, Decoder>,
}

impl Registry {
    /// A registry that decodes nothing, every record keeps only its raw
    /// RDATA
    pub fn empty() -> Registry {
        Registry {
            decoders: HashMap::new(),
        }
    }

    /// Adds a decoder for `typ`, replacing any previous one
    pub fn register(&mut self, typ: Type, decoder: Decoder) -> &mut Self {
        self.decoders.insert(typ.code(), decoder);
        self
    }

    pub fn decoder(&self, typ: Type) -> Option<Decoder> {
        self.decoders.get(&typ.code()).copied()
    }

    /// Runs the decoder for `typ` over `rdata`
    ///
    /// Returns `Ok(None)` when no decoder is registered for the type.
    pub fn decode(&self, typ: Type, rdata: &mut ByteReader<'_>) -> Result<Option<RRData>, Error> {
        match self.decoder(typ) {
            Some(decoder) => decoder(rdata).map(Some),
            None => Ok(None),
        }
    }
}

impl Default for Registry {
    /// The decoders for A, PTR, SRV and TXT records
    fn default() -> Registry {
        let mut registry = Registry::empty();
        registry
            .register(Type::A, parse_a)
            .register(Type::PTR, parse_ptr)
            .register(Type::SRV, parse_srv)
            .register(Type::TXT, parse_txt);
        registry
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut types: Vec<Type> = self.decoders.keys().map(|&code| Type::from(code)).collect();
        types.sort_by_key(|typ| typ.code());
        fmt.debug_struct("Registry").field("types", &types).finish()
    }
}
