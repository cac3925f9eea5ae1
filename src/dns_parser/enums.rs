use std::fmt;

/// The type of a DNS record
///
/// Only the types used for service discovery have a symbolic name. Any
/// other code is carried through untouched as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// a host address
    A,
    /// a domain name pointer
    PTR,
    /// text strings
    TXT,
    /// service location (RFC 2782)
    SRV,
    Unknown(u16),
}

impl Type {
    pub fn code(self) -> u16 {
        match self {
            Type::A => 1,
            Type::PTR => 12,
            Type::TXT => 16,
            Type::SRV => 33,
            Type::Unknown(code) => code,
        }
    }
}

impl From<u16> for Type {
    fn from(code: u16) -> Type {
        match code {
            1 => Type::A,
            12 => Type::PTR,
            16 => Type::TXT,
            33 => Type::SRV,
            code => Type::Unknown(code),
        }
    }
}

impl From<Type> for u16 {
    fn from(typ: Type) -> u16 {
        typ.code()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Type::A => fmt.write_str("A"),
            Type::PTR => fmt.write_str("PTR"),
            Type::TXT => fmt.write_str("TXT"),
            Type::SRV => fmt.write_str("SRV"),
            Type::Unknown(code) => write!(fmt, "TYPE{}", code),
        }
    }
}

/// One of the four record sections of a message, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Question,
    Answer,
    Authority,
    Additional,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Question,
        Section::Answer,
        Section::Authority,
        Section::Additional,
    ];
}

impl fmt::Display for Section {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(match *self {
            Section::Question => "question",
            Section::Answer => "answer",
            Section::Authority => "authority",
            Section::Additional => "additional",
        })
    }
}
