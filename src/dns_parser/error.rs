use thiserror::Error;

use super::{Section, Type};

/// Error parsing or building a DNS packet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("packet has incomplete data: needed {needed} bytes at offset {offset}")]
    TruncatedInput { offset: usize, needed: usize },
    #[error("malformed name: {0}")]
    MalformedName(#[from] NameError),
    #[error("can't yet serialize records of the {0} section")]
    UnsupportedOperation(Section),
    #[error("can't encode value: {0}")]
    EncodingError(#[from] EncodeError),
    #[error("wrong size ({len} bytes) of RDATA for type {typ}")]
    WrongRdataLength { typ: Type, len: usize },
}

/// Why a name on the wire could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("pointer at offset {at} refers forward to offset {target}")]
    ForwardPointer { at: usize, target: usize },
    #[error("name is longer than 255 bytes")]
    NameTooLong,
    #[error("too many compression pointers")]
    TooManyPointers,
    #[error("label has unknown label format (length byte {0:#04x})")]
    UnknownLabelFormat(u8),
    #[error("label is not valid UTF-8")]
    InvalidLabel,
}

/// Why a value could not be written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{value} does not fit in {bits} bits")]
    OutOfRange { value: u64, bits: u8 },
    #[error("label of {0} bytes is longer than 63 bytes")]
    LabelTooLong(usize),
    #[error("empty label in the middle of a name")]
    EmptyLabel,
    #[error("compression pointer offset {0} is larger than 0x3fff")]
    PointerOutOfRange(u16),
}

pub type Result<T> = std::result::Result<T, Error>;
