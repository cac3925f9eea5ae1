//! The DNS packet codec
//!
//! Use [`Message::parse`] to turn a received packet into a [`Message`] and
//! [`Message::serialize`] to turn a [`Message`] of questions into bytes.
//! [`ByteReader`] and [`ByteWriter`] are the primitives both are built on.

mod builder;
mod enums;
mod error;
mod name;
mod parser;
mod reader;
mod rrdata;
mod structs;
mod writer;

pub use self::enums::{Section, Type};
pub use self::error::{EncodeError, Error, NameError, Result};
pub use self::name::{MAX_LABEL_LEN, MAX_NAME_LEN, MAX_POINTER_JUMPS, MAX_POINTER_OFFSET};
pub use self::parser::HEADER_SIZE;
pub use self::reader::ByteReader;
pub use self::rrdata::{Decoder, RRData, Registry};
pub use self::structs::{Message, Record};
pub use self::writer::ByteWriter;
