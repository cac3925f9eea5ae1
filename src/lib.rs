//! Parsing and building of mDNS / DNS-SD packets
//!
//! [`dns_parser`] turns received packets into [`Message`]s and question-only
//! messages back into bytes. [`txt`] and [`services`] build on the decoded
//! records: TXT strings become key/value properties and PTR/SRV/TXT/A
//! records of one message become [`Service`]s with a connection URI.
//!
//! Nothing here touches the network, the caller owns the sockets.

pub mod dns_parser;
pub mod services;
pub mod txt;

pub use crate::dns_parser::{Error, Message, RRData, Record, Registry, Section, Type};
pub use crate::services::{Service, ServiceFamily};
pub use crate::txt::Properties;

/// Class code of the Internet class
pub const CLASS_IN: u16 = 1;

/// In mDNS questions this bit of the class asks for a unicast response, in
/// answers it marks a record as unique (cache flush).
pub const CLASS_UNIQUE: u16 = 0x8000;
