use log::warn;

use super::{ByteReader, Error, Message, Record, Registry, Section, Type};

/// Size of the fixed header: id, flags and the four section counts
pub const HEADER_SIZE: usize = 12;

impl Message {
    /// Parses a packet, decoding record data with the standard decoders
    pub fn parse(data: &[u8]) -> Result<Message, Error> {
        Message::parse_with(data, &Registry::default())
    }

    /// Parses a packet, decoding record data with `registry`
    ///
    /// Any malformed or truncated part fails the whole parse. Bytes left
    /// over after the counted records are only reported in the log.
    pub fn parse_with(data: &[u8], registry: &Registry) -> Result<Message, Error> {
        let mut reader = ByteReader::new(data);
        let mut message = Message::new(reader.short()?, reader.short()?);
        let mut counts = [0u16; 4];
        for count in counts.iter_mut() {
            *count = reader.short()?;
        }

        for _ in 0..counts[0] {
            let name = reader.read_name()?;
            let typ = Type::from(reader.short()?);
            let class = reader.short()?;
            message.push_record(Section::Question, Record::question(name, typ, class));
        }

        for (&section, &count) in Section::ALL[1..].iter().zip(counts[1..].iter()) {
            for _ in 0..count {
                let name = reader.read_name()?;
                let typ = Type::from(reader.short()?);
                let class = reader.short()?;
                let ttl = reader.long()?;
                let rdlength = reader.short()?;
                let rdata = reader.sub_reader(usize::from(rdlength))?;
                let record = Record::from_rdata(name, typ, class, ttl, rdata, registry)?;
                message.push_record(section, record);
            }
        }

        if !reader.is_at_end() {
            warn!(
                "was not EOF on incoming packet: {} bytes left after {} records",
                reader.remaining(),
                counts.iter().map(|&count| usize::from(count)).sum::<usize>()
            );
        }
        Ok(message)
    }
}

#[cfg(test)]
mod test {
    use std::net::Ipv4Addr;
    use std::sync::{Mutex, Once};

    use log::{Level, LevelFilter, Log, Metadata};
    use serde_json::json;

    use crate::dns_parser::{
        ByteWriter, Error, Message, NameError, RRData, Registry, Section, Type, HEADER_SIZE,
    };

    /// Query for `_capi._tcp.local` PTR and `tv._capi._tcp.local` SRV, the
    /// second name compressed against the first
    const TWO_QUESTIONS: &[u8] = b"\x00\x00\x00\x00\x00\x02\x00\x00\x00\x00\x00\x00\
        \x05_capi\x04_tcp\x05local\x00\x00\x0c\x00\x01\
        \x02tv\xc0\x0c\x00\x21\x80\x01";

    fn rr(out: &mut ByteWriter, name: &str, pointer: Option<u16>, typ: u16, rdata: &[u8]) {
        out.name(name, pointer)
            .unwrap()
            .short(typ)
            .short(1)
            .long(120)
            .short(rdata.len() as u16)
            .bytes(rdata);
    }

    /// A response as a responder for `_capi._tcp.local` would send it:
    /// PTR in answers, SRV, TXT and A as additional records, all names
    /// compressed
    fn capi_response() -> Vec<u8> {
        let mut out = ByteWriter::new();
        out.short(0).short(0x8400);
        out.short(0).short(1).short(0).short(3);

        // PTR _capi._tcp.local -> tv._capi._tcp.local
        let service_type = out.len() as u16;
        out.name("_capi._tcp.local", None)
            .unwrap()
            .short(12)
            .short(1)
            .long(4500)
            .short(5);
        let instance = out.len() as u16;
        out.bytes(b"\x02tv").short(0xc000 | service_type);

        // SRV tv._capi._tcp.local -> 0 0 8080 box.local, "local" sits at
        // offset 11 of the service type
        let mut srv = ByteWriter::new();
        srv.short(0).short(0).short(8080).name("box", Some(service_type + 11)).unwrap();
        out.short(0xc000 | instance).short(33).short(0x8001).long(120);
        out.short(srv.len() as u16);
        let target = out.len() as u16 + 6;
        out.bytes(srv.as_bytes());

        rr(&mut out, "", Some(instance), 16, b"\x05id=15\x04flag\x06Path=/");
        rr(&mut out, "", Some(target), 1, b"\xc0\xa8\x01\x0a");
        out.into_bytes()
    }

    #[test]
    fn parse_two_questions() {
        let message = Message::parse(TWO_QUESTIONS).unwrap();
        assert_eq!(message.id, 0);
        assert_eq!(message.flags, 0);
        assert_eq!(message.section_len(Section::Question), 2);
        assert_eq!(message.section_len(Section::Answer), 0);
        assert_eq!(message.section_len(Section::Authority), 0);
        assert_eq!(message.section_len(Section::Additional), 0);

        let questions = message.section(Section::Question);
        assert_eq!(questions[0].name, "_capi._tcp.local");
        assert_eq!(questions[0].typ, Type::PTR);
        assert_eq!(questions[0].class, 1);
        assert!(questions[0].is_question());
        assert_eq!(questions[1].name, "tv._capi._tcp.local");
        assert_eq!(questions[1].typ, Type::SRV);
        assert_eq!(questions[1].class, 0x8001);

        let serialized = message.serialize().unwrap();
        assert_eq!(&serialized[4..6], b"\x00\x02");
        assert_eq!(Message::parse(&serialized).unwrap(), message);
    }

    #[test]
    fn parse_response() {
        let data = capi_response();
        let message = Message::parse(&data).unwrap();
        assert_eq!(message.flags, 0x8400);
        assert_eq!(message.section_len(Section::Question), 0);
        assert_eq!(message.section_len(Section::Answer), 1);
        assert_eq!(message.section_len(Section::Additional), 3);

        let ptr = &message.section(Section::Answer)[0];
        assert_eq!(ptr.name, "_capi._tcp.local");
        assert_eq!(ptr.ttl(), Some(4500));
        assert_eq!(
            ptr.decoded_payload(),
            Some(&RRData::PTR("tv._capi._tcp.local".into()))
        );
        assert_eq!(ptr.raw_payload(), Some(&b"\x02tv\xc0\x0c"[..]));

        let additional = message.section(Section::Additional);
        assert_eq!(additional[0].name, "tv._capi._tcp.local");
        assert_eq!(additional[0].class, 0x8001);
        assert_eq!(
            additional[0].decoded_payload(),
            Some(&RRData::SRV {
                priority: 0,
                weight: 0,
                port: 8080,
                target: "box.local".into(),
            })
        );
        assert_eq!(additional[1].name, "tv._capi._tcp.local");
        let properties = additional[1].txt_properties().unwrap();
        assert_eq!(properties["id"], json!(15));
        assert_eq!(properties["Path"], json!("/"));
        assert_eq!(additional[2].name, "box.local");
        assert_eq!(
            additional[2].decoded_payload(),
            Some(&RRData::A(Ipv4Addr::new(192, 168, 1, 10)))
        );

        let srv: Vec<_> = message.records(Section::Additional, Some(Type::SRV)).collect();
        assert_eq!(srv.len(), 1);
    }

    #[test]
    fn parse_with_empty_registry() {
        let data = capi_response();
        let message = Message::parse_with(&data, &Registry::empty()).unwrap();
        for record in message.records(Section::Additional, None) {
            assert!(record.raw_payload().is_some());
            assert!(record.decoded_payload().is_none());
        }
    }

    #[test]
    fn unknown_type_keeps_raw_payload() {
        let mut out = ByteWriter::new();
        out.short(1).short(0x8400).short(0).short(1).short(0).short(0);
        rr(&mut out, "x.local", None, 99, b"\xde\xad\xbe\xef");
        let message = Message::parse(out.as_bytes()).unwrap();
        let record = &message.section(Section::Answer)[0];
        assert_eq!(record.typ, Type::Unknown(99));
        assert_eq!(record.raw_payload(), Some(&b"\xde\xad\xbe\xef"[..]));
        assert_eq!(record.decoded_payload(), None);
    }

    #[test]
    fn truncated_header() {
        assert_eq!(
            Message::parse(&TWO_QUESTIONS[..7]).unwrap_err(),
            Error::TruncatedInput {
                offset: 6,
                needed: 2
            }
        );
        assert!(Message::parse(b"").is_err());
    }

    #[test]
    fn truncated_records() {
        for len in HEADER_SIZE..TWO_QUESTIONS.len() {
            assert!(Message::parse(&TWO_QUESTIONS[..len]).is_err(), "{}", len);
        }
        let data = capi_response();
        for len in HEADER_SIZE..data.len() {
            assert!(Message::parse(&data[..len]).is_err(), "{}", len);
        }
    }

    #[test]
    fn rdlength_past_end() {
        let mut out = ByteWriter::new();
        out.short(1).short(0).short(0).short(1).short(0).short(0);
        out.name("x.local", None).unwrap().short(1).short(1).long(0).short(8);
        out.bytes(b"\x0a\x00\x00\x01");
        match Message::parse(out.as_bytes()).unwrap_err() {
            Error::TruncatedInput { needed: 8, .. } => (),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn forward_pointer_fails_parse() {
        let data = b"\x00\x00\x00\x00\x00\x01\x00\x00\x00\x00\x00\x00\
            \xc0\x20\x00\x01\x00\x01";
        assert_eq!(
            Message::parse(data).unwrap_err(),
            Error::MalformedName(NameError::ForwardPointer { at: 12, target: 32 })
        );
    }

    #[test]
    fn long_names_fail_parse() {
        let label = "x".repeat(63);
        let mut out = ByteWriter::new();
        out.short(0).short(0).short(5).short(0).short(0).short(0);
        let mut last = out.len();
        out.name(&label, None).unwrap().short(1).short(1);
        for _ in 0..3 {
            let at = out.len();
            out.name(&label, Some(last as u16)).unwrap().short(1).short(1);
            last = at;
        }
        out.short(0xc000 | last as u16).short(1).short(1);
        assert_eq!(
            Message::parse(out.as_bytes()).unwrap_err(),
            Error::MalformedName(NameError::NameTooLong)
        );
    }

    struct WarnCapture;

    static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
    static CAPTURE: WarnCapture = WarnCapture;

    impl Log for WarnCapture {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                WARNINGS.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    fn capture_warnings() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            log::set_logger(&CAPTURE).unwrap();
            log::set_max_level(LevelFilter::Warn);
        });
    }

    #[test]
    fn trailing_bytes_are_tolerated() {
        capture_warnings();
        let mut data = TWO_QUESTIONS.to_vec();
        data.extend_from_slice(b"\x00\x00\x00");
        let message = Message::parse(&data).unwrap();
        assert_eq!(message.section_len(Section::Question), 2);
        assert!(WARNINGS
            .lock()
            .unwrap()
            .iter()
            .any(|warning| warning.contains("3 bytes left after 2 records")));
    }
}
