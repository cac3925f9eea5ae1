use mdns_packet::services::{CAPI_SERVICE_TYPE, MEDIASCAPE_SERVICE_TYPE};
use mdns_packet::{Message, Record, Section, Service, Type, CLASS_IN, CLASS_UNIQUE};

/// Prints the records and services of a captured mDNS packet, or the
/// browse query for both service types when no file is given.
pub fn main() {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters("mdns_packet=trace");
    builder.init();

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            let mut query = Message::new(0, 0);
            for service_type in &[MEDIASCAPE_SERVICE_TYPE, CAPI_SERVICE_TYPE] {
                query.push_record(
                    Section::Question,
                    Record::question(*service_type, Type::PTR, CLASS_IN | CLASS_UNIQUE),
                );
            }
            let bytes = query.serialize().unwrap();
            let hex: Vec<String> = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            println!("{}", hex.join(" "));
            return;
        }
    };

    let data = std::fs::read(&path).unwrap();
    let message = match Message::parse(&data) {
        Ok(message) => message,
        Err(err) => {
            eprintln!("couldn't parse {}: {}", path, err);
            std::process::exit(1);
        }
    };

    for &section in Section::ALL.iter() {
        for record in message.records(section, None) {
            match record.decoded_payload() {
                Some(data) => println!("{} {} {} {}", section, record.typ, record.name, data),
                None => println!("{} {} {}", section, record.typ, record.name),
            }
        }
    }

    for service_type in &[MEDIASCAPE_SERVICE_TYPE, CAPI_SERVICE_TYPE] {
        for service in Service::from_message(&message, service_type) {
            println!(
                "{} at {} -> {}",
                service.host,
                service.host_port(),
                service.uri.unwrap_or_default()
            );
        }
    }
}
