use log::{debug, trace};
use serde_json::Value;
use std::net::Ipv4Addr;

use crate::dns_parser::{Message, RRData, Record, Section, Type};
use crate::txt::Properties;

pub const MEDIASCAPE_SERVICE_TYPE: &str = "_mediascape-http._tcp.local";
pub const CAPI_SERVICE_TYPE: &str = "_capi._tcp.local";

const RESOURCE_SECTIONS: &[Section] = &[Section::Answer, Section::Authority, Section::Additional];

/// Service types that a connection URI can be derived for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFamily {
    /// plain HTTP, `http://host:port`
    Mediascape,
    /// websocket, `ws://host:port` followed by the `Path` TXT property
    Capi,
}

impl ServiceFamily {
    pub fn from_service_type(typ: &str) -> Option<ServiceFamily> {
        if typ.eq_ignore_ascii_case(MEDIASCAPE_SERVICE_TYPE) {
            Some(ServiceFamily::Mediascape)
        } else if typ.eq_ignore_ascii_case(CAPI_SERVICE_TYPE) {
            Some(ServiceFamily::Capi)
        } else {
            None
        }
    }

    pub fn service_type(self) -> &'static str {
        match self {
            ServiceFamily::Mediascape => MEDIASCAPE_SERVICE_TYPE,
            ServiceFamily::Capi => CAPI_SERVICE_TYPE,
        }
    }

    pub fn uri(self, host_port: &str, txt: &Properties) -> String {
        match self {
            ServiceFamily::Mediascape => format!("http://{}", host_port),
            ServiceFamily::Capi => {
                let path = match txt.get("Path") {
                    Some(Value::String(path)) => path.clone(),
                    Some(other) => other.to_string(),
                    None => String::new(),
                };
                format!("ws://{}{}", host_port, path)
            }
        }
    }
}

/// A service instance as announced in one message
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    /// full instance name, e.g. `tv._capi._tcp.local`
    pub name: String,
    /// e.g. `_capi._tcp.local`
    pub typ: String,
    /// the instance name without the service type, e.g. `tv`
    pub host: String,
    /// host name from the SRV record
    pub target: String,
    pub port: u16,
    pub address: Option<Ipv4Addr>,
    pub txt: Properties,
    pub uri: Option<String>,
}

impl Service {
    pub fn new(
        name: String,
        typ: String,
        target: String,
        port: u16,
        address: Option<Ipv4Addr>,
        txt: Properties,
    ) -> Service {
        let host = instance_host(&name, &typ).to_owned();
        let uri = ServiceFamily::from_service_type(&typ)
            .map(|family| family.uri(&format!("{}:{}", target, port), &txt));
        Service {
            name,
            typ,
            host,
            target,
            port,
            address,
            txt,
            uri,
        }
    }

    pub fn host_port(&self) -> String {
        format!("{}:{}", self.target, self.port)
    }

    /// Collects every instance of `service_type` announced in `message`
    ///
    /// Each PTR record for the type names an instance, repeated instances
    /// are only returned once. The instance needs an SRV record in the same
    /// message, its TXT record and the A record of the SRV target are picked
    /// up when present.
    pub fn from_message(message: &Message, service_type: &str) -> Vec<Service> {
        let mut services = Vec::new();
        for ptr in resource_records(message, Type::PTR) {
            if !ptr.name.eq_ignore_ascii_case(service_type) {
                continue;
            }
            let instance = match ptr.decoded_payload() {
                Some(RRData::PTR(instance)) => instance,
                _ => continue,
            };
            if services
                .iter()
                .any(|svc: &Service| svc.name.eq_ignore_ascii_case(instance))
            {
                continue;
            }

            let srv = find_record(message, Type::SRV, instance).and_then(|srv| {
                match srv.decoded_payload() {
                    Some(RRData::SRV { port, target, .. }) => Some((target.clone(), *port)),
                    _ => None,
                }
            });
            let (target, port) = match srv {
                Some(srv) => srv,
                None => {
                    debug!("no SRV record for {} in message {}", instance, message.id);
                    continue;
                }
            };

            let txt = find_record(message, Type::TXT, instance)
                .and_then(Record::txt_properties)
                .unwrap_or_default();
            let address = find_record(message, Type::A, &target).and_then(|a| {
                match a.decoded_payload() {
                    Some(RRData::A(ip)) => Some(*ip),
                    _ => None,
                }
            });

            let service = Service::new(
                instance.clone(),
                service_type.to_owned(),
                target,
                port,
                address,
                txt,
            );
            trace!("found {:?}", service);
            services.push(service);
        }
        services
    }
}

/// Answer, authority and additional records of type `typ`
fn resource_records(message: &Message, typ: Type) -> impl Iterator<Item = &Record> {
    RESOURCE_SECTIONS
        .iter()
        .flat_map(move |&section| message.records(section, Some(typ)))
}

fn find_record<'a>(message: &'a Message, typ: Type, name: &str) -> Option<&'a Record> {
    resource_records(message, typ).find(|record| record.name.eq_ignore_ascii_case(name))
}

fn instance_host<'a>(name: &'a str, typ: &str) -> &'a str {
    let split = name.len().saturating_sub(typ.len() + 1);
    if split > 0 && name.is_char_boundary(split) {
        let (host, suffix) = name.split_at(split);
        if suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(typ) {
            return host;
        }
    }
    name
}
