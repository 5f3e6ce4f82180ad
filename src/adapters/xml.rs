//! SOAP 1.1 envelope encoding and a schema-less XML reader.
//!
//! Replies are decoded into a `serde_json::Value` tree keyed by element local
//! name. Repeated sibling elements collapse into an array, so a list with one
//! entry looks exactly like a single object; `core::normalize` evens that out.

use crate::adapters::soap::Credentials;
use crate::domain::model::SoapFault;
use crate::domain::params::RequestParams;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use serde_json::{Map, Value};
use std::fmt::Display;

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

pub const XML_SCHEMA_INSTANCE_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Key holding an element's text when it also carries attributes or children.
pub const TEXT_KEY: &str = "#text";

pub fn build_envelope(
    namespace: &str,
    method: &str,
    credentials: &Credentials,
    params: &RequestParams,
) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    xml.push_str(&format!(
        r#"<soap:Envelope xmlns:soap="{}" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">"#,
        SOAP_ENVELOPE_NS
    ));
    xml.push_str("<soap:Body>");
    xml.push_str(&format!(r#"<{} xmlns="{}">"#, method, escape(namespace)));

    xml.push_str("<credentials>");
    push_element(&mut xml, "CompanyId", &credentials.company_id);
    push_element(&mut xml, "IntegratorLoginId", &credentials.integrator_login_id);
    push_element(&mut xml, "IntegratorPassword", &credentials.integrator_password);
    xml.push_str("</credentials>");

    for (name, value) in params.iter() {
        push_element(&mut xml, name, &value.to_string());
    }

    xml.push_str(&format!("</{}>", method));
    xml.push_str("</soap:Body></soap:Envelope>");
    xml
}

fn push_element(xml: &mut String, name: &str, text: &str) {
    xml.push_str(&format!("<{0}>{1}</{0}>", name, escape(text)));
}

struct Frame {
    name: String,
    fields: Map<String, Value>,
    text: String,
    nil: bool,
}

impl Frame {
    fn root() -> Self {
        Self {
            name: String::new(),
            fields: Map::new(),
            text: String::new(),
            nil: false,
        }
    }

    fn open(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<Self, SoapFault> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut fields = Map::new();
        let mut nil = false;

        for attr in start.attributes() {
            let attr = attr.map_err(malformed)?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }

            let (namespace, local_name) = reader.resolve_attribute(attr.key);
            let in_xsi = matches!(
                namespace,
                ResolveResult::Bound(ns) if ns.as_ref() == XML_SCHEMA_INSTANCE_NS.as_bytes()
            );
            let local = String::from_utf8_lossy(local_name.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(malformed)?.into_owned();

            // xsi:type, xsi:nil 等屬性不屬於資料本身
            if in_xsi {
                if local == "nil" {
                    nil = value == "true" || value == "1";
                }
                continue;
            }
            fields.insert(local, Value::String(value));
        }

        Ok(Self {
            name,
            fields,
            text: String::new(),
            nil,
        })
    }

    fn close(self) -> (String, Value) {
        if self.nil && self.fields.is_empty() {
            return (self.name, Value::Null);
        }

        let has_text = !self.text.trim().is_empty();
        if self.fields.is_empty() {
            let text = if has_text { self.text } else { String::new() };
            return (self.name, Value::String(text));
        }

        let mut fields = self.fields;
        if has_text && !self.nil {
            fields.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        (self.name, Value::Object(fields))
    }
}

fn attach(parent: &mut Frame, name: String, value: Value) {
    match parent.fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.fields.insert(name, value);
        }
    }
}

fn malformed<E: Display>(err: E) -> SoapFault {
    SoapFault {
        code: Some("Client".to_string()),
        message: format!("Malformed SOAP response: {}", err),
    }
}

/// Decodes an XML document into a value tree rooted at an object holding the
/// document element.
pub fn parse_document(xml: &str) -> Result<Value, SoapFault> {
    let mut reader = NsReader::from_str(xml);
    let mut stack = vec![Frame::root()];

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(Frame::open(&reader, &start)?),
            Ok(Event::Empty(start)) => {
                let (name, value) = Frame::open(&reader, &start)?.close();
                let parent = stack.last_mut().ok_or_else(|| malformed("missing parent"))?;
                attach(parent, name, value);
            }
            Ok(Event::End(_)) => {
                if stack.len() < 2 {
                    return Err(malformed("unexpected closing tag"));
                }
                let (name, value) = stack
                    .pop()
                    .map(Frame::close)
                    .ok_or_else(|| malformed("missing element"))?;
                let parent = stack.last_mut().ok_or_else(|| malformed("missing parent"))?;
                attach(parent, name, value);
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(malformed)?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(malformed(e)),
        }
    }

    if stack.len() != 1 {
        return Err(malformed("unexpected end of document"));
    }
    let root = stack.pop().ok_or_else(|| malformed("empty document"))?;
    Ok(Value::Object(root.fields))
}

fn soap_body(document: &Value) -> Option<&Value> {
    document.get("Envelope").and_then(|envelope| envelope.get("Body"))
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get(TEXT_KEY).and_then(text_of),
        Value::Array(items) => items.first().and_then(text_of),
        _ => None,
    }
}

/// Looks for `Envelope/Body/Fault`. Handles both the SOAP 1.1
/// (`faultcode`/`faultstring`) and SOAP 1.2 (`Code/Value`, `Reason/Text`) layouts.
pub fn find_fault(document: &Value) -> Option<SoapFault> {
    let fault = soap_body(document)?.get("Fault")?;

    let code = fault
        .get("faultcode")
        .and_then(text_of)
        .or_else(|| fault.get("Code").and_then(|c| c.get("Value")).and_then(text_of))
        .map(|code| code.trim().to_string());
    let message = fault
        .get("faultstring")
        .and_then(text_of)
        .or_else(|| fault.get("Reason").and_then(|r| r.get("Text")).and_then(text_of))
        .unwrap_or_else(|| "Unknown SOAP fault".to_string());

    Some(SoapFault { code, message })
}

/// Returns the `{method}Response` element of a reply, or the fault it carries.
pub fn extract_response(document: &Value, method: &str) -> Result<Value, SoapFault> {
    if let Some(fault) = find_fault(document) {
        return Err(fault);
    }

    let body = soap_body(document).ok_or_else(|| SoapFault {
        code: Some("Client".to_string()),
        message: "Response is not a SOAP envelope".to_string(),
    })?;

    Ok(body
        .get(format!("{}Response", method).as_str())
        .cloned()
        .unwrap_or(Value::Null))
}
