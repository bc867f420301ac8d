//! Replays an XML document into the event-receiver core.

use crate::error::RdfXmlError;
use crate::parser::{RdfXmlParser, XmlAttribute};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, ResolveResult};
use quick_xml::NsReader;
use rill_api::sink::TripleSink;
use std::io::BufRead;
use std::str;

struct OwnedAttribute {
    ns_uri: String,
    local_name: String,
    qname: String,
    value: String,
}

impl<S: TripleSink> RdfXmlParser<S> {
    /// Parses a complete RDF/XML document from `read`, bracketing it with
    /// the stream lifecycle calls on the sink.
    ///
    /// The document is walked with a namespace-resolving XML reader; empty
    /// elements are expanded so the grammar only sees start/end pairs.
    /// CDATA sections are forwarded as character data. The document must be
    /// UTF-8 encoded.
    pub fn parse_document<R: BufRead>(&mut self, read: R) -> Result<(), RdfXmlError<S::Error>> {
        let mut reader = NsReader::from_reader(read);
        reader.config_mut().expand_empty_elements = true;
        let mut buffer = Vec::new();
        self.start_stream()?;
        self.start_document()?;
        loop {
            buffer.clear();
            match reader
                .read_event_into(&mut buffer)
                .map_err(RdfXmlError::from)?
            {
                Event::Start(event) => self.forward_start_event(&reader, &event)?,
                Event::End(event) => {
                    let (resolution, local_name) = reader.resolve_element(event.name());
                    let ns_uri = decode_resolution(resolution)?;
                    let local_name = decode_utf8(local_name.into_inner())?.to_owned();
                    let qname = decode_utf8(event.name().into_inner())?.to_owned();
                    self.end_element(&ns_uri, &local_name, &qname)?;
                }
                Event::Text(event) => {
                    let text = event.unescape().map_err(RdfXmlError::from)?;
                    self.characters(&text)?;
                }
                Event::CData(event) => {
                    let text = decode_utf8(&event)?.to_owned();
                    self.characters(&text)?;
                }
                Event::Comment(event) => {
                    let text = decode_utf8(&event)?.to_owned();
                    self.comment(&text)?;
                }
                Event::PI(event) => {
                    let content = decode_utf8(&event)?;
                    let (target, data) = match content.split_once(|c: char| c.is_ascii_whitespace())
                    {
                        Some((target, data)) => (target, data),
                        None => (content, ""),
                    };
                    let (target, data) = (target.to_owned(), data.to_owned());
                    self.processing_instruction(&target, &data)?;
                }
                Event::Decl(_) | Event::DocType(_) | Event::Empty(_) => (),
                Event::Eof => break,
            }
        }
        self.end_document()?;
        self.end_stream()
    }

    fn forward_start_event<R: BufRead>(
        &mut self,
        reader: &NsReader<R>,
        event: &BytesStart<'_>,
    ) -> Result<(), RdfXmlError<S::Error>> {
        // namespace declarations are reported before the element itself,
        // the way a SAX reader orders its callbacks
        let mut attributes = Vec::new();
        for attribute in event.attributes() {
            let attribute =
                attribute.map_err(|e| RdfXmlError::from(quick_xml::Error::from(e)))?;
            if let Some(declaration) = attribute.key.as_namespace_binding() {
                let prefix = match declaration {
                    PrefixDeclaration::Default => String::new(),
                    PrefixDeclaration::Named(name) => decode_utf8(name)?.to_owned(),
                };
                let value = attribute.unescape_value().map_err(RdfXmlError::from)?;
                self.start_prefix_mapping(&prefix, &value)?;
            } else {
                let (resolution, local_name) = reader.resolve_attribute(attribute.key);
                attributes.push(OwnedAttribute {
                    ns_uri: decode_resolution(resolution)?,
                    local_name: decode_utf8(local_name.into_inner())?.to_owned(),
                    qname: decode_utf8(attribute.key.into_inner())?.to_owned(),
                    value: attribute
                        .unescape_value()
                        .map_err(RdfXmlError::from)?
                        .into_owned(),
                });
            }
        }
        let (resolution, local_name) = reader.resolve_element(event.name());
        let ns_uri = decode_resolution(resolution)?;
        let local_name = decode_utf8(local_name.into_inner())?.to_owned();
        let qname = decode_utf8(event.name().into_inner())?.to_owned();
        let attributes: Vec<XmlAttribute<'_>> = attributes
            .iter()
            .map(|attr| XmlAttribute {
                ns_uri: &attr.ns_uri,
                local_name: &attr.local_name,
                qname: &attr.qname,
                value: &attr.value,
            })
            .collect();
        self.start_element(&ns_uri, &local_name, &qname, &attributes)
    }
}

fn decode_resolution<E>(resolution: ResolveResult<'_>) -> Result<String, RdfXmlError<E>> {
    match resolution {
        ResolveResult::Bound(ns) => Ok(decode_utf8(ns.into_inner())?.to_owned()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => Err(RdfXmlError::msg(format!(
            "unknown namespace prefix {}",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn decode_utf8<E>(bytes: &[u8]) -> Result<&str, RdfXmlError<E>> {
    str::from_utf8(bytes).map_err(|_| RdfXmlError::msg("XML document is not valid UTF-8"))
}
