//! The RDF/XML grammar, driven by SAX-like XML events.

use crate::error::RdfXmlError;
use crate::iri::{expand_term, is_absolute, is_nc_name, normalize_base, resolve};
use oxilangtag::LanguageTag;
use quick_xml::events::{BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rill_api::sink::TripleSink;
use std::collections::HashMap;
use std::mem;
use tracing::debug;

const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDF_ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";
const RDF_ABOUT_EACH: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEach";
const RDF_ABOUT_EACH_PREFIX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEachPrefix";
const RDF_BAG_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#bagID";
const RDF_DATATYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#datatype";
const RDF_DESCRIPTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Description";
const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
const RDF_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ID";
const RDF_LI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#li";
const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
const RDF_NODE_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nodeID";
const RDF_OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";
const RDF_PARSE_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#parseType";
const RDF_PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
const RDF_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF";
const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
const RDF_RESOURCE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#resource";
const RDF_STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";
const RDF_SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const RDF_XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";

/// rdf: terms that may appear neither as node/property element tags nor as
/// plain attributes.
const SCHEMA_VIOLATING_TERMS: [&str; 9] = [
    RDF_PARSE_TYPE,
    RDF_ABOUT_EACH,
    RDF_DATATYPE,
    RDF_BAG_ID,
    RDF_ABOUT,
    RDF_RESOURCE,
    RDF_NODE_ID,
    RDF_ID,
    RDF_ABOUT_EACH_PREFIX,
];

/// A namespace-resolved attribute of a start-element event.
#[derive(Debug, Clone, Copy)]
pub struct XmlAttribute<'a> {
    /// Namespace IRI of the attribute name, empty when unqualified.
    pub ns_uri: &'a str,
    /// Local part of the attribute name.
    pub local_name: &'a str,
    /// The prefixed name as written in the document.
    pub qname: &'a str,
    /// The attribute value, with XML entities already expanded.
    pub value: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// The next child element is a node (subject) element.
    InsideProperty,
    /// The next child element is a property element.
    InsideResource,
    /// Raw XML is accumulated into an `rdf:XMLLiteral`.
    ParseTypeLiteral,
    /// Child elements are the items of an `rdf:List`.
    ParseTypeCollection,
    /// Child elements are properties of an implicit blank node.
    ParseTypeResource,
}

/// Per-element state saved at `start_element` and unwound at `end_element`.
struct Frame {
    saved_mode: Mode,
    lang: Option<String>,
    base: String,
    /// Subject pushed by a node element or a `parseType="Resource"` /
    /// `"Collection"` property element.
    subject: Option<String>,
    /// Next ordinal handed out to an `rdf:li` child of this subject.
    li_index: u64,
    is_collection: bool,
    /// Last woven list cell of a collection, once an item has closed.
    collection_tail: Option<String>,
}

/// A streaming [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/) parser.
///
/// The core is an XML event receiver: feed it namespace-resolved
/// start/end-element, character, comment, processing-instruction and
/// prefix-mapping events and it pushes the resulting triples into the owned
/// [`TripleSink`]. [`parse_document`](RdfXmlParser::parse_document) drives
/// those events from any `BufRead` XML document.
///
/// It does not keep data in memory beyond a stack of open element contexts
/// and the mapping of `rdf:nodeID` labels to blank-node ids.
pub struct RdfXmlParser<S: TripleSink> {
    sink: S,
    base_uri: String,
    mode: Mode,
    stack: Vec<Frame>,
    pred_iri: Option<String>,
    datatype_iri: Option<String>,
    reify_iri: Option<String>,
    capture_literal: bool,
    text_buf: String,
    literal_depth: usize,
    literal_writer: Writer<Vec<u8>>,
    ns_mappings: Vec<(String, String)>,
    bnode_counter: u64,
    bnode_labels: HashMap<String, String>,
}

impl<S: TripleSink> RdfXmlParser<S> {
    /// Builds a parser streaming to `sink`, with an optional base IRI for
    /// `rdf:about` resolution and `rdf:ID` expansion.
    pub fn new(sink: S, base_uri: Option<&str>) -> Result<Self, RdfXmlError<S::Error>> {
        let base_uri = match base_uri {
            Some(base) => normalize_base(base)?,
            None => String::new(),
        };
        Ok(Self {
            sink,
            base_uri,
            mode: Mode::InsideProperty,
            stack: Vec::new(),
            pred_iri: None,
            datatype_iri: None,
            reify_iri: None,
            capture_literal: false,
            text_buf: String::new(),
            literal_depth: 0,
            literal_writer: Writer::new(Vec::new()),
            ns_mappings: Vec::new(),
            bnode_counter: 0,
            bnode_labels: HashMap::new(),
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Starts a new stream, resetting all state accumulated by a previous
    /// one, including minted blank-node ids.
    pub fn start_stream(&mut self) -> Result<(), RdfXmlError<S::Error>> {
        debug!("starting RDF/XML stream");
        self.bnode_counter = 0;
        self.bnode_labels.clear();
        self.start_document()?;
        self.sink.start_stream().map_err(RdfXmlError::sink)
    }

    /// Ends the stream.
    pub fn end_stream(&mut self) -> Result<(), RdfXmlError<S::Error>> {
        debug!("ending RDF/XML stream");
        self.sink.end_stream().map_err(RdfXmlError::sink)
    }

    pub fn start_document(&mut self) -> Result<(), RdfXmlError<S::Error>> {
        self.mode = Mode::InsideProperty;
        self.stack.clear();
        self.pred_iri = None;
        self.datatype_iri = None;
        self.reify_iri = None;
        self.capture_literal = false;
        self.text_buf.clear();
        self.literal_depth = 0;
        self.literal_writer = Writer::new(Vec::new());
        self.ns_mappings.clear();
        Ok(())
    }

    pub fn end_document(&mut self) -> Result<(), RdfXmlError<S::Error>> {
        self.stack.clear();
        self.text_buf.clear();
        self.ns_mappings.clear();
        Ok(())
    }

    pub fn start_element(
        &mut self,
        ns_uri: &str,
        local_name: &str,
        qname: &str,
        attrs: &[XmlAttribute<'_>],
    ) -> Result<(), RdfXmlError<S::Error>> {
        if self.mode == Mode::ParseTypeLiteral {
            self.write_literal_open_tag(qname, attrs)?;
            self.literal_depth += 1;
            return Ok(());
        }

        let (lang, base) = self.child_scope(attrs)?;

        let iri = format!("{ns_uri}{local_name}");
        if (self.current_subject().is_none() && ns_uri.is_empty()) || iri == RDF_RDF {
            self.stack.push(Frame {
                saved_mode: self.mode,
                lang,
                base,
                subject: None,
                li_index: 1,
                is_collection: false,
                collection_tail: None,
            });
            return Ok(());
        }
        if violates_schema(&iri) {
            return Err(RdfXmlError::msg(format!("{qname} is not allowed here")));
        }

        match self.mode {
            Mode::InsideProperty | Mode::ParseTypeCollection => {
                self.start_node_element(iri, qname, lang, base, attrs)
            }
            Mode::InsideResource | Mode::ParseTypeResource => {
                self.start_property_element(ns_uri, iri, qname, lang, base, attrs)
            }
            // handled by the literal capture branch above
            Mode::ParseTypeLiteral => Ok(()),
        }
    }

    pub fn end_element(
        &mut self,
        _ns_uri: &str,
        _local_name: &str,
        qname: &str,
    ) -> Result<(), RdfXmlError<S::Error>> {
        if self.mode == Mode::ParseTypeLiteral {
            if self.literal_depth > 1 {
                self.literal_depth -= 1;
                self.literal_writer
                    .write_event(Event::End(BytesEnd::new(qname)))
                    .map_err(|e| RdfXmlError::from(quick_xml::Error::from(e)))?;
                return Ok(());
            }
            self.literal_depth = 0;
            let value = self.take_literal_xml()?;
            if let Some(subject) = self.current_subject().map(ToOwned::to_owned) {
                let pred = self
                    .pred_iri
                    .clone()
                    .ok_or_else(|| RdfXmlError::msg("unexpected end of XML literal"))?;
                self.literal_triple(&subject, &pred, &value, Some(RDF_XML_LITERAL), None)?;
            }
        }

        let frame = match self.stack.pop() {
            Some(frame) => frame,
            None => return Ok(()),
        };

        match self.mode {
            Mode::InsideProperty => {
                if self.capture_literal {
                    let value = mem::take(&mut self.text_buf);
                    if let Some(subject) = self.current_subject().map(ToOwned::to_owned) {
                        let pred = self
                            .pred_iri
                            .clone()
                            .ok_or_else(|| RdfXmlError::msg("unexpected end of property"))?;
                        let datatype = self.datatype_iri.take();
                        self.literal_triple(
                            &subject,
                            &pred,
                            &value,
                            datatype.as_deref(),
                            frame.lang.as_deref(),
                        )?;
                    }
                    self.capture_literal = false;
                }
            }
            Mode::ParseTypeCollection => {
                if frame.is_collection {
                    // the collection property itself closes
                    if let Some(tail) = frame.collection_tail.or_else(|| frame.subject.clone()) {
                        self.sink
                            .add_iri_ref(&tail, RDF_REST, RDF_NIL)
                            .map_err(RdfXmlError::sink)?;
                    }
                } else if let Some(item) = frame.subject {
                    self.weave_collection_item(&item)?;
                }
            }
            Mode::InsideResource | Mode::ParseTypeResource | Mode::ParseTypeLiteral => (),
        }

        self.mode = frame.saved_mode;
        Ok(())
    }

    pub fn characters(&mut self, text: &str) -> Result<(), RdfXmlError<S::Error>> {
        if self.mode == Mode::ParseTypeLiteral {
            self.literal_writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| RdfXmlError::from(quick_xml::Error::from(e)))?;
        } else if self.capture_literal {
            self.text_buf.push_str(text);
        }
        Ok(())
    }

    pub fn comment(&mut self, text: &str) -> Result<(), RdfXmlError<S::Error>> {
        if self.mode == Mode::ParseTypeLiteral && self.literal_depth > 0 {
            self.literal_writer
                .write_event(Event::Comment(BytesText::from_escaped(text)))
                .map_err(|e| RdfXmlError::from(quick_xml::Error::from(e)))?;
        }
        Ok(())
    }

    pub fn processing_instruction(
        &mut self,
        target: &str,
        data: &str,
    ) -> Result<(), RdfXmlError<S::Error>> {
        if self.mode == Mode::ParseTypeLiteral && self.literal_depth > 0 {
            let content = if data.is_empty() {
                target.to_owned()
            } else {
                format!("{target} {data}")
            };
            self.literal_writer
                .write_event(Event::PI(BytesPI::new(content)))
                .map_err(|e| RdfXmlError::from(quick_xml::Error::from(e)))?;
        }
        Ok(())
    }

    /// Records a namespace declaration so it can be replayed on the next
    /// open tag serialized into an XML literal.
    pub fn start_prefix_mapping(
        &mut self,
        prefix: &str,
        uri: &str,
    ) -> Result<(), RdfXmlError<S::Error>> {
        if self.mode == Mode::ParseTypeLiteral {
            self.ns_mappings.push((prefix.to_owned(), uri.to_owned()));
        }
        Ok(())
    }

    /// Determines the effective language and base of a child element from
    /// its `xml:lang`/`xml:base` attributes, inheriting from the enclosing
    /// element.
    fn child_scope(
        &self,
        attrs: &[XmlAttribute<'_>],
    ) -> Result<(Option<String>, String), RdfXmlError<S::Error>> {
        let mut lang = self.current_lang().map(ToOwned::to_owned);
        let mut base = self.current_base().to_owned();
        for attr in attrs {
            match attr.qname {
                "xml:lang" => {
                    lang = if attr.value.is_empty() {
                        None
                    } else {
                        let tag = LanguageTag::parse(attr.value.to_ascii_lowercase())
                            .map_err(|error| {
                                RdfXmlError::invalid_language_tag(attr.value.to_owned(), error)
                            })?;
                        Some(tag.into_inner())
                    };
                }
                "xml:base" => base = normalize_base(attr.value)?,
                _ => (),
            }
        }
        Ok((lang, base))
    }

    fn start_node_element(
        &mut self,
        iri: String,
        qname: &str,
        lang: Option<String>,
        base: String,
        attrs: &[XmlAttribute<'_>],
    ) -> Result<(), RdfXmlError<S::Error>> {
        let subject = self.node_subject(&base, attrs)?;

        if self.mode != Mode::ParseTypeCollection {
            if let Some(parent) = self.current_subject().map(ToOwned::to_owned) {
                let pred = self
                    .pred_iri
                    .clone()
                    .ok_or_else(|| RdfXmlError::msg(format!("{qname} is not allowed here")))?;
                self.non_literal_triple(&parent, &pred, &subject)?;
                // the enclosing property takes this node as its value
                self.capture_literal = false;
            }
        }

        if iri != RDF_DESCRIPTION {
            if iri == RDF_LI {
                return Err(RdfXmlError::msg(format!("{qname} is not allowed here")));
            }
            self.sink
                .add_iri_ref(&subject, RDF_TYPE, &iri)
                .map_err(RdfXmlError::sink)?;
        }

        for attr in attrs {
            let tag = format!("{}{}", attr.ns_uri, attr.local_name);
            if tag == RDF_NODE_ID
                || tag == RDF_ABOUT
                || tag == RDF_ID
                || attr.qname.starts_with("xml")
            {
                continue;
            }
            if tag == RDF_TYPE {
                self.sink
                    .add_iri_ref(&subject, RDF_TYPE, attr.value)
                    .map_err(RdfXmlError::sink)?;
            } else {
                if violates_schema(&tag) || tag == RDF_LI {
                    return Err(RdfXmlError::msg(format!(
                        "attribute {} is not allowed here",
                        attr.qname
                    )));
                }
                self.sink
                    .add_plain_literal(&subject, &tag, attr.value, lang.as_deref())
                    .map_err(RdfXmlError::sink)?;
            }
        }

        let in_collection = self.mode == Mode::ParseTypeCollection;
        self.stack.push(Frame {
            saved_mode: self.mode,
            lang,
            base,
            subject: Some(subject),
            li_index: 1,
            is_collection: false,
            collection_tail: None,
        });
        if !in_collection {
            self.mode = Mode::InsideResource;
        }
        Ok(())
    }

    /// Determines the subject of a node element from its `rdf:about`,
    /// `rdf:ID` and `rdf:nodeID` attributes; exactly one may be present and
    /// none at all mints a fresh blank node.
    fn node_subject(
        &mut self,
        base: &str,
        attrs: &[XmlAttribute<'_>],
    ) -> Result<String, RdfXmlError<S::Error>> {
        let mut subject = None;
        let mut count = 0;
        for attr in attrs {
            if attr.ns_uri != RDF_NS {
                continue;
            }
            match attr.local_name {
                "about" => {
                    subject = Some(resolve(base, attr.value)?);
                    count += 1;
                }
                "ID" => {
                    subject = Some(expand_term(base, attr.value)?);
                    count += 1;
                }
                "nodeID" => {
                    if !is_nc_name(attr.value) {
                        return Err(RdfXmlError::msg(format!(
                            "{} is not a valid rdf:nodeID value",
                            attr.value
                        )));
                    }
                    subject = Some(self.bnode_for_label(attr.value));
                    count += 1;
                }
                _ => (),
            }
        }
        match (subject, count) {
            (Some(subject), 1) => Ok(subject),
            (None, _) => Ok(self.fresh_bnode()),
            _ => Err(RdfXmlError::msg("ambiguous identifier definition")),
        }
    }

    fn start_property_element(
        &mut self,
        ns_uri: &str,
        iri: String,
        qname: &str,
        lang: Option<String>,
        base: String,
        attrs: &[XmlAttribute<'_>],
    ) -> Result<(), RdfXmlError<S::Error>> {
        if iri == RDF_NIL || iri == RDF_DESCRIPTION {
            return Err(RdfXmlError::msg(format!("{qname} is not allowed here")));
        }
        if !is_absolute(&iri) {
            return Err(RdfXmlError::msg(format!("invalid property IRI {iri}")));
        }

        let pred = if iri == RDF_LI {
            let index = self.next_li_index();
            format!("{RDF_NS}_{index}")
        } else {
            iri
        };

        let subject = self
            .current_subject()
            .map(ToOwned::to_owned)
            .ok_or_else(|| RdfXmlError::msg(format!("{qname} is not allowed here")))?;

        let mut has_resource = false;
        let mut has_node_id = false;
        let mut has_parse_type = false;
        let mut has_conflicting = false;
        let mut id_value = None;
        for attr in attrs {
            if attr.qname.starts_with("xml") {
                continue;
            }
            match format!("{}{}", attr.ns_uri, attr.local_name).as_str() {
                RDF_RESOURCE => has_resource = true,
                RDF_NODE_ID => has_node_id = true,
                RDF_PARSE_TYPE => has_parse_type = true,
                RDF_ID => id_value = Some(attr.value),
                _ => has_conflicting = true,
            }
        }
        if has_resource && has_node_id {
            return Err(RdfXmlError::msg(
                "both rdf:resource and rdf:nodeID are present",
            ));
        }
        if has_parse_type && (has_resource || has_node_id || has_conflicting) {
            return Err(RdfXmlError::msg(
                "rdf:parseType conflicts with other attributes",
            ));
        }
        if let Some(id) = id_value {
            self.reify_iri = Some(expand_term(&base, id)?);
        }

        self.pred_iri = Some(pred.clone());
        self.datatype_iri = None;
        self.capture_literal = true;

        let entry_mode = self.mode;
        let mut next_mode = Mode::InsideProperty;
        let mut frame_subject = None;
        let mut is_collection = false;

        for attr in attrs {
            if attr.qname.starts_with("xml") {
                continue;
            }
            let tag = format!("{}{}", attr.ns_uri, attr.local_name);
            if tag == RDF_ID {
                continue;
            } else if tag == RDF_RESOURCE {
                let id = resolve(&base, attr.value)?;
                self.iri_ref_triple(&subject, &pred, &id)?;
                self.capture_literal = false;
            } else if tag == RDF_DATATYPE {
                self.datatype_iri = Some(expand_term(ns_uri, attr.value)?);
            } else if tag == RDF_PARSE_TYPE {
                if attr.value.eq_ignore_ascii_case("resource") {
                    let bnode = self.fresh_bnode();
                    self.non_literal_triple(&subject, &pred, &bnode)?;
                    frame_subject = Some(bnode);
                    next_mode = Mode::ParseTypeResource;
                } else if attr.value.eq_ignore_ascii_case("collection") {
                    let bnode = self.fresh_bnode();
                    self.non_literal_triple(&subject, &pred, &bnode)?;
                    frame_subject = Some(bnode);
                    is_collection = true;
                    next_mode = Mode::ParseTypeCollection;
                } else {
                    // "Literal", and anything unrecognized falls back to it
                    self.literal_writer = Writer::new(Vec::new());
                    self.ns_mappings.clear();
                    self.literal_depth = 1;
                    next_mode = Mode::ParseTypeLiteral;
                }
                self.capture_literal = false;
            } else if tag == RDF_NODE_ID {
                if !is_nc_name(attr.value) {
                    return Err(RdfXmlError::msg(format!(
                        "{} is not a valid rdf:nodeID value",
                        attr.value
                    )));
                }
                let id = self.bnode_for_label(attr.value);
                self.non_literal_triple(&subject, &pred, &id)?;
                self.capture_literal = false;
            } else {
                if violates_schema(&tag) || tag == RDF_NIL {
                    return Err(RdfXmlError::msg(format!(
                        "attribute {} is not allowed here",
                        attr.qname
                    )));
                }
                let bnode = self.fresh_bnode();
                self.non_literal_triple(&subject, &pred, &bnode)?;
                self.sink
                    .add_plain_literal(&bnode, &tag, attr.value, lang.as_deref())
                    .map_err(RdfXmlError::sink)?;
                self.capture_literal = false;
            }
        }

        if self.capture_literal {
            self.text_buf.clear();
        }

        self.stack.push(Frame {
            saved_mode: entry_mode,
            lang,
            base,
            subject: frame_subject,
            li_index: 1,
            is_collection,
            collection_tail: None,
        });
        self.mode = next_mode;
        Ok(())
    }

    /// Links a closed collection item into the enclosing `rdf:List`: the
    /// first item hangs off the head node, later ones mint a new cell.
    fn weave_collection_item(&mut self, item: &str) -> Result<(), RdfXmlError<S::Error>> {
        let parent = match self.stack.last().filter(|frame| frame.is_collection) {
            Some(parent) => (parent.subject.clone(), parent.collection_tail.clone()),
            None => return Ok(()),
        };
        let new_tail = match parent {
            (Some(head), None) => {
                self.sink
                    .add_non_literal(&head, RDF_FIRST, item)
                    .map_err(RdfXmlError::sink)?;
                head
            }
            (_, Some(tail)) => {
                let cell = self.fresh_bnode();
                self.sink
                    .add_non_literal(&cell, RDF_FIRST, item)
                    .map_err(RdfXmlError::sink)?;
                self.sink
                    .add_non_literal(&tail, RDF_REST, &cell)
                    .map_err(RdfXmlError::sink)?;
                cell
            }
            (None, None) => return Ok(()),
        };
        if let Some(parent) = self.stack.last_mut() {
            parent.collection_tail = Some(new_tail);
        }
        Ok(())
    }

    /// Emits a statement with an IRI or blank-node object, plus the four
    /// reification triples when a reification IRI is pending.
    fn non_literal_triple(
        &mut self,
        subj: &str,
        pred: &str,
        obj: &str,
    ) -> Result<(), RdfXmlError<S::Error>> {
        self.sink
            .add_non_literal(subj, pred, obj)
            .map_err(RdfXmlError::sink)?;
        if let Some(reify) = self.reify_iri.take() {
            self.reify_shared(&reify, subj, pred)?;
            self.sink
                .add_non_literal(&reify, RDF_OBJECT, obj)
                .map_err(RdfXmlError::sink)?;
        }
        Ok(())
    }

    /// Same as [`non_literal_triple`](Self::non_literal_triple) for an
    /// object known to be an IRI.
    fn iri_ref_triple(
        &mut self,
        subj: &str,
        pred: &str,
        obj: &str,
    ) -> Result<(), RdfXmlError<S::Error>> {
        self.sink
            .add_iri_ref(subj, pred, obj)
            .map_err(RdfXmlError::sink)?;
        if let Some(reify) = self.reify_iri.take() {
            self.reify_shared(&reify, subj, pred)?;
            self.sink
                .add_iri_ref(&reify, RDF_OBJECT, obj)
                .map_err(RdfXmlError::sink)?;
        }
        Ok(())
    }

    fn literal_triple(
        &mut self,
        subj: &str,
        pred: &str,
        value: &str,
        datatype: Option<&str>,
        lang: Option<&str>,
    ) -> Result<(), RdfXmlError<S::Error>> {
        match datatype {
            Some(datatype) => self.sink.add_typed_literal(subj, pred, value, datatype),
            None => self.sink.add_plain_literal(subj, pred, value, lang),
        }
        .map_err(RdfXmlError::sink)?;
        if let Some(reify) = self.reify_iri.take() {
            self.reify_shared(&reify, subj, pred)?;
            match datatype {
                Some(datatype) => self
                    .sink
                    .add_typed_literal(&reify, RDF_OBJECT, value, datatype),
                None => self.sink.add_plain_literal(&reify, RDF_OBJECT, value, lang),
            }
            .map_err(RdfXmlError::sink)?;
        }
        Ok(())
    }

    fn reify_shared(
        &mut self,
        reify: &str,
        subj: &str,
        pred: &str,
    ) -> Result<(), RdfXmlError<S::Error>> {
        self.sink
            .add_iri_ref(reify, RDF_TYPE, RDF_STATEMENT)
            .map_err(RdfXmlError::sink)?;
        self.sink
            .add_non_literal(reify, RDF_SUBJECT, subj)
            .map_err(RdfXmlError::sink)?;
        self.sink
            .add_iri_ref(reify, RDF_PREDICATE, pred)
            .map_err(RdfXmlError::sink)?;
        Ok(())
    }

    fn write_literal_open_tag(
        &mut self,
        qname: &str,
        attrs: &[XmlAttribute<'_>],
    ) -> Result<(), RdfXmlError<S::Error>> {
        let mut tag = BytesStart::new(qname);
        for (prefix, ns) in self.ns_mappings.drain(..) {
            let name = if prefix.is_empty() {
                "xmlns".to_owned()
            } else {
                format!("xmlns:{prefix}")
            };
            tag.push_attribute((name.as_str(), ns.as_str()));
        }
        for attr in attrs {
            tag.push_attribute((attr.qname, attr.value));
        }
        self.literal_writer
            .write_event(Event::Start(tag))
            .map_err(|e| RdfXmlError::from(quick_xml::Error::from(e)))
    }

    fn take_literal_xml(&mut self) -> Result<String, RdfXmlError<S::Error>> {
        let writer = mem::replace(&mut self.literal_writer, Writer::new(Vec::new()));
        String::from_utf8(writer.into_inner())
            .map_err(|_| RdfXmlError::msg("XML literal is not valid UTF-8"))
    }

    fn current_subject(&self) -> Option<&str> {
        self.stack
            .iter()
            .rev()
            .find_map(|frame| frame.subject.as_deref())
    }

    fn current_lang(&self) -> Option<&str> {
        self.stack.last().and_then(|frame| frame.lang.as_deref())
    }

    fn current_base(&self) -> &str {
        self.stack
            .last()
            .map_or(self.base_uri.as_str(), |frame| frame.base.as_str())
    }

    /// Next `rdf:li` ordinal of the nearest enclosing subject.
    fn next_li_index(&mut self) -> u64 {
        for frame in self.stack.iter_mut().rev() {
            if frame.subject.is_some() {
                let index = frame.li_index;
                frame.li_index += 1;
                return index;
            }
        }
        1
    }

    fn fresh_bnode(&mut self) -> String {
        let id = format!("_:b{}", self.bnode_counter);
        self.bnode_counter += 1;
        id
    }

    /// Maps an `rdf:nodeID` label to a blank-node id, deterministically in
    /// first-appearance order.
    fn bnode_for_label(&mut self, label: &str) -> String {
        if let Some(id) = self.bnode_labels.get(label) {
            return id.clone();
        }
        let id = self.fresh_bnode();
        self.bnode_labels.insert(label.to_owned(), id.clone());
        id
    }
}

fn violates_schema(iri: &str) -> bool {
    iri.is_empty() || SCHEMA_VIOLATING_TERMS.contains(&iri)
}
