//! Implementation of an [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/) streaming parser.
//!
//! The grammar core of [`RdfXmlParser`] consumes SAX-like XML events and
//! pushes triples into the owned [`TripleSink`](rill_api::sink::TripleSink);
//! [`RdfXmlParser::parse_document`] drives those events from any `BufRead`
//! XML document.
//!
//! Count the `rdf:type` triples of a document:
//! ```
//! use rill_api::sink::TripleSink;
//! use rill_xml::{RdfXmlError, RdfXmlParser};
//! use std::convert::Infallible;
//!
//! #[derive(Default)]
//! struct TypeCounter {
//!     types: usize,
//! }
//!
//! impl TripleSink for TypeCounter {
//!     type Error = Infallible;
//!
//!     fn start_stream(&mut self) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//!
//!     fn end_stream(&mut self) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//!
//!     fn add_non_literal(&mut self, _: &str, _: &str, _: &str) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//!
//!     fn add_iri_ref(&mut self, _: &str, predicate: &str, _: &str) -> Result<(), Infallible> {
//!         if predicate == "http://www.w3.org/1999/02/22-rdf-syntax-ns#type" {
//!             self.types += 1;
//!         }
//!         Ok(())
//!     }
//!
//!     fn add_plain_literal(
//!         &mut self,
//!         _: &str,
//!         _: &str,
//!         _: &str,
//!         _: Option<&str>,
//!     ) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//!
//!     fn add_typed_literal(
//!         &mut self,
//!         _: &str,
//!         _: &str,
//!         _: &str,
//!         _: &str,
//!     ) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//! }
//!
//! let file = br#"<?xml version="1.0"?>
//! <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:schema="http://schema.org/">
//!   <schema:Person rdf:about="http://example.com/foo" schema:name="Foo" />
//!   <schema:Person rdf:about="http://example.com/bar" />
//! </rdf:RDF>"#;
//!
//! # fn main() -> Result<(), RdfXmlError<std::convert::Infallible>> {
//! let mut parser = RdfXmlParser::new(TypeCounter::default(), None)?;
//! parser.parse_document(file.as_ref())?;
//! assert_eq!(2, parser.sink().types);
//! # Ok(())
//! # }
//! ```
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]

mod error;
mod iri;
mod parser;
mod reader;

pub use error::RdfXmlError;
pub use parser::{RdfXmlParser, XmlAttribute};
