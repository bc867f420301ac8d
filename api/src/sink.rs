//! Interfaces for RDF statement sinks.

use std::error::Error;

/// A sink accepting a stream of RDF triples.
///
/// Subjects, predicates and objects are passed as plain strings. IRIs are
/// absolute at the point of emission; blank nodes carry a `_:` prefix.
///
/// All methods may fail with the sink's own error type. A parser stops at
/// the first sink error and surfaces it as the cause of its parse error.
pub trait TripleSink {
    type Error: Error;

    /// Called once before the first statement of a stream.
    fn start_stream(&mut self) -> Result<(), Self::Error>;

    /// Called once after the last statement of a stream.
    fn end_stream(&mut self) -> Result<(), Self::Error>;

    /// Adds a triple whose object is an IRI or a blank node.
    fn add_non_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<(), Self::Error>;

    /// Adds a triple whose object is known to be an IRI.
    fn add_iri_ref(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<(), Self::Error>;

    /// Adds a triple with a plain literal object and an optional language tag.
    fn add_plain_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        content: &str,
        language: Option<&str>,
    ) -> Result<(), Self::Error>;

    /// Adds a triple with a typed literal object.
    fn add_typed_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        content: &str,
        datatype: &str,
    ) -> Result<(), Self::Error>;
}

/// A sink accepting a stream of RDF quads.
///
/// The `graph` argument names the graph a statement belongs to; `None`
/// addresses the default graph. Everything else follows [`TripleSink`].
pub trait QuadSink {
    type Error: Error;

    /// Called once before the first statement of a stream.
    fn start_stream(&mut self) -> Result<(), Self::Error>;

    /// Called once after the last statement of a stream.
    fn end_stream(&mut self) -> Result<(), Self::Error>;

    /// Adds a quad whose object is an IRI or a blank node.
    fn add_non_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
        graph: Option<&str>,
    ) -> Result<(), Self::Error>;

    /// Adds a quad whose object is known to be an IRI.
    fn add_iri_ref(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
        graph: Option<&str>,
    ) -> Result<(), Self::Error>;

    /// Adds a quad with a plain literal object and an optional language tag.
    fn add_plain_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        content: &str,
        language: Option<&str>,
        graph: Option<&str>,
    ) -> Result<(), Self::Error>;

    /// Adds a quad with a typed literal object.
    fn add_typed_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        content: &str,
        datatype: &str,
        graph: Option<&str>,
    ) -> Result<(), Self::Error>;
}
