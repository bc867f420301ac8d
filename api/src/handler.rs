//! Processor-graph notifications.

/// Receives processor-level notifications raised while a stream is parsed.
///
/// Handlers are notified synchronously, before any recovery action is taken
/// by the reporting parser. The `class_iri` argument identifies the kind of
/// notification within the parser's vocabulary.
pub trait ProcessorGraphHandler {
    /// An informational message.
    fn info(&mut self, _class_iri: &str, _message: &str) {}

    /// An oddity that did not stop parsing.
    fn warning(&mut self, _class_iri: &str, _message: &str) {}

    /// A parse error. Reported for every error, whether or not the parser
    /// recovers from it.
    fn error(&mut self, class_iri: &str, message: &str);
}
