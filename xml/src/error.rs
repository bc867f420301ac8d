use std::error::Error;
use std::fmt;

/// Error that might be returned during parsing.
///
/// It wraps an XML reading error, an RDF/XML schema violation or an error
/// raised by the downstream sink, parameterized by the sink's error type.
#[derive(Debug)]
pub struct RdfXmlError<E> {
    kind: RdfXmlErrorKind<E>,
}

#[derive(Debug)]
pub(crate) enum RdfXmlErrorKind<E> {
    Xml(quick_xml::Error),
    InvalidIri {
        iri: String,
        error: oxiri::IriParseError,
    },
    InvalidLanguageTag {
        tag: String,
        error: oxilangtag::LanguageTagParseError,
    },
    Schema(String),
    Sink(E),
}

impl<E> RdfXmlError<E> {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlErrorKind::Schema(message.into()),
        }
    }

    pub(crate) fn invalid_iri(iri: String, error: oxiri::IriParseError) -> Self {
        Self {
            kind: RdfXmlErrorKind::InvalidIri { iri, error },
        }
    }

    pub(crate) fn invalid_language_tag(
        tag: String,
        error: oxilangtag::LanguageTagParseError,
    ) -> Self {
        Self {
            kind: RdfXmlErrorKind::InvalidLanguageTag { tag, error },
        }
    }

    pub(crate) fn sink(error: E) -> Self {
        Self {
            kind: RdfXmlErrorKind::Sink(error),
        }
    }
}

impl<E: fmt::Display> fmt::Display for RdfXmlError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RdfXmlErrorKind::Xml(error) => error.fmt(f),
            RdfXmlErrorKind::InvalidIri { iri, .. } => write!(f, "invalid IRI '{iri}'"),
            RdfXmlErrorKind::InvalidLanguageTag { tag, .. } => {
                write!(f, "invalid language tag '{tag}'")
            }
            RdfXmlErrorKind::Schema(message) => write!(f, "{message}"),
            RdfXmlErrorKind::Sink(error) => write!(f, "sink error: {error}"),
        }
    }
}

impl<E: Error + 'static> Error for RdfXmlError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            RdfXmlErrorKind::Xml(error) => Some(error),
            RdfXmlErrorKind::InvalidIri { error, .. } => Some(error),
            RdfXmlErrorKind::InvalidLanguageTag { error, .. } => Some(error),
            RdfXmlErrorKind::Schema(_) => None,
            RdfXmlErrorKind::Sink(error) => Some(error),
        }
    }
}

impl<E> From<quick_xml::Error> for RdfXmlError<E> {
    fn from(error: quick_xml::Error) -> Self {
        Self {
            kind: RdfXmlErrorKind::Xml(error),
        }
    }
}

impl<E> From<std::io::Error> for RdfXmlError<E> {
    fn from(error: std::io::Error) -> Self {
        Self {
            kind: RdfXmlErrorKind::Xml(quick_xml::Error::from(error)),
        }
    }
}
