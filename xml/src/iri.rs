//! IRI and NCName services used by the RDF/XML grammar.

use crate::error::RdfXmlError;
use oxiri::Iri;

/// Resolves `iri` against `base` per RFC 3986. An empty base requires `iri`
/// to already be absolute.
pub(crate) fn resolve<E>(base: &str, iri: &str) -> Result<String, RdfXmlError<E>> {
    let result = if base.is_empty() {
        Iri::parse(iri.to_owned()).map(Iri::into_inner)
    } else {
        Iri::parse(base.to_owned())
            .and_then(|base| base.resolve(iri))
            .map(Iri::into_inner)
    };
    result.map_err(|error| RdfXmlError::invalid_iri(iri.to_owned(), error))
}

pub(crate) fn is_absolute(iri: &str) -> bool {
    Iri::parse(iri).is_ok()
}

/// Expands a vocabulary term without RFC 3986 resolution: an absolute IRI
/// passes through, anything else must be an NCName and is concatenated onto
/// `ns`.
pub(crate) fn expand_term<E>(ns: &str, term: &str) -> Result<String, RdfXmlError<E>> {
    if is_absolute(term) {
        return Ok(term.to_owned());
    }
    if !is_nc_name(term) {
        return Err(RdfXmlError::msg(format!("{term} is not a valid NCName")));
    }
    let expanded = format!("{ns}{term}");
    if is_absolute(&expanded) {
        Ok(expanded)
    } else {
        Err(RdfXmlError::msg(format!(
            "can not expand {term} to an absolute IRI"
        )))
    }
}

/// Normalizes a base IRI for vocabulary-term concatenation: anything from
/// the last `#` on is dropped and a single trailing `#` appended.
pub(crate) fn normalize_base<E>(base: &str) -> Result<String, RdfXmlError<E>> {
    let mut base = match base.rfind('#') {
        Some(pos) => base[..pos].to_owned(),
        None => base.to_owned(),
    };
    base.push('#');
    if !is_absolute(&base) {
        return Err(RdfXmlError::msg(format!("invalid base IRI {base}")));
    }
    Ok(base)
}

// NCName ::= Name - (Char* ':' Char*)
pub(crate) fn is_nc_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c != ':' && is_name_start_char(c) => (),
        _ => return false,
    }
    chars.all(|c| c != ':' && is_name_char(c))
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':'
        | 'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c, '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn base_normalization() {
        assert_eq!(
            "http://example.com/doc#",
            normalize_base::<Infallible>("http://example.com/doc").unwrap()
        );
        assert_eq!(
            "http://example.com/doc#",
            normalize_base::<Infallible>("http://example.com/doc#frag").unwrap()
        );
        assert!(normalize_base::<Infallible>("not absolute").is_err());
    }

    #[test]
    fn term_expansion() {
        assert_eq!(
            "http://example.com/ns#term",
            expand_term::<Infallible>("http://example.com/ns#", "term").unwrap()
        );
        assert_eq!(
            "http://example.com/absolute",
            expand_term::<Infallible>("http://example.com/ns#", "http://example.com/absolute")
                .unwrap()
        );
        assert!(expand_term::<Infallible>("http://example.com/ns#", "a:b").is_err());
    }

    #[test]
    fn nc_names() {
        assert!(is_nc_name("name"));
        assert!(is_nc_name("_name-1.x"));
        assert!(is_nc_name("étiquette"));
        assert!(!is_nc_name(""));
        assert!(!is_nc_name("1name"));
        assert!(!is_nc_name("a:b"));
        assert!(!is_nc_name("with space"));
    }
}
