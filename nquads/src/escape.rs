//! Unescaping of N-Triples string and IRI tokens.

use std::error::Error;
use std::fmt;
use std::str::Chars;

/// Error raised when a token contains a malformed escape sequence.
#[derive(Debug)]
pub struct UnescapeError {
    message: String,
}

impl UnescapeError {
    fn new(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for UnescapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

impl Error for UnescapeError {}

/// Translates the backslash escapes of an extracted token.
///
/// Simple escapes (`\t`, `\b`, `\n`, `\r`, `\f`, `\"`, `\'`, `\\`) map to
/// their character; `\uXXXX` and `\UXXXXXXXX` encode a Unicode scalar value
/// in hexadecimal. A backslash before any other character is dropped and
/// the character kept as is.
///
/// ```
/// use rill_nquads::unescape;
///
/// assert_eq!("A\tb", unescape("\\u0041\\tb").unwrap());
/// ```
pub fn unescape(token: &str) -> Result<String, UnescapeError> {
    let mut result = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            None => {
                return Err(UnescapeError::new(
                    "truncated escape sequence at end of token".to_owned(),
                ))
            }
            Some('t') => result.push('\t'),
            Some('b') => result.push('\u{8}'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('f') => result.push('\u{C}'),
            Some('u') => result.push(read_hexa_char(&mut chars, 4)?),
            Some('U') => result.push(read_hexa_char(&mut chars, 8)?),
            Some(c) => result.push(c),
        }
    }
    Ok(result)
}

fn read_hexa_char(chars: &mut Chars<'_>, len: usize) -> Result<char, UnescapeError> {
    let mut value = 0;
    for _ in 0..len {
        match chars.next().and_then(|c| c.to_digit(16)) {
            Some(digit) => value = value * 16 + digit,
            None => {
                return Err(UnescapeError::new(format!(
                    "escape sequence is shorter than {len} hexadecimal digits"
                )))
            }
        }
    }
    char::from_u32(value)
        .ok_or_else(|| UnescapeError::new(format!("invalid Unicode code point {value}")))
}
