use std::error::Error;
use std::fmt;

/// Error that might be returned during parsing.
///
/// It is either a parse error or an error raised by the downstream sink,
/// parameterized by the sink's error type.
#[derive(Debug)]
pub struct NQuadsError<E> {
    kind: NQuadsErrorKind<E>,
    line_number: usize,
    char_number: usize,
}

#[derive(Debug)]
enum NQuadsErrorKind<E> {
    Syntax(String),
    Sink(E),
}

impl<E> NQuadsError<E> {
    pub(crate) fn syntax(message: String, line_number: usize, char_number: usize) -> Self {
        Self {
            kind: NQuadsErrorKind::Syntax(message),
            line_number,
            char_number,
        }
    }

    pub(crate) fn sink(error: E, line_number: usize, char_number: usize) -> Self {
        Self {
            kind: NQuadsErrorKind::Sink(error),
            line_number,
            char_number,
        }
    }

    /// The line the error was raised on, starting at 1.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The character position of the error in its line, starting at 1.
    pub fn char_number(&self) -> usize {
        self.char_number
    }
}

impl<E: fmt::Display> fmt::Display for NQuadsError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NQuadsErrorKind::Syntax(message) => write!(f, "{message}")?,
            NQuadsErrorKind::Sink(error) => write!(f, "sink error: {error}")?,
        }
        write!(
            f,
            " on line {} at position {}",
            self.line_number, self.char_number
        )
    }
}

impl<E: Error + 'static> Error for NQuadsError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            NQuadsErrorKind::Sink(error) => Some(error),
            NQuadsErrorKind::Syntax(_) => None,
        }
    }
}
