//! Implementation of a streaming [N-Quads](https://www.w3.org/TR/n-quads/) parser.
//! N-Triples documents are the three-column subset and parse with the same
//! parser, with statements landing in the default graph.
//!
//! The parser is a pipe: character chunks go in through
//! [`NQuadsParser::process`], quads come out as calls on the owned
//! [`QuadSink`](rill_api::sink::QuadSink). Chunk boundaries may fall
//! anywhere, even inside a token or an escape sequence.
//!
//! Count the quads of a document:
//! ```
//! use rill_api::sink::QuadSink;
//! use rill_nquads::{NQuadsError, NQuadsParser};
//! use std::convert::Infallible;
//!
//! #[derive(Default)]
//! struct Counter {
//!     quads: usize,
//! }
//!
//! impl QuadSink for Counter {
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
//!     fn add_non_literal(
//!         &mut self,
//!         _: &str,
//!         _: &str,
//!         _: &str,
//!         _: Option<&str>,
//!     ) -> Result<(), Infallible> {
//!         self.quads += 1;
//!         Ok(())
//!     }
//!
//!     fn add_iri_ref(
//!         &mut self,
//!         _: &str,
//!         _: &str,
//!         _: &str,
//!         _: Option<&str>,
//!     ) -> Result<(), Infallible> {
//!         self.quads += 1;
//!         Ok(())
//!     }
//!
//!     fn add_plain_literal(
//!         &mut self,
//!         _: &str,
//!         _: &str,
//!         _: &str,
//!         _: Option<&str>,
//!         _: Option<&str>,
//!     ) -> Result<(), Infallible> {
//!         self.quads += 1;
//!         Ok(())
//!     }
//!
//!     fn add_typed_literal(
//!         &mut self,
//!         _: &str,
//!         _: &str,
//!         _: &str,
//!         _: &str,
//!         _: Option<&str>,
//!     ) -> Result<(), Infallible> {
//!         self.quads += 1;
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), NQuadsError<Infallible>> {
//! let mut parser = NQuadsParser::new(Counter::default());
//! parser.start_stream()?;
//! parser.process("<http://example.com/s> <http://example.com/p> \"o\" .\n")?;
//! parser.end_stream()?;
//! assert_eq!(1, parser.sink().quads);
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
mod escape;
mod parser;

pub use error::NQuadsError;
pub use escape::{unescape, UnescapeError};
pub use parser::{NQuadsParser, ERROR_CLASS};
