//! This crate provides the sink interfaces shared by the `rill_nquads` and
//! `rill_xml` streaming parsers.
//!
//! A parser owns its sink for the duration of a stream: it calls
//! `start_stream` before the first statement, pushes statements one at a
//! time in document order, and calls `end_stream` after the last one.
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]

pub mod handler;
pub mod sink;
