#![no_main]
use libfuzzer_sys::fuzz_target;
use rill_api::sink::QuadSink;
use rill_nquads::NQuadsParser;
use std::convert::Infallible;

struct NullSink;

impl QuadSink for NullSink {
    type Error = Infallible;

    fn start_stream(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn end_stream(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn add_non_literal(
        &mut self,
        _: &str,
        _: &str,
        _: &str,
        _: Option<&str>,
    ) -> Result<(), Infallible> {
        Ok(())
    }

    fn add_iri_ref(
        &mut self,
        _: &str,
        _: &str,
        _: &str,
        _: Option<&str>,
    ) -> Result<(), Infallible> {
        Ok(())
    }

    fn add_plain_literal(
        &mut self,
        _: &str,
        _: &str,
        _: &str,
        _: Option<&str>,
        _: Option<&str>,
    ) -> Result<(), Infallible> {
        Ok(())
    }

    fn add_typed_literal(
        &mut self,
        _: &str,
        _: &str,
        _: &str,
        _: &str,
        _: Option<&str>,
    ) -> Result<(), Infallible> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut parser = NQuadsParser::new(NullSink).with_error_recovery(true);
    let _ = parser.start_stream();
    let _ = parser.process(text);
    let _ = parser.end_stream();

    // feeding one char at a time must never change the outcome
    let mut parser = NQuadsParser::new(NullSink).with_error_recovery(true);
    let _ = parser.start_stream();
    for c in text.chars() {
        let _ = parser.process_char(c);
    }
    let _ = parser.end_stream();
});
