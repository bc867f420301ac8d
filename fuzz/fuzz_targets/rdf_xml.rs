#![no_main]
use libfuzzer_sys::fuzz_target;
use rill_api::sink::TripleSink;
use rill_xml::RdfXmlParser;
use std::convert::Infallible;

struct NullSink;

impl TripleSink for NullSink {
    type Error = Infallible;

    fn start_stream(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn end_stream(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn add_non_literal(&mut self, _: &str, _: &str, _: &str) -> Result<(), Infallible> {
        Ok(())
    }

    fn add_iri_ref(&mut self, _: &str, _: &str, _: &str) -> Result<(), Infallible> {
        Ok(())
    }

    fn add_plain_literal(
        &mut self,
        _: &str,
        _: &str,
        _: &str,
        _: Option<&str>,
    ) -> Result<(), Infallible> {
        Ok(())
    }

    fn add_typed_literal(&mut self, _: &str, _: &str, _: &str, _: &str) -> Result<(), Infallible> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    if let Ok(mut parser) = RdfXmlParser::new(NullSink, None) {
        let _ = parser.parse_document(data);
    }
});
