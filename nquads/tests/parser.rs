use pretty_assertions::assert_eq;
use rill_api::handler::ProcessorGraphHandler;
use rill_api::sink::QuadSink;
use rill_nquads::{NQuadsParser, ERROR_CLASS};
use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

#[derive(Default)]
struct RecordingSink {
    events: Vec<String>,
}

fn opt(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

impl QuadSink for RecordingSink {
    type Error = Infallible;

    fn start_stream(&mut self) -> Result<(), Infallible> {
        self.events.push("start".to_owned());
        Ok(())
    }

    fn end_stream(&mut self) -> Result<(), Infallible> {
        self.events.push("end".to_owned());
        Ok(())
    }

    fn add_non_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
        graph: Option<&str>,
    ) -> Result<(), Infallible> {
        self.events
            .push(format!("spo {subject} {predicate} {object} {}", opt(graph)));
        Ok(())
    }

    fn add_iri_ref(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
        graph: Option<&str>,
    ) -> Result<(), Infallible> {
        self.events
            .push(format!("iri {subject} {predicate} {object} {}", opt(graph)));
        Ok(())
    }

    fn add_plain_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        content: &str,
        language: Option<&str>,
        graph: Option<&str>,
    ) -> Result<(), Infallible> {
        self.events.push(format!(
            "plain {subject} {predicate} \"{content}\"@{} {}",
            opt(language),
            opt(graph)
        ));
        Ok(())
    }

    fn add_typed_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        content: &str,
        datatype: &str,
        graph: Option<&str>,
    ) -> Result<(), Infallible> {
        self.events.push(format!(
            "typed {subject} {predicate} \"{content}\"^^{datatype} {}",
            opt(graph)
        ));
        Ok(())
    }
}

#[derive(Default, Clone)]
struct RecordingHandler {
    errors: Rc<RefCell<Vec<(String, String)>>>,
}

impl ProcessorGraphHandler for RecordingHandler {
    fn error(&mut self, class_iri: &str, message: &str) {
        self.errors
            .borrow_mut()
            .push((class_iri.to_owned(), message.to_owned()));
    }
}

fn parse_chunks(chunks: &[&str]) -> Vec<String> {
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    for chunk in chunks {
        parser.process(chunk).unwrap();
    }
    parser.end_stream().unwrap();
    parser.into_inner().events
}

fn parse(input: &str) -> Vec<String> {
    parse_chunks(&[input])
}

#[test]
fn quad_with_explicit_graph() {
    assert_eq!(
        vec![
            "start".to_owned(),
            "spo http://a http://b http://c http://g".to_owned(),
            "end".to_owned(),
        ],
        parse("<http://a> <http://b> <http://c> <http://g> .\n")
    );
}

#[test]
fn triple_lands_in_default_graph() {
    assert_eq!(
        vec![
            "start".to_owned(),
            "spo http://a http://b http://c -".to_owned(),
            "end".to_owned(),
        ],
        parse("<http://a> <http://b> <http://c> .\n")
    );
}

#[test]
fn plain_literal_with_language() {
    assert_eq!(
        vec![
            "start".to_owned(),
            "plain http://s http://p \"hi\"@en -".to_owned(),
            "end".to_owned(),
        ],
        parse("<http://s> <http://p> \"hi\"@en .\n")
    );
}

#[test]
fn plain_literal_without_language() {
    assert_eq!(
        vec![
            "start".to_owned(),
            "plain http://s http://p \"hi\"@- -".to_owned(),
            "end".to_owned(),
        ],
        parse("<http://s> <http://p> \"hi\" .\n")
    );
}

#[test]
fn typed_literal() {
    assert_eq!(
        vec![
            "start".to_owned(),
            "typed http://s http://p \"42\"^^http://www.w3.org/2001/XMLSchema#integer -"
                .to_owned(),
            "end".to_owned(),
        ],
        parse("<http://s> <http://p> \"42\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n")
    );
}

#[test]
fn literals_combine_with_graphs() {
    assert_eq!(
        vec![
            "start".to_owned(),
            "plain http://s http://p \"hi\"@en http://g".to_owned(),
            "typed http://s http://p \"1\"^^http://dt http://g".to_owned(),
            "end".to_owned(),
        ],
        parse(
            "<http://s> <http://p> \"hi\"@en <http://g> .\n\
             <http://s> <http://p> \"1\"^^<http://dt> <http://g> .\n"
        )
    );
}

#[test]
fn blank_nodes_in_all_positions() {
    assert_eq!(
        vec![
            "start".to_owned(),
            "spo _:a http://p _:b _:g".to_owned(),
            "end".to_owned(),
        ],
        parse("_:a <http://p> _:b _:g .\n")
    );
}

#[test]
fn terminator_directly_after_blank_node() {
    assert_eq!(
        vec![
            "start".to_owned(),
            "spo http://s http://p _:b -".to_owned(),
            "end".to_owned(),
        ],
        parse("<http://s> <http://p> _:b.\n")
    );
}

#[test]
fn sentence_without_trailing_newline() {
    assert_eq!(
        vec![
            "start".to_owned(),
            "spo http://s http://p http://o -".to_owned(),
            "end".to_owned(),
        ],
        parse("<http://s> <http://p> <http://o> .")
    );
}

#[test]
fn terminator_inside_literal_type_token() {
    assert_eq!(
        vec![
            "start".to_owned(),
            "plain http://s http://p \"hi\"@en -".to_owned(),
            "typed http://s http://p \"1\"^^http://dt -".to_owned(),
            "end".to_owned(),
        ],
        parse("<http://s> <http://p> \"hi\"@en.\n<http://s> <http://p> \"1\"^^<http://dt>.\n")
    );
}

#[test]
fn escapes_are_translated() {
    assert_eq!(
        vec![
            "start".to_owned(),
            "plain http://aAb http://p \"li\ne\u{42}\"@- -".to_owned(),
            "end".to_owned(),
        ],
        parse("<http://a\\u0041b> <http://p> \"li\\ne\\u0042\" .\n")
    );
}

#[test]
fn comments_do_not_change_the_stream() {
    let without = parse("<http://s> <http://p> <http://o> .\n");
    let with = parse(
        "# leading comment\n\
         <http://s> <http://p> <http://o> .\n\
         # trailing comment without newline"
    );
    assert_eq!(without, with);
}

#[test]
fn chunking_is_invariant_at_every_split_point() {
    let input = "<http://s> <http://p> \"hi\"@en .\n";
    let reference = parse(input);
    for split in 1..input.len() {
        assert_eq!(
            reference,
            parse_chunks(&[&input[..split], &input[split..]]),
            "split at byte {split}"
        );
    }
}

#[test]
fn single_character_chunks() {
    let input = "<http://a> <http://b> \"v\"^^<http://dt> <http://g> .\n\
                 _:s <http://p> \"x\"@en-us .\n";
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    for c in input.chars() {
        parser.process_char(c).unwrap();
    }
    parser.end_stream().unwrap();
    assert_eq!(parse(input), parser.into_inner().events);
}

#[test]
fn escape_split_across_chunks() {
    let reference = parse("<http://s> <http://p> \"a\\u0041b\" .\n");
    assert_eq!(
        reference,
        parse_chunks(&["<http://s> <http://p> \"a\\u00", "41b\" .\n"])
    );
}

#[test]
fn state_is_reset_between_streams() {
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    parser.process("<http://s> <http://p> <http://o> .\n").unwrap();
    parser.end_stream().unwrap();
    parser.start_stream().unwrap();
    parser.process("<http://s2> <http://p2> \"x\" .\n").unwrap();
    parser.end_stream().unwrap();
    assert_eq!(
        vec![
            "start".to_owned(),
            "spo http://s http://p http://o -".to_owned(),
            "end".to_owned(),
            "start".to_owned(),
            "plain http://s2 http://p2 \"x\"@- -".to_owned(),
            "end".to_owned(),
        ],
        parser.into_inner().events
    );
}

#[test]
fn unexpected_character_is_fatal_by_default() {
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    parser.process("<http://a> <http://b> <http://c> .\n").unwrap();
    let error = parser.process("%").unwrap_err();
    assert_eq!(2, error.line_number());
    assert_eq!(1, error.char_number());
}

#[test]
fn literal_is_rejected_as_subject() {
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    assert!(parser.process("\"x\" <http://p> <http://o> .\n").is_err());
}

#[test]
fn blank_node_is_rejected_as_predicate() {
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    assert!(parser.process("<http://s> _:p <http://o> .\n").is_err());
}

#[test]
fn token_after_graph_is_rejected() {
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    assert!(parser
        .process("<http://s> <http://p> <http://o> <http://g> <http://x> .\n")
        .is_err());
}

#[test]
fn terminator_directly_after_literal_is_rejected() {
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    assert!(parser.process("<http://s> <http://p> \"x\". \n").is_err());
}

#[test]
fn malformed_literal_type_is_rejected() {
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    assert!(parser.process("<http://s> <http://p> \"x\"^^foo .\n").is_err());
}

#[test]
fn surrogate_escape_is_rejected() {
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    assert!(parser.process("<http://s> <http://p> \"\\uD800\" .\n").is_err());
}

#[test]
fn truncated_escape_swallows_the_closing_quote() {
    // the four chars after \u are consumed blindly, so the literal never
    // closes and the open token is reported at the end of the stream
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    parser.process("<http://s> <http://p> \"\\uD8\" .\n").unwrap();
    assert!(parser.end_stream().is_err());
}

#[test]
fn end_of_stream_with_open_token_is_rejected() {
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    parser.process("<http://s> <http://p").unwrap();
    assert!(parser.end_stream().is_err());
}

#[test]
fn end_of_stream_with_unterminated_sentence_is_rejected() {
    let mut parser = NQuadsParser::new(RecordingSink::default());
    parser.start_stream().unwrap();
    parser.process("<http://s> <http://p> <http://o>").unwrap();
    assert!(parser.end_stream().is_err());
}

#[test]
fn recovery_skips_to_the_next_sentence() {
    let handler = RecordingHandler::default();
    let mut parser = NQuadsParser::new(RecordingSink::default())
        .with_error_recovery(true)
        .with_graph_handler(Box::new(handler.clone()));
    parser.start_stream().unwrap();
    parser
        .process("<http://a> % junk .\n<http://s> <http://p> <http://o> .\n")
        .unwrap();
    parser.end_stream().unwrap();
    assert_eq!(
        vec![
            "start".to_owned(),
            "spo http://s http://p http://o -".to_owned(),
            "end".to_owned(),
        ],
        parser.into_inner().events
    );
    let errors = handler.errors.borrow();
    assert_eq!(1, errors.len());
    assert_eq!(ERROR_CLASS, errors[0].0);
}

#[test]
fn handler_is_notified_before_a_fatal_error() {
    let handler = RecordingHandler::default();
    let mut parser =
        NQuadsParser::new(RecordingSink::default()).with_graph_handler(Box::new(handler.clone()));
    parser.start_stream().unwrap();
    assert!(parser.process("%").is_err());
    assert_eq!(1, handler.errors.borrow().len());
}

#[test]
fn recovery_still_reports_end_of_stream_errors() {
    let handler = RecordingHandler::default();
    let mut parser = NQuadsParser::new(RecordingSink::default())
        .with_error_recovery(true)
        .with_graph_handler(Box::new(handler.clone()));
    parser.start_stream().unwrap();
    parser.process("<http://s> <http://p> ").unwrap();
    parser.end_stream().unwrap();
    assert_eq!(1, handler.errors.borrow().len());
    // the sink still sees the end of the stream
    assert_eq!("end", parser.into_inner().events.last().unwrap());
}
