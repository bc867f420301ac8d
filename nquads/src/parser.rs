//! The N-Quads lexer and statement assembler.

use crate::error::NQuadsError;
use crate::escape::unescape;
use rill_api::handler::ProcessorGraphHandler;
use rill_api::sink::QuadSink;
use std::mem;
use tracing::debug;

/// Class IRI identifying error notifications sent to the processor-graph
/// handler.
pub const ERROR_CLASS: &str = "http://rill-rdf.org/nquads/Error";

const SENTENCE_END: char = '.';

/// Countdown sentinel set when a backslash is seen inside a literal. The
/// following character decides how many more are consumed blindly.
const ESCAPE_OPENED: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParsingState {
    Outside,
    Iri,
    BlankNode,
    Literal,
    AfterLiteral,
    LiteralType,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementKind {
    NonLiteral,
    PlainLiteral,
    TypedLiteral,
}

/// A streaming [N-Quads](https://www.w3.org/TR/n-quads/) parser.
///
/// It keeps one parsing state across [`process`](NQuadsParser::process)
/// calls, so tokens and escape sequences may straddle chunk boundaries and
/// any partition of the input into chunks emits the same statements.
///
/// Errors are fatal by default. With
/// [`with_error_recovery`](NQuadsParser::with_error_recovery) the parser
/// instead drops the statement under construction and skips ahead to the
/// next `.`. A [`ProcessorGraphHandler`] is notified of every error in
/// either mode.
pub struct NQuadsParser<S: QuadSink> {
    sink: S,
    recover_errors: bool,
    graph_handler: Option<Box<dyn ProcessorGraphHandler>>,

    state: ParsingState,
    subj: Option<String>,
    pred: Option<String>,
    obj: Option<String>,
    // language or datatype of the object literal
    annotation: Option<String>,
    kind: Option<StatementKind>,
    sentence_done: bool,
    skip_sentence: bool,

    token_start: Option<usize>,
    carry: String,
    chars_to_escape: u8,
    line_number: usize,
    char_number: usize,
}

impl<S: QuadSink> NQuadsParser<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            recover_errors: false,
            graph_handler: None,
            state: ParsingState::Outside,
            subj: None,
            pred: None,
            obj: None,
            annotation: None,
            kind: None,
            sentence_done: false,
            skip_sentence: false,
            token_start: None,
            carry: String::new(),
            chars_to_escape: 0,
            line_number: 1,
            char_number: 0,
        }
    }

    /// Switches error handling from fail-fast to skip-to-next-sentence.
    pub fn with_error_recovery(mut self, enable: bool) -> Self {
        self.recover_errors = enable;
        self
    }

    /// Registers a handler receiving a notification for every parse error,
    /// whether or not the parser recovers from it.
    pub fn with_graph_handler(mut self, handler: Box<dyn ProcessorGraphHandler>) -> Self {
        self.graph_handler = Some(handler);
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Starts a new stream, resetting all parsing state accumulated by a
    /// previous one.
    pub fn start_stream(&mut self) -> Result<(), NQuadsError<S::Error>> {
        debug!("starting N-Quads stream");
        self.reset_statement();
        self.sentence_done = false;
        self.skip_sentence = false;
        self.state = ParsingState::Outside;
        self.chars_to_escape = 0;
        self.line_number = 1;
        self.char_number = 0;
        let (line, char_number) = (self.line_number, self.char_number);
        self.sink
            .start_stream()
            .map_err(|e| NQuadsError::sink(e, line, char_number))
    }

    /// Feeds the next chunk of the input. Chunks may be cut anywhere; a
    /// single character per call works too.
    pub fn process(&mut self, buffer: &str) -> Result<(), NQuadsError<S::Error>> {
        if self.token_start.is_some() {
            self.token_start = Some(0);
        }
        for (pos, c) in buffer.char_indices() {
            if c == '\n' {
                self.line_number += 1;
                self.char_number = 0;
            } else {
                self.char_number += 1;
            }
            if self.skip_sentence {
                if c != SENTENCE_END {
                    continue;
                }
                self.skip_sentence = false;
            }
            match self.state {
                ParsingState::Outside => self.process_outside_char(pos, c)?,
                ParsingState::Comment => {
                    if c == '\n' || c == '\r' {
                        self.state = ParsingState::Outside;
                    }
                }
                ParsingState::Iri => {
                    if c == '>' {
                        let token = self.extract_token(buffer, pos + 1, 1);
                        match unescape(&token) {
                            Ok(iri) => {
                                self.on_non_literal(iri, false)?;
                                self.state = ParsingState::Outside;
                            }
                            Err(e) => self.error(e.to_string())?,
                        }
                    }
                }
                ParsingState::BlankNode => {
                    if is_whitespace(c) || c == SENTENCE_END {
                        let token = self.extract_token(buffer, pos, 0);
                        self.on_non_literal(token, true)?;
                        if !self.skip_sentence {
                            self.state = ParsingState::Outside;
                            self.process_outside_char(pos, c)?;
                        }
                    }
                }
                ParsingState::Literal => self.process_literal_char(buffer, pos, c)?,
                ParsingState::AfterLiteral => {
                    if c == '@' || c == '^' {
                        self.token_start = Some(pos);
                        self.state = ParsingState::LiteralType;
                    } else if c == '<' || is_whitespace(c) {
                        self.kind = Some(StatementKind::PlainLiteral);
                        self.annotation = None;
                        self.state = ParsingState::Outside;
                        self.process_outside_char(pos, c)?;
                    } else {
                        self.error(format!(
                            "unexpected character '{}' after literal",
                            c.escape_debug()
                        ))?;
                    }
                }
                ParsingState::LiteralType => {
                    if is_whitespace(c) {
                        self.process_literal_type(buffer, pos)?;
                    }
                }
            }
        }
        if let Some(start) = self.token_start {
            self.carry.push_str(&buffer[start..]);
        }
        Ok(())
    }

    /// Feeds a single character.
    pub fn process_char(&mut self, c: char) -> Result<(), NQuadsError<S::Error>> {
        let mut buffer = [0; 4];
        self.process(c.encode_utf8(&mut buffer))
    }

    /// Ends the stream. An open token or an unterminated sentence at this
    /// point is a parse error, subject to the recovery policy.
    pub fn end_stream(&mut self) -> Result<(), NQuadsError<S::Error>> {
        if self.token_start.is_some() || self.sentence_done || self.subj.is_some() {
            self.error("unexpected end of stream".to_owned())?;
        }
        debug!("ending N-Quads stream");
        let (line, char_number) = (self.line_number, self.char_number);
        self.sink
            .end_stream()
            .map_err(|e| NQuadsError::sink(e, line, char_number))
    }

    fn process_outside_char(&mut self, pos: usize, c: char) -> Result<(), NQuadsError<S::Error>> {
        match c {
            '"' => {
                self.state = ParsingState::Literal;
                self.token_start = Some(pos);
            }
            '<' => {
                self.state = ParsingState::Iri;
                self.token_start = Some(pos);
            }
            '_' => {
                self.state = ParsingState::BlankNode;
                self.token_start = Some(pos);
            }
            '#' => self.state = ParsingState::Comment,
            SENTENCE_END => self.finish_sentence()?,
            c if is_whitespace(c) => (),
            c => self.error(format!("unexpected character '{}'", c.escape_debug()))?,
        }
        Ok(())
    }

    fn process_literal_char(
        &mut self,
        buffer: &str,
        pos: usize,
        c: char,
    ) -> Result<(), NQuadsError<S::Error>> {
        if self.chars_to_escape == ESCAPE_OPENED {
            // the character after a backslash decides the length of the tail
            self.chars_to_escape = match c {
                'u' => 4,
                'U' => 8,
                _ => 0,
            };
        } else if self.chars_to_escape > 0 {
            self.chars_to_escape -= 1;
        } else if c == '"' {
            let token = self.extract_token(buffer, pos + 1, 1);
            match unescape(&token) {
                Ok(value) => self.on_literal(value)?,
                Err(e) => self.error(e.to_string())?,
            }
        } else if c == '\\' {
            self.chars_to_escape = ESCAPE_OPENED;
        }
        Ok(())
    }

    /// Classifies a completed `@lang` or `^^<datatype>` tail. A trailing `.`
    /// belongs to the sentence, not to the token.
    fn process_literal_type(
        &mut self,
        buffer: &str,
        pos: usize,
    ) -> Result<(), NQuadsError<S::Error>> {
        let token = self.extract_token(buffer, pos, 0);
        let (token_body, ends_sentence) = match token.strip_suffix(SENTENCE_END) {
            Some(body) => (body, true),
            None => (token.as_str(), false),
        };
        if let Some(lang) = token_body.strip_prefix('@') {
            self.kind = Some(StatementKind::PlainLiteral);
            self.annotation = Some(lang.to_owned());
        } else if let Some(iri) = token_body
            .strip_prefix("^^<")
            .and_then(|t| t.strip_suffix('>'))
        {
            match unescape(iri) {
                Ok(datatype) => {
                    self.kind = Some(StatementKind::TypedLiteral);
                    self.annotation = Some(datatype);
                }
                Err(e) => return self.error(e.to_string()),
            }
        } else {
            return self.error(format!("literal type '{token_body}' can not be parsed"));
        }
        self.state = ParsingState::Outside;
        if ends_sentence {
            self.finish_sentence()?;
        }
        Ok(())
    }

    fn finish_sentence(&mut self) -> Result<(), NQuadsError<S::Error>> {
        if self.sentence_done {
            self.sentence_done = false;
            return Ok(());
        }
        if self.kind.is_some() {
            self.emit(None)?;
            self.reset_statement();
            self.sentence_done = false;
            Ok(())
        } else {
            self.error("unexpected end of sentence".to_owned())
        }
    }

    /// Slots a completed IRI or blank-node token into the statement under
    /// construction, in subject, predicate, object, graph order.
    fn on_non_literal(
        &mut self,
        value: String,
        is_blank_node: bool,
    ) -> Result<(), NQuadsError<S::Error>> {
        if self.sentence_done {
            return self.error("end of sentence expected".to_owned());
        }
        if self.subj.is_none() {
            self.subj = Some(value);
        } else if self.pred.is_none() {
            if is_blank_node {
                return self.error("blank node is not allowed as predicate".to_owned());
            }
            self.pred = Some(value);
        } else if self.obj.is_none() {
            self.obj = Some(value);
            self.kind = Some(StatementKind::NonLiteral);
        } else {
            self.on_graph(value)?;
        }
        Ok(())
    }

    fn on_literal(&mut self, value: String) -> Result<(), NQuadsError<S::Error>> {
        if self.sentence_done {
            return self.error("end of sentence expected".to_owned());
        }
        if self.subj.is_none() || self.pred.is_none() || self.obj.is_some() {
            return self.error("literal is not allowed here".to_owned());
        }
        self.obj = Some(value);
        self.state = ParsingState::AfterLiteral;
        Ok(())
    }

    /// A fourth token names the graph; the statement is emitted immediately
    /// and the following `.` only closes the sentence.
    fn on_graph(&mut self, graph: String) -> Result<(), NQuadsError<S::Error>> {
        self.emit(Some(&graph))?;
        self.reset_statement();
        Ok(())
    }

    fn emit(&mut self, graph: Option<&str>) -> Result<(), NQuadsError<S::Error>> {
        let (Some(subj), Some(pred), Some(obj), Some(kind)) = (
            self.subj.take(),
            self.pred.take(),
            self.obj.take(),
            self.kind.take(),
        ) else {
            return self.error("unexpected end of sentence".to_owned());
        };
        let annotation = self.annotation.take();
        let (line, char_number) = (self.line_number, self.char_number);
        match kind {
            StatementKind::NonLiteral => self.sink.add_non_literal(&subj, &pred, &obj, graph),
            StatementKind::PlainLiteral => {
                self.sink
                    .add_plain_literal(&subj, &pred, &obj, annotation.as_deref(), graph)
            }
            StatementKind::TypedLiteral => self.sink.add_typed_literal(
                &subj,
                &pred,
                &obj,
                annotation.as_deref().unwrap_or_default(),
                graph,
            ),
        }
        .map_err(|e| NQuadsError::sink(e, line, char_number))
    }

    /// Extracts the token text ending just before `end`, gluing on whatever
    /// previous chunks carried over, and drops `trim` delimiter bytes from
    /// both ends.
    fn extract_token(&mut self, buffer: &str, end: usize, trim: usize) -> String {
        let start = self.token_start.take().unwrap_or_default();
        let mut token = mem::take(&mut self.carry);
        token.push_str(&buffer[start..end]);
        if trim > 0 {
            token.drain(..trim);
            token.truncate(token.len() - trim);
        }
        token
    }

    fn reset_statement(&mut self) {
        self.carry.clear();
        self.token_start = None;
        self.subj = None;
        self.pred = None;
        self.obj = None;
        self.annotation = None;
        self.kind = None;
        self.sentence_done = true;
    }

    fn error(&mut self, message: String) -> Result<(), NQuadsError<S::Error>> {
        if let Some(handler) = self.graph_handler.as_mut() {
            handler.error(ERROR_CLASS, &message);
        }
        if self.recover_errors {
            debug!(%message, "recovering from N-Quads parse error");
            self.reset_statement();
            self.skip_sentence = true;
            self.state = ParsingState::Outside;
            self.chars_to_escape = 0;
            Ok(())
        } else {
            Err(NQuadsError::syntax(
                message,
                self.line_number,
                self.char_number,
            ))
        }
    }
}

const fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | ' ' | '\r' | '\n')
}
