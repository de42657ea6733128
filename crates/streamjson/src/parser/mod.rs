//! Incremental JSON parser driven by an explicit state machine.
//!
//! Overview
//! - [`StreamingParser`] accepts a document as any sequence of byte chunks
//!   and reports it to an [`EventSink`] as soon as each token is recognized.
//!   A call to `write` may end anywhere: inside a number, a string, an escape
//!   or a multi-byte UTF-8 sequence. Everything needed to resume lives in the
//!   parser, so no call ever waits for more input.
//! - Nesting is tracked on a container stack bounded by
//!   [`ParserOptions::max_depth`]; the parser never recurses.
//!
//! States
//! - `ParseState` is the position in the grammar between tokens (which
//!   punctuation or value may come next).
//! - `LexState` is the position inside a token. `LexState::Default` means
//!   "between tokens"; the structural bytes are then dispatched on
//!   `ParseState`.
//!
//! Borrowing and scratch
//! - A string that has no escapes and lies within the current chunk is handed
//!   to the sink as a slice of the caller's input. The chunk-local `anchor`
//!   marks where the pending raw run starts.
//! - Escapes, strings that span a chunk boundary and numbers that span a
//!   chunk boundary go through the owned `scratch` buffer.
//! - When a chunk ends inside a string, the text so far is emitted as a
//!   `*_part` fragment. A UTF-8 sequence cut by the chunk boundary is carried
//!   (at most four bytes) so that fragments never split a code point.
//!
//! Errors
//! - The first error is stored and returned again by every later `write` or
//!   `finish` until [`StreamingParser::reset`]. Input is validated one byte at
//!   a time, so the reported kind and offset do not depend on how the
//!   document was split.

mod error;
mod escape_buffer;
mod literal_buffer;
mod numbers;
mod options;
mod utf8;


use alloc::{string::String, vec::Vec};

use bstr::BStr;
pub use error::{ErrorKind, ParseError};
use escape_buffer::{CodeUnit, UnicodeEscapeBuffer, combine_surrogates};
use literal_buffer::{ExpectedLiteralBuffer, Literal, Step};
use numbers::{Number, NumberLexeme};
pub use options::{DEFAULT_MAX_DEPTH, ParserOptions};
use utf8::{Utf8Step, Utf8Validator};

use crate::{error::SinkError, sink::EventSink};

// ------------------------------------------------------------------------------------------------
// State machines
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    BeforePropertyName,
    BeforePropertyNameAfterComma,
    AfterPropertyName,
    BeforePropertyValue,
    BeforeArrayValue,
    BeforeArrayValueAfterComma,
    AfterPropertyValue,
    AfterArrayValue,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Default,
    Literal,
    Sign,
    Zero,
    DecimalInteger,
    DecimalPoint,
    DecimalFraction,
    DecimalExponent,
    DecimalExponentSign,
    DecimalExponentInteger,
    String,
    StringEscape,
    StringEscapeUnicode,
    /// A high surrogate was decoded; `\` must follow.
    SurrogateBackslash,
    /// ... then `u`.
    SurrogateU,
    /// ... then four hex digits of a low surrogate.
    SurrogateLow,
}

impl LexState {
    fn in_string(self) -> bool {
        matches!(
            self,
            LexState::String
                | LexState::StringEscape
                | LexState::StringEscapeUnicode
                | LexState::SurrogateBackslash
                | LexState::SurrogateU
                | LexState::SurrogateLow
        )
    }

    fn in_number(self) -> bool {
        matches!(
            self,
            LexState::Sign
                | LexState::Zero
                | LexState::DecimalInteger
                | LexState::DecimalPoint
                | LexState::DecimalFraction
                | LexState::DecimalExponent
                | LexState::DecimalExponentSign
                | LexState::DecimalExponentInteger
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

/// Where the next byte lands: absolute offset, 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    offset: usize,
    line: usize,
    column: usize,
}

impl Position {
    const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };

    #[inline]
    fn advance(&mut self, b: u8) {
        self.offset += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

/// What the byte loop does after one step.
enum Advance {
    Consume,
    /// The byte ended a number without belonging to it; look at it again in
    /// the new state.
    Reprocess,
}

// ------------------------------------------------------------------------------------------------
// Parser
// ------------------------------------------------------------------------------------------------

/// A resumable JSON parser that reports to an [`EventSink`].
///
/// Feed the document with any number of [`write`](Self::write) calls, then
/// call [`finish`](Self::finish). The sink sees every event in document
/// order; see [`EventSink`] for the fragment rules of strings and keys.
///
/// # Examples
///
/// ```rust
/// use streamjson::{ErrorKind, NullSink, ParserOptions, StreamingParser};
///
/// let mut parser = StreamingParser::new(NullSink, ParserOptions::default());
/// parser.write(b"{\"a\": [1, 2").unwrap();
/// parser.write(b"]}").unwrap();
/// parser.finish().unwrap();
/// assert!(parser.is_done());
///
/// parser.reset();
/// parser.write(b"[1,").unwrap();
/// let err = parser.finish().unwrap_err();
/// assert_eq!(err.kind(), &ErrorKind::UnterminatedDocument);
/// assert_eq!(err.offset(), 3);
/// ```
pub struct StreamingParser<S: EventSink> {
    sink: S,
    options: ParserOptions,

    stack: Vec<Container>,
    parse_state: ParseState,
    lex_state: LexState,

    /// Position of the next byte, across every `write` since `reset`.
    pos: Position,
    /// Start of the token in flight, for errors reported at its first byte.
    token_start: Position,
    /// The most recent `,`, for errors reported at a trailing comma.
    last_comma: Position,

    /// Chunk-local start of the raw run not yet copied or emitted.
    anchor: usize,
    /// Chunk-local start of the UTF-8 sequence being validated.
    seq_start: usize,
    /// Owned text of the token in flight when it cannot be borrowed.
    scratch: String,
    in_key: bool,
    number_is_float: bool,
    literal: ExpectedLiteralBuffer,
    escape: UnicodeEscapeBuffer,
    high_surrogate: u16,
    utf8: Utf8Validator,
    /// Leading bytes of a UTF-8 sequence cut by a chunk boundary.
    utf8_carry: [u8; 4],
    utf8_carry_len: usize,

    finished: bool,
    error: Option<ParseError>,
}

impl<S: EventSink> StreamingParser<S> {
    pub fn new(sink: S, options: ParserOptions) -> Self {
        Self {
            sink,
            options,
            stack: Vec::new(),
            parse_state: ParseState::Start,
            lex_state: LexState::Default,
            pos: Position::START,
            token_start: Position::START,
            last_comma: Position::START,
            anchor: 0,
            seq_start: 0,
            scratch: String::new(),
            in_key: false,
            number_is_float: false,
            literal: ExpectedLiteralBuffer::none(),
            escape: UnicodeEscapeBuffer::new(),
            high_surrogate: 0,
            utf8: Utf8Validator::new(),
            utf8_carry: [0; 4],
            utf8_carry_len: 0,
            finished: false,
            error: None,
        }
    }

    /// Clears all parse state for a new document. The sink is left alone and
    /// scratch allocations are kept for reuse.
    pub fn reset(&mut self) {
        log::trace!("reset after {} bytes", self.pos.offset);
        self.stack.clear();
        self.parse_state = ParseState::Start;
        self.lex_state = LexState::Default;
        self.pos = Position::START;
        self.token_start = Position::START;
        self.last_comma = Position::START;
        self.anchor = 0;
        self.seq_start = 0;
        self.scratch.clear();
        self.in_key = false;
        self.number_is_float = false;
        self.literal = ExpectedLiteralBuffer::none();
        self.escape.reset();
        self.high_surrogate = 0;
        self.utf8.reset();
        self.utf8_carry_len = 0;
        self.finished = false;
        self.error = None;
    }

    /// Consumes all of `input`, which continues the document exactly where
    /// the previous call stopped. Returns `input.len()`.
    ///
    /// Non-whitespace after the root value fails with
    /// [`ErrorKind::TrailingData`]; a write after a successful
    /// [`finish`](Self::finish) fails with [`ErrorKind::AlreadyFinished`].
    pub fn write(&mut self, input: &[u8]) -> Result<usize, ParseError> {
        self.feed(input, false)
    }

    /// Like [`write`](Self::write), but stops as soon as the root value is
    /// complete and returns how many bytes were consumed. The rest of `input`
    /// is left for the caller, which allows reading concatenated documents.
    ///
    /// ```rust
    /// use streamjson::{NullSink, ParserOptions, StreamingParser};
    ///
    /// let input = b"[1] [2]";
    /// let mut parser = StreamingParser::new(NullSink, ParserOptions::default());
    /// let n = parser.write_some(input).unwrap();
    /// assert_eq!(n, 3);
    /// parser.finish().unwrap();
    ///
    /// parser.reset();
    /// parser.finish_with(&input[n..]).unwrap();
    /// ```
    pub fn write_some(&mut self, input: &[u8]) -> Result<usize, ParseError> {
        self.feed(input, true)
    }

    /// Signals end of input.
    ///
    /// A number that could still have grown is completed here. Ending inside
    /// a string or literal is [`ErrorKind::UnexpectedEnd`]; ending with open
    /// containers, or before any value, is
    /// [`ErrorKind::UnterminatedDocument`]. Calling `finish` again after it
    /// succeeded does nothing.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.finished {
            return Ok(());
        }

        let pos = self.pos;
        match self.lex_state {
            LexState::Default => {}
            LexState::Zero
            | LexState::DecimalInteger
            | LexState::DecimalFraction
            | LexState::DecimalExponentInteger => self.finish_number(&[])?,
            LexState::Sign
            | LexState::DecimalPoint
            | LexState::DecimalExponent
            | LexState::DecimalExponentSign => {
                return Err(self.fail(ErrorKind::InvalidNumberLiteral, pos));
            }
            _ => return Err(self.fail(ErrorKind::UnexpectedEnd, pos)),
        }

        if self.parse_state != ParseState::End {
            return Err(self.fail(ErrorKind::UnterminatedDocument, pos));
        }
        self.finished = true;
        log::trace!("finished document of {} bytes", pos.offset);
        Ok(())
    }

    /// [`write`](Self::write) followed by [`finish`](Self::finish).
    pub fn finish_with(&mut self, input: &[u8]) -> Result<(), ParseError> {
        self.write(input)?;
        self.finish()
    }

    /// Number of currently open arrays and objects.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of bytes consumed since construction or the last reset.
    pub fn offset(&self) -> usize {
        self.pos.offset
    }

    /// `true` once [`finish`](Self::finish) has succeeded.
    pub fn is_done(&self) -> bool {
        self.finished
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // --------------------------------------------------------------------------------------------
    // Byte loop
    // --------------------------------------------------------------------------------------------

    fn feed(&mut self, input: &[u8], stop_at_root: bool) -> Result<usize, ParseError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.finished {
            return Err(self.error_here(ErrorKind::AlreadyFinished));
        }
        log::trace!(
            "write {} bytes at offset {}: {:?}",
            input.len(),
            self.pos.offset,
            BStr::new(input)
        );

        self.anchor = 0;
        let mut i = 0;
        while let Some(&b) = input.get(i) {
            if stop_at_root && self.parse_state == ParseState::End {
                break;
            }
            match self.step(input, i, b)? {
                Advance::Consume => {
                    self.pos.advance(b);
                    i += 1;
                }
                Advance::Reprocess => {}
            }
        }

        self.end_chunk(input.get(..i).unwrap_or_default())?;
        Ok(i)
    }

    #[inline]
    fn step(&mut self, input: &[u8], i: usize, b: u8) -> Result<Advance, ParseError> {
        match self.lex_state {
            LexState::Default => self.step_structure(i, b).map(|()| Advance::Consume),
            LexState::Literal => self.step_literal(b).map(|()| Advance::Consume),
            state if state.in_number() => self.step_number(input, i, b),
            _ => self.step_string(input, i, b).map(|()| Advance::Consume),
        }
    }

    /// Saves whatever the token in flight needs from the chunk that just
    /// ended.
    fn end_chunk(&mut self, chunk: &[u8]) -> Result<(), ParseError> {
        if self.lex_state.in_number() {
            let tail = chunk.get(self.anchor..).unwrap_or_default();
            self.scratch.extend(tail.iter().copied().map(char::from));
            return Ok(());
        }
        if !self.lex_state.in_string() {
            return Ok(());
        }

        let mut run = "";
        if self.lex_state == LexState::String && self.utf8_carry_len == 0 {
            let end = if self.utf8.is_idle() {
                chunk.len()
            } else {
                self.seq_start
            };
            let tail = chunk.get(end..).unwrap_or_default();
            for (slot, &b) in self.utf8_carry.iter_mut().zip(tail) {
                *slot = b;
            }
            self.utf8_carry_len = tail.len();
            run = self.run_str(chunk, end)?;
        }

        let pos = self.pos;
        emit_fragment(&mut self.sink, &mut self.scratch, run, self.in_key, false)
            .map_err(|e| self.fail(ErrorKind::SinkRejected(e), pos))
    }

    // --------------------------------------------------------------------------------------------
    // Structure
    // --------------------------------------------------------------------------------------------

    fn step_structure(&mut self, i: usize, b: u8) -> Result<(), ParseError> {
        use ParseState as P;

        if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
            return Ok(());
        }
        let pos = self.pos;

        match (self.parse_state, b) {
            (P::Start | P::BeforePropertyValue, _) => self.begin_value(i, b),

            (P::BeforeArrayValue | P::AfterArrayValue, b']') => self.close(),
            (P::BeforeArrayValue | P::BeforeArrayValueAfterComma, _) if is_value_start(b) => {
                self.begin_value(i, b)
            }
            (P::BeforeArrayValueAfterComma, b']') => {
                Err(self.fail(ErrorKind::Syntax("value after ','"), self.last_comma))
            }
            (P::BeforeArrayValue | P::BeforeArrayValueAfterComma, _) => {
                Err(self.fail(ErrorKind::Syntax("value"), pos))
            }
            (P::AfterArrayValue, b',') => {
                self.last_comma = pos;
                self.parse_state = P::BeforeArrayValueAfterComma;
                Ok(())
            }
            (P::AfterArrayValue, _) => Err(self.fail(ErrorKind::Syntax("',' or ']'"), pos)),

            (P::BeforePropertyName | P::BeforePropertyNameAfterComma, b'"') => {
                self.begin_string(i, true);
                Ok(())
            }
            (P::BeforePropertyName | P::AfterPropertyValue, b'}') => self.close(),
            (P::BeforePropertyNameAfterComma, b'}') => {
                Err(self.fail(ErrorKind::Syntax("property name after ','"), self.last_comma))
            }
            (P::BeforePropertyName, _) => {
                Err(self.fail(ErrorKind::Syntax("property name or '}'"), pos))
            }
            (P::BeforePropertyNameAfterComma, _) => {
                Err(self.fail(ErrorKind::Syntax("property name"), pos))
            }
            (P::AfterPropertyName, b':') => {
                self.parse_state = P::BeforePropertyValue;
                Ok(())
            }
            (P::AfterPropertyName, _) => Err(self.fail(ErrorKind::Syntax("':'"), pos)),
            (P::AfterPropertyValue, b',') => {
                self.last_comma = pos;
                self.parse_state = P::BeforePropertyNameAfterComma;
                Ok(())
            }
            (P::AfterPropertyValue, _) => Err(self.fail(ErrorKind::Syntax("',' or '}'"), pos)),

            (P::End, _) => Err(self.fail(ErrorKind::TrailingData, pos)),
        }
    }

    fn begin_value(&mut self, i: usize, b: u8) -> Result<(), ParseError> {
        let pos = self.pos;
        if !is_value_start(b) {
            return Err(self.fail(ErrorKind::Syntax("value"), pos));
        }
        if self.parse_state == ParseState::Start {
            log::trace!("document begins at offset {}", pos.offset);
            self.sink
                .on_document_begin()
                .map_err(|e| self.fail(ErrorKind::SinkRejected(e), pos))?;
        }

        match b {
            b'{' => self.open(Container::Object),
            b'[' => self.open(Container::Array),
            b'"' => {
                self.begin_string(i, false);
                Ok(())
            }
            b'-' | b'0'..=b'9' => {
                self.token_start = pos;
                self.anchor = i;
                self.number_is_float = false;
                self.lex_state = match b {
                    b'-' => LexState::Sign,
                    b'0' => LexState::Zero,
                    _ => LexState::DecimalInteger,
                };
                Ok(())
            }
            _ => {
                self.token_start = pos;
                self.literal = ExpectedLiteralBuffer::new(b);
                self.lex_state = LexState::Literal;
                Ok(())
            }
        }
    }

    fn open(&mut self, container: Container) -> Result<(), ParseError> {
        let pos = self.pos;
        if self.stack.len() >= self.options.max_depth {
            return Err(self.fail(ErrorKind::DepthLimitExceeded, pos));
        }
        self.stack.push(container);

        let (result, state) = match container {
            Container::Array => (self.sink.on_array_begin(), ParseState::BeforeArrayValue),
            Container::Object => (self.sink.on_object_begin(), ParseState::BeforePropertyName),
        };
        result.map_err(|e| self.fail(ErrorKind::SinkRejected(e), pos))?;
        self.parse_state = state;
        Ok(())
    }

    fn close(&mut self) -> Result<(), ParseError> {
        let pos = self.pos;
        let result = match self.stack.pop() {
            Some(Container::Array) => self.sink.on_array_end(),
            Some(Container::Object) => self.sink.on_object_end(),
            None => return Err(self.fail(ErrorKind::TrailingData, pos)),
        };
        result.map_err(|e| self.fail(ErrorKind::SinkRejected(e), pos))?;
        self.complete_value(pos)
    }

    /// Moves the grammar past a finished value.
    fn complete_value(&mut self, pos: Position) -> Result<(), ParseError> {
        self.parse_state = match self.stack.last().copied() {
            Some(Container::Array) => ParseState::AfterArrayValue,
            Some(Container::Object) => ParseState::AfterPropertyValue,
            None => {
                self.sink
                    .on_document_end()
                    .map_err(|e| self.fail(ErrorKind::SinkRejected(e), pos))?;
                log::trace!("document complete at offset {}", pos.offset);
                ParseState::End
            }
        };
        Ok(())
    }

    // --------------------------------------------------------------------------------------------
    // Literals and numbers
    // --------------------------------------------------------------------------------------------

    fn step_literal(&mut self, b: u8) -> Result<(), ParseError> {
        let pos = self.pos;
        match self.literal.step(b) {
            Step::NeedMore => Ok(()),
            Step::Done(literal) => {
                let result = match literal {
                    Literal::Null => self.sink.on_null(),
                    Literal::True => self.sink.on_bool(true),
                    Literal::False => self.sink.on_bool(false),
                };
                result.map_err(|e| self.fail(ErrorKind::SinkRejected(e), pos))?;
                self.lex_state = LexState::Default;
                self.complete_value(pos)
            }
            Step::Reject => Err(self.fail(ErrorKind::Syntax("literal"), pos)),
        }
    }

    fn step_number(&mut self, input: &[u8], i: usize, b: u8) -> Result<Advance, ParseError> {
        use LexState as L;

        let next = match (self.lex_state, b) {
            (L::Sign, b'0') => L::Zero,
            (L::Sign, b'1'..=b'9') | (L::DecimalInteger, b'0'..=b'9') => L::DecimalInteger,
            (L::Zero | L::DecimalInteger, b'.') => L::DecimalPoint,
            (L::DecimalPoint | L::DecimalFraction, b'0'..=b'9') => L::DecimalFraction,
            (L::Zero | L::DecimalInteger | L::DecimalFraction, b'e' | b'E') => L::DecimalExponent,
            (L::DecimalExponent, b'+' | b'-') => L::DecimalExponentSign,
            (
                L::DecimalExponent | L::DecimalExponentSign | L::DecimalExponentInteger,
                b'0'..=b'9',
            ) => L::DecimalExponentInteger,
            // Digits after a leading zero can never form a valid number.
            (L::Zero, b'0'..=b'9') => {
                return Err(self.fail(ErrorKind::InvalidNumberLiteral, self.pos));
            }
            (L::Zero | L::DecimalInteger | L::DecimalFraction | L::DecimalExponentInteger, _) => {
                let text = input.get(self.anchor..i).unwrap_or_default();
                self.finish_number(text)?;
                return Ok(Advance::Reprocess);
            }
            _ => return Err(self.fail(ErrorKind::InvalidNumberLiteral, self.pos)),
        };

        if matches!(next, L::DecimalPoint | L::DecimalExponent) {
            self.number_is_float = true;
        }
        self.lex_state = next;
        Ok(Advance::Consume)
    }

    /// Classifies the number whose text is `scratch` followed by `tail` and
    /// reports it.
    fn finish_number(&mut self, tail: &[u8]) -> Result<(), ParseError> {
        let number = {
            let text = if self.scratch.is_empty() {
                core::str::from_utf8(tail).unwrap_or_default()
            } else {
                self.scratch.extend(tail.iter().copied().map(char::from));
                self.scratch.as_str()
            };
            if self.number_is_float {
                NumberLexeme::Float(text)
            } else {
                NumberLexeme::Integer(text)
            }
            .classify()
        };
        self.scratch.clear();

        let Some(number) = number else {
            return Err(self.fail(ErrorKind::InvalidNumberLiteral, self.token_start));
        };
        let pos = self.pos;
        let result = match number {
            Number::Int64(n) => self.sink.on_int64(n),
            Number::UInt64(n) => self.sink.on_uint64(n),
            Number::Double(d) => self.sink.on_double(d),
        };
        result.map_err(|e| self.fail(ErrorKind::SinkRejected(e), pos))?;
        self.lex_state = LexState::Default;
        self.complete_value(pos)
    }

    // --------------------------------------------------------------------------------------------
    // Strings
    // --------------------------------------------------------------------------------------------

    fn begin_string(&mut self, i: usize, key: bool) {
        self.in_key = key;
        self.anchor = i + 1;
        self.scratch.clear();
        self.utf8.reset();
        self.utf8_carry_len = 0;
        self.lex_state = LexState::String;
    }

    /// Returns to raw string content after an escape ending at `i`.
    fn resume_string(&mut self, i: usize) {
        self.anchor = i + 1;
        self.lex_state = LexState::String;
    }

    fn step_string(&mut self, input: &[u8], i: usize, b: u8) -> Result<(), ParseError> {
        use LexState as L;

        let pos = self.pos;
        match self.lex_state {
            L::String if self.utf8_carry_len > 0 => {
                // Completing a sequence that started in an earlier chunk.
                let step = self
                    .utf8
                    .feed(b)
                    .map_err(|()| self.fail(ErrorKind::InvalidUtf8, pos))?;
                if let Some(slot) = self.utf8_carry.get_mut(self.utf8_carry_len) {
                    *slot = b;
                }
                self.utf8_carry_len += 1;
                if step == Utf8Step::Complete {
                    let carry = self.utf8_carry;
                    let carried = carry.get(..self.utf8_carry_len).unwrap_or_default();
                    let text = core::str::from_utf8(carried)
                        .map_err(|_| self.fail(ErrorKind::InvalidUtf8, pos))?;
                    self.scratch.push_str(text);
                    self.utf8_carry_len = 0;
                    self.resume_string(i);
                }
                Ok(())
            }
            L::String if !self.utf8.is_idle() => self
                .utf8
                .feed(b)
                .map(|_| ())
                .map_err(|()| self.fail(ErrorKind::InvalidUtf8, pos)),
            L::String => match b {
                b'"' => self.end_string(input, i),
                b'\\' => {
                    let run = self.run_str(input, i)?;
                    self.scratch.push_str(run);
                    self.lex_state = L::StringEscape;
                    Ok(())
                }
                0x00..=0x1F => Err(self.fail(ErrorKind::Syntax("string character"), pos)),
                0x20..=0x7F => Ok(()),
                _ => {
                    self.seq_start = i;
                    self.utf8
                        .feed(b)
                        .map(|_| ())
                        .map_err(|()| self.fail(ErrorKind::InvalidUtf8, pos))
                }
            },

            L::StringEscape => {
                let decoded = match b {
                    b'"' => '"',
                    b'\\' => '\\',
                    b'/' => '/',
                    b'b' => '\u{08}',
                    b'f' => '\u{0C}',
                    b'n' => '\n',
                    b'r' => '\r',
                    b't' => '\t',
                    b'u' => {
                        self.escape.reset();
                        self.lex_state = L::StringEscapeUnicode;
                        return Ok(());
                    }
                    _ => return Err(self.fail(ErrorKind::InvalidEscapeSequence, pos)),
                };
                self.scratch.push(decoded);
                self.resume_string(i);
                Ok(())
            }
            L::StringEscapeUnicode => match self.escape.feed(b) {
                Err(()) => Err(self.fail(ErrorKind::InvalidEscapeSequence, pos)),
                Ok(None) => Ok(()),
                Ok(Some(CodeUnit::Scalar(c))) => {
                    self.scratch.push(c);
                    self.resume_string(i);
                    Ok(())
                }
                Ok(Some(CodeUnit::HighSurrogate(high))) => {
                    self.high_surrogate = high;
                    self.lex_state = L::SurrogateBackslash;
                    Ok(())
                }
                Ok(Some(CodeUnit::LowSurrogate(_))) => {
                    Err(self.fail(ErrorKind::UnpairedSurrogate, pos))
                }
            },
            L::SurrogateBackslash if b == b'\\' => {
                self.lex_state = L::SurrogateU;
                Ok(())
            }
            L::SurrogateU if b == b'u' => {
                self.escape.reset();
                self.lex_state = L::SurrogateLow;
                Ok(())
            }
            L::SurrogateLow => match self.escape.feed(b) {
                Err(()) => Err(self.fail(ErrorKind::InvalidEscapeSequence, pos)),
                Ok(None) => Ok(()),
                Ok(Some(CodeUnit::LowSurrogate(low))) => {
                    self.scratch
                        .push(combine_surrogates(self.high_surrogate, low));
                    self.resume_string(i);
                    Ok(())
                }
                Ok(Some(_)) => Err(self.fail(ErrorKind::UnpairedSurrogate, pos)),
            },
            _ => Err(self.fail(ErrorKind::UnpairedSurrogate, pos)),
        }
    }

    fn end_string(&mut self, input: &[u8], i: usize) -> Result<(), ParseError> {
        let pos = self.pos;
        let run = self.run_str(input, i)?;
        let key = self.in_key;
        emit_fragment(&mut self.sink, &mut self.scratch, run, key, true)
            .map_err(|e| self.fail(ErrorKind::SinkRejected(e), pos))?;
        self.lex_state = LexState::Default;
        if key {
            self.parse_state = ParseState::AfterPropertyName;
            Ok(())
        } else {
            self.complete_value(pos)
        }
    }

    /// The validated raw run `input[anchor..end]`.
    fn run_str<'a>(&mut self, input: &'a [u8], end: usize) -> Result<&'a str, ParseError> {
        let pos = self.pos;
        let bytes = input.get(self.anchor..end).unwrap_or_default();
        core::str::from_utf8(bytes).map_err(|_| self.fail(ErrorKind::InvalidUtf8, pos))
    }

    // --------------------------------------------------------------------------------------------
    // Errors
    // --------------------------------------------------------------------------------------------

    /// An error of `kind` at the position of the next byte, without
    /// recording it.
    pub(crate) fn error_here(&self, kind: ErrorKind) -> ParseError {
        self.error_at(kind, self.pos)
    }

    fn error_at(&self, kind: ErrorKind, pos: Position) -> ParseError {
        ParseError {
            kind,
            offset: pos.offset,
            line: pos.line,
            column: pos.column,
        }
    }

    /// Records `kind` as the terminal error of this document.
    #[cold]
    fn fail(&mut self, kind: ErrorKind, pos: Position) -> ParseError {
        let err = self.error_at(kind, pos);
        log::debug!("parse failed: {err}");
        self.error = Some(err.clone());
        err
    }
}

impl<S: EventSink + core::fmt::Debug> core::fmt::Debug for StreamingParser<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StreamingParser")
            .field("sink", &self.sink)
            .field("options", &self.options)
            .field("depth", &self.stack.len())
            .field("offset", &self.pos.offset)
            .field("parse_state", &self.parse_state)
            .field("lex_state", &self.lex_state)
            .field("finished", &self.finished)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

#[inline]
fn is_value_start(b: u8) -> bool {
    matches!(b, b'{' | b'[' | b'"' | b't' | b'f' | b'n' | b'-' | b'0'..=b'9')
}

/// Hands `scratch + run` to the sink as a key or string fragment. Non-final
/// fragments are skipped when empty. `run` is passed through without a copy
/// when nothing is buffered.
fn emit_fragment<S: EventSink>(
    sink: &mut S,
    scratch: &mut String,
    run: &str,
    key: bool,
    last: bool,
) -> Result<(), SinkError> {
    let text = if scratch.is_empty() {
        run
    } else {
        scratch.push_str(run);
        scratch.as_str()
    };
    let result = match (key, last) {
        (_, false) if text.is_empty() => Ok(()),
        (true, true) => sink.on_key(text),
        (true, false) => sink.on_key_part(text),
        (false, true) => sink.on_string(text),
        (false, false) => sink.on_string_part(text),
    };
    scratch.clear();
    result
}
