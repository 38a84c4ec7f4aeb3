//! Pull-based tokenizer for a close-delimited HTTP/1.x response stream.
//!
//! # Design
//! The tokenizer reads its source one byte at a time and never looks past
//! the delimiter it is currently searching for, so the caller can make
//! decisions (like forwarding a `Content-Length` size hint) between tokens.
//! The only exception is the body, which has no delimiter: everything up to
//! the connection close becomes a single `Body` token.
//!
//! Exactly one `StatusLine` token comes first, header names and values
//! alternate in pairs, one `HeadersComplete` marks the blank line, at most
//! one `Body` follows, and the sequence ends with `EndOfStream`. If the
//! connection never produces a status line the sole token is
//! `ConnectionFailed`.

use std::io::Read;

use log::warn;

/// Classification of one unit of the response grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// The first line of the response, whitespace-trimmed.
    StatusLine,
    /// Text before a `:` on a header line, whitespace-trimmed.
    HeaderName,
    /// Text after a `:` up to the end of a header line, whitespace-trimmed.
    HeaderValue,
    /// The blank line separating headers from the body.
    HeadersComplete,
    /// Everything between the blank line and the connection close, verbatim.
    Body,
    /// The stream is exhausted; `has_token` reports false.
    EndOfStream,
    /// The connection failed before a status line arrived. Terminal.
    ConnectionFailed,
}

/// Scan position between tokens. Named for the token just produced, so each
/// `advance` call dispatches on where the previous scan left off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AfterStatus,
    AfterHeaderName,
    AfterHeaderValue,
    AfterHeadersComplete,
    AfterBody,
    Closed,
    Failed,
}

/// Incremental tokenizer over an abstract byte source.
///
/// Owns the source for its whole lifetime; dropping the tokenizer releases
/// the underlying connection on every exit path.
#[derive(Debug)]
pub struct ResponseTokenizer<R> {
    source: R,
    state: State,
    kind: TokenKind,
    value: String,
    size_hint: usize,
}

impl<R: Read> ResponseTokenizer<R> {
    /// Wrap `source` and immediately scan the status line, so the first
    /// token is available without calling [`advance`](Self::advance).
    pub fn new(source: R) -> Self {
        let mut tokenizer = Self {
            source,
            state: State::AfterStatus,
            kind: TokenKind::EndOfStream,
            value: String::new(),
            size_hint: 0,
        };
        tokenizer.scan_status_line();
        tokenizer
    }

    /// False once the current token is `EndOfStream`. `ConnectionFailed`
    /// still counts as a token so the caller can observe the failure.
    pub fn has_token(&self) -> bool {
        self.kind != TokenKind::EndOfStream
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Advisory pre-allocation for the body buffer. Never bounds the body
    /// read; the body always runs until the connection closes.
    pub fn set_size_hint(&mut self, size: usize) {
        self.size_hint = size;
    }

    /// Consume bytes until the next token boundary and replace the current
    /// token. After `ConnectionFailed` this is a no-op.
    pub fn advance(&mut self) {
        match self.state {
            State::AfterStatus | State::AfterHeaderValue => self.scan_header_boundary(),
            State::AfterHeaderName => self.scan_header_value(),
            State::AfterHeadersComplete => self.scan_body(),
            State::AfterBody | State::Closed => {
                self.state = State::Closed;
                self.kind = TokenKind::EndOfStream;
                self.value.clear();
            }
            State::Failed => {}
        }
    }

    /// One byte from the source. `Ok(None)` on an orderly close; the error
    /// is only distinguished during the initial status-line scan, later
    /// scans treat it like a close (a receive timeout ends the stream).
    fn read_byte(&mut self) -> std::io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.source.read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(err) => Err(err),
        }
    }

    /// Initial scan: everything up to the first line feed is the status
    /// line. A read failure here means the connection never produced a
    /// response at all.
    fn scan_status_line(&mut self) {
        let mut line: Vec<u8> = Vec::new();
        loop {
            match self.read_byte() {
                Ok(Some(b'\n')) | Ok(None) => break,
                Ok(Some(byte)) => line.push(byte),
                Err(err) => {
                    self.state = State::Failed;
                    self.kind = TokenKind::ConnectionFailed;
                    self.value = err.to_string();
                    return;
                }
            }
        }
        self.kind = TokenKind::StatusLine;
        self.value = trimmed(&line);
    }

    /// After a status line or header value the next boundary is either a
    /// `:` (a header name follows) or a line feed (blank line ends the
    /// headers; a non-empty line without a colon is malformed and ends the
    /// stream instead).
    fn scan_header_boundary(&mut self) {
        let mut line: Vec<u8> = Vec::new();
        loop {
            match self.read_byte() {
                Ok(Some(b':')) => {
                    self.state = State::AfterHeaderName;
                    self.kind = TokenKind::HeaderName;
                    self.value = trimmed(&line);
                    return;
                }
                Ok(Some(b'\n')) => {
                    let text = trimmed(&line);
                    if text.is_empty() {
                        self.state = State::AfterHeadersComplete;
                        self.kind = TokenKind::HeadersComplete;
                        self.value = text;
                    } else {
                        warn!("malformed header line without a colon: {text:?}");
                        self.state = State::Closed;
                        self.kind = TokenKind::EndOfStream;
                        self.value = text;
                    }
                    return;
                }
                Ok(Some(byte)) => line.push(byte),
                Ok(None) | Err(_) => {
                    self.end_of_stream(line);
                    return;
                }
            }
        }
    }

    /// After a header name, everything up to the line feed is the value.
    fn scan_header_value(&mut self) {
        let mut line: Vec<u8> = Vec::new();
        loop {
            match self.read_byte() {
                Ok(Some(b'\n')) => {
                    self.state = State::AfterHeaderValue;
                    self.kind = TokenKind::HeaderValue;
                    self.value = trimmed(&line);
                    return;
                }
                Ok(Some(byte)) => line.push(byte),
                Ok(None) | Err(_) => {
                    self.end_of_stream(line);
                    return;
                }
            }
        }
    }

    /// The body has no delimiter: read until the peer closes. Trimming is
    /// never applied here, the bytes are preserved verbatim.
    fn scan_body(&mut self) {
        let mut body: Vec<u8> = Vec::with_capacity(self.size_hint);
        while let Ok(Some(byte)) = self.read_byte() {
            body.push(byte);
        }
        self.state = State::AfterBody;
        self.kind = TokenKind::Body;
        self.value = String::from_utf8_lossy(&body).into_owned();
    }

    /// The source closed mid-scan; whatever was scanned becomes the final
    /// token value.
    fn end_of_stream(&mut self, partial: Vec<u8>) {
        self.state = State::Closed;
        self.kind = TokenKind::EndOfStream;
        self.value = String::from_utf8_lossy(&partial).into_owned();
    }
}

fn trimmed(line: &[u8]) -> String {
    String::from_utf8_lossy(line).trim().to_string()
}
