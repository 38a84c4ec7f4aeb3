//! Parsed-response accumulator.
//!
//! # Design
//! `HttpResponse` is plain owned data: the request that produced it, the
//! status line with its derived numeric code, a key-ordered header map, and
//! the body. The request driver mutates it while folding tokenizer output;
//! once the drive loop finishes the value is returned by move and never
//! touched again. No I/O happens here.

use std::collections::BTreeMap;

/// Accumulated result of a single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    request: String,
    status_line: String,
    status_code: u16,
    headers: BTreeMap<String, String>,
    body: String,
}

impl HttpResponse {
    /// An empty response recording the request text that produced it.
    pub fn new(request: String) -> Self {
        Self {
            request,
            status_line: String::new(),
            status_code: 0,
            headers: BTreeMap::new(),
            body: String::new(),
        }
    }

    /// The request exactly as it was written to the connection.
    pub fn request(&self) -> &str {
        &self.request
    }

    /// Store the status line and derive the numeric code from its middle
    /// field. A line with fewer than three whitespace-separated fields, or
    /// a middle field that is not a number, leaves the code at 0.
    pub fn set_status_line(&mut self, line: &str) {
        self.status_line = line.to_string();
        self.status_code = parse_status_code(line);
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    /// Derived numeric status, 0 when it could not be parsed.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Insert or overwrite a header; the last value for a repeated name wins.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Header value for `name`, or the empty string when absent.
    pub fn header(&self, name: &str) -> &str {
        self.headers.get(name).map(String::as_str).unwrap_or("")
    }

    /// All headers, ordered by name.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn set_body(&mut self, body: String) {
        self.body = body;
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

fn parse_status_code(line: &str) -> u16 {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(_), Some(code), Some(_)) => code.parse().unwrap_or(0),
        _ => 0,
    }
}
