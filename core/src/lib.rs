//! Synchronous single-shot HTTP/1.1 GET client core.
//!
//! # Overview
//! Issues one GET request over a blocking connection, then tokenizes the
//! reply incrementally — status line, header name/value pairs, end of
//! headers, body — and folds the tokens into an [`HttpResponse`]. The body
//! is framed by the connection close; `Content-Length` is only an advisory
//! buffer-sizing hint.
//!
//! # Design
//! - [`ResponseTokenizer`] is generic over `std::io::Read` and reads one
//!   byte at a time, never past the delimiter it is looking for, so the
//!   driver can act between tokens.
//! - [`issue`] works on any connected `Read + Write` pair, keeping the
//!   drive loop testable without the network; [`fetch`] adds resolution
//!   and connect on top.
//! - Each request owns its connection, tokenizer, and response exclusively;
//!   nothing is shared or retried.

pub mod client;
pub mod error;
pub mod response;
pub mod tokenizer;
pub mod transport;

pub use client::{build_request, fetch, issue};
pub use error::FetchError;
pub use response::HttpResponse;
pub use tokenizer::{ResponseTokenizer, TokenKind};
