//! Error type for issuing a request.
//!
//! # Design
//! Only failures that leave the caller without a response become errors:
//! resolution, connect, the request write, and a connection that never
//! yields a status line. Parse anomalies after that point (a malformed
//! header line, a header name with no value, an early close) stop parsing
//! gracefully and the partially populated response is still returned.

use std::fmt;
use std::io;

/// Fatal failures of a single request. No retry is attempted at any layer.
#[derive(Debug)]
pub enum FetchError {
    /// The host name could not be resolved to an address.
    Resolution { host: String, source: io::Error },

    /// The socket could not be connected (including a connect timeout).
    Connect(io::Error),

    /// The request could not be fully written to the connection.
    Write(io::Error),

    /// The connection never produced a status line; carries the text of
    /// the underlying read failure.
    Receive(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Resolution { host, source } => {
                write!(f, "error resolving address {host}: {source}")
            }
            FetchError::Connect(source) => {
                write!(f, "error connecting to socket: {source}")
            }
            FetchError::Write(source) => {
                write!(f, "error writing to socket: {source}")
            }
            FetchError::Receive(detail) => {
                write!(f, "error reading socket: {detail}")
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Resolution { source, .. }
            | FetchError::Connect(source)
            | FetchError::Write(source) => Some(source),
            FetchError::Receive(_) => None,
        }
    }
}
