//! Request driver: build the request, send it, fold tokens into a response.
//!
//! # Design
//! The drive loop is split from connection setup. [`issue`] takes any
//! already-connected `Read + Write` pair, so the whole driver is testable
//! against in-memory connections; [`fetch`] is the convenience entry that
//! resolves, connects, and issues in one call. The tokenizer takes
//! ownership of the connection, so it is closed when the drive loop ends
//! on every path, early failure included.

use std::io::{Read, Write};

use log::{debug, warn};

use crate::error::FetchError;
use crate::response::HttpResponse;
use crate::tokenizer::{ResponseTokenizer, TokenKind};
use crate::transport;

/// Request text for a single GET: request line, one `Host` header, blank
/// line. No other headers and no body are ever sent.
pub fn build_request(host: &str, port: u16, path: &str) -> String {
    format!("GET {path} HTTP/1.1\r\nHost: {host}:{port}\r\n\r\n")
}

/// Resolve `host`, connect, and issue a GET for `path`.
pub fn fetch(host: &str, port: u16, path: &str) -> Result<HttpResponse, FetchError> {
    let stream = transport::connect(host, port)?;
    issue(stream, &build_request(host, port, path))
}

/// Write `request` to `conn` and drive a [`ResponseTokenizer`] to
/// completion, folding each token into an [`HttpResponse`].
///
/// A header name with no following value abandons the remaining headers
/// but keeps everything parsed so far; a connection that never yields a
/// status line is the only token-level condition that becomes an error.
pub fn issue<C: Read + Write>(mut conn: C, request: &str) -> Result<HttpResponse, FetchError> {
    conn.write_all(request.as_bytes()).map_err(FetchError::Write)?;
    debug!("request written, {} bytes", request.len());

    let mut response = HttpResponse::new(request.to_string());
    let mut tokenizer = ResponseTokenizer::new(conn);

    while tokenizer.has_token() {
        let mut advance = true;
        match tokenizer.kind() {
            TokenKind::StatusLine => {
                response.set_status_line(tokenizer.value());
            }
            TokenKind::HeaderName => {
                // Grab the next token and make sure it pairs up as a value
                // before recording anything.
                let name = tokenizer.value().to_string();
                tokenizer.advance();
                if tokenizer.has_token() && tokenizer.kind() == TokenKind::HeaderValue {
                    let value = tokenizer.value().to_string();
                    if name == "Content-Length" {
                        if let Ok(size) = value.parse::<usize>() {
                            tokenizer.set_size_hint(size);
                        }
                    }
                    response.add_header(name, value);
                } else {
                    // The advance above already consumed whatever follows;
                    // re-dispatch on it instead of advancing again.
                    warn!("header name {name:?} has no matching value");
                    advance = false;
                }
            }
            TokenKind::HeaderValue => {
                // A value with no preceding name; the pairing above should
                // make this unreachable. Skip it.
                warn!("stray header value {:?}", tokenizer.value());
            }
            TokenKind::HeadersComplete => {}
            TokenKind::Body => {
                response.set_body(tokenizer.value().to_string());
            }
            TokenKind::ConnectionFailed => {
                return Err(FetchError::Receive(tokenizer.value().to_string()));
            }
            TokenKind::EndOfStream => {
                // Not observable here: has_token() excludes it.
            }
        }
        if advance {
            tokenizer.advance();
        }
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// In-memory connection: replies with canned bytes, captures writes.
    struct WireConn {
        reply: Cursor<Vec<u8>>,
        written: Vec<u8>,
    }

    impl WireConn {
        fn new(reply: &str) -> Self {
            Self {
                reply: Cursor::new(reply.as_bytes().to_vec()),
                written: Vec::new(),
            }
        }
    }

    impl Read for WireConn {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.reply.read(buf)
        }
    }

    impl Write for WireConn {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// A connection whose reads always fail, like a peer that never answers.
    struct DeadConn;

    impl Read for DeadConn {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::WouldBlock,
                "receive timed out",
            ))
        }
    }

    impl Write for DeadConn {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// A connection that rejects every write.
    struct RejectingConn;

    impl Read for RejectingConn {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Ok(0)
        }
    }

    impl Write for RejectingConn {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "peer went away",
            ))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn build_request_produces_exact_wire_format() {
        assert_eq!(
            build_request("example.com", 8080, "/index.html"),
            "GET /index.html HTTP/1.1\r\nHost: example.com:8080\r\n\r\n"
        );
    }

    #[test]
    fn issue_writes_the_request_verbatim() {
        let request = build_request("example.com", 80, "/");
        let mut conn = WireConn::new("HTTP/1.1 200 OK\r\n\r\nok");
        let response = issue(&mut conn, &request).unwrap();
        assert_eq!(response.request(), request);
        assert_eq!(conn.written, request.as_bytes());
    }

    #[test]
    fn issue_populates_the_full_model() {
        let conn = WireConn::new(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 5\r\n\r\nhello",
        );
        let response = issue(conn, "GET / HTTP/1.1\r\nHost: h:80\r\n\r\n").unwrap();
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.status_line(), "HTTP/1.1 200 OK");
        assert_eq!(response.header("Content-Type"), "text/html");
        assert_eq!(response.header("Content-Length"), "5");
        assert_eq!(response.body(), "hello");
    }

    #[test]
    fn content_length_hint_does_not_bound_the_body() {
        // The advertised length is wrong on purpose; the body is framed by
        // the connection close, so all ten bytes must come through.
        let conn = WireConn::new("HTTP/1.1 200 OK\r\nContent-Length: 3\r\n\r\n0123456789");
        let response = issue(conn, "GET / HTTP/1.1\r\nHost: h:80\r\n\r\n").unwrap();
        assert_eq!(response.body(), "0123456789");
    }

    #[test]
    fn unpaired_header_name_keeps_earlier_headers() {
        let conn = WireConn::new("HTTP/1.1 200 OK\r\nX-One: 1\r\nX-Trunc:");
        let response = issue(conn, "GET / HTTP/1.1\r\nHost: h:80\r\n\r\n").unwrap();
        assert_eq!(response.header("X-One"), "1");
        assert!(!response.has_header("X-Trunc"));
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body(), "");
    }

    #[test]
    fn malformed_header_line_returns_partial_model() {
        let conn = WireConn::new("HTTP/1.1 200 OK\r\nX-One: 1\r\ngarbage\r\n\r\nbody");
        let response = issue(conn, "GET / HTTP/1.1\r\nHost: h:80\r\n\r\n").unwrap();
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.header("X-One"), "1");
        assert_eq!(response.body(), "");
    }

    #[test]
    fn failed_write_is_a_write_error() {
        let err = issue(RejectingConn, "GET / HTTP/1.1\r\nHost: h:80\r\n\r\n").unwrap_err();
        assert!(matches!(err, FetchError::Write(_)));
    }

    #[test]
    fn dead_connection_surfaces_a_receive_error() {
        let err = issue(DeadConn, "GET / HTTP/1.1\r\nHost: h:80\r\n\r\n").unwrap_err();
        assert!(matches!(err, FetchError::Receive(_)));
    }
}
