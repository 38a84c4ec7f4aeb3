//! TCP connection setup for the request driver.
//!
//! # Design
//! The parser core only needs an abstract `Read + Write` pair; this module
//! is the one place that produces a concrete one. Resolution takes the
//! first address the resolver returns and connects exactly once — a single
//! failure terminates the request, there is no retry and no fallback
//! through the remaining addresses.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::debug;

use crate::error::FetchError;

/// Deadline applied to connect, send, and receive on every connection.
pub const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolve `host` and open a TCP connection with send and receive
/// deadlines set. An elapsed receive deadline later surfaces as a failed
/// read, not as a distinct condition.
pub fn connect(host: &str, port: u16) -> Result<TcpStream, FetchError> {
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|source| FetchError::Resolution {
            host: host.to_string(),
            source,
        })?;
    let addr = addrs.next().ok_or_else(|| FetchError::Resolution {
        host: host.to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "no addresses found"),
    })?;

    debug!("connecting to {addr}");
    let stream = TcpStream::connect_timeout(&addr, IO_TIMEOUT).map_err(FetchError::Connect)?;
    stream
        .set_read_timeout(Some(IO_TIMEOUT))
        .map_err(FetchError::Connect)?;
    stream
        .set_write_timeout(Some(IO_TIMEOUT))
        .map_err(FetchError::Connect)?;
    Ok(stream)
}
