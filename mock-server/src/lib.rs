//! Scripted TCP server for exercising the GET client over real sockets.
//!
//! # Design
//! The client under test frames the response body by connection close, so
//! the server has to control the exact wire bytes and close the socket
//! after each reply — including truncated and malformed replies an HTTP
//! framework would refuse to produce. Every accepted connection is handled
//! the same way: read one request head, write the scripted bytes, close.

use std::io;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Wire bytes for a well-formed close-delimited reply.
pub fn reply(status_line: &str, headers: &[(&str, &str)], body: &str) -> Vec<u8> {
    let mut wire = String::new();
    wire.push_str(status_line);
    wire.push_str("\r\n");
    for (name, value) in headers {
        wire.push_str(name);
        wire.push_str(": ");
        wire.push_str(value);
        wire.push_str("\r\n");
    }
    wire.push_str("\r\n");
    wire.push_str(body);
    wire.into_bytes()
}

/// Accept connections forever, answering each with `script` and closing.
pub async fn run(listener: TcpListener, script: Vec<u8>) -> io::Result<()> {
    loop {
        let (stream, _) = listener.accept().await?;
        let script = script.clone();
        tokio::spawn(async move {
            let _ = answer(stream, &script).await;
        });
    }
}

/// Read the request head, write the scripted reply, and let the socket
/// drop — the close is what terminates the client's body read.
async fn answer(mut stream: TcpStream, script: &[u8]) -> io::Result<()> {
    let mut head = Vec::new();
    let mut buf = [0u8; 512];
    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    stream.write_all(script).await?;
    stream.shutdown().await
}
