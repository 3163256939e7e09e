// One-shot HTTP server for integration tests: accepts a single connection,
// records the raw request and replies with a streamed body.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub struct OneShotServer {
    pub url: String,
    handle: JoinHandle<Vec<u8>>,
}

impl OneShotServer {
    /// Reply `200 OK` with `chunks` written one at a time.
    pub fn start(chunks: Vec<&'static str>) -> Self {
        Self::respond("HTTP/1.1 200 OK", chunks)
    }

    pub fn respond(status_line: &'static str, chunks: Vec<&'static str>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/submit", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let head = format!(
                "{status_line}\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\n"
            );
            stream.write_all(head.as_bytes()).unwrap();
            for chunk in chunks {
                stream.write_all(chunk.as_bytes()).unwrap();
                stream.flush().unwrap();
                thread::sleep(Duration::from_millis(20));
            }
            request
        });
        OneShotServer { url, handle }
    }

    /// Wait for the exchange to finish and return the request as text.
    pub fn request(self) -> String {
        String::from_utf8_lossy(&self.handle.join().unwrap()).into_owned()
    }
}

/// An endpoint on a port nothing listens on.
pub fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/submit")
}

/// Value of the multipart part called `name`: the bytes between the blank
/// line after its headers and the next boundary.
pub fn part_value<'a>(request: &'a str, name: &str) -> Option<&'a str> {
    let start = request.find(&format!("name=\"{name}\""))?;
    let rest = &request[start..];
    let body_start = rest.find("\r\n\r\n")? + 4;
    let body = &rest[body_start..];
    let end = body.find("\r\n--")?;
    Some(&body[..end])
}

/// Position of the part called `name` in the request, for order checks.
pub fn part_position(request: &str, name: &str) -> Option<usize> {
    request.find(&format!("name=\"{name}\""))
}

fn read_request(stream: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(header_end) = find(&buf, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
            let body = &buf[header_end + 4..];
            match content_length(&head) {
                Some(len) if body.len() >= len => break,
                None if body.ends_with(b"0\r\n\r\n") => break,
                _ => {}
            }
        }
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    buf
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn content_length(head: &str) -> Option<usize> {
    head.lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse().ok())
}
