// Response body handling: split the incoming byte stream into lines and
// classify each line as JSON or plain text.

use serde_json::Value;
use std::fmt;

/// Accumulates response bytes and hands back every fully terminated line.
///
/// One splitter lives for exactly one response. Bytes after the last `\n`
/// stay buffered until the next chunk arrives or `finish` is called.
#[derive(Debug, Default)]
pub struct LineSplitter {
    buffer: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return the lines it completed, without their `\n`.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut processed = 0;
        while let Some(offset) = self.buffer[processed..].iter().position(|&b| b == b'\n') {
            let end = processed + offset;
            lines.push(String::from_utf8_lossy(&self.buffer[processed..end]).into_owned());
            processed = end + 1;
        }
        self.buffer.drain(..processed);
        lines
    }

    /// Number of buffered bytes not yet terminated by a newline.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Consume the splitter and return the unterminated tail, if any.
    pub fn finish(self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.buffer).into_owned())
        }
    }
}

/// A response line after the opportunistic JSON attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Json(Value),
    Raw(String),
}

/// Parse `line` as a JSON value, falling back to the raw text.
pub fn parse_line(line: &str) -> ParsedLine {
    match serde_json::from_str::<Value>(line) {
        Ok(value) => ParsedLine::Json(value),
        Err(_) => ParsedLine::Raw(line.to_string()),
    }
}

impl fmt::Display for ParsedLine {
    /// JSON values render pretty-printed with two-space indentation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedLine::Json(value) => {
                let pretty = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
                f.write_str(&pretty)
            }
            ParsedLine::Raw(text) => f.write_str(text),
        }
    }
}
