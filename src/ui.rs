// UI layer: console output for a submission. Shows a spinner while the
// request is in flight, then prints each response line as it arrives.

use crate::api::{stream_response, SubmitClient, Submission};
use crate::cli::Invocation;
use crate::config::Config;
use crate::stream::{parse_line, LineSplitter};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

/// Renders response lines as `Received: <line>`, pretty-printing JSON.
///
/// With `event_stream` set, lines are read as server-sent events: blank
/// separators and `:` comments are skipped and the `data:` prefix is
/// stripped before the JSON attempt.
pub struct ResponsePrinter<W: Write> {
    out: W,
    splitter: LineSplitter,
    event_stream: bool,
    printed: usize,
}

impl<W: Write> ResponsePrinter<W> {
    pub fn new(out: W, event_stream: bool) -> Self {
        ResponsePrinter {
            out,
            splitter: LineSplitter::new(),
            event_stream,
            printed: 0,
        }
    }

    /// Print every line completed by `chunk`. Always reports the whole
    /// chunk as consumed.
    pub fn on_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
        for line in self.splitter.push(chunk) {
            self.print_line(&line)?;
        }
        Ok(chunk.len())
    }

    /// Print the unterminated tail, if any, and return the number of lines
    /// printed over the printer's lifetime.
    pub fn finish(mut self) -> io::Result<usize> {
        if let Some(tail) = std::mem::take(&mut self.splitter).finish() {
            tracing::debug!(len = tail.len(), "flushing unterminated final line");
            self.print_line(&tail)?;
        }
        self.out.flush()?;
        Ok(self.printed)
    }

    fn print_line(&mut self, line: &str) -> io::Result<()> {
        let payload = if self.event_stream {
            match event_payload(line) {
                Some(payload) => payload,
                None => return Ok(()),
            }
        } else {
            line
        };
        writeln!(self.out, "Received: {}", parse_line(payload))?;
        self.out.flush()?;
        self.printed += 1;
        Ok(())
    }
}

/// Payload of one event-stream line, or `None` for separators and comments.
fn event_payload(line: &str) -> Option<&str> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() || line.starts_with(':') {
        return None;
    }
    match line.strip_prefix("data:") {
        Some(data) => Some(data.strip_prefix(' ').unwrap_or(data)),
        None => Some(line),
    }
}

/// Submit the invocation's file with the configured endpoint and student
/// id, printing the response to stdout.
pub fn run_submission(config: &Config, invocation: &Invocation) -> Result<()> {
    let client = SubmitClient::new(config).context("Failed to build HTTP client")?;
    let submission = Submission::new(
        &invocation.file_path,
        &config.student_id,
        &invocation.question_id,
    );

    // The spinner draws on stderr and stays hidden when it is not a terminal.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!("Submitting to {}...", client.endpoint()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let sent = client.send(&submission);
    spinner.finish_and_clear();
    let response = sent?;

    let stdout = io::stdout();
    let printer = ResponsePrinter::new(stdout.lock(), config.event_stream);
    stream_response(response, printer)?;

    println!("Submission process completed");
    Ok(())
}
