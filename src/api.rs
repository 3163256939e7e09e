// API client module: a small blocking HTTP client that uploads a solution
// file to the submission endpoint and streams the server's reply.

use crate::config::Config;
use crate::error::SubmitError;
use crate::ui::ResponsePrinter;
use reqwest::blocking::{multipart, Client, Response};
use reqwest::StatusCode;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, trace};

const READ_CHUNK: usize = 8 * 1024;

/// One solution upload: the file, who submits it and for which question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    file_path: PathBuf,
    student_id: String,
    question_id: String,
}

impl Submission {
    pub fn new(
        file_path: impl Into<PathBuf>,
        student_id: impl Into<String>,
        question_id: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            student_id: student_id.into(),
            question_id: question_id.into(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    /// Multipart body with the parts `solution` (file content, named after
    /// the file's basename), `studentId` and `questionId`, in that order.
    fn form(&self) -> Result<multipart::Form, SubmitError> {
        let form = multipart::Form::new()
            .file("solution", &self.file_path)
            .map_err(|source| SubmitError::File {
                path: self.file_path.clone(),
                source,
            })?;
        Ok(form
            .text("studentId", self.student_id.clone())
            .text("questionId", self.question_id.clone()))
    }
}

/// What a completed request produced. The HTTP status is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub status: StatusCode,
    pub summary: StreamSummary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Response body bytes handed to the printer.
    pub bytes: u64,
    /// Lines written as `Received: ...`.
    pub lines: usize,
}

/// Blocking client bound to one endpoint. No timeout is set: a request
/// waits until the transport itself succeeds or fails.
#[derive(Clone)]
pub struct SubmitClient {
    client: Client,
    endpoint: String,
    event_stream: bool,
}

impl SubmitClient {
    pub fn new(config: &Config) -> Result<Self, SubmitError> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(SubmitClient {
            client,
            endpoint: config.endpoint.clone(),
            event_stream: config.event_stream,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the submission and return once response headers have arrived.
    /// Only transport failures are errors; any HTTP status is accepted.
    pub fn send(&self, submission: &Submission) -> Result<Response, SubmitError> {
        let form = submission.form()?;
        debug!(
            endpoint = %self.endpoint,
            file = %submission.file_path().display(),
            question_id = submission.question_id(),
            "sending submission"
        );
        let response = self.client.post(&self.endpoint).multipart(form).send()?;
        debug!(status = %response.status(), "response headers received");
        Ok(response)
    }

    /// Send the submission and print every response line to `out`.
    pub fn submit<W: Write>(
        &self,
        submission: &Submission,
        out: W,
    ) -> Result<SubmitOutcome, SubmitError> {
        let response = self.send(submission)?;
        let status = response.status();
        let summary = stream_response(response, ResponsePrinter::new(out, self.event_stream))?;
        Ok(SubmitOutcome { status, summary })
    }
}

/// Feed `body` to `printer` chunk by chunk as bytes arrive, then flush the
/// printer's unterminated tail once the body ends.
pub fn stream_response<R: Read, W: Write>(
    mut body: R,
    mut printer: ResponsePrinter<W>,
) -> Result<StreamSummary, SubmitError> {
    let mut chunk = [0u8; READ_CHUNK];
    let mut bytes = 0u64;
    loop {
        let n = match body.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(SubmitError::Stream(e)),
        };
        let consumed = printer.on_chunk(&chunk[..n]).map_err(SubmitError::Output)?;
        bytes += consumed as u64;
        trace!(chunk = n, total = bytes, "response chunk");
    }
    let lines = printer.finish().map_err(SubmitError::Output)?;
    debug!(bytes, lines, "response complete");
    Ok(StreamSummary { bytes, lines })
}
