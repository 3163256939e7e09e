// Library root
// -----------
// `biskut` uploads a solution file to the submission server and prints the
// server's streamed reply. The binary (`main.rs`) only wires these modules
// together.
//
// Module responsibilities:
// - `api`: the blocking multipart client and the response read loop.
// - `stream`: line splitting of the response body and JSON detection.
// - `ui`: console rendering (`Received: ...`) and the progress spinner.
// - `cli`: strict `<file_path> -q <question_id>` argument parsing.
// - `config`: endpoint and student id, from a config file and `BISKUT_*`
//   environment variables.
// - `error`: error types for each layer.
// - `logger`: tracing setup.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod stream;
pub mod ui;

pub use api::{SubmitClient, SubmitOutcome, Submission};
pub use config::Config;
pub use error::{ConfigError, SubmitError, UsageError};
