// Error types shared by the library modules. Messages describe only their own
// layer and keep the underlying error as `source`, so the binary prints the
// whole chain with `{:#}` before exiting with status 1.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Raised when argv does not have the `<file_path> -q <question_id>` shape.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Usage: biskut <file_path> -q <question_id>")]
pub struct UsageError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value {value:?} for {var}, expected true or false")]
    Env { var: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to read solution file {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("request failed")]
    Transport(#[from] reqwest::Error),
    #[error("error reading response")]
    Stream(#[source] io::Error),
    #[error("failed to write output")]
    Output(#[source] io::Error),
}
