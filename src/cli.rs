// Command-line parsing. The accepted shape is fixed:
//
//     biskut <file_path> -q <question_id>
//
// Anything else is a usage error and no request is made.

use crate::error::UsageError;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub file_path: PathBuf,
    pub question_id: String,
}

/// Parse the full argv, program name included.
pub fn parse_args<I, T>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    match args.as_slice() {
        [_, file_path, flag, question_id] if flag == "-q" => Ok(Invocation {
            file_path: PathBuf::from(file_path),
            question_id: question_id.to_string_lossy().into_owned(),
        }),
        _ => Err(UsageError),
    }
}
