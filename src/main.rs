// Entrypoint for the CLI.
// - Parses `<file_path> -q <question_id>`, loads the configuration and hands
//   both to the UI layer.
// - Every failure prints to stderr and exits with status 1.

use biskut::{cli, logger, ui, Config};
use std::process::ExitCode;

fn main() -> ExitCode {
    logger::init();

    let invocation = match cli::parse_args(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(usage) => {
            eprintln!("{usage}");
            return ExitCode::FAILURE;
        }
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", anyhow::Error::from(e));
            return ExitCode::FAILURE;
        }
    };

    match ui::run_submission(&config, &invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Submission failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
