use std::io;
use thiserror::Error;

/// Orchestrator-level failures.
///
/// Check failures are NOT errors: they are recorded as outcomes in the run
/// report and surface through the process exit code. Everything here is a
/// "could not even start the run" condition and maps to exit code 2.
#[derive(Error, Debug)]
pub enum GauntletError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("usage error: {0}")]
    Usage(String),
    #[error("config error: {0}")]
    Config(String),
}
