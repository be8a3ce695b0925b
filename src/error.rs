//! Application-level error type.
//!
//! Every fallible operation at the application boundary returns `AppError`,
//! which carries the process exit code alongside a human-readable message:
//!
//! - `2`: bad input or configuration (missing file, bad flag, bad CSV header)
//! - `3`: the input was readable but nothing usable remained
//! - `4`: runtime failure (terminal, export I/O, corrupted series)

use crate::series::SeriesError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SeriesError> for AppError {
    fn from(err: SeriesError) -> Self {
        AppError::new(4, format!("Corrupted series: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
