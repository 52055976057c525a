//! Error types for environment probing

use thiserror::Error;

/// Environment errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("MBROLA not available for {os}")]
    Unsupported { os: String },

    #[error("MBROLA only available on Windows using the Windows Subsystem for Linux (WSL2)")]
    WslUnavailable,

    #[error("`{program}` not found on PATH")]
    NotFound { program: String },
}

/// Result type for environment probing
pub type EnvResult<T> = Result<T, EnvError>;
