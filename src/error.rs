// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Transfer(TransferError),
}

/// Specific error types for a single upload attempt.
/// Each conversion failure is recorded on its own queue row; none of these
/// are fatal to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// The source file could not be read before uploading.
    Source(String),

    /// The request never produced a response (connection refused, DNS
    /// failure, interrupted transfer).
    Request(String),

    /// The endpoint answered with a non-success status.
    Status { code: u16, reason: String },
}

impl TransferError {
    /// Human-readable message recorded on the queue row and shown in the
    /// failure toast.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Source(msg) => write!(f, "Could not read file: {}", msg),
            TransferError::Request(msg) => write!(f, "Request failed: {}", msg),
            TransferError::Status { code, reason } => {
                if reason.is_empty() {
                    write!(f, "Conversion failed: HTTP {}", code)
                } else {
                    write!(f, "Conversion failed: {} {}", code, reason)
                }
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Transfer(e) => write!(f, "Transfer Error: {}", e),
        }
    }
}

impl From<TransferError> for Error {
    fn from(err: TransferError) -> Self {
        Error::Transfer(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
