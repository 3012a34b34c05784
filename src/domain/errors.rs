// Domain-level errors for match setup. The running simulation has no failure path.

use std::fmt;

#[derive(Debug)]
pub enum SetupError {
    UnknownMode(String),
    InvalidDisplayName,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::UnknownMode(value) => write!(f, "unknown match mode {value:?}"),
            SetupError::InvalidDisplayName => f.write_str("invalid display name"),
        }
    }
}

impl std::error::Error for SetupError {}
