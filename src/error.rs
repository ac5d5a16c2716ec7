//! Error type shared by the fallible entry points.

use std::fmt;

use crate::models::Violation;

/// Errors raised while loading instances or seeding the optimizer.
#[derive(Debug)]
pub enum RoutingError {
    /// A seed solution failed validation; carries every violation found.
    InvalidSeed(Vec<Violation>),
    /// A configuration value is out of range.
    InvalidConfig(String),
    /// An instance file could not be parsed.
    Parse {
        /// 1-based line number, 0 when the error is not tied to a line.
        line: usize,
        /// What went wrong.
        message: String,
    },
    /// Reading an instance failed.
    Io(std::io::Error),
}

impl RoutingError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSeed(violations) => {
                write!(f, "seed solution is invalid ({} violations)", violations.len())?;
                if let Some(first) = violations.first() {
                    write!(f, ", first: {first}")?;
                }
                Ok(())
            }
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Parse { line: 0, message } => write!(f, "parse error: {message}"),
            Self::Parse { line, message } => write!(f, "parse error at line {line}: {message}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for RoutingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RoutingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
