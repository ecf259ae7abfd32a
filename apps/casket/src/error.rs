//! CLI error handling

use std::fmt;

use casket_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Operations error
    Ops(casket_errors::Error),
    /// Invalid command arguments
    InvalidArguments(String),
    /// I/O error
    Io(std::io::Error),
}

impl CliError {
    /// Stable code for structured output
    pub fn code(&self) -> Option<&'static str> {
        match self {
            CliError::Ops(e) => e.user_code(),
            CliError::InvalidArguments(_) => Some("cli.usage"),
            CliError::Io(_) => Some("error.io"),
        }
    }

    /// Message without code or hint decoration
    pub fn message(&self) -> String {
        match self {
            CliError::Ops(e) => e.user_message().into_owned(),
            CliError::InvalidArguments(msg) => msg.clone(),
            CliError::Io(e) => e.to_string(),
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Ops(e) => e.user_hint(),
            _ => None,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Ops(e) => {
                write!(f, "{}", e.user_message())?;
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Ops(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::InvalidArguments(_) => None,
        }
    }
}

impl From<casket_errors::Error> for CliError {
    fn from(e: casket_errors::Error) -> Self {
        CliError::Ops(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
