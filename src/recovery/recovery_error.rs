use std::fmt;

pub type Result<T> = std::result::Result<T, RecoveryError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryError {
    InvalidSyntax(String),
    Argument(String),
}

impl fmt::Display for RecoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSyntax(reason) => write!(f, "Invalid Syntax! {reason}"),
            Self::Argument(arg) => write!(f, "Invalid function argument `{arg}`"),
        }
    }
}

impl std::error::Error for RecoveryError {}
