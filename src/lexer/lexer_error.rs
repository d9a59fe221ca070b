use std::{error, fmt};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InnerLexError {
    UnexpectedChar(char),
    BadConstant(String),
    BadConstantSuffix(char),
    UnterminatedString(char),
    UnterminatedComment,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LexError {
    pub inner: InnerLexError,
    ln: u64,
}

impl LexError {
    pub fn get_ln(&self) -> u64 {
        self.ln
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.ln, self.inner)
    }
}

impl error::Error for LexError {}

impl InnerLexError {
    pub(super) fn set_line(self, ln: u64) -> LexError {
        LexError { inner: self, ln }
    }
}

impl error::Error for InnerLexError {}
impl fmt::Display for InnerLexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnexpectedChar(c) => write!(f, "unrecognized character '{c}'"),
            Self::BadConstant(s) => write!(f, "bad constant {s}"),
            Self::BadConstantSuffix(c) => write!(f, "bad constant suffix: {c}"),
            Self::UnterminatedString(quote) => {
                write!(f, "unterminated string literal starting with {quote}")
            }
            Self::UnterminatedComment => write!(f, "unterminated multi-line comment"),
        }
    }
}
