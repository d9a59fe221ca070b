use crate::ast::GroupKind;
use crate::lexer::Token;
use std::fmt::{Display, Formatter};

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InnerParseError {
    /// `position` is the index of the token in the lexer output.
    UnexpectedToken { token: Token, position: usize },
    UnterminatedGroup(GroupKind),
    UnexpectedEof,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseError {
    pub inner: InnerParseError,
    pub ln: u64,
}

impl ParseError {
    pub fn get_ln(&self) -> u64 {
        self.ln
    }
}

impl InnerParseError {
    pub fn set_line(self, ln: u64) -> ParseError {
        ParseError { inner: self, ln }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SyntaxError on line {}: {}", self.ln, self.inner)
    }
}

impl Display for InnerParseError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        use InnerParseError as PE;
        match self {
            PE::UnexpectedToken { token, position } => {
                write!(f, "unexpected token '{token}' at position {position}")
            }
            PE::UnterminatedGroup(kind) => write!(f, "unterminated {kind}"),
            PE::UnexpectedEof => write!(f, "reached unexpected EOF"),
        }
    }
}

impl std::error::Error for InnerParseError {}
impl std::error::Error for ParseError {}
