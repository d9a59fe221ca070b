use crate::ast::Identifier;
use std::fmt;

pub type Result<T> = std::result::Result<T, CodegenError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodegenError {
    UndefinedVariable(Identifier),
    DuplicateDeclaration(Identifier),
    UnsupportedStatement(String),
    TooManyArguments { callee: Identifier, count: usize },
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UndefinedVariable(name) => write!(f, "variable '{name}' not found"),
            Self::DuplicateDeclaration(name) => write!(f, "redeclaration of variable '{name}'"),
            Self::UnsupportedStatement(s) => write!(f, "unsupported statement `{s}`"),
            Self::TooManyArguments { callee, count } => write!(
                f,
                "call to {callee} with {count} arguments, at most 4 are supported"
            ),
        }
    }
}

impl std::error::Error for CodegenError {}
