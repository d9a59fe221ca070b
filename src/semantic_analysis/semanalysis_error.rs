use crate::ast::Identifier;
use std::fmt;

pub type Result<T> = std::result::Result<T, SemAnalysisError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SemAnalysisError {
    FunctionRedefinition(Identifier),
    ReservedFunctionName(Identifier),
    InvalidReturnType(Identifier, Identifier),
    ReservedArgumentName(Identifier, Identifier),
    EmptyStatement,
    MissingTerminator(String),
    MisplacedReturn(String),
    InvalidCondition(String),
}

impl fmt::Display for SemAnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::FunctionRedefinition(name) => write!(f, "redefinition of a function {name}"),
            Self::ReservedFunctionName(name) => {
                write!(f, "reserved word {name} used as a function name")
            }
            Self::InvalidReturnType(name, ty) => {
                write!(f, "function {name} has invalid return type {ty}")
            }
            Self::ReservedArgumentName(name, arg) => {
                write!(f, "function {name} uses reserved word {arg} as an argument name")
            }
            Self::EmptyStatement => write!(f, "empty statement"),
            Self::MissingTerminator(s) => write!(f, "statement `{s}` is missing a ';'"),
            Self::MisplacedReturn(s) => {
                write!(f, "`return` must start its statement: `{s}`")
            }
            Self::InvalidCondition(s) => write!(f, "unsupported if condition `{s}`"),
        }
    }
}

impl std::error::Error for SemAnalysisError {}
