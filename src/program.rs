//! Language level model rebuilt by the recovery stage.

use crate::ast::{Identifier, Leaf};
use crate::flatten::{entries_to_string, FlatEntry};
use std::fmt;
use std::str::FromStr;

pub const RESERVED_WORDS: [&str; 32] = [
    "auto", "double", "int", "struct", "break", "else", "long", "switch", "case", "enum",
    "register", "typedef", "char", "extern", "return", "union", "const", "float", "short",
    "unsigned", "continue", "for", "signed", "void", "default", "goto", "sizeof", "volatile",
    "do", "if", "static", "while",
];

pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Int,
    Char,
    Float,
    Double,
    Void,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub globals: Vec<GlobalItem>,
    pub functions: Vec<FunctionDefinition>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalItem {
    Statement(Statement),
    Macro(Macro),
    Struct(StructDeclaration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Macro {
    Include { file: String },
    /// `#define`, `#ifdef` and friends, kept with their operands but never lowered
    Unsupported {
        directive: Identifier,
        operands: Vec<FlatEntry>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub name: Identifier,
    pub return_type: Identifier,
    pub args: Vec<Argument>,
    pub body: Vec<BodyItem>,
    pub entry_point: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub ty: PrimitiveType,
    pub name: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyItem {
    Statement(Statement),
    Control(ControlConstruct),
    Call(Call),
    Struct(StructDeclaration),
}

/// Entries of one statement, normally ending in `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub tokens: Vec<FlatEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    If,
    ElseIf,
    Else,
    While,
    For,
    Do,
    Switch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlConstruct {
    pub kind: ControlKind,
    /// Inside of the paren group, empty for `else`
    pub condition: Vec<FlatEntry>,
    pub body: ControlBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlBody {
    Block(Vec<BodyItem>),
    Cases(Vec<SwitchCase>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchCase {
    pub label: CaseLabel,
    pub statements: Vec<BodyItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseLabel {
    Case(Leaf),
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub callee: Identifier,
    pub arguments: Vec<FlatEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDeclaration {
    pub name: Identifier,
    pub body: Vec<FlatEntry>,
}

/// Non-fatal findings of the recovery stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnsupportedDirective(Identifier),
    DroppedSwitchTokens(String),
    UnfinishedBody(Identifier),
}

impl Statement {
    pub fn new(tokens: Vec<FlatEntry>) -> Self {
        Self { tokens }
    }

    pub fn is_terminated(&self) -> bool {
        self.tokens.last().is_some_and(FlatEntry::is_terminator)
    }

    /// Entries without the trailing terminator.
    pub fn content(&self) -> &[FlatEntry] {
        match self.tokens.split_last() {
            Some((last, rest)) if last.is_terminator() => rest,
            _ => &self.tokens,
        }
    }
}

impl ControlConstruct {
    /// Statements of a plain block body, empty for a switch.
    pub fn block(&self) -> &[BodyItem] {
        match &self.body {
            ControlBody::Block(items) => items,
            ControlBody::Cases(_) => &[],
        }
    }
}

impl FunctionDefinition {
    pub fn int_argument_count(&self) -> usize {
        self.args
            .iter()
            .filter(|arg| arg.ty == PrimitiveType::Int)
            .count()
    }
}

impl FromStr for PrimitiveType {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "int" => Ok(Self::Int),
            "char" => Ok(Self::Char),
            "float" => Ok(Self::Float),
            "double" => Ok(Self::Double),
            "void" => Ok(Self::Void),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Int => "int",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", entries_to_string(&self.tokens))
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::If => "if",
            Self::ElseIf => "else if",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::Do => "do",
            Self::Switch => "switch",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedDirective(d) => write!(f, "unsupported directive #{d}"),
            Self::DroppedSwitchTokens(s) => {
                write!(f, "switch body tokens before the first label dropped: `{s}`")
            }
            Self::UnfinishedBody(name) => {
                write!(f, "function {name} may not return or end properly")
            }
        }
    }
}
