#[cfg(test)]
mod flatten_tests;

use crate::ast::{Group, GroupKind, Identifier, Leaf, SyntaxNode, SyntaxTree};
use std::fmt;

/// One entry of a flattened scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatEntry {
    Token(Leaf),
    Callable(CallableBlock),
    Block(Block),
    Array(ArrayGroup),
    /// Paren group or brace block found directly at the program root
    Function(FunctionPart),
}

/// Parenthesized list, with the word in front of it if there was one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableBlock {
    pub callee: Option<Identifier>,
    pub arguments: Vec<FlatEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub arguments: Vec<FlatEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayGroup {
    pub elements: Vec<FlatEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionPart {
    Callable(CallableBlock),
    Block(Block),
}

impl FlatEntry {
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Token(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_word(&self) -> Option<&str> {
        self.as_leaf().and_then(Leaf::as_word)
    }

    #[inline]
    pub fn is_word(&self, word: &str) -> bool {
        self.as_word() == Some(word)
    }

    #[inline]
    pub fn is_leaf(&self, leaf: &Leaf) -> bool {
        self.as_leaf() == Some(leaf)
    }

    #[inline]
    pub fn is_terminator(&self) -> bool {
        self.is_leaf(&Leaf::Terminator)
    }

    pub fn as_callable(&self) -> Option<&CallableBlock> {
        match self {
            Self::Callable(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Self::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_function_marker(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Drops the top level marker, leaving the plain callable or block.
    pub fn strip_marker(self) -> Self {
        match self {
            Self::Function(FunctionPart::Callable(c)) => Self::Callable(c),
            Self::Function(FunctionPart::Block(b)) => Self::Block(b),
            other => other,
        }
    }
}

fn flatten_group(group: Group) -> FlatEntry {
    let Group {
        kind,
        children,
        callee,
    } = group;
    let inner = flatten_nodes(children);
    match kind {
        GroupKind::Paren => FlatEntry::Callable(CallableBlock {
            callee,
            arguments: inner,
        }),
        GroupKind::Brace => FlatEntry::Block(Block { arguments: inner }),
        GroupKind::Bracket => FlatEntry::Array(ArrayGroup { elements: inner }),
    }
}

fn flatten_node(node: SyntaxNode) -> FlatEntry {
    match node {
        SyntaxNode::Leaf(leaf) => {
            tracing::trace!("flatten leaf {leaf}");
            FlatEntry::Token(leaf)
        }
        SyntaxNode::Group(group) => {
            tracing::trace!("flatten {} group", group.kind);
            flatten_group(group)
        }
    }
}

fn flatten_nodes(nodes: Vec<SyntaxNode>) -> Vec<FlatEntry> {
    nodes.into_iter().map(flatten_node).collect()
}

/// Turns the grouping tree into a flat list of entries per scope.
///
/// Groups at the program root get a [`FlatEntry::Function`] marker so the
/// recovery stage can tell `int main() {..}` from the same shape nested in a
/// body.
pub fn flatten(tree: SyntaxTree) -> Vec<FlatEntry> {
    tree.body
        .into_iter()
        .map(|node| match flatten_node(node) {
            FlatEntry::Callable(c) => FlatEntry::Function(FunctionPart::Callable(c)),
            FlatEntry::Block(b) => FlatEntry::Function(FunctionPart::Block(b)),
            other => other,
        })
        .collect()
}

fn write_entries(f: &mut fmt::Formatter<'_>, entries: &[FlatEntry]) -> fmt::Result {
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{entry}")?;
    }
    Ok(())
}

impl fmt::Display for CallableBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_entries(f, &self.arguments)?;
        write!(f, ")")
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        write_entries(f, &self.arguments)?;
        write!(f, " }}")
    }
}

impl fmt::Display for FlatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(leaf) => write!(f, "{leaf}"),
            Self::Callable(c) | Self::Function(FunctionPart::Callable(c)) => write!(f, "{c}"),
            Self::Block(b) | Self::Function(FunctionPart::Block(b)) => write!(f, "{b}"),
            Self::Array(a) => {
                write!(f, "[")?;
                write_entries(f, &a.elements)?;
                write!(f, "]")
            }
        }
    }
}

/// Space separated source text of `entries`.
pub fn entries_to_string(entries: &[FlatEntry]) -> String {
    struct Entries<'a>(&'a [FlatEntry]);
    impl fmt::Display for Entries<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_entries(f, self.0)
        }
    }
    Entries(entries).to_string()
}
