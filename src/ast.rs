use std::fmt;

pub type Identifier = String;

/// Generic grouping tree produced by the parser.
///
/// Nothing here knows about functions or statements yet: the parser only
/// matches brackets and folds multi-character operators into single leaves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyntaxTree {
    pub body: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    Leaf(Leaf),
    Group(Group),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// `[ ]`
    Bracket,
    /// `{ }`
    Brace,
    /// `( )`
    Paren,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub kind: GroupKind,
    pub children: Vec<SyntaxNode>,
    /// Word directly in front of a paren group, `foo` in `foo(1, 2)`.
    pub callee: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    Word(Identifier),
    Number(i64),
    Str(String),
    /// =
    Equal,
    /// ==
    ComparisonE,
    /// !=
    ComparisonN,
    /// !
    Not,
    /// +=
    IncByNum,
    /// ++
    IncByOne,
    /// +
    Plus,
    /// --
    DecByOne,
    /// -=
    DecByNum,
    /// ->
    Arrow,
    /// -
    Minus,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    /// &
    And,
    /// &&
    AndAnd,
    /// |
    Pipe,
    /// ||
    OrOr,
    /// ^
    Xor,
    /// ^=
    XorEqual,
    /// *
    Pointer,
    /// #
    Macro,
    /// ?
    Question,
    /// ,
    Delimiter,
    Colon,
    /// ;
    Terminator,
    Dot,
    /// /
    ForwardSlash,
    Escape(Escape),
}

/// Backslash sequence found outside of a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    Tab,
    Newline,
    CRet,
    Backspace,
    Alert,
    VTab,
    Hex,
    Oct,
    QueMark,
}

impl GroupKind {
    pub fn opener(self) -> char {
        match self {
            Self::Bracket => '[',
            Self::Brace => '{',
            Self::Paren => '(',
        }
    }

    pub fn closer(self) -> char {
        match self {
            Self::Bracket => ']',
            Self::Brace => '}',
            Self::Paren => ')',
        }
    }
}

impl Leaf {
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(w) => Some(w),
            _ => None,
        }
    }

    #[inline]
    pub fn is_word(&self, word: &str) -> bool {
        self.as_word() == Some(word)
    }

    /// True for the comparison leaves an `if` condition may use.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::ComparisonE
                | Self::ComparisonN
                | Self::Less
                | Self::LessOrEqual
                | Self::Greater
                | Self::GreaterOrEqual
        )
    }
}

impl Escape {
    pub fn from_letter(s: &str) -> Option<Self> {
        match s {
            "t" => Some(Self::Tab),
            "n" => Some(Self::Newline),
            "r" => Some(Self::CRet),
            "b" => Some(Self::Backspace),
            "a" => Some(Self::Alert),
            "v" => Some(Self::VTab),
            "x" => Some(Self::Hex),
            "o" => Some(Self::Oct),
            _ => None,
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bracket => "bracket",
            Self::Brace => "brace",
            Self::Paren => "parenthesis",
        };
        write!(f, "{name} '{}'", self.opener())
    }
}

impl fmt::Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Tab => "\\t",
            Self::Newline => "\\n",
            Self::CRet => "\\r",
            Self::Backspace => "\\b",
            Self::Alert => "\\a",
            Self::VTab => "\\v",
            Self::Hex => "\\x",
            Self::Oct => "\\o",
            Self::QueMark => "\\?",
        };
        write!(f, "{s}")
    }
}

/// Source text of the leaf.
impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Word(w) => return write!(f, "{w}"),
            Self::Number(n) => return write!(f, "{n}"),
            Self::Str(s) => return write!(f, "\"{s}\""),
            Self::Escape(e) => return write!(f, "{e}"),
            Self::Equal => "=",
            Self::ComparisonE => "==",
            Self::ComparisonN => "!=",
            Self::Not => "!",
            Self::IncByNum => "+=",
            Self::IncByOne => "++",
            Self::Plus => "+",
            Self::DecByOne => "--",
            Self::DecByNum => "-=",
            Self::Arrow => "->",
            Self::Minus => "-",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::And => "&",
            Self::AndAnd => "&&",
            Self::Pipe => "|",
            Self::OrOr => "||",
            Self::Xor => "^",
            Self::XorEqual => "^=",
            Self::Pointer => "*",
            Self::Macro => "#",
            Self::Question => "?",
            Self::Delimiter => ",",
            Self::Colon => ":",
            Self::Terminator => ";",
            Self::Dot => ".",
            Self::ForwardSlash => "/",
        };
        write!(f, "{s}")
    }
}
