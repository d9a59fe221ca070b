use super::lexer_error::InnerLexError;
use std::fmt;
use std::ops::Deref;

/// Token with attached line number to it.
///
/// To get inner [Token] use [Token::from] to consume or [get_inner](LinedToken::get_inner) to borrow.
///
#[derive(Debug, Clone, PartialEq)]
pub struct LinedToken {
    pub(crate) inner: Token,
    ln: u64,
}

impl From<LinedToken> for Token {
    fn from(value: LinedToken) -> Self {
        value.inner
    }
}

/// Basic token type
///
/// Words are never turned into keywords here: `if`, `int` and `main` are all
/// [Token::Identifier]. Later stages look at the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// any word (keywords, type names, variable names, function names, ..)
    Identifier(String),
    /// decimal numeric constant
    Constant(i64),
    /// string or character literal, escapes kept verbatim, quotes stripped
    StringLiteral(String),
    /// =
    Assign,
    /// *
    Asterisk,
    /// #
    Hash,
    /// !
    LogicalNot,
    /// -
    Hyphen,
    /// +
    Plus,
    /// /
    FSlash,
    /// ?
    QuestionMark,
    /// <
    IsLessThan,
    /// >
    IsGreaterThan,
    /// |
    BitwiseOr,
    /// &
    BitwiseAnd,
    /// %
    Percent,
    /// $
    Dollar,
    /// @
    At,
    /// ^
    BitwiseXor,
    /// ~
    Tilde,
    /// `
    Grave,
    /// :
    Colon,
    /// .
    Dot,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// [
    OpenBracket,
    /// ]
    CloseBracket,
    /// (
    OpenParanth,
    /// )
    CloseParanth,
    /// {
    OpenCurly,
    /// }
    CloseCurly,
    /// \
    Backslash,
}

impl LinedToken {
    pub fn new(t: Token, ln: u64) -> Self {
        Self { inner: t, ln }
    }

    pub fn get_line(&self) -> u64 {
        self.ln
    }

    pub fn get_inner(&self) -> &Token {
        &self.inner
    }
}

impl Deref for LinedToken {
    type Target = Token;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Token {
    #[inline]
    pub fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier(_))
    }

    #[inline]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self, Self::Identifier(s) if s == word)
    }

    #[inline]
    pub fn is_group_closer(&self) -> bool {
        matches!(
            self,
            Self::CloseBracket | Self::CloseParanth | Self::CloseCurly
        )
    }
}

impl TryFrom<char> for Token {
    type Error = InnerLexError;
    fn try_from(c: char) -> std::result::Result<Self, InnerLexError> {
        match c {
            '=' => Ok(Self::Assign),
            '*' => Ok(Self::Asterisk),
            '#' => Ok(Self::Hash),
            '!' => Ok(Self::LogicalNot),
            '-' => Ok(Self::Hyphen),
            '+' => Ok(Self::Plus),
            '/' => Ok(Self::FSlash),
            '?' => Ok(Self::QuestionMark),
            '<' => Ok(Self::IsLessThan),
            '>' => Ok(Self::IsGreaterThan),
            '|' => Ok(Self::BitwiseOr),
            '&' => Ok(Self::BitwiseAnd),
            '%' => Ok(Self::Percent),
            '$' => Ok(Self::Dollar),
            '@' => Ok(Self::At),
            '^' => Ok(Self::BitwiseXor),
            '~' => Ok(Self::Tilde),
            '`' => Ok(Self::Grave),
            ':' => Ok(Self::Colon),
            '.' => Ok(Self::Dot),
            ',' => Ok(Self::Comma),
            ';' => Ok(Self::Semicolon),
            '[' => Ok(Self::OpenBracket),
            ']' => Ok(Self::CloseBracket),
            '(' => Ok(Self::OpenParanth),
            ')' => Ok(Self::CloseParanth),
            '{' => Ok(Self::OpenCurly),
            '}' => Ok(Self::CloseCurly),
            '\\' => Ok(Self::Backslash),
            _ => Err(InnerLexError::UnexpectedChar(c)),
        }
    }
}

/// Literal text of the token, as it appeared in the source
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Identifier(s) | Self::StringLiteral(s) => return write!(f, "{s}"),
            Self::Constant(i) => return write!(f, "{i}"),
            Self::Assign => '=',
            Self::Asterisk => '*',
            Self::Hash => '#',
            Self::LogicalNot => '!',
            Self::Hyphen => '-',
            Self::Plus => '+',
            Self::FSlash => '/',
            Self::QuestionMark => '?',
            Self::IsLessThan => '<',
            Self::IsGreaterThan => '>',
            Self::BitwiseOr => '|',
            Self::BitwiseAnd => '&',
            Self::Percent => '%',
            Self::Dollar => '$',
            Self::At => '@',
            Self::BitwiseXor => '^',
            Self::Tilde => '~',
            Self::Grave => '`',
            Self::Colon => ':',
            Self::Dot => '.',
            Self::Comma => ',',
            Self::Semicolon => ';',
            Self::OpenBracket => '[',
            Self::CloseBracket => ']',
            Self::OpenParanth => '(',
            Self::CloseParanth => ')',
            Self::OpenCurly => '{',
            Self::CloseCurly => '}',
            Self::Backslash => '\\',
        };
        write!(f, "{c}")
    }
}
