mod cursor;
mod parse_error;
#[cfg(test)]
mod parser_tests;

use crate::ast::*;
use crate::lexer::{LinedToken, Token};
use cursor::Cursor;
pub use parse_error::{InnerParseError, ParseError, Result};

fn unexpected(token: &Token, position: usize, line: u64) -> ParseError {
    InnerParseError::UnexpectedToken {
        token: token.clone(),
        position,
    }
    .set_line(line)
}

impl GroupKind {
    fn opened_by(token: &Token) -> Option<Self> {
        match token {
            Token::OpenBracket => Some(Self::Bracket),
            Token::OpenCurly => Some(Self::Brace),
            Token::OpenParanth => Some(Self::Paren),
            _ => None,
        }
    }

    fn closed_by(token: &Token) -> Option<Self> {
        match token {
            Token::CloseBracket => Some(Self::Bracket),
            Token::CloseCurly => Some(Self::Brace),
            Token::CloseParanth => Some(Self::Paren),
            _ => None,
        }
    }
}

/// Returns `pair` leaf if the next token is `second`, `single` otherwise.
fn parse_composite(cursor: &mut Cursor, single: Leaf, pairs: &[(Token, Leaf)]) -> Leaf {
    pairs
        .iter()
        .find(|(second, _)| cursor.bump_if(second))
        .map_or(single, |(_, pair)| pair.clone())
}

fn parse_escape(cursor: &mut Cursor) -> Result<Leaf> {
    let line = cursor.get_line();
    let position = cursor.position();
    let next = cursor.next_or_error()?;
    let escape = match next {
        Token::QuestionMark => Some(Escape::QueMark),
        Token::Identifier(s) => Escape::from_letter(s),
        _ => None,
    };
    escape
        .map(Leaf::Escape)
        .ok_or_else(|| unexpected(next, position, line))
}

fn parse_leaf(cursor: &mut Cursor, token: &Token, position: usize, line: u64) -> Result<Leaf> {
    let leaf = match token {
        Token::Identifier(s) => Leaf::Word(s.clone()),
        Token::Constant(i) => Leaf::Number(*i),
        Token::StringLiteral(s) => Leaf::Str(s.clone()),
        Token::Assign => parse_composite(cursor, Leaf::Equal, &[(Token::Assign, Leaf::ComparisonE)]),
        Token::LogicalNot => {
            parse_composite(cursor, Leaf::Not, &[(Token::Assign, Leaf::ComparisonN)])
        }
        Token::Plus => parse_composite(
            cursor,
            Leaf::Plus,
            &[(Token::Assign, Leaf::IncByNum), (Token::Plus, Leaf::IncByOne)],
        ),
        Token::Hyphen => parse_composite(
            cursor,
            Leaf::Minus,
            &[
                (Token::Hyphen, Leaf::DecByOne),
                (Token::Assign, Leaf::DecByNum),
                (Token::IsGreaterThan, Leaf::Arrow),
            ],
        ),
        Token::IsLessThan => {
            parse_composite(cursor, Leaf::Less, &[(Token::Assign, Leaf::LessOrEqual)])
        }
        Token::IsGreaterThan => {
            parse_composite(cursor, Leaf::Greater, &[(Token::Assign, Leaf::GreaterOrEqual)])
        }
        Token::BitwiseAnd => {
            parse_composite(cursor, Leaf::And, &[(Token::BitwiseAnd, Leaf::AndAnd)])
        }
        Token::BitwiseOr => parse_composite(cursor, Leaf::Pipe, &[(Token::BitwiseOr, Leaf::OrOr)]),
        Token::BitwiseXor => {
            parse_composite(cursor, Leaf::Xor, &[(Token::Assign, Leaf::XorEqual)])
        }
        Token::Asterisk => Leaf::Pointer,
        Token::Hash => Leaf::Macro,
        Token::QuestionMark => Leaf::Question,
        Token::Comma => Leaf::Delimiter,
        Token::Colon => Leaf::Colon,
        Token::Semicolon => Leaf::Terminator,
        Token::Dot => Leaf::Dot,
        Token::FSlash => Leaf::ForwardSlash,
        Token::Backslash => parse_escape(cursor)?,
        Token::Percent
        | Token::Dollar
        | Token::At
        | Token::Tilde
        | Token::Grave
        | Token::OpenBracket
        | Token::CloseBracket
        | Token::OpenParanth
        | Token::CloseParanth
        | Token::OpenCurly
        | Token::CloseCurly => return Err(unexpected(token, position, line)),
    };
    Ok(leaf)
}

fn parse_group(
    cursor: &mut Cursor,
    kind: GroupKind,
    callee: Option<Identifier>,
    line: u64,
) -> Result<Group> {
    let children = parse_nodes(cursor, Some((kind, line)))?;
    Ok(Group {
        kind,
        children,
        callee,
    })
}

/// Parses sibling nodes until the closer of `enclosing` (or the end of input
/// at the top level).
fn parse_nodes(cursor: &mut Cursor, enclosing: Option<(GroupKind, u64)>) -> Result<Vec<SyntaxNode>> {
    let mut nodes: Vec<SyntaxNode> = Vec::new();

    loop {
        let line = cursor.get_line();
        let position = cursor.position();
        let Some(token) = cursor.peek() else {
            return match enclosing {
                Some((kind, opened_at)) => {
                    Err(InnerParseError::UnterminatedGroup(kind).set_line(opened_at))
                }
                None => Ok(nodes),
            };
        };

        if let Some(kind) = GroupKind::closed_by(token) {
            return match enclosing {
                Some((expected, _)) if expected == kind => {
                    cursor.bump();
                    Ok(nodes)
                }
                _ => Err(unexpected(token, position, line)),
            };
        }

        let token = cursor.next_or_error()?;
        let node = match GroupKind::opened_by(token) {
            Some(kind) => {
                let callee = match (kind, nodes.last()) {
                    (GroupKind::Paren, Some(SyntaxNode::Leaf(Leaf::Word(w)))) => Some(w.clone()),
                    _ => None,
                };
                SyntaxNode::Group(parse_group(cursor, kind, callee, line)?)
            }
            None => SyntaxNode::Leaf(parse_leaf(cursor, token, position, line)?),
        };
        nodes.push(node);
    }
}

/// Builds the grouping tree.
///
/// Single pass with one token of lookahead; composite operators such as `==`
/// or `->` are formed here from their single-character tokens.
pub fn parse(tokens: &[LinedToken]) -> Result<SyntaxTree> {
    let mut cursor = Cursor::new(tokens);
    let body = parse_nodes(&mut cursor, None)?;
    tracing::trace!("parsed {} top level nodes", body.len());
    Ok(SyntaxTree { body })
}
