use crate::lexer::{LinedToken, Token};
use crate::parser::{InnerParseError, Result};

#[derive(Debug)]
pub struct Cursor<'a> {
    tokens: &'a [LinedToken],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [LinedToken]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position).map(LinedToken::get_inner)
    }

    pub fn bump(&mut self) {
        self.position += 1;
    }

    pub fn bump_if(&mut self, t: &Token) -> bool {
        let condition = self.peek() == Some(t);
        if condition {
            self.bump();
        }
        condition
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Line of the token under the cursor, or of the last token once the
    /// input is exhausted.
    pub fn get_line(&self) -> u64 {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map_or(1, LinedToken::get_line)
    }

    pub fn next_or_error(&mut self) -> Result<&'a Token> {
        let line = self.get_line();
        let next = self
            .tokens
            .get(self.position)
            .ok_or(InnerParseError::UnexpectedEof.set_line(line))?;
        self.position += 1;
        Ok(next.get_inner())
    }
}
