mod cursor;
mod lexer_error;
mod token;

use cursor::Cursor;
pub use lexer_error::{InnerLexError, LexError};
pub use token::{LinedToken, Token};

pub type Result<T> = std::result::Result<T, LexError>;
type InnerResult<T> = std::result::Result<T, InnerLexError>;

/// Splits source text into [`LinedToken`]s.
///
/// Whitespace and both comment styles are skipped. Every token remembers the
/// line it started on.
pub fn lex(input: &str) -> Result<Vec<LinedToken>> {
    let mut cursor = Cursor::new(input);
    let mut tokens = Vec::new();

    loop {
        cursor.skip_whitespaces();
        let ln = cursor.get_line();
        let Some(c) = cursor.peek() else {
            break;
        };

        let token = lex_token(&mut cursor, c).map_err(|e| e.set_line(ln))?;
        if let Some(token) = token {
            tokens.push(LinedToken::new(token, ln));
        }
    }

    tracing::trace!("lexed {} tokens", tokens.len());
    Ok(tokens)
}

fn lex_token(cursor: &mut Cursor, c: char) -> InnerResult<Option<Token>> {
    match c {
        '/' if matches!(cursor.peek_2nd(), Some('/' | '*')) => {
            skip_comment(cursor)?;
            Ok(None)
        }
        '0'..='9' => lex_constant(cursor).map(Some),
        'a'..='z' | 'A'..='Z' | '_' => Ok(Some(lex_identifier(cursor))),
        '"' | '\'' => lex_string(cursor).map(Some),
        _ => {
            cursor.take();
            Token::try_from(c).map(Some)
        }
    }
}

fn skip_comment(cursor: &mut Cursor) -> InnerResult<()> {
    cursor.take();
    match cursor.take() {
        Some('/') => {
            while cursor.skip_if(|c| c != '\n') {}
            Ok(())
        }
        _ => loop {
            match cursor.take() {
                Some('*') if cursor.peek() == Some('/') => {
                    cursor.take();
                    break Ok(());
                }
                Some(_) => (),
                None => break Err(InnerLexError::UnterminatedComment),
            }
        },
    }
}

fn lex_constant(cursor: &mut Cursor) -> InnerResult<Token> {
    let mut buf = String::new();
    while let Some(digit) = cursor.peek().filter(char::is_ascii_digit) {
        cursor.take();
        buf.push(digit);
    }

    if let Some(c) = cursor.peek() {
        if c.is_ascii_alphabetic() || c == '_' {
            return Err(InnerLexError::BadConstantSuffix(c));
        }
    }

    buf.parse::<i32>()
        .map(|n| Token::Constant(n.into()))
        .map_err(|_| InnerLexError::BadConstant(buf))
}

fn lex_identifier(cursor: &mut Cursor) -> Token {
    let mut buf = String::new();
    while let Some(c) = cursor
        .peek()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
    {
        cursor.take();
        buf.push(c);
    }
    Token::Identifier(buf)
}

fn lex_string(cursor: &mut Cursor) -> InnerResult<Token> {
    let quote = cursor.take().unwrap_or('"');
    let mut buf = String::new();

    loop {
        match cursor.take() {
            Some(c) if c == quote => break,
            Some('\\') => {
                let escaped = cursor
                    .take()
                    .ok_or(InnerLexError::UnterminatedString(quote))?;
                buf.push('\\');
                buf.push(escaped);
            }
            Some(c) => buf.push(c),
            None => return Err(InnerLexError::UnterminatedString(quote)),
        }
    }

    Ok(Token::StringLiteral(buf))
}
