use super::case_collection::collect_cases;
use super::cursor::Cursor;
use super::{RecoveryError, Result};
use crate::flatten::{Block, CallableBlock, FlatEntry};
use crate::program::{
    is_reserved, BodyItem, Call, ControlBody, ControlConstruct, ControlKind, Diagnostic, Statement,
    StructDeclaration,
};

fn invalid(reason: String) -> RecoveryError {
    RecoveryError::InvalidSyntax(reason)
}

fn expect_callable<'a>(cursor: &mut Cursor<'a>, keyword: &str) -> Result<&'a CallableBlock> {
    cursor
        .next()
        .and_then(FlatEntry::as_callable)
        .ok_or_else(|| invalid(format!("`{keyword}` must be followed by a condition")))
}

fn expect_block<'a>(cursor: &mut Cursor<'a>, keyword: &str) -> Result<&'a Block> {
    cursor
        .next()
        .and_then(FlatEntry::as_block)
        .ok_or_else(|| invalid(format!("`{keyword}` must be followed by a block")))
}

struct BodyScanner<'d> {
    diagnostics: &'d mut Vec<Diagnostic>,
}

impl BodyScanner<'_> {
    fn construct(
        &mut self,
        kind: ControlKind,
        condition: &[FlatEntry],
        block: &Block,
    ) -> Result<BodyItem> {
        let body = match kind {
            ControlKind::Switch => ControlBody::Cases(collect_cases(&block.arguments, self.diagnostics)?),
            _ => ControlBody::Block(self.scan(&block.arguments)?),
        };
        Ok(BodyItem::Control(ControlConstruct {
            kind,
            condition: condition.to_vec(),
            body,
        }))
    }

    /// `if (c) {b}`, `while (c) {b}`, `for (c) {b}`, `switch (c) {b}`
    fn conditional(&mut self, cursor: &mut Cursor, kind: ControlKind, keyword: &str) -> Result<BodyItem> {
        let condition = expect_callable(cursor, keyword)?;
        let block = expect_block(cursor, keyword)?;
        self.construct(kind, &condition.arguments, block)
    }

    fn else_branch(&mut self, cursor: &mut Cursor) -> Result<BodyItem> {
        if cursor.next_if(|e| e.is_word("if")).is_some() {
            return self.conditional(cursor, ControlKind::ElseIf, "else if");
        }
        let block = cursor
            .next()
            .and_then(FlatEntry::as_block)
            .ok_or_else(|| invalid(String::from("`else` must be followed by `if` or a block")))?;
        self.construct(ControlKind::Else, &[], block)
    }

    fn do_while(&mut self, cursor: &mut Cursor) -> Result<BodyItem> {
        let block = expect_block(cursor, "do")?;
        cursor
            .next_if(|e| e.is_word("while"))
            .ok_or_else(|| invalid(String::from("`do` block must be followed by `while`")))?;
        let condition = expect_callable(cursor, "do .. while")?;
        cursor.next_if(FlatEntry::is_terminator);
        self.construct(ControlKind::Do, &condition.arguments, block)
    }

    /// `struct Name {..} ;`, anything else starting with `struct` is a
    /// plain statement.
    fn structure(cursor: &mut Cursor) -> Result<Option<BodyItem>> {
        let (Some(name), Some(FlatEntry::Block(block))) = (
            cursor.peek_nth(1).and_then(FlatEntry::as_word),
            cursor.peek_nth(2),
        ) else {
            return Ok(None);
        };
        if !cursor.peek_nth(3).is_some_and(FlatEntry::is_terminator) {
            return Err(invalid(format!("struct {name} is missing a ';'")));
        }
        for _ in 0..4 {
            cursor.bump();
        }
        Ok(Some(BodyItem::Struct(StructDeclaration {
            name: name.to_owned(),
            body: block.arguments.clone(),
        })))
    }

    /// `name (args) ;` at the start of a statement
    fn call(cursor: &mut Cursor, name: &str) -> Option<BodyItem> {
        if is_reserved(name) {
            return None;
        }
        let callable = cursor.peek_nth(1).and_then(FlatEntry::as_callable)?;
        if callable.callee.as_deref() != Some(name)
            || !cursor.peek_nth(2).is_some_and(FlatEntry::is_terminator)
        {
            return None;
        }
        for _ in 0..3 {
            cursor.bump();
        }
        Some(BodyItem::Call(Call {
            callee: name.to_owned(),
            arguments: callable.arguments.clone(),
        }))
    }

    /// Tries every construct shape at the start of a statement.
    fn statement_start(&mut self, cursor: &mut Cursor) -> Result<Option<BodyItem>> {
        let Some(entry) = cursor.peek() else {
            return Ok(None);
        };

        if let FlatEntry::Block(_) = entry {
            return Err(invalid(String::from("unexpected block")));
        }

        let Some(word) = entry.as_word() else {
            return Ok(None);
        };

        let item = match word {
            "if" | "while" | "for" | "switch" => {
                let kind = match word {
                    "if" => ControlKind::If,
                    "while" => ControlKind::While,
                    "for" => ControlKind::For,
                    _ => ControlKind::Switch,
                };
                cursor.bump();
                self.conditional(cursor, kind, word)?
            }
            "else" => {
                cursor.bump();
                self.else_branch(cursor)?
            }
            "do" => {
                cursor.bump();
                self.do_while(cursor)?
            }
            "struct" => return Self::structure(cursor),
            name => return Ok(Self::call(cursor, name)),
        };
        Ok(Some(item))
    }

    fn scan(&mut self, entries: &[FlatEntry]) -> Result<Vec<BodyItem>> {
        let mut cursor = Cursor::new(entries);
        let mut items = Vec::new();
        let mut pending: Vec<FlatEntry> = Vec::new();

        loop {
            if pending.is_empty() {
                if let Some(item) = self.statement_start(&mut cursor)? {
                    items.push(item);
                    continue;
                }
            }

            let Some(entry) = cursor.next() else {
                break;
            };

            if entry.as_callable().is_some() && cursor.peek().is_some_and(|e| e.as_block().is_some()) {
                let introducer = pending
                    .last()
                    .map_or_else(String::new, ToString::to_string);
                return Err(invalid(format!(
                    "unexpected condition and block after `{introducer}`"
                )));
            }

            pending.push(entry.clone());
            if entry.is_terminator() {
                items.push(BodyItem::Statement(Statement::new(std::mem::take(&mut pending))));
            }
        }

        if !pending.is_empty() {
            items.push(BodyItem::Statement(Statement::new(pending)));
        }

        Ok(items)
    }
}

/// Rebuilds statements and control constructs of one scope body.
pub(super) fn recover_body(
    entries: &[FlatEntry],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<BodyItem>> {
    BodyScanner { diagnostics }.scan(entries)
}
