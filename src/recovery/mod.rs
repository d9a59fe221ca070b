mod arguments;
mod body;
mod case_collection;
mod cursor;
mod directives;
mod recovery_error;
#[cfg(test)]
mod recovery_tests;

use crate::ast::Leaf;
use crate::flatten::{entries_to_string, Block, CallableBlock, FlatEntry, FunctionPart};
use crate::program::{
    Diagnostic, FunctionDefinition, GlobalItem, Program, Statement, StructDeclaration,
};
use arguments::recover_arguments;
use body::recover_body;
use cursor::Cursor;
use directives::{lower, scan_directive, RawMacro};
pub use recovery_error::{RecoveryError, Result};

enum Scanned {
    Item(GlobalItem),
    Directive(RawMacro),
}

/// `type name (params) {body}` at the program root
struct FunctionShape<'a> {
    return_type: &'a str,
    name: &'a str,
    params: &'a CallableBlock,
    body: &'a Block,
}

fn function_shape<'a>(cursor: &Cursor<'a>) -> Option<FunctionShape<'a>> {
    let return_type = cursor.peek()?.as_word()?;
    let name = cursor.peek_nth(1)?.as_word()?;
    let FlatEntry::Function(FunctionPart::Callable(params)) = cursor.peek_nth(2)? else {
        return None;
    };
    let FlatEntry::Function(FunctionPart::Block(body)) = cursor.peek_nth(3)? else {
        return None;
    };

    (params.callee.as_deref() == Some(name)).then_some(FunctionShape {
        return_type,
        name,
        params,
        body,
    })
}

fn recover_function(
    shape: &FunctionShape,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<FunctionDefinition> {
    let FunctionShape {
        return_type,
        name,
        params,
        body,
    } = shape;
    tracing::trace!("recovering function {name}");

    let args = recover_arguments(&params.arguments)?;

    let finished = body
        .arguments
        .last()
        .is_some_and(|e| e.is_terminator() || e.as_block().is_some());
    if !finished {
        tracing::warn!("function {name} may not return or end properly");
        diagnostics.push(Diagnostic::UnfinishedBody((*name).to_owned()));
    }

    let body = recover_body(&body.arguments, diagnostics)?;

    Ok(FunctionDefinition {
        name: (*name).to_owned(),
        return_type: (*return_type).to_owned(),
        args,
        body,
        entry_point: *name == "main",
    })
}

fn starts_struct(cursor: &Cursor) -> bool {
    cursor.peek().is_some_and(|e| e.is_word("struct"))
        && cursor
            .peek_nth(2)
            .is_some_and(|e| matches!(e, FlatEntry::Function(FunctionPart::Block(_))))
}

/// `struct Name {..} ;` at the program root
fn global_struct(cursor: &mut Cursor) -> Result<Option<StructDeclaration>> {
    let is_struct = cursor.peek().is_some_and(|e| e.is_word("struct"));
    let name = cursor.peek_nth(1).and_then(FlatEntry::as_word);
    let block = cursor.peek_nth(2).map(|e| e.clone().strip_marker());

    let (true, Some(name), Some(FlatEntry::Block(block))) = (is_struct, name, block) else {
        return Ok(None);
    };
    if !cursor.peek_nth(3).is_some_and(FlatEntry::is_terminator) {
        return Err(RecoveryError::InvalidSyntax(format!(
            "struct {name} is missing a ';'"
        )));
    }
    for _ in 0..4 {
        cursor.bump();
    }
    Ok(Some(StructDeclaration {
        name: name.to_owned(),
        body: block.arguments,
    }))
}

fn missing_terminator(pending: &[FlatEntry]) -> RecoveryError {
    RecoveryError::InvalidSyntax(format!(
        "missing ';' after `{}`",
        entries_to_string(pending)
    ))
}

/// Rebuilds functions, globals and directives from the flattened program.
pub fn recover(entries: &[FlatEntry]) -> Result<Program> {
    let mut cursor = Cursor::new(entries);
    let mut program = Program::default();
    let mut scanned = Vec::new();
    let mut pending: Vec<FlatEntry> = Vec::new();

    while let Some(entry) = cursor.peek() {
        let directive = entry.is_leaf(&Leaf::Macro);

        if !pending.is_empty() {
            if directive || function_shape(&cursor).is_some() || starts_struct(&cursor) {
                return Err(missing_terminator(&pending));
            }
        } else if directive {
            scanned.push(Scanned::Directive(scan_directive(&mut cursor)?));
            continue;
        } else if let Some(shape) = function_shape(&cursor) {
            let function = recover_function(&shape, &mut program.diagnostics)?;
            program.functions.push(function);
            for _ in 0..4 {
                cursor.bump();
            }
            continue;
        } else if let Some(declaration) = global_struct(&mut cursor)? {
            scanned.push(Scanned::Item(GlobalItem::Struct(declaration)));
            continue;
        }

        cursor.bump();
        pending.push(entry.clone().strip_marker());
        if entry.is_terminator() {
            let statement = Statement::new(std::mem::take(&mut pending));
            scanned.push(Scanned::Item(GlobalItem::Statement(statement)));
        }
    }

    if !pending.is_empty() {
        return Err(missing_terminator(&pending));
    }

    for item in scanned {
        let item = match item {
            Scanned::Item(item) => item,
            Scanned::Directive(raw) => GlobalItem::Macro(lower(raw, &mut program.diagnostics)?),
        };
        program.globals.push(item);
    }

    tracing::trace!(
        "recovered {} functions and {} globals",
        program.functions.len(),
        program.globals.len()
    );
    Ok(program)
}
