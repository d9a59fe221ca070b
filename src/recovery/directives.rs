use super::cursor::Cursor;
use super::{RecoveryError, Result};
use crate::ast::Leaf;
use crate::flatten::FlatEntry;
use crate::program::{Diagnostic, Macro};

/// Directive exactly as it appeared, `#` and name included.
#[derive(Debug)]
pub(super) struct RawMacro {
    directive: String,
    entries: Vec<FlatEntry>,
}

fn invalid(reason: &str) -> RecoveryError {
    RecoveryError::InvalidSyntax(reason.to_owned())
}

fn take_word(cursor: &mut Cursor, raw: &mut Vec<FlatEntry>, directive: &str) -> Result<()> {
    let word = cursor
        .next_if(|e| e.as_word().is_some())
        .ok_or_else(|| invalid(&format!("#{directive} expects a name")))?;
    raw.push(word.clone());
    Ok(())
}

/// Consumes a directive starting at `#` together with its operands.
pub(super) fn scan_directive(cursor: &mut Cursor) -> Result<RawMacro> {
    let mut entries = Vec::new();
    entries.extend(cursor.next().cloned());

    let name = cursor
        .next_if(|e| e.as_word().is_some())
        .ok_or_else(|| invalid("expected a directive name after '#'"))?;
    entries.push(name.clone());
    let directive = name.as_word().unwrap_or_default().to_owned();

    match directive.as_str() {
        "include" => match cursor.next() {
            Some(open) if open.is_leaf(&Leaf::Less) => {
                entries.push(open.clone());
                loop {
                    let entry = cursor
                        .next()
                        .ok_or_else(|| invalid("#include <...> is never closed"))?;
                    entries.push(entry.clone());
                    if entry.is_leaf(&Leaf::Greater) {
                        break;
                    }
                }
            }
            Some(file @ FlatEntry::Token(Leaf::Str(_))) => entries.push(file.clone()),
            _ => return Err(invalid("#include expects <file> or \"file\"")),
        },
        "define" => {
            take_word(cursor, &mut entries, &directive)?;
            let value = cursor.next_if(|e| {
                matches!(e, FlatEntry::Token(Leaf::Number(_) | Leaf::Str(_)))
            });
            entries.extend(value.cloned());
        }
        "ifdef" | "ifndef" | "pragma" => take_word(cursor, &mut entries, &directive)?,
        _ => (),
    }

    Ok(RawMacro { directive, entries })
}

fn include_file(operands: &[FlatEntry]) -> Option<String> {
    match operands {
        [FlatEntry::Token(Leaf::Str(file))] => Some(file.clone()),
        [open, inner @ .., close] if open.is_leaf(&Leaf::Less) && close.is_leaf(&Leaf::Greater) => {
            Some(inner.iter().map(ToString::to_string).collect())
        }
        _ => None,
    }
}

/// Turns a captured directive into a [`Macro`]. Everything but `#include` is
/// reported and kept as is.
pub(super) fn lower(raw: RawMacro, diagnostics: &mut Vec<Diagnostic>) -> Result<Macro> {
    let RawMacro { directive, entries } = raw;
    let operands = entries.get(2..).unwrap_or_default();

    if directive == "include" {
        let file = include_file(operands).ok_or_else(|| invalid("malformed #include"))?;
        return Ok(Macro::Include { file });
    }

    tracing::warn!("unsupported directive #{directive}, ignored");
    diagnostics.push(Diagnostic::UnsupportedDirective(directive.clone()));
    Ok(Macro::Unsupported {
        directive,
        operands: operands.to_vec(),
    })
}
