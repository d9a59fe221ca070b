use super::body::recover_body;
use super::{RecoveryError, Result};
use crate::ast::Leaf;
use crate::flatten::{entries_to_string, FlatEntry};
use crate::program::{CaseLabel, Diagnostic, SwitchCase};

/// Splits a switch block into its labelled cases.
///
/// The block is walked backwards: everything after a `:` belongs to the label
/// in front of that colon. `default :` spans one entry before the colon,
/// `case N :` two.
pub(super) fn collect_cases(
    entries: &[FlatEntry],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<SwitchCase>> {
    let mut cases = Vec::new();
    let mut run: Vec<FlatEntry> = Vec::new();
    let mut end = entries.len();

    while let Some(i) = end.checked_sub(1) {
        let entry = &entries[i];
        end = i;
        if !entry.is_leaf(&Leaf::Colon) {
            run.push(entry.clone());
            continue;
        }

        let label = match &entries[..i] {
            [.., word] if word.is_word("default") => {
                end = i - 1;
                CaseLabel::Default
            }
            [.., case, FlatEntry::Token(value)] if case.is_word("case") => {
                end = i - 2;
                CaseLabel::Case(value.clone())
            }
            _ => {
                return Err(RecoveryError::InvalidSyntax(String::from(
                    "':' in a switch body must follow `case VALUE` or `default`",
                )))
            }
        };

        run.reverse();
        let statements = recover_body(&run, diagnostics)?;
        run.clear();
        cases.push(SwitchCase { label, statements });
    }

    if !run.is_empty() {
        run.reverse();
        let dropped = entries_to_string(&run);
        tracing::warn!("dropping switch tokens before the first label: {dropped}");
        diagnostics.push(Diagnostic::DroppedSwitchTokens(dropped));
    }

    cases.reverse();
    Ok(cases)
}
