use super::{RecoveryError, Result};
use crate::ast::Leaf;
use crate::flatten::{entries_to_string, FlatEntry};
use crate::program::{Argument, PrimitiveType};

fn recover_argument(chunk: &[FlatEntry]) -> Result<Argument> {
    let invalid = || RecoveryError::Argument(entries_to_string(chunk));
    match chunk {
        [ty, name] => {
            let ty = ty
                .as_word()
                .and_then(|w| w.parse::<PrimitiveType>().ok())
                .ok_or_else(invalid)?;
            let name = name.as_word().ok_or_else(invalid)?;
            Ok(Argument {
                ty,
                name: name.to_owned(),
            })
        }
        _ => Err(invalid()),
    }
}

/// Splits a parameter list on `,` into typed arguments.
///
/// `()` and `(void)` have none.
pub(super) fn recover_arguments(list: &[FlatEntry]) -> Result<Vec<Argument>> {
    match list {
        [] => return Ok(Vec::new()),
        [only] if only.is_word("void") => return Ok(Vec::new()),
        _ => (),
    }

    list.split(|e| e.is_leaf(&Leaf::Delimiter))
        .map(recover_argument)
        .collect()
}
