mod semanalysis_error;
#[cfg(test)]
mod verifier_tests;

use crate::ast::Leaf;
use crate::flatten::{entries_to_string, FlatEntry};
use crate::program::*;
use std::collections::HashSet;

pub use semanalysis_error::{Result, SemAnalysisError};

fn check_function_names(functions: &[FunctionDefinition]) -> Result<()> {
    let mut seen = HashSet::new();
    for function in functions {
        let name = &function.name;
        if is_reserved(name) {
            return Err(SemAnalysisError::ReservedFunctionName(name.clone()));
        }
        if !seen.insert(name.as_str()) {
            return Err(SemAnalysisError::FunctionRedefinition(name.clone()));
        }
    }
    Ok(())
}

fn check_signature(function: &FunctionDefinition) -> Result<()> {
    if function.return_type.parse::<PrimitiveType>().is_err() {
        return Err(SemAnalysisError::InvalidReturnType(
            function.name.clone(),
            function.return_type.clone(),
        ));
    }

    if let Some(arg) = function.args.iter().find(|arg| is_reserved(&arg.name)) {
        return Err(SemAnalysisError::ReservedArgumentName(
            function.name.clone(),
            arg.name.clone(),
        ));
    }

    Ok(())
}

fn check_statement(statement: &Statement) -> Result<()> {
    if statement.tokens.is_empty() {
        return Err(SemAnalysisError::EmptyStatement);
    }
    if !statement.is_terminated() {
        return Err(SemAnalysisError::MissingTerminator(statement.to_string()));
    }
    if statement.tokens.iter().skip(1).any(|e| e.is_word("return")) {
        return Err(SemAnalysisError::MisplacedReturn(statement.to_string()));
    }
    Ok(())
}

fn is_operand(entry: &FlatEntry) -> bool {
    match entry.as_leaf() {
        Some(Leaf::Word(w)) => !is_reserved(w),
        Some(Leaf::Number(_)) => true,
        _ => false,
    }
}

/// `x`, `3` or `a OP b` with a comparison operator
fn check_condition(condition: &[FlatEntry]) -> Result<()> {
    let valid = match condition {
        [single] => is_operand(single),
        [lhs, FlatEntry::Token(op), rhs] => op.is_comparison() && is_operand(lhs) && is_operand(rhs),
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(SemAnalysisError::InvalidCondition(entries_to_string(condition)))
    }
}

fn check_construct(construct: &ControlConstruct) -> Result<()> {
    if matches!(construct.kind, ControlKind::If | ControlKind::ElseIf) {
        check_condition(&construct.condition)?;
    }

    match &construct.body {
        ControlBody::Block(items) => check_body(items),
        ControlBody::Cases(cases) => cases.iter().try_for_each(|c| check_body(&c.statements)),
    }
}

fn check_body(body: &[BodyItem]) -> Result<()> {
    for item in body {
        match item {
            BodyItem::Statement(statement) => check_statement(statement)?,
            BodyItem::Control(construct) => check_construct(construct)?,
            BodyItem::Call(_) | BodyItem::Struct(_) => (),
        }
    }
    Ok(())
}

/// Checks the function list before code generation.
///
/// Names must be unique and not reserved, signatures must use known types,
/// every statement must be terminated with `return` only at its start, and
/// `if` conditions must be a single operand or one comparison.
pub fn validate(program: &Program) -> Result<()> {
    check_function_names(&program.functions)?;

    for function in &program.functions {
        check_signature(function)?;
        check_body(&function.body)?;
    }

    tracing::trace!("validated {} functions", program.functions.len());
    Ok(())
}
