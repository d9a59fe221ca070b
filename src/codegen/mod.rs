pub mod asm_ast;
mod codegen_error;
mod gen;
pub mod stack;

use crate::ast::Identifier;
use crate::program::Program;
use std::collections::HashSet;

pub use asm_ast::*;
pub use codegen_error::{CodegenError, Result};

use gen::{gen_function, gen_globals};

/// State shared by all functions of one compilation.
#[derive(Debug)]
struct Context {
    functions: HashSet<Identifier>,
    if_labels: usize,
}

impl Context {
    fn new(program: &Program) -> Self {
        let functions = program.functions.iter().map(|f| f.name.clone()).collect();
        Self {
            functions,
            if_labels: 0,
        }
    }

    fn is_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    fn next_if_label(&mut self) -> Identifier {
        let label = format!("if{}_after", self.if_labels);
        self.if_labels += 1;
        label
    }
}

/// Lowers a validated [`Program`] to the assembly model.
///
/// Each function is generated against a fresh simulated stack; `if` labels
/// are numbered across the whole program.
pub fn codegen(program: &Program) -> Result<AsmProgram> {
    let mut ctx = Context::new(program);
    let globals = gen_globals(&program.globals);
    let functions = program
        .functions
        .iter()
        .map(|function| gen_function(&mut ctx, function))
        .collect::<Result<_>>()?;

    Ok(AsmProgram { globals, functions })
}
