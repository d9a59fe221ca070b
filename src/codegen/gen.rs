use super::asm_ast::*;
use super::stack::{SimulatedStack, SlotValue, WORD_SIZE};
use super::{CodegenError, Context, Result};
use crate::ast::{Identifier, Leaf};
use crate::flatten::{entries_to_string, FlatEntry};
use crate::program::*;

/// Operand of a simple expression, `3`, `-3` or `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Literal(i64),
    Variable(&'a str),
}

fn split_value(entries: &[FlatEntry]) -> Option<(Value<'_>, &[FlatEntry])> {
    match entries {
        [FlatEntry::Token(Leaf::Number(n)), rest @ ..] => Some((Value::Literal(*n), rest)),
        [FlatEntry::Token(Leaf::Minus), FlatEntry::Token(Leaf::Number(n)), rest @ ..] => {
            Some((Value::Literal(-n), rest))
        }
        [FlatEntry::Token(Leaf::Word(w)), rest @ ..] if !is_reserved(w) => {
            Some((Value::Variable(w), rest))
        }
        _ => None,
    }
}

fn single_value(entries: &[FlatEntry]) -> Option<Value<'_>> {
    match split_value(entries)? {
        (value, []) => Some(value),
        _ => None,
    }
}

/// `a + b - 3 ..`, every operand paired with the operator in front of it
fn parse_chain(entries: &[FlatEntry]) -> Option<Vec<(BinaryOp, Value<'_>)>> {
    let (first, mut rest) = split_value(entries)?;
    let mut chain = vec![(BinaryOp::Add, first)];

    while let [FlatEntry::Token(op), tail @ ..] = rest {
        let op = BinaryOp::try_from(op).ok()?;
        let (value, tail) = split_value(tail)?;
        chain.push((op, value));
        rest = tail;
    }

    rest.is_empty().then_some(chain)
}

pub(super) fn function_symbol(name: &str) -> Identifier {
    if name == "main" {
        name.to_owned()
    } else {
        format!("_{name}")
    }
}

fn ends_with_return(function: &FunctionDefinition) -> bool {
    matches!(
        function.body.last(),
        Some(BodyItem::Statement(s)) if s.tokens.first().is_some_and(|e| e.is_word("return"))
    )
}

struct FunctionGen<'c> {
    ctx: &'c mut Context,
    stack: SimulatedStack,
    instructions: AsmInstructions,
}

impl FunctionGen<'_> {
    fn emit(&mut self, instruction: AsmInstruction) {
        self.instructions.push(instruction);
    }

    fn operand(&self, value: Value) -> Result<Operand> {
        match value {
            Value::Literal(n) => Ok(Operand::Imm(n)),
            Value::Variable(name) => self.stack.resolve(name),
        }
    }

    fn prologue(&mut self, function: &FunctionDefinition) {
        let framed = !(function.args.is_empty() && function.body.len() == 1);
        if framed {
            self.emit(AsmInstruction::Push(Operand::Reg(Register::BP)));
            self.emit(AsmInstruction::Mov(
                AsmType::Quadword,
                Operand::Reg(Register::SP),
                Operand::Reg(Register::BP),
            ));
            self.stack.push_frame_base();
        }

        let int_args = function
            .args
            .iter()
            .filter(|arg| arg.ty == PrimitiveType::Int);
        if function.int_argument_count() > ARG_REGISTERS.len() {
            tracing::warn!(
                "function {} takes more than {} int arguments, the rest are not loaded",
                function.name,
                ARG_REGISTERS.len()
            );
        }
        for (arg, reg) in int_args.zip(ARG_REGISTERS) {
            self.emit(AsmInstruction::Push(Operand::Reg(reg)));
            self.stack
                .push_local(&arg.name, PrimitiveType::Int, SlotValue::Register(reg));
        }
    }

    /// Frees the locals, restores `%rbp` and returns.
    #[allow(clippy::cast_possible_wrap)]
    fn cleanup(&mut self) {
        let size = self.stack.local_count() as i64 * WORD_SIZE;
        self.emit(AsmInstruction::Binary(
            AsmType::Quadword,
            BinaryOp::Add,
            Operand::Imm(size),
            Operand::Reg(Register::SP),
        ));
        if self.stack.has_frame() {
            self.emit(AsmInstruction::Pop(Operand::Reg(Register::BP)));
        }
        self.emit(AsmInstruction::Ret);
    }

    /// Computes the chain into `%eax`; returns the sum of its literals.
    fn chain(&mut self, chain: &[(BinaryOp, Value)]) -> Result<i64> {
        let ax = Operand::Reg(Register::AX);
        self.emit(AsmInstruction::Binary(
            AsmType::Longword,
            BinaryOp::Xor,
            ax.clone(),
            ax.clone(),
        ));

        let mut folded: i64 = 0;
        for (i, &(op, value)) in chain.iter().enumerate() {
            let src = self.operand(value)?;
            let instruction = match (i, value) {
                (0, Value::Variable(_)) => AsmInstruction::Mov(AsmType::Longword, src, ax.clone()),
                _ => AsmInstruction::Binary(AsmType::Longword, op, src, ax.clone()),
            };
            self.emit(instruction);

            if let Value::Literal(n) = value {
                folded = match op {
                    BinaryOp::Sub => folded.wrapping_sub(n),
                    _ => folded.wrapping_add(n),
                };
            }
        }
        Ok(folded)
    }

    fn gen_return(&mut self, value: &[FlatEntry]) -> Result<()> {
        let ax = Operand::Reg(Register::AX);
        match single_value(value) {
            Some(Value::Literal(0)) => self.emit(AsmInstruction::Binary(
                AsmType::Quadword,
                BinaryOp::Xor,
                ax.clone(),
                ax,
            )),
            Some(value) => {
                let src = self.operand(value)?;
                self.emit(AsmInstruction::Mov(AsmType::Longword, src, ax));
            }
            None if value.is_empty() => (),
            None => match parse_chain(value) {
                Some(chain) => {
                    self.chain(&chain)?;
                }
                None => tracing::warn!(
                    "return value `{}` is not lowered",
                    entries_to_string(value)
                ),
            },
        }
        self.cleanup();
        Ok(())
    }

    /// Zeroed accumulator pushed for initializers that are not lowered.
    fn zeroed_slot(&mut self, name: &str, init: &[FlatEntry]) -> SlotValue {
        tracing::warn!(
            "initializer `{}` of {name} is not lowered, slot zeroed",
            entries_to_string(init)
        );
        let ax = Operand::Reg(Register::AX);
        self.emit(AsmInstruction::Binary(
            AsmType::Longword,
            BinaryOp::Xor,
            ax.clone(),
            ax.clone(),
        ));
        self.emit(AsmInstruction::Push(ax));
        SlotValue::Constant(0)
    }

    fn declaration(&mut self, ty: &str, name: &str, rest: &[FlatEntry]) -> Result<()> {
        let char_array = ty == "char" && matches!(rest.first(), Some(FlatEntry::Array(_)));
        if self.stack.declared_in_scope(name) || (char_array && self.stack.is_live(name)) {
            return Err(CodegenError::DuplicateDeclaration(name.to_owned()));
        }

        if ty != "int" {
            tracing::warn!("{ty} variable {name} is not lowered");
            return Ok(());
        }

        let ax = Operand::Reg(Register::AX);
        let value = match rest {
            [] => {
                self.emit(AsmInstruction::Push(Operand::Imm(0)));
                SlotValue::Constant(0)
            }
            [assign, rhs @ ..] if assign.is_leaf(&Leaf::Equal) => match single_value(rhs) {
                Some(Value::Literal(n)) => {
                    self.emit(AsmInstruction::Push(Operand::Imm(n)));
                    SlotValue::Constant(n)
                }
                Some(Value::Variable(src)) => {
                    let src_operand = self.stack.resolve(src)?;
                    self.emit(AsmInstruction::Mov(AsmType::Longword, src_operand, ax.clone()));
                    self.emit(AsmInstruction::Push(ax));
                    SlotValue::Variable(src.to_owned())
                }
                None => match parse_chain(rhs) {
                    Some(chain) => {
                        let folded = self.chain(&chain)?;
                        self.emit(AsmInstruction::Push(ax));
                        SlotValue::Constant(folded)
                    }
                    None => self.zeroed_slot(name, rhs),
                },
            },
            _ => self.zeroed_slot(name, rest),
        };

        self.stack.push_local(name, PrimitiveType::Int, value);
        Ok(())
    }

    /// `int a, b = 2, c = a;` one declarator at a time
    fn declarations(&mut self, ty: &str, declarators: &[FlatEntry]) -> Result<()> {
        for declarator in declarators.split(|e| e.is_leaf(&Leaf::Delimiter)) {
            match declarator {
                [FlatEntry::Token(Leaf::Word(name)), FlatEntry::Callable(_)] => {
                    tracing::debug!("function declaration {name} skipped");
                }
                [FlatEntry::Token(Leaf::Word(name)), rest @ ..] if !is_reserved(name) => {
                    self.declaration(ty, name, rest)?;
                }
                other => tracing::warn!(
                    "declarator `{}` is not lowered",
                    entries_to_string(other)
                ),
            }
        }
        Ok(())
    }

    fn reassignment(&mut self, name: &str, rhs: &[FlatEntry], statement: &Statement) -> Result<()> {
        let dst = self.stack.resolve(name)?;
        let ax = Operand::Reg(Register::AX);

        match single_value(rhs) {
            Some(Value::Literal(n)) => {
                self.emit(AsmInstruction::Mov(AsmType::Longword, Operand::Imm(n), dst));
            }
            Some(Value::Variable(src)) => {
                let src = self.stack.resolve(src)?;
                self.emit(AsmInstruction::Mov(AsmType::Longword, src, ax.clone()));
                self.emit(AsmInstruction::Mov(AsmType::Longword, ax, dst));
            }
            None => {
                let Some(&[(_, left), (op, right)]) = parse_chain(rhs).as_deref() else {
                    return Err(CodegenError::UnsupportedStatement(statement.to_string()));
                };
                let left = self.operand(left)?;
                let right = self.operand(right)?;
                self.emit(AsmInstruction::Mov(AsmType::Longword, left, ax.clone()));
                self.emit(AsmInstruction::Binary(AsmType::Longword, op, right, ax.clone()));
                self.emit(AsmInstruction::Mov(AsmType::Longword, ax, dst));
            }
        }
        Ok(())
    }

    fn statement(&mut self, statement: &Statement) -> Result<()> {
        use FlatEntry::Token;

        match statement.content() {
            [] => Ok(()),
            [ret, value @ ..] if ret.is_word("return") => self.gen_return(value),
            [Token(Leaf::Word(ty)), declarators @ ..]
                if ty.parse::<PrimitiveType>().is_ok() =>
            {
                self.declarations(ty, declarators)
            }
            [Token(Leaf::Word(name)), Token(Leaf::IncByOne)] => {
                let target = self.stack.resolve(name)?;
                self.emit(AsmInstruction::Inc(AsmType::Longword, target));
                Ok(())
            }
            [Token(Leaf::Word(name)), Token(Leaf::DecByOne)] => {
                let target = self.stack.resolve(name)?;
                self.emit(AsmInstruction::Dec(AsmType::Longword, target));
                Ok(())
            }
            [Token(Leaf::Word(name)), Token(Leaf::Equal), rhs @ ..] if !is_reserved(name) => {
                self.reassignment(name, rhs, statement)
            }
            _ => {
                tracing::warn!("statement `{statement}` is not lowered");
                Ok(())
            }
        }
    }

    fn if_construct(&mut self, construct: &ControlConstruct) -> Result<()> {
        use FlatEntry::Token;

        let (name, imm, skip_if) = match construct.condition.as_slice() {
            [Token(Leaf::Word(name))] => (name, 0, Condition::E),
            [Token(Leaf::Word(name)), Token(op), Token(Leaf::Number(n))] => {
                match Condition::try_from(op) {
                    Ok(condition) => (name, *n, condition.inverse()),
                    Err(()) => {
                        tracing::warn!("if with operator {op} is not lowered");
                        return Ok(());
                    }
                }
            }
            condition => {
                tracing::warn!(
                    "if condition `{}` is not lowered",
                    entries_to_string(condition)
                );
                return Ok(());
            }
        };

        let target = self.stack.resolve(name)?;
        let label = self.ctx.next_if_label();
        self.emit(AsmInstruction::Cmp(AsmType::Longword, Operand::Imm(imm), target));
        self.emit(AsmInstruction::JmpCC(skip_if, label.clone()));

        let mark = self.stack.enter_scope();
        self.body(construct.block())?;
        let popped = self.stack.leave_scope(mark);
        if popped > 0 {
            #[allow(clippy::cast_possible_wrap)]
            let size = popped as i64 * WORD_SIZE;
            self.emit(AsmInstruction::Binary(
                AsmType::Quadword,
                BinaryOp::Add,
                Operand::Imm(size),
                Operand::Reg(Register::SP),
            ));
        }
        self.emit(AsmInstruction::Label(label));
        Ok(())
    }

    fn call(&mut self, call: &Call) -> Result<()> {
        let Call { callee, arguments } = call;
        if !self.ctx.is_function(callee) {
            tracing::debug!("call to unknown function {callee} dropped");
            return Ok(());
        }

        let args: Vec<&[FlatEntry]> = arguments
            .split(|e| e.is_leaf(&Leaf::Delimiter))
            .filter(|arg| !arg.is_empty())
            .collect();
        if args.len() > ARG_REGISTERS.len() {
            return Err(CodegenError::TooManyArguments {
                callee: callee.clone(),
                count: args.len(),
            });
        }

        for (arg, reg) in args.into_iter().zip(ARG_REGISTERS) {
            let value = single_value(arg).ok_or_else(|| {
                CodegenError::UnsupportedStatement(format!(
                    "{callee}({})",
                    entries_to_string(arguments)
                ))
            })?;
            let src = self.operand(value)?;
            self.emit(AsmInstruction::Mov(AsmType::Longword, src, Operand::Reg(reg)));
        }

        self.emit(AsmInstruction::Call(function_symbol(callee)));
        Ok(())
    }

    fn body(&mut self, items: &[BodyItem]) -> Result<()> {
        for item in items {
            match item {
                BodyItem::Statement(statement) => self.statement(statement)?,
                BodyItem::Call(call) => self.call(call)?,
                BodyItem::Control(construct) if construct.kind == ControlKind::If => {
                    self.if_construct(construct)?;
                }
                BodyItem::Control(construct) => {
                    tracing::warn!("`{}` is not lowered, skipped", construct.kind);
                }
                BodyItem::Struct(declaration) => {
                    tracing::warn!("struct {} is not lowered, skipped", declaration.name);
                }
            }
        }
        Ok(())
    }
}

pub(super) fn gen_function(ctx: &mut Context, function: &FunctionDefinition) -> Result<AsmFunction> {
    tracing::trace!("generating function {}", function.name);
    let mut gen = FunctionGen {
        ctx,
        stack: SimulatedStack::new(),
        instructions: AsmInstructions::new(),
    };

    gen.prologue(function);
    gen.body(&function.body)?;
    if !ends_with_return(function) {
        gen.cleanup();
    }

    let name = if function.entry_point {
        function.name.clone()
    } else {
        function_symbol(&function.name)
    };
    Ok(AsmFunction {
        name,
        body: gen.instructions,
    })
}

fn gen_global_declarators(declarators: &[FlatEntry], globals: &mut Vec<AsmGlobal>) {
    use FlatEntry::Token;

    for declarator in declarators.split(|e| e.is_leaf(&Leaf::Delimiter)) {
        let (name, init) = match declarator {
            [Token(Leaf::Word(name))] => (name, 0),
            [Token(Leaf::Word(name)), Token(Leaf::Equal), rhs @ ..] => match single_value(rhs) {
                Some(Value::Literal(n)) => (name, n),
                _ => {
                    tracing::warn!("global {name} needs a constant initializer, skipped");
                    continue;
                }
            },
            [Token(Leaf::Word(name)), FlatEntry::Callable(_)] => {
                tracing::debug!("function declaration {name} skipped");
                continue;
            }
            other => {
                tracing::warn!("global declarator `{}` skipped", entries_to_string(other));
                continue;
            }
        };
        globals.push(AsmGlobal {
            name: format!("_{name}"),
            init,
        });
    }
}

pub(super) fn gen_globals(items: &[GlobalItem]) -> Vec<AsmGlobal> {
    let mut globals = Vec::new();

    for item in items {
        let statement = match item {
            GlobalItem::Statement(statement) => statement,
            GlobalItem::Struct(declaration) => {
                tracing::warn!("struct {} is not lowered, skipped", declaration.name);
                continue;
            }
            GlobalItem::Macro(_) => continue,
        };

        match statement.content() {
            [ty, declarators @ ..] if ty.is_word("int") => {
                gen_global_declarators(declarators, &mut globals);
            }
            _ => tracing::warn!("global statement `{statement}` is not lowered"),
        }
    }

    globals
}
