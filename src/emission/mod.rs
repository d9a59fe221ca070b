//! Code emission using [Display]
//!
//! Implementation of [Display] for [AsmProgram](crate::codegen::AsmProgram), so the generated program can be written with [to_string] or any formatting macro ([format!], [write!], ..)
//!
//! [Display]: https://doc.rust-lang.org/std/fmt/trait.Display.html
//! [to_string]: https://doc.rust-lang.org/std/string/trait.ToString.html#tymethod.to_string
//! [format!]: https://doc.rust-lang.org/std/macro.format.html
//! [write!]: https://doc.rust-lang.org/std/macro.write.html

#[cfg(test)]
mod emission_tests;

use crate::codegen::*;

use std::fmt;

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Sub => write!(f, "sub"),
            Self::Xor => write!(f, "xor"),
        }
    }
}

impl fmt::Display for AsmFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "\t.globl {}", self.name)?;
        writeln!(f, "{}:", self.name)?;
        for instruction in &self.body {
            writeln!(f, "\t{instruction}")?;
        }

        Ok(())
    }
}

impl fmt::Display for AsmGlobal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let AsmGlobal { name, init } = self;
        writeln!(f, "\t.globl {name}")?;
        writeln!(f, "{name}:")?;
        writeln!(f, "\t.long {init}")
    }
}

impl fmt::Display for AsmProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "\t.data")?;
        for global in &self.globals {
            write!(f, "{global}")?;
        }
        writeln!(f, "\t.text")?;
        for function in &self.functions {
            write!(f, "{function}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::E => write!(f, "e"),
            Self::NE => write!(f, "ne"),
            Self::L => write!(f, "l"),
            Self::LE => write!(f, "le"),
            Self::G => write!(f, "g"),
            Self::GE => write!(f, "ge"),
        }
    }
}

impl fmt::Display for AsmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Longword => write!(f, "l"),
            Self::Quadword => write!(f, "q"),
        }
    }
}

fn display_quadword_reg(r: Register) -> &'static str {
    match r {
        Register::AX => "%rax",
        Register::CX => "%rcx",
        Register::DX => "%rdx",
        Register::R8 => "%r8",
        Register::R9 => "%r9",
        Register::BP => "%rbp",
        Register::SP => "%rsp",
    }
}

fn display_longword_reg(r: Register) -> &'static str {
    match r {
        Register::AX => "%eax",
        Register::CX => "%ecx",
        Register::DX => "%edx",
        Register::R8 => "%r8d",
        Register::R9 => "%r9d",
        Register::BP => "%ebp",
        Register::SP => "%esp",
    }
}

fn display_reg(r: Register, t: AsmType) -> &'static str {
    match t {
        AsmType::Longword => display_longword_reg(r),
        AsmType::Quadword => display_quadword_reg(r),
    }
}

fn display_operand(op: &Operand, t: AsmType) -> String {
    match op {
        Operand::Reg(r) => display_reg(*r, t).to_string(),
        Operand::Imm(i) => format!("${i}"),
        Operand::Stack(0) => String::from("(%rsp)"),
        Operand::Stack(i) => format!("{i}(%rsp)"),
    }
}

impl fmt::Display for AsmInstruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Push(op) => write!(f, "pushq {}", display_operand(op, AsmType::Quadword)),
            Self::Pop(op) => write!(f, "popq {}", display_operand(op, AsmType::Quadword)),
            Self::Call(name) => write!(f, "call {name}"),
            Self::Mov(t, o1, o2) => {
                let o1_str = display_operand(o1, *t);
                let o2_str = display_operand(o2, *t);
                write!(f, "mov{t} {o1_str}, {o2_str}")
            }
            Self::Binary(t, op, src, dst) => {
                let src_str = display_operand(src, *t);
                let dst_str = display_operand(dst, *t);
                write!(f, "{op}{t} {src_str}, {dst_str}")
            }
            Self::Inc(t, op) => write!(f, "inc{t} {}", display_operand(op, *t)),
            Self::Dec(t, op) => write!(f, "dec{t} {}", display_operand(op, *t)),
            Self::Cmp(t, src, dst) => {
                let src_str = display_operand(src, *t);
                let dst_str = display_operand(dst, *t);
                write!(f, "cmp{t} {src_str}, {dst_str}")
            }
            Self::JmpCC(condition, label) => write!(f, "j{condition} .L{label}"),
            Self::Label(label) => write!(f, ".L{label}:"),
            Self::Ret => write!(f, "ret"),
        }
    }
}
