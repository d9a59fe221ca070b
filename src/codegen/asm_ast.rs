use crate::ast::{Identifier, Leaf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmProgram {
    pub globals: Vec<AsmGlobal>,
    pub functions: Vec<AsmFunction>,
}

pub type AsmInstructions = Vec<AsmInstruction>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsmType {
    Longword,
    Quadword,
}

/// `int` global living in `.data`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmGlobal {
    pub name: Identifier,
    pub init: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmFunction {
    pub name: Identifier,
    pub body: AsmInstructions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmInstruction {
    Push(Operand),
    Pop(Operand),
    Mov(AsmType, Operand, Operand),
    Binary(AsmType, BinaryOp, Operand, Operand),
    Inc(AsmType, Operand),
    Dec(AsmType, Operand),
    Cmp(AsmType, Operand, Operand),
    JmpCC(Condition, Identifier),
    Label(Identifier),
    Call(Identifier),
    Ret,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    E,
    NE,
    G,
    GE,
    L,
    LE,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Xor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Imm(i64),
    Reg(Register),
    /// Byte offset from `%rsp`
    Stack(i64),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    AX,
    CX,
    DX,
    R8,
    R9,
    BP,
    SP,
}

/// Registers carrying the first four `int` arguments, in order.
pub const ARG_REGISTERS: [Register; 4] = [Register::CX, Register::DX, Register::R8, Register::R9];

impl Condition {
    /// Condition under which the body of `if (x OP n)` is skipped.
    pub fn inverse(self) -> Self {
        match self {
            Self::E => Self::NE,
            Self::NE => Self::E,
            Self::G => Self::LE,
            Self::GE => Self::L,
            Self::L => Self::GE,
            Self::LE => Self::G,
        }
    }
}

impl TryFrom<&Leaf> for Condition {
    type Error = ();
    fn try_from(value: &Leaf) -> Result<Self, ()> {
        match value {
            Leaf::ComparisonE => Ok(Self::E),
            Leaf::ComparisonN => Ok(Self::NE),
            Leaf::Greater => Ok(Self::G),
            Leaf::GreaterOrEqual => Ok(Self::GE),
            Leaf::Less => Ok(Self::L),
            Leaf::LessOrEqual => Ok(Self::LE),
            _ => Err(()),
        }
    }
}

impl TryFrom<&Leaf> for BinaryOp {
    type Error = ();
    fn try_from(value: &Leaf) -> Result<Self, ()> {
        match value {
            Leaf::Plus => Ok(Self::Add),
            Leaf::Minus => Ok(Self::Sub),
            _ => Err(()),
        }
    }
}
