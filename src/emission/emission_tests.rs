use crate::codegen::*;
use pretty_assertions::assert_eq;

#[test]
fn test_instructions() {
    let cases = [
        (AsmInstruction::Push(Operand::Reg(Register::BP)), "pushq %rbp"),
        (AsmInstruction::Push(Operand::Reg(Register::R8)), "pushq %r8"),
        (AsmInstruction::Push(Operand::Imm(3)), "pushq $3"),
        (AsmInstruction::Pop(Operand::Reg(Register::BP)), "popq %rbp"),
        (
            AsmInstruction::Mov(
                AsmType::Quadword,
                Operand::Reg(Register::SP),
                Operand::Reg(Register::BP),
            ),
            "movq %rsp, %rbp",
        ),
        (
            AsmInstruction::Mov(AsmType::Longword, Operand::Stack(0), Operand::Reg(Register::R9)),
            "movl (%rsp), %r9d",
        ),
        (
            AsmInstruction::Binary(
                AsmType::Longword,
                BinaryOp::Sub,
                Operand::Stack(8),
                Operand::Reg(Register::AX),
            ),
            "subl 8(%rsp), %eax",
        ),
        (
            AsmInstruction::Binary(
                AsmType::Quadword,
                BinaryOp::Xor,
                Operand::Reg(Register::AX),
                Operand::Reg(Register::AX),
            ),
            "xorq %rax, %rax",
        ),
        (AsmInstruction::Inc(AsmType::Longword, Operand::Stack(4)), "incl 4(%rsp)"),
        (AsmInstruction::Dec(AsmType::Longword, Operand::Stack(0)), "decl (%rsp)"),
        (
            AsmInstruction::Cmp(AsmType::Longword, Operand::Imm(-1), Operand::Stack(12)),
            "cmpl $-1, 12(%rsp)",
        ),
        (
            AsmInstruction::JmpCC(Condition::LE, String::from("if2_after")),
            "jle .Lif2_after",
        ),
        (AsmInstruction::Label(String::from("if2_after")), ".Lif2_after:"),
        (AsmInstruction::Call(String::from("_f")), "call _f"),
        (AsmInstruction::Ret, "ret"),
    ];

    for (instruction, text) in cases {
        assert_eq!(text, instruction.to_string());
    }
}

#[test]
fn test_program_layout() {
    let program = AsmProgram {
        globals: vec![AsmGlobal {
            name: String::from("_g"),
            init: 3,
        }],
        functions: vec![AsmFunction {
            name: String::from("main"),
            body: vec![
                AsmInstruction::Binary(
                    AsmType::Quadword,
                    BinaryOp::Xor,
                    Operand::Reg(Register::AX),
                    Operand::Reg(Register::AX),
                ),
                AsmInstruction::Binary(
                    AsmType::Quadword,
                    BinaryOp::Add,
                    Operand::Imm(0),
                    Operand::Reg(Register::SP),
                ),
                AsmInstruction::Ret,
            ],
        }],
    };

    let expected = "\t.data\n\
                    \t.globl _g\n\
                    _g:\n\
                    \t.long 3\n\
                    \t.text\n\
                    \t.globl main\n\
                    main:\n\
                    \txorq %rax, %rax\n\
                    \taddq $0, %rsp\n\
                    \tret\n";
    assert_eq!(expected, program.to_string());
}
