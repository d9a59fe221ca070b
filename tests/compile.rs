use pretty_assertions::assert_eq;
use slcc::{codegen, flatten, lexer, parser, recovery, semantic_analysis};

fn compile(source: &str) -> String {
    let tokens = lexer::lex(source).unwrap();
    let tree = parser::parse(&tokens).unwrap();
    let program = recovery::recover(&flatten::flatten(tree)).unwrap();
    semantic_analysis::validate(&program).unwrap();
    codegen::codegen(&program).unwrap().to_string()
}

#[test]
fn return_zero() {
    let expected = "\t.data
\t.text
\t.globl main
main:
\txorq %rax, %rax
\taddq $0, %rsp
\tret
";
    assert_eq!(expected, compile("int main() { return 0; }"));
}

#[test]
fn call_with_locals_and_if() {
    let source = r#"
#include <stdio.h>

int counter = 2;

/* adds two numbers */
int add(int a, int b) {
    return a + b;
}

int main() {
    int x = 5; // five
    if (x >= 3) {
        int y = 1;
        x--;
    }
    add(x, 3);
    return x;
}
"#;
    let expected = "\t.data
\t.globl _counter
_counter:
\t.long 2
\t.text
\t.globl _add
_add:
\tpushq %rbp
\tmovq %rsp, %rbp
\tpushq %rcx
\tpushq %rdx
\txorl %eax, %eax
\tmovl 4(%rsp), %eax
\taddl (%rsp), %eax
\taddq $8, %rsp
\tpopq %rbp
\tret
\t.globl main
main:
\tpushq %rbp
\tmovq %rsp, %rbp
\tpushq $5
\tcmpl $3, (%rsp)
\tjl .Lif0_after
\tpushq $1
\tdecl 4(%rsp)
\taddq $4, %rsp
.Lif0_after:
\tmovl (%rsp), %ecx
\tmovl $3, %edx
\tcall _add
\tmovl (%rsp), %eax
\taddq $4, %rsp
\tpopq %rbp
\tret
";
    assert_eq!(expected, compile(source));
}

#[test]
fn unlowered_constructs_are_skipped() {
    let source = "int main() {
        int i = 0;
        while (i < 3) { i++; }
        printf(\"%d\", i);
        return i;
    }";
    let asm = compile(source);
    assert!(!asm.contains("call"));
    assert!(!asm.contains("incl"));
    assert!(asm.ends_with("\tmovl (%rsp), %eax\n\taddq $4, %rsp\n\tpopq %rbp\n\tret\n"));
}

#[test]
fn verifier_rejects_misplaced_return() {
    let tokens = lexer::lex("int main() { int x = return 1; }").unwrap();
    let tree = parser::parse(&tokens).unwrap();
    let program = recovery::recover(&flatten::flatten(tree)).unwrap();
    assert!(semantic_analysis::validate(&program).is_err());
}

#[test]
fn unterminated_brace_reports_kind() {
    let tokens = lexer::lex("int main() {\n return 0;\n").unwrap();
    let err = parser::parse(&tokens).unwrap_err();
    assert!(err.to_string().contains("brace"));
}

#[test]
fn missing_global_terminator_is_fatal() {
    let tokens = lexer::lex("int g = 3\nint main() { return 0; }").unwrap();
    let tree = parser::parse(&tokens).unwrap();
    let err = recovery::recover(&flatten::flatten(tree)).unwrap_err();
    assert_eq!("Invalid Syntax! missing ';' after `int g = 3`", err.to_string());
}

#[test]
fn constant_wider_than_int_is_rejected() {
    assert!(lexer::lex("int main() { int x = 5000000000; return x; }").is_err());
}
