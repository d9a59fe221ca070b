use super::*;
use crate::program::*;
use crate::{flatten, lexer, parser};
use pretty_assertions::assert_eq;

fn recover_str(input: &str) -> Result<Program> {
    let tokens = lexer::lex(input).unwrap();
    let tree = parser::parse(&tokens).unwrap();
    recover(&flatten::flatten(tree))
}

fn word(s: &str) -> FlatEntry {
    FlatEntry::Token(Leaf::Word(s.to_owned()))
}

fn number(n: i64) -> FlatEntry {
    FlatEntry::Token(Leaf::Number(n))
}

fn terminator() -> FlatEntry {
    FlatEntry::Token(Leaf::Terminator)
}

fn invalid_syntax(input: &str) -> bool {
    matches!(recover_str(input), Err(RecoveryError::InvalidSyntax(_)))
}

#[test]
fn test_main_function() {
    let program = recover_str("int main() { return 0; }").unwrap();
    let expected = FunctionDefinition {
        name: String::from("main"),
        return_type: String::from("int"),
        args: vec![],
        body: vec![BodyItem::Statement(Statement::new(vec![
            word("return"),
            number(0),
            terminator(),
        ]))],
        entry_point: true,
    };
    assert_eq!(vec![expected], program.functions);
    assert!(program.globals.is_empty());
    assert!(program.diagnostics.is_empty());
}

#[test]
fn test_arguments() {
    let program = recover_str("int add(int a, char b) { return a; }").unwrap();
    let function = &program.functions[0];
    assert!(!function.entry_point);
    assert_eq!(
        vec![
            Argument {
                ty: PrimitiveType::Int,
                name: String::from("a")
            },
            Argument {
                ty: PrimitiveType::Char,
                name: String::from("b")
            },
        ],
        function.args
    );
    assert_eq!(1, function.int_argument_count());
}

#[test]
fn test_void_arguments() {
    let program = recover_str("void f(void) { return; }").unwrap();
    assert!(program.functions[0].args.is_empty());
}

#[test]
fn test_bad_arguments() {
    assert_eq!(
        Err(RecoveryError::Argument(String::from("int"))),
        recover_str("int f(int) { return 0; }")
    );
    assert_eq!(
        Err(RecoveryError::Argument(String::from("long x"))),
        recover_str("int f(long x) { return 0; }")
    );
    assert_eq!(
        Err(RecoveryError::Argument(String::from("int * p"))),
        recover_str("int f(int *p) { return 0; }")
    );
}

#[test]
fn test_globals_and_includes() {
    let program =
        recover_str("#include <stdio.h>\n#include \"local.h\"\nint x = 5;\nint main() { return x; }")
            .unwrap();
    let expected = vec![
        GlobalItem::Macro(Macro::Include {
            file: String::from("stdio.h"),
        }),
        GlobalItem::Macro(Macro::Include {
            file: String::from("local.h"),
        }),
        GlobalItem::Statement(Statement::new(vec![
            word("int"),
            word("x"),
            FlatEntry::Token(Leaf::Equal),
            number(5),
            terminator(),
        ])),
    ];
    assert_eq!(expected, program.globals);
    assert_eq!(1, program.functions.len());
}

#[test]
fn test_unsupported_directives() {
    let program = recover_str(
        "#define MAX 10\n#ifndef GUARD\n#pragma once\n#endif\nint main() { return 0; }",
    )
    .unwrap();
    let directives: Vec<&str> = program
        .globals
        .iter()
        .filter_map(|g| match g {
            GlobalItem::Macro(Macro::Unsupported { directive, .. }) => Some(directive.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(vec!["define", "ifndef", "pragma", "endif"], directives);
    assert_eq!(4, program.diagnostics.len());
    assert_eq!(
        Diagnostic::UnsupportedDirective(String::from("define")),
        program.diagnostics[0]
    );
    assert_eq!(1, program.functions.len());
}

#[test]
fn test_define_without_value() {
    let program = recover_str("#define DEBUG\nint x;").unwrap();
    assert_eq!(2, program.globals.len());
    assert!(matches!(
        &program.globals[1],
        GlobalItem::Statement(s) if s.tokens.len() == 3
    ));
}

#[test]
fn test_global_missing_terminator() {
    assert!(matches!(
        recover_str("int main() { return 0; }\nint x = 3"),
        Err(RecoveryError::InvalidSyntax(reason)) if reason == "missing ';' after `int x = 3`"
    ));
}

#[test]
fn test_missing_terminator_before_function() {
    assert!(invalid_syntax("int g = 3\nint main() { return 0; }"));
    assert!(invalid_syntax("int g = 3\n#include <stdio.h>\nint main() { return 0; }"));
    assert!(invalid_syntax("int g\nstruct point { int x; };"));
}

#[test]
fn test_global_struct() {
    let program = recover_str("struct point { int x; int y; };").unwrap();
    match &program.globals[..] {
        [GlobalItem::Struct(s)] => {
            assert_eq!("point", s.name);
            assert_eq!(6, s.body.len());
        }
        other => panic!("unexpected globals {other:?}"),
    }
    assert!(invalid_syntax("struct point { int x; }"));
}

#[test]
fn test_control_constructs() {
    let src = "int main() {
        if (x == 1) { x++; }
        else if (x) { x--; }
        else { return 1; }
        while (x) { x--; }
        for (i = 0; i < 3; i++) { }
        do { x++; } while (x < 10);
        return 0;
    }";
    let program = recover_str(src).unwrap();
    let kinds: Vec<ControlKind> = program.functions[0]
        .body
        .iter()
        .filter_map(|item| match item {
            BodyItem::Control(c) => Some(c.kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        vec![
            ControlKind::If,
            ControlKind::ElseIf,
            ControlKind::Else,
            ControlKind::While,
            ControlKind::For,
            ControlKind::Do,
        ],
        kinds
    );
    assert_eq!(7, program.functions[0].body.len());
}

#[test]
fn test_if_condition_and_body() {
    let program = recover_str("int main() { if (a < 2) { a = 1; b++; } return 0; }").unwrap();
    let BodyItem::Control(construct) = &program.functions[0].body[0] else {
        panic!("expected a construct");
    };
    assert_eq!(
        vec![word("a"), FlatEntry::Token(Leaf::Less), number(2)],
        construct.condition
    );
    assert_eq!(2, construct.block().len());
}

#[test]
fn test_nested_constructs() {
    let program =
        recover_str("int main() { while (a) { if (b) { c = 1; } } return 0; }").unwrap();
    let BodyItem::Control(outer) = &program.functions[0].body[0] else {
        panic!("expected a construct");
    };
    assert!(matches!(
        outer.block(),
        [BodyItem::Control(ControlConstruct {
            kind: ControlKind::If,
            ..
        })]
    ));
}

#[test]
fn test_call_statement() {
    let program = recover_str("int main() { foo(1, x); y = bar(2); return 0; }").unwrap();
    let body = &program.functions[0].body;
    assert_eq!(
        BodyItem::Call(Call {
            callee: String::from("foo"),
            arguments: vec![number(1), FlatEntry::Token(Leaf::Delimiter), word("x")],
        }),
        body[0]
    );
    assert!(matches!(body[1], BodyItem::Statement(_)));
    assert_eq!(3, body.len());
}

#[test]
fn test_return_parens_is_not_call() {
    let program = recover_str("int main() { return (0); }").unwrap();
    assert!(matches!(
        program.functions[0].body[0],
        BodyItem::Statement(_)
    ));
}

#[test]
fn test_switch_cases_in_source_order() {
    let src = "int main() {
        switch (x) {
            case 1: a = 1; break;
            case 2: a = 2;
            default: a = 3;
        }
        return 0;
    }";
    let program = recover_str(src).unwrap();
    let BodyItem::Control(ControlConstruct {
        kind: ControlKind::Switch,
        body: ControlBody::Cases(cases),
        ..
    }) = &program.functions[0].body[0]
    else {
        panic!("expected a switch");
    };
    let labels: Vec<&CaseLabel> = cases.iter().map(|c| &c.label).collect();
    assert_eq!(
        vec![
            &CaseLabel::Case(Leaf::Number(1)),
            &CaseLabel::Case(Leaf::Number(2)),
            &CaseLabel::Default,
        ],
        labels
    );
    assert_eq!(2, cases[0].statements.len());
    assert_eq!(1, cases[2].statements.len());
}

#[test]
fn test_switch_tokens_before_label_dropped() {
    let program =
        recover_str("int main() { switch (x) { y = 1; case 1: y = 2; } return 0; }").unwrap();
    assert_eq!(
        vec![Diagnostic::DroppedSwitchTokens(String::from("y = 1 ;"))],
        program.diagnostics
    );
}

#[test]
fn test_bad_case_label() {
    assert!(invalid_syntax(
        "int main() { switch (x) { : y = 2; } return 0; }"
    ));
}

#[test]
fn test_malformed_constructs() {
    assert!(invalid_syntax("int main() { if x { } return 0; }"));
    assert!(invalid_syntax("int main() { if (x) return 1; return 0; }"));
    assert!(invalid_syntax("int main() { while (x); return 0; }"));
    assert!(invalid_syntax("int main() { do { } (x); return 0; }"));
    assert!(invalid_syntax("int main() { else return 0; }"));
    assert!(invalid_syntax("int main() { { x = 1; } return 0; }"));
    assert!(invalid_syntax("int main() { int f() { } return 0; }"));
    assert!(invalid_syntax("int main() { struct s { int x; } return 0; }"));
}

#[test]
fn test_unfinished_body() {
    let program = recover_str("int main() { }").unwrap();
    assert_eq!(
        vec![Diagnostic::UnfinishedBody(String::from("main"))],
        program.diagnostics
    );
}

#[test]
fn test_prototype_is_global_statement() {
    let program = recover_str("int f(int a);").unwrap();
    assert!(program.functions.is_empty());
    assert_eq!(1, program.globals.len());
}
