use super::*;
use crate::{flatten, lexer, parser, recovery};
use pretty_assertions::assert_eq;

fn validate_str(input: &str) -> Result<()> {
    let tokens = lexer::lex(input).unwrap();
    let tree = parser::parse(&tokens).unwrap();
    let program = recovery::recover(&flatten::flatten(tree)).unwrap();
    validate(&program)
}

#[test]
fn test_valid_program() {
    let src = "int add(int a, int b) { return a + b; }
    int main() {
        int x = 1;
        if (x == 1) { x++; }
        if (x) { x--; }
        if (3) { }
        return add(x, 2);
    }";
    assert_eq!(Ok(()), validate_str(src));
}

#[test]
fn test_duplicate_function() {
    assert_eq!(
        Err(SemAnalysisError::FunctionRedefinition(String::from("f"))),
        validate_str("int f() { return 0; } int f() { return 1; }")
    );
}

#[test]
fn test_reserved_function_name() {
    assert_eq!(
        Err(SemAnalysisError::ReservedFunctionName(String::from("while"))),
        validate_str("int while() { return 0; }")
    );
}

#[test]
fn test_return_type() {
    assert_eq!(
        Err(SemAnalysisError::InvalidReturnType(
            String::from("f"),
            String::from("long")
        )),
        validate_str("long f() { return 0; }")
    );
}

#[test]
fn test_reserved_argument() {
    assert_eq!(
        Err(SemAnalysisError::ReservedArgumentName(
            String::from("f"),
            String::from("if")
        )),
        validate_str("int f(int if) { return 0; }")
    );
}

#[test]
fn test_unterminated_statement() {
    assert_eq!(
        Err(SemAnalysisError::MissingTerminator(String::from("return 0"))),
        validate_str("int main() { return 0 }")
    );
}

#[test]
fn test_misplaced_return() {
    assert_eq!(
        Err(SemAnalysisError::MisplacedReturn(String::from("x = return ;"))),
        validate_str("int main() { x = return; }")
    );
}

#[test]
fn test_conditions() {
    let check = |cond: &str| validate_str(&format!("int main() {{ if ({cond}) {{ }} return 0; }}"));
    assert_eq!(Ok(()), check("a <= 10"));
    assert_eq!(Ok(()), check("a != b"));
    assert!(matches!(
        check("a + b"),
        Err(SemAnalysisError::InvalidCondition(_))
    ));
    assert!(matches!(
        check("a == 1 && b"),
        Err(SemAnalysisError::InvalidCondition(_))
    ));
    assert!(matches!(
        check("int"),
        Err(SemAnalysisError::InvalidCondition(_))
    ));
    assert!(matches!(
        check(""),
        Err(SemAnalysisError::InvalidCondition(_))
    ));
}

#[test]
fn test_recurses_into_nested_bodies() {
    let nested_if = "int main() { while (x) { if (a + 1) { } } return 0; }";
    assert!(matches!(
        validate_str(nested_if),
        Err(SemAnalysisError::InvalidCondition(_))
    ));

    let in_case = "int main() { switch (x) { case 1: y = 1 default: y = 2; } return 0; }";
    assert!(validate_str(in_case).is_err());
}
