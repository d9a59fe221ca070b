use super::*;
use crate::{lexer, parser};
use pretty_assertions::assert_eq;

fn flatten_str(input: &str) -> Vec<FlatEntry> {
    let tokens = lexer::lex(input).unwrap();
    let tree = parser::parse(&tokens).unwrap();
    flatten(tree)
}

fn word(s: &str) -> FlatEntry {
    FlatEntry::Token(Leaf::Word(s.to_owned()))
}

#[test]
fn test_function_markers_only_at_root() {
    let flat = flatten_str("int main() { f(1); }");
    let expected = vec![
        word("int"),
        word("main"),
        FlatEntry::Function(FunctionPart::Callable(CallableBlock {
            callee: Some(String::from("main")),
            arguments: vec![],
        })),
        FlatEntry::Function(FunctionPart::Block(Block {
            arguments: vec![
                word("f"),
                FlatEntry::Callable(CallableBlock {
                    callee: Some(String::from("f")),
                    arguments: vec![FlatEntry::Token(Leaf::Number(1))],
                }),
                FlatEntry::Token(Leaf::Terminator),
            ],
        })),
    ];
    assert_eq!(expected, flat);
}

#[test]
fn test_arrays_never_marked() {
    let flat = flatten_str("[1, 2]");
    let expected = vec![FlatEntry::Array(ArrayGroup {
        elements: vec![
            FlatEntry::Token(Leaf::Number(1)),
            FlatEntry::Token(Leaf::Delimiter),
            FlatEntry::Token(Leaf::Number(2)),
        ],
    })];
    assert_eq!(expected, flat);
}

#[test]
fn test_strip_marker() {
    let flat = flatten_str("{ }");
    assert!(flat[0].is_function_marker());
    let stripped = flat[0].clone().strip_marker();
    assert_eq!(FlatEntry::Block(Block { arguments: vec![] }), stripped);
}

#[test]
fn test_display() {
    let flat = flatten_str("x = f(a, 2) + arr[1];");
    assert_eq!("x = f (a , 2) + arr [1] ;", entries_to_string(&flat));
}

#[test]
fn test_empty() {
    assert!(flatten_str("").is_empty());
}
