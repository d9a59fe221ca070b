use super::*;
use crate::lexer;
use pretty_assertions::assert_eq;

fn parse_str(input: &str) -> Result<SyntaxTree> {
    let tokens = lexer::lex(input).expect("lexing should succeed");
    parse(&tokens)
}

fn word(s: &str) -> SyntaxNode {
    SyntaxNode::Leaf(Leaf::Word(s.to_owned()))
}

fn leaf(l: Leaf) -> SyntaxNode {
    SyntaxNode::Leaf(l)
}

fn group(kind: GroupKind, callee: Option<&str>, children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::Group(Group {
        kind,
        children,
        callee: callee.map(ToOwned::to_owned),
    })
}

#[test]
fn test_function_shape() {
    let tree = parse_str("int main(void) { return 0; }").unwrap();
    let expected = vec![
        word("int"),
        word("main"),
        group(GroupKind::Paren, Some("main"), vec![word("void")]),
        group(
            GroupKind::Brace,
            None,
            vec![word("return"), leaf(Leaf::Number(0)), leaf(Leaf::Terminator)],
        ),
    ];
    assert_eq!(expected, tree.body);
}

#[test]
fn test_nested_groups() {
    let tree = parse_str("{ a[1] = (b); }").unwrap();
    let expected = vec![group(
        GroupKind::Brace,
        None,
        vec![
            word("a"),
            group(GroupKind::Bracket, None, vec![leaf(Leaf::Number(1))]),
            leaf(Leaf::Equal),
            group(GroupKind::Paren, None, vec![word("b")]),
            leaf(Leaf::Terminator),
        ],
    )];
    assert_eq!(expected, tree.body);
}

#[test]
fn test_composite_operators() {
    let tree = parse_str("== != ++ += -- -= -> <= >= && || ^= = ! + - < > & | ^").unwrap();
    let expected: Vec<SyntaxNode> = [
        Leaf::ComparisonE,
        Leaf::ComparisonN,
        Leaf::IncByOne,
        Leaf::IncByNum,
        Leaf::DecByOne,
        Leaf::DecByNum,
        Leaf::Arrow,
        Leaf::LessOrEqual,
        Leaf::GreaterOrEqual,
        Leaf::AndAnd,
        Leaf::OrOr,
        Leaf::XorEqual,
        Leaf::Equal,
        Leaf::Not,
        Leaf::Plus,
        Leaf::Minus,
        Leaf::Less,
        Leaf::Greater,
        Leaf::And,
        Leaf::Pipe,
        Leaf::Xor,
    ]
    .into_iter()
    .map(SyntaxNode::Leaf)
    .collect();
    assert_eq!(expected, tree.body);
}

#[test]
fn test_escapes() {
    let tree = parse_str("\\n \\t \\?").unwrap();
    let expected = vec![
        leaf(Leaf::Escape(Escape::Newline)),
        leaf(Leaf::Escape(Escape::Tab)),
        leaf(Leaf::Escape(Escape::QueMark)),
    ];
    assert_eq!(expected, tree.body);
}

#[test]
fn test_bad_escape() {
    let err = parse_str("x \\q").unwrap_err();
    assert_eq!(
        InnerParseError::UnexpectedToken {
            token: Token::Identifier(String::from("q")),
            position: 2
        },
        err.inner
    );
}

#[test]
fn test_backslash_at_eof() {
    let err = parse_str("x \\").unwrap_err();
    assert_eq!(InnerParseError::UnexpectedEof, err.inner);
}

#[test]
fn test_unterminated_brace() {
    let err = parse_str("int main() {\n return 0;\n").unwrap_err();
    assert_eq!(InnerParseError::UnterminatedGroup(GroupKind::Brace), err.inner);
    assert_eq!(1, err.get_ln());
    assert!(err.to_string().contains("brace"));
}

#[test]
fn test_mismatched_closer() {
    let err = parse_str("f(a]").unwrap_err();
    assert_eq!(
        InnerParseError::UnexpectedToken {
            token: Token::CloseBracket,
            position: 3
        },
        err.inner
    );
}

#[test]
fn test_stray_closer() {
    let err = parse_str("x;\n}").unwrap_err();
    assert_eq!(2, err.get_ln());
    assert!(matches!(
        err.inner,
        InnerParseError::UnexpectedToken {
            token: Token::CloseCurly,
            ..
        }
    ));
}

#[test]
fn test_tokens_without_leaf() {
    for src in ["a % b", "$", "@", "~x", "`"] {
        let err = parse_str(src).unwrap_err();
        assert!(
            matches!(err.inner, InnerParseError::UnexpectedToken { .. }),
            "{src}"
        );
    }
}

#[test]
fn test_callee_only_for_words() {
    let tree = parse_str("3 (x) foo (y)").unwrap();
    let callees: Vec<Option<String>> = tree
        .body
        .iter()
        .filter_map(|n| match n {
            SyntaxNode::Group(g) => Some(g.callee.clone()),
            SyntaxNode::Leaf(_) => None,
        })
        .collect();
    assert_eq!(vec![None, Some(String::from("foo"))], callees);
}
