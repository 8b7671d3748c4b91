use super::*;
use crate::ast::builder::*;
use crate::utils::error::dump_to_string;
use crate::{Config, format_source, ident, number};

fn expr(src: &str) -> Node {
    parse_expression(src).unwrap_or_else(|e| panic!("{src}: {}", dump_to_string(&e)))
}

fn ty(src: &str) -> Node {
    parse_type(src).unwrap_or_else(|e| panic!("{src}: {}", dump_to_string(&e)))
}

#[test]
fn precedence() {
    let ans = binary(
        BinaryOp::Add,
        ident!("a"),
        binary(BinaryOp::Mul, ident!("b"), ident!("c")),
    );
    assert_eq!(expr("a + b * c"), ans);

    let ans = logical(
        LogicalOp::Or,
        logical(
            LogicalOp::And,
            ident!("a"),
            binary(BinaryOp::StrictEqual, ident!("b"), number!(1)),
        ),
        ident!("c"),
    );
    assert_eq!(expr("a && b === 1 || c"), ans);
}

#[test]
fn left_associative_chains() {
    let ans = and_chain([ident!("a"), ident!("b"), ident!("c")]).unwrap();
    assert_eq!(expr("a&&b&&c"), ans);
}

#[test]
fn parentheses_are_recorded() {
    let ans = binary(
        BinaryOp::Mul,
        parenthesized(binary(BinaryOp::Add, ident!("a"), ident!("b"))),
        ident!("c"),
    );
    assert_eq!(expr("(a + b) * c"), ans);
    // parens around an identifier carry no meaning
    assert_eq!(expr("((a))"), ident!("a"));
}

#[test]
fn unary_keeps_redundant_argument_parens() {
    let Node::UnaryExpression {
        operator,
        parenthesized_argument,
        argument,
        ..
    } = expr("typeof (a)")
    else {
        panic!("expected unary expression")
    };
    assert_eq!(operator, UnaryOp::Typeof);
    assert!(parenthesized_argument);
    assert_eq!(*argument, ident!("a"));
}

#[test]
fn assignment_and_conditional() {
    let ans = assign(
        ident!("x"),
        conditional(ident!("a"), ident!("b"), ident!("c")),
    );
    assert_eq!(expr("x = a ? b : c"), ans);
    // right associative
    let ans = assign(ident!("x"), assign(ident!("y"), number!(0)));
    assert_eq!(expr("x = y = 0"), ans);
}

#[test]
fn postfix_chain() {
    let ans = Node::CallExpression {
        callee: Box::new(Node::MemberExpression {
            object: Box::new(Node::MemberExpression {
                object: Box::new(Node::ThisExpression),
                property: Box::new(ident!("items")),
                computed: false,
            }),
            property: Box::new(number!(0)),
            computed: true,
        }),
        arguments: vec![string_lit_node("x")],
    };
    assert_eq!(expr("this.items[0](\"x\")"), ans);
}

fn string_lit_node(s: &str) -> Node {
    crate::string_lit!(s)
}

#[test]
fn type_cast() {
    let ans = Node::TypeCastExpression {
        expression: Box::new(ident!("value")),
        type_annotation: Box::new(Node::TypeAnnotation {
            type_annotation: Box::new(Node::NumberTypeAnnotation),
        }),
    };
    assert_eq!(expr("(value: number)"), ans);
}

#[test]
fn string_escapes() {
    assert_eq!(expr(r#"'it\'s'"#), string_lit_node("it's"));
    assert_eq!(expr(r#""tab\there""#), string_lit_node("tab\there"));
}

#[test]
fn union_of_nullable_and_literals() {
    let ans = Node::UnionTypeAnnotation {
        types: vec![
            Node::NullableTypeAnnotation {
                type_annotation: Box::new(Node::StringTypeAnnotation),
            },
            Node::NullLiteralTypeAnnotation,
            Node::IntersectionTypeAnnotation {
                types: vec![
                    Node::NumericLiteralTypeAnnotation { raw: "1".into() },
                    Node::BooleanLiteralTypeAnnotation { value: true },
                ],
            },
        ],
    };
    assert_eq!(ty("?string | null | 1 & true"), ans);
}

fn named(name: &str) -> Node {
    Node::GenericTypeAnnotation {
        id: Box::new(ident!(name)),
        type_parameters: None,
    }
}

#[test]
fn parenthesized_types() {
    let ans = Node::NullableTypeAnnotation {
        type_annotation: Box::new(Node::UnionTypeAnnotation {
            types: vec![named("A"), named("B")],
        }),
    };
    assert_eq!(ty("?(A | B)"), ans);

    let Node::UnionTypeAnnotation { types } = ty("(() => void) | string") else {
        panic!("expected union type")
    };
    assert!(matches!(&types[0], Node::FunctionTypeAnnotation { .. }));
    assert_eq!(types[1], Node::StringTypeAnnotation);

    // without the parens the union is the return type
    assert!(matches!(
        ty("() => void | string"),
        Node::FunctionTypeAnnotation { .. }
    ));
    assert_eq!(ty("((A))"), named("A"));
}

#[test]
fn function_types() {
    let Node::FunctionTypeAnnotation {
        type_parameters,
        params,
        rest,
        ..
    } = ty("<T>(a: T, b?: number, ...rest: Array<T>) => void")
    else {
        panic!("expected function type")
    };
    assert!(type_parameters.is_some());
    assert_eq!(params.len(), 2);
    assert!(matches!(
        &params[1],
        Node::FunctionTypeParam { optional: true, .. }
    ));
    assert!(rest.is_some());
}

#[test]
fn object_type_members() {
    let Node::ObjectTypeAnnotation { properties } =
        ty("{ static create(x: mixed): this; name?: string, }")
    else {
        panic!("expected object type")
    };
    assert_eq!(properties.len(), 2);
    assert!(matches!(
        &properties[0],
        Node::ObjectTypeProperty {
            is_static: true,
            method: true,
            ..
        }
    ));
    assert!(matches!(
        &properties[1],
        Node::ObjectTypeProperty { optional: true, .. }
    ));
}

#[test]
fn reserved_words_are_rejected() {
    assert!(parse_expression("if + 1").is_err());
    assert!(parse_program("const return = 1;").is_err());
    // contextual words stay usable
    assert!(parse_program("type = 1; static = 2;").is_ok());
}

#[test]
fn statements() {
    let prog = parse_program(
        "const a: number = 1;\nif (a) { return; } else if (b) c(); else {}\ntype T<+U: *> = U;",
    )
    .unwrap();
    let Node::Program { body } = prog else {
        panic!("expected program")
    };
    let kinds: Vec<_> = body.iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::VariableDeclaration,
            NodeKind::IfStatement,
            NodeKind::TypeAlias
        ]
    );
}

#[test]
fn object_statement_is_not_a_block() {
    let out = format_source("({ a: 1 });", &Config::default()).unwrap();
    assert_eq!(out, "{ a: 1 };\n");
    let again = format_source(&out, &Config::default()).unwrap();
    assert_eq!(again, out);
}

#[test]
fn errors_carry_spans() {
    let errs = parse_program("const x = ;").unwrap_err();
    assert!(!errs.is_empty());
    let labels = errs[0].get_labels();
    assert_eq!(labels.len(), 1);
    assert!(labels[0].0.start <= 11);
}
