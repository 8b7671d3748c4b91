//! Shorthands for assembling syntax trees by hand, mostly for tests and for
//! embedders that synthesize code without going through the parser.
use super::{BinaryOp, DeclarationKind, LogicalOp, Node};

#[macro_export]
macro_rules! ident {
    ($name:expr) => {
        $crate::ast::Node::Identifier {
            name: String::from($name),
            type_annotation: None,
        }
    };
}

#[macro_export]
macro_rules! number {
    ($raw:expr) => {
        $crate::ast::Node::NumericLiteral {
            raw: $raw.to_string(),
        }
    };
}

#[macro_export]
macro_rules! string_lit {
    ($value:expr) => {
        $crate::ast::Node::StringLiteral {
            value: String::from($value),
        }
    };
}

/// `call!(callee; arg, arg, ...)`
#[macro_export]
macro_rules! call {
    ($callee:expr; $($arg:expr),* $(,)?) => {
        $crate::ast::Node::CallExpression {
            callee: Box::new($callee),
            arguments: vec![$($arg),*],
        }
    };
}

#[macro_export]
macro_rules! array {
    ($($elem:expr),* $(,)?) => {
        $crate::ast::Node::ArrayExpression {
            elements: vec![$($elem),*],
        }
    };
}

pub fn binary(operator: BinaryOp, left: Node, right: Node) -> Node {
    Node::BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        parenthesized: false,
    }
}

pub fn logical(operator: LogicalOp, left: Node, right: Node) -> Node {
    Node::LogicalExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        parenthesized: false,
    }
}

/// Left-associated `&&` chain over the given operands.
pub fn and_chain(operands: impl IntoIterator<Item = Node>) -> Option<Node> {
    operands
        .into_iter()
        .reduce(|acc, next| logical(LogicalOp::And, acc, next))
}

pub fn parenthesized(node: Node) -> Node {
    node.into_parenthesized().0
}

pub fn assign(left: Node, right: Node) -> Node {
    Node::AssignmentExpression {
        left: Box::new(left),
        right: Box::new(right),
        parenthesized: false,
    }
}

pub fn conditional(test: Node, consequent: Node, alternate: Node) -> Node {
    Node::ConditionalExpression {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
        parenthesized: false,
    }
}

pub fn property(key: &str, value: Node) -> Node {
    Node::ObjectProperty {
        key: Box::new(ident!(key)),
        value: Box::new(value),
    }
}

pub fn object(properties: Vec<Node>) -> Node {
    Node::ObjectExpression { properties }
}

pub fn expr_stmt(expression: Node) -> Node {
    Node::ExpressionStatement {
        expression: Box::new(expression),
    }
}

pub fn const_decl(name: &str, init: Node) -> Node {
    Node::VariableDeclaration {
        kind: DeclarationKind::Const,
        id: Box::new(ident!(name)),
        init: Some(Box::new(init)),
    }
}

pub fn if_stmt(test: Node, body: Vec<Node>) -> Node {
    Node::IfStatement {
        test: Box::new(test),
        consequent: Box::new(Node::BlockStatement { body }),
        alternate: None,
    }
}

pub fn program(body: Vec<Node>) -> Node {
    Node::Program { body }
}
