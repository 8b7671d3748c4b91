//! Layout of binary and logical operator chains.
//!
//! A run of nested operators of one family shares a single scope owned by its
//! outermost member, the chain root. The other members are links: they print
//! inline into the root's scope, so a broken chain puts one operand per line
//! at one indent level instead of staircasing. A node the source wrapped in
//! parentheses always gets an indenting scope and literal parens of its own.
use std::ptr;

use crate::ast::Node;
use crate::doc::*;
use crate::docs;
use crate::printer::{Path, Printer};
use crate::utils::error::FormatError;

use super::unexpected;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainFamily {
    Binary,
    Logical,
}

impl ChainFamily {
    pub fn of(node: &Node) -> Option<Self> {
        match node {
            Node::BinaryExpression { .. } => Some(ChainFamily::Binary),
            Node::LogicalExpression { .. } => Some(ChainFamily::Logical),
            _ => None,
        }
    }
    fn scope_name(&self) -> &'static str {
        match self {
            ChainFamily::Binary => "binary_expressions",
            ChainFamily::Logical => "logical_expressions",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainRole {
    /// Explicit source parentheses; owns an indenting scope.
    Parenthesized,
    /// Outermost member of a chain; owns a non-indenting scope.
    Root,
    /// Interior member; prints into the scope of its root.
    Link,
}

impl ChainRole {
    pub fn of(node: &Node, family: ChainFamily, path: &Path) -> Self {
        if node.is_parenthesized() {
            ChainRole::Parenthesized
        } else if path.parent().and_then(ChainFamily::of) == Some(family) {
            ChainRole::Link
        } else {
            ChainRole::Root
        }
    }
}

/// Whether the parent already delimits `node`: a call argument slot, or the
/// test of an `if`.
pub fn is_protected(node: &Node, path: &Path) -> bool {
    match path.parent() {
        Some(Node::CallExpression { arguments, .. }) => {
            arguments.iter().any(|arg| ptr::eq(arg, node))
        }
        Some(Node::IfStatement { test, .. }) => ptr::eq(test.as_ref(), node),
        _ => false,
    }
}

/// Printing rule shared by `BinaryExpression` and `LogicalExpression`.
pub fn print_chain<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let (operator, left, right) = match node {
        Node::BinaryExpression {
            operator,
            left,
            right,
            ..
        } => (operator.as_str(), left, right),
        Node::LogicalExpression {
            operator,
            left,
            right,
            ..
        } => (operator.as_str(), left, right),
        _ => return Err(unexpected(node)),
    };
    let family = ChainFamily::of(node).ok_or_else(|| unexpected(node))?;
    let path = p.path();
    let role = ChainRole::of(node, family, &path);
    let wrap_when_broken = family == ChainFamily::Logical && !is_protected(node, &path);

    let left = p.print(left)?;
    let right = p.print(right)?;
    let body = docs![left, space(), operator, space_or_break(), right];

    let name = family.scope_name();
    Ok(match role {
        ChainRole::Link => body,
        ChainRole::Parenthesized => docs![
            "(",
            scope_open(name),
            empty_or_break(),
            body,
            empty_or_break(),
            scope_close(),
            ")"
        ],
        ChainRole::Root if wrap_when_broken => docs![
            scope_open_no_indent(name),
            empty_or_open_paren(),
            empty_or_indent(),
            empty_or_break(),
            body,
            empty_or_break(),
            empty_or_dedent(),
            empty_or_close_paren(),
            scope_close_no_dedent()
        ],
        ChainRole::Root => scoped_no_indent(name, body),
    })
}

#[cfg(test)]
mod test {
    use crate::ast::builder::*;
    use crate::ast::{BinaryOp, LogicalOp, Node};
    use crate::registry::Registry;
    use crate::{Config, call, format_node, ident};

    fn fmt(node: &Node, max_width: usize) -> String {
        let config = Config {
            max_width,
            indent_size: 2,
        };
        format_node(node, &Registry::default(), &config).unwrap()
    }

    fn abc() -> Node {
        and_chain([ident!("a"), ident!("b"), ident!("c")]).unwrap()
    }

    #[test]
    fn flat_chain_has_no_parens() {
        assert_eq!(fmt(&abc(), 80), "a && b && c");
    }

    #[test]
    fn bare_chain_gets_synthetic_parens_when_broken() {
        assert_eq!(fmt(&abc(), 1), "(\n  a &&\n  b &&\n  c\n)");
        let stmt = program(vec![expr_stmt(abc())]);
        assert_eq!(fmt(&stmt, 1), "(\n  a &&\n  b &&\n  c\n);\n");
    }

    #[test]
    fn call_argument_is_protected() {
        let c = call!(ident!("f"); abc());
        assert_eq!(fmt(&c, 80), "f(a && b && c)");
        assert_eq!(fmt(&c, 1), "f(\n  a &&\n  b &&\n  c,\n)");
    }

    #[test]
    fn if_test_is_protected() {
        let stmt = if_stmt(abc(), vec![]);
        assert_eq!(fmt(&stmt, 80), "if (a && b && c) {}");
        assert_eq!(fmt(&stmt, 1), "if (\n  a &&\n  b &&\n  c\n) {}");
    }

    #[test]
    fn long_chain_breaks_at_one_level() {
        let chain = binary(
            BinaryOp::Add,
            binary(
                BinaryOp::Add,
                binary(BinaryOp::Add, ident!("aaaa"), ident!("bbbb")),
                ident!("cccc"),
            ),
            ident!("dddd"),
        );
        let decl = const_decl("x", chain);
        assert_eq!(fmt(&decl, 80), "const x = aaaa + bbbb + cccc + dddd;");
        assert_eq!(
            fmt(&decl, 20),
            "const x =\n  aaaa +\n  bbbb +\n  cccc +\n  dddd;"
        );
    }

    #[test]
    fn explicit_parens_are_kept() {
        // (a || b) && c
        let tree = logical(
            LogicalOp::And,
            parenthesized(logical(LogicalOp::Or, ident!("a"), ident!("b"))),
            ident!("c"),
        );
        assert_eq!(fmt(&tree, 80), "(a || b) && c");
        assert_eq!(fmt(&tree, 5), "(\n  (\n    a ||\n    b\n  ) &&\n  c\n)");
    }

    #[test]
    fn mixed_families_scope_separately() {
        // a + b && c
        let tree = logical(
            LogicalOp::And,
            binary(BinaryOp::Add, ident!("a"), ident!("b")),
            ident!("c"),
        );
        assert_eq!(fmt(&tree, 80), "a + b && c");
    }
}
