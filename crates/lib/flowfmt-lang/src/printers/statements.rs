//! Statement rules. Statements never break internally on their own; the
//! program separates them with hard breaks, a block with breaks of its
//! always-broken scope.
use crate::ast::{Node, NodeKind};
use crate::doc::*;
use crate::docs;
use crate::printer::Printer;
use crate::registry::Registry;
use crate::utils::error::FormatError;

use super::expressions::assigned_value;
use super::unexpected;

pub fn register(reg: &mut Registry) {
    reg.register(NodeKind::Program, program);
    reg.register(NodeKind::BlockStatement, block);
    reg.register(NodeKind::ExpressionStatement, expression_statement);
    reg.register(NodeKind::IfStatement, if_statement);
    reg.register(NodeKind::ReturnStatement, return_statement);
    reg.register(NodeKind::VariableDeclaration, variable_declaration);
    reg.register(NodeKind::TypeAlias, type_alias);
}

fn program<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::Program { body } = node else {
        return Err(unexpected(node));
    };
    let stmts = p.print_all(body)?;
    Ok(Doc::concat(stmts.into_iter().map(|s| docs![s, hard_break()])))
}

fn block<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::BlockStatement { body } = node else {
        return Err(unexpected(node));
    };
    if body.is_empty() {
        return Ok(text("{}"));
    }
    let stmts = p.print_all(body)?;
    // the leading hard break forces the scope, the markers then put one
    // statement per line
    let inner = Doc::join(stmts, empty_or_break());
    Ok(docs![
        "{",
        scoped("block", docs![hard_break(), inner, empty_or_break()]),
        "}"
    ])
}

fn expression_statement<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::ExpressionStatement { expression } = node else {
        return Err(unexpected(node));
    };
    let expression = p.print(expression)?;
    Ok(docs![expression, semicolon()])
}

fn if_statement<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::IfStatement {
        test,
        consequent,
        alternate,
    } = node
    else {
        return Err(unexpected(node));
    };
    let test = p.print(test)?;
    let consequent = p.print(consequent)?;
    let alternate = p.print_opt(alternate.as_deref())?;
    let alternate = Doc::when(!alternate.is_nil(), || {
        docs![space(), "else", space(), alternate]
    });
    Ok(docs![
        "if",
        space(),
        "(",
        scoped("if_test", docs![empty_or_break(), test, empty_or_break()]),
        ")",
        space(),
        consequent,
        alternate
    ])
}

fn return_statement<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::ReturnStatement { argument } = node else {
        return Err(unexpected(node));
    };
    let argument = p.print_opt(argument.as_deref())?;
    let argument = Doc::when(!argument.is_nil(), || docs![space(), argument]);
    Ok(docs!["return", argument, semicolon()])
}

fn variable_declaration<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::VariableDeclaration { kind, id, init } = node else {
        return Err(unexpected(node));
    };
    let id = p.print(id)?;
    let init = match init {
        Some(value) => assigned_value(p, value)?,
        None => Doc::Nil,
    };
    Ok(docs![kind.as_str(), space(), id, init, semicolon()])
}

fn type_alias<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::TypeAlias {
        id,
        type_parameters,
        right,
    } = node
    else {
        return Err(unexpected(node));
    };
    let id = p.print(id)?;
    let params = p.print_opt(type_parameters.as_deref())?;
    let value = assigned_value(p, right)?;
    Ok(docs!["type", space(), id, params, value, semicolon()])
}

#[cfg(test)]
mod test {
    use crate::ast::builder::*;
    use crate::ast::{DeclarationKind, Node};
    use crate::printer::Printer;
    use crate::registry::Registry;
    use crate::render::{Layout, Mode};
    use crate::{Config, call, format_node, ident, number};

    fn fmt(node: &Node, max_width: usize) -> String {
        let config = Config {
            max_width,
            indent_size: 2,
        };
        format_node(node, &Registry::default(), &config).unwrap()
    }

    #[test]
    fn program_terminates_every_statement() {
        let prog = program(vec![
            const_decl("a", number!(1)),
            expr_stmt(call!(ident!("f"); ident!("a"))),
        ]);
        assert_eq!(fmt(&prog, 80), "const a = 1;\nf(a);\n");
    }

    #[test]
    fn blocks_indent_their_body() {
        let inner = Node::IfStatement {
            test: Box::new(ident!("b")),
            consequent: Box::new(Node::BlockStatement {
                body: vec![Node::ReturnStatement {
                    argument: Some(Box::new(number!(1))),
                }],
            }),
            alternate: Some(Box::new(Node::BlockStatement {
                body: vec![Node::ReturnStatement { argument: None }],
            })),
        };
        let prog = program(vec![if_stmt(ident!("a"), vec![inner])]);
        assert_eq!(
            fmt(&prog, 80),
            "if (a) {\n  if (b) {\n    return 1;\n  } else {\n    return;\n  }\n}\n"
        );
    }

    #[test]
    fn block_lines_are_breaks_of_its_scope() {
        let prog = program(vec![if_stmt(
            ident!("a"),
            vec![expr_stmt(call!(ident!("f");)), expr_stmt(call!(ident!("g");))],
        )]);
        let reg = Registry::default();
        let doc = Printer::new(&reg).print(&prog).unwrap();
        let r = Layout::measure(&doc).unwrap().emit(&Config::default());
        assert_eq!(r.text, "if (a) {\n  f();\n  g();\n}\n");
        let block = r.scopes.iter().find(|s| s.name == Some("block")).unwrap();
        assert_eq!(block.mode, Mode::Broken);
        assert_eq!(block.realized_breaks, 2);
    }

    #[test]
    fn declaration_without_initializer() {
        let decl = Node::VariableDeclaration {
            kind: DeclarationKind::Let,
            id: Box::new(ident!("x")),
            init: None,
        };
        assert_eq!(fmt(&decl, 80), "let x;");
    }
}
