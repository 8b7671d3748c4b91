use crate::ast::{Node, NodeKind};
use crate::doc::*;
use crate::docs;
use crate::printer::Printer;
use crate::registry::Registry;
use crate::utils::error::FormatError;

use super::chain::print_chain;
use super::list::{braced, delimited};
use super::{single_quoted, unexpected};

pub fn register(reg: &mut Registry) {
    reg.register(NodeKind::ArrayExpression, array);
    reg.register(NodeKind::AssignmentExpression, assignment);
    reg.register(NodeKind::BinaryExpression, print_chain);
    reg.register(NodeKind::BooleanLiteral, literal);
    reg.register(NodeKind::CallExpression, call);
    reg.register(NodeKind::ConditionalExpression, conditional);
    reg.register(NodeKind::Identifier, identifier);
    reg.register(NodeKind::LogicalExpression, print_chain);
    reg.register(NodeKind::MemberExpression, member);
    reg.register(NodeKind::NullLiteral, literal);
    reg.register(NodeKind::NumericLiteral, literal);
    reg.register(NodeKind::ObjectExpression, object);
    reg.register(NodeKind::ObjectProperty, property);
    reg.register(NodeKind::StringLiteral, literal);
    reg.register(NodeKind::Super, literal);
    reg.register(NodeKind::ThisExpression, literal);
    reg.register(NodeKind::TypeCastExpression, type_cast);
    reg.register(NodeKind::UnaryExpression, unary);
}

fn parens_if(cond: bool, doc: Doc) -> Doc {
    if cond { docs!["(", doc, ")"] } else { doc }
}

/// `= value` where the value moves to the next line, indented, when it
/// does not fit. Shared with variable declarations.
pub(crate) fn assigned_value<'a>(
    p: &mut Printer<'_, 'a>,
    value: &'a Node,
) -> Result<Doc, FormatError> {
    let value = p.print(value)?;
    Ok(docs![
        space(),
        "=",
        scope_open("assignment"),
        space_or_break(),
        value,
        scope_close()
    ])
}

fn array<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::ArrayExpression { elements } = node else {
        return Err(unexpected(node));
    };
    let elements = p.print_all(elements)?;
    Ok(delimited("array", "[", elements, "]"))
}

fn assignment<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::AssignmentExpression {
        left,
        right,
        parenthesized,
    } = node
    else {
        return Err(unexpected(node));
    };
    let left = p.print(left)?;
    let value = assigned_value(p, right)?;
    Ok(parens_if(*parenthesized, docs![left, value]))
}

fn literal<'a>(_p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let s = match node {
        Node::BooleanLiteral { value } => value.to_string(),
        Node::NullLiteral => "null".to_string(),
        Node::NumericLiteral { raw } => raw.clone(),
        Node::StringLiteral { value } => single_quoted(value),
        Node::Super => "super".to_string(),
        Node::ThisExpression => "this".to_string(),
        _ => return Err(unexpected(node)),
    };
    Ok(text(s))
}

fn call<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::CallExpression { callee, arguments } = node else {
        return Err(unexpected(node));
    };
    let callee = p.print(callee)?;
    let arguments = p.print_all(arguments)?;
    Ok(docs![callee, delimited("arguments", "(", arguments, ")")])
}

fn conditional<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::ConditionalExpression {
        test,
        consequent,
        alternate,
        parenthesized,
    } = node
    else {
        return Err(unexpected(node));
    };
    let test = p.print(test)?;
    let consequent = p.print(consequent)?;
    let alternate = p.print(alternate)?;
    let doc = docs![
        test,
        scope_open("ternary"),
        space_or_break(),
        question_mark(),
        space(),
        consequent,
        space_or_break(),
        colon(),
        space(),
        alternate,
        scope_close()
    ];
    Ok(parens_if(*parenthesized, doc))
}

fn identifier<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::Identifier {
        name,
        type_annotation,
    } = node
    else {
        return Err(unexpected(node));
    };
    let annotation = p.print_opt(type_annotation.as_deref())?;
    Ok(docs![name.as_str(), annotation])
}

fn member<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::MemberExpression {
        object,
        property,
        computed,
    } = node
    else {
        return Err(unexpected(node));
    };
    let object = p.print(object)?;
    let property = p.print(property)?;
    Ok(if *computed {
        docs![object, "[", property, "]"]
    } else {
        docs![object, period(), property]
    })
}

fn object<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::ObjectExpression { properties } = node else {
        return Err(unexpected(node));
    };
    let properties = p.print_all(properties)?;
    Ok(braced("object", properties))
}

fn property<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::ObjectProperty { key, value } = node else {
        return Err(unexpected(node));
    };
    let key = p.print(key)?;
    let value = p.print(value)?;
    Ok(docs![key, colon(), space(), value])
}

fn type_cast<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::TypeCastExpression {
        expression,
        type_annotation,
    } = node
    else {
        return Err(unexpected(node));
    };
    let expression = p.print(expression)?;
    let annotation = p.print(type_annotation)?;
    Ok(docs!["(", expression, annotation, ")"])
}

fn unary<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::UnaryExpression {
        operator,
        prefix,
        argument,
        parenthesized_argument,
        parenthesized,
    } = node
    else {
        return Err(unexpected(node));
    };
    // `- -a` must not fuse into `--a`
    let fuses = match argument.as_ref() {
        Node::UnaryExpression {
            operator: inner,
            prefix: true,
            parenthesized: false,
            ..
        } => operator.is_sign() && inner == operator && !*parenthesized_argument,
        _ => false,
    };
    let gap = *prefix && (operator.is_word() || fuses);
    let arg = p.print(argument)?;
    let arg = parens_if(*parenthesized_argument, arg);
    let doc = if *prefix {
        docs![operator.as_str(), Doc::when(gap, space), arg]
    } else {
        docs![arg, operator.as_str()]
    };
    Ok(parens_if(*parenthesized, doc))
}
