//! Rules for Flow type annotations.
use crate::ast::{Node, NodeKind, Variance};
use crate::doc::*;
use crate::docs;
use crate::printer::Printer;
use crate::registry::Registry;
use crate::utils::error::FormatError;

use super::list::{braced, delimited};
use super::{single_quoted, unexpected};

pub fn register(reg: &mut Registry) {
    reg.register(NodeKind::AnyTypeAnnotation, keyword);
    reg.register(NodeKind::BooleanTypeAnnotation, keyword);
    reg.register(NodeKind::BooleanLiteralTypeAnnotation, literal);
    reg.register(NodeKind::ExistentialTypeParam, keyword);
    reg.register(NodeKind::FunctionTypeAnnotation, function);
    reg.register(NodeKind::FunctionTypeParam, function_param);
    reg.register(NodeKind::GenericTypeAnnotation, generic);
    reg.register(NodeKind::IntersectionTypeAnnotation, intersection);
    reg.register(NodeKind::MixedTypeAnnotation, keyword);
    reg.register(NodeKind::NullableTypeAnnotation, nullable);
    reg.register(NodeKind::NullLiteralTypeAnnotation, literal);
    reg.register(NodeKind::NumberTypeAnnotation, keyword);
    reg.register(NodeKind::NumericLiteralTypeAnnotation, literal);
    reg.register(NodeKind::ObjectTypeAnnotation, object);
    reg.register(NodeKind::ObjectTypeProperty, object_property);
    reg.register(NodeKind::StringLiteralTypeAnnotation, literal);
    reg.register(NodeKind::StringTypeAnnotation, keyword);
    reg.register(NodeKind::ThisTypeAnnotation, keyword);
    reg.register(NodeKind::TupleTypeAnnotation, tuple);
    reg.register(NodeKind::TypeAnnotation, annotation);
    reg.register(NodeKind::TypeofTypeAnnotation, type_of);
    reg.register(NodeKind::TypeParameter, type_parameter);
    reg.register(NodeKind::TypeParameterDeclaration, type_parameters);
    reg.register(NodeKind::TypeParameterInstantiation, type_parameters);
    reg.register(NodeKind::UnionTypeAnnotation, union);
    reg.register(NodeKind::VoidTypeAnnotation, keyword);
}

fn keyword<'a>(_p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let word = match node {
        Node::AnyTypeAnnotation => "any",
        Node::BooleanTypeAnnotation => "boolean",
        Node::ExistentialTypeParam => "*",
        Node::MixedTypeAnnotation => "mixed",
        Node::NumberTypeAnnotation => "number",
        Node::StringTypeAnnotation => "string",
        Node::ThisTypeAnnotation => "this",
        Node::VoidTypeAnnotation => "void",
        _ => return Err(unexpected(node)),
    };
    Ok(text(word))
}

fn literal<'a>(_p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let s = match node {
        Node::BooleanLiteralTypeAnnotation { value } => value.to_string(),
        Node::NullLiteralTypeAnnotation => "null".to_string(),
        Node::NumericLiteralTypeAnnotation { raw } => raw.clone(),
        Node::StringLiteralTypeAnnotation { value } => single_quoted(value),
        _ => return Err(unexpected(node)),
    };
    Ok(text(s))
}

/// `(a: A, b: B) => R`, or `(a: A): R` as the value of a method property.
fn function<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::FunctionTypeAnnotation {
        type_parameters,
        params,
        rest,
        return_type,
    } = node
    else {
        return Err(unexpected(node));
    };
    let method = matches!(
        p.path().parent(),
        Some(Node::ObjectTypeProperty { value, method: true, .. }) if std::ptr::eq(value.as_ref(), node)
    );

    let type_params = p.print_opt(type_parameters.as_deref())?;
    let params = p.print_all(params)?;
    let rest = p.print_opt(rest.as_deref())?;

    let count = params.len();
    let mut items = Vec::with_capacity(count + 1);
    for (i, param) in params.into_iter().enumerate() {
        let is_last = i + 1 == count && rest.is_nil();
        items.push(docs![
            Doc::when(i > 0, space_or_break),
            param,
            if is_last { empty_or_comma() } else { comma() }
        ]);
    }
    if !rest.is_nil() {
        // a rest parameter never takes a trailing comma
        items.push(docs![Doc::when(count > 0, space_or_break), "...", rest]);
    }
    let list = if items.is_empty() {
        text("()")
    } else {
        docs![
            "(",
            scoped(
                "params",
                docs![empty_or_break(), Doc::concat(items), empty_or_break()]
            ),
            ")"
        ]
    };

    let ret = p.print(return_type)?;
    let arrow = if method {
        colon()
    } else {
        docs![space(), "=>"]
    };
    Ok(docs![type_params, list, arrow, space(), ret])
}

fn function_param<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::FunctionTypeParam {
        name,
        optional,
        type_annotation,
    } = node
    else {
        return Err(unexpected(node));
    };
    let name = p.print(name)?;
    let ty = p.print(type_annotation)?;
    Ok(docs![
        name,
        Doc::when(*optional, question_mark),
        colon(),
        space(),
        ty
    ])
}

fn generic<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::GenericTypeAnnotation {
        id,
        type_parameters,
    } = node
    else {
        return Err(unexpected(node));
    };
    let id = p.print(id)?;
    let params = p.print_opt(type_parameters.as_deref())?;
    Ok(docs![id, params])
}

/// Print an operand of `?`, `&` or `|`, in parentheses when `binds_looser`
/// says it would otherwise reparse into a different tree.
fn operand<'a>(
    p: &mut Printer<'_, 'a>,
    node: &'a Node,
    binds_looser: fn(&Node) -> bool,
) -> Result<Doc, FormatError> {
    let doc = p.print(node)?;
    Ok(if binds_looser(node) {
        docs!["(", doc, ")"]
    } else {
        doc
    })
}

fn intersection<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::IntersectionTypeAnnotation { types } = node else {
        return Err(unexpected(node));
    };
    let types = types
        .iter()
        .map(|t| {
            operand(p, t, |t| {
                matches!(
                    t,
                    Node::UnionTypeAnnotation { .. }
                        | Node::IntersectionTypeAnnotation { .. }
                        | Node::FunctionTypeAnnotation { .. }
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Doc::join(types, docs![space(), "&", space()]))
}

fn union<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::UnionTypeAnnotation { types } = node else {
        return Err(unexpected(node));
    };
    let types = types
        .iter()
        .map(|t| {
            operand(p, t, |t| {
                matches!(
                    t,
                    Node::UnionTypeAnnotation { .. } | Node::FunctionTypeAnnotation { .. }
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Doc::join(types, docs![space(), "|", space()]))
}

fn nullable<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::NullableTypeAnnotation { type_annotation } = node else {
        return Err(unexpected(node));
    };
    let inner = operand(p, type_annotation, |t| {
        matches!(
            t,
            Node::UnionTypeAnnotation { .. }
                | Node::IntersectionTypeAnnotation { .. }
                | Node::FunctionTypeAnnotation { .. }
        )
    })?;
    Ok(docs![question_mark(), inner])
}

fn object<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::ObjectTypeAnnotation { properties } = node else {
        return Err(unexpected(node));
    };
    let properties = p.print_all(properties)?;
    Ok(braced("object_type", properties))
}

fn object_property<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::ObjectTypeProperty {
        key,
        value,
        optional,
        is_static,
        method,
    } = node
    else {
        return Err(unexpected(node));
    };
    let key = p.print(key)?;
    let value = p.print(value)?;
    Ok(docs![
        Doc::when(*is_static, || docs!["static", space()]),
        key,
        Doc::when(*optional, question_mark),
        Doc::when(!*method, || docs![colon(), space()]),
        value
    ])
}

fn tuple<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::TupleTypeAnnotation { types } = node else {
        return Err(unexpected(node));
    };
    let types = p.print_all(types)?;
    Ok(delimited("tuple", "[", types, "]"))
}

fn annotation<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::TypeAnnotation { type_annotation } = node else {
        return Err(unexpected(node));
    };
    let inner = p.print(type_annotation)?;
    Ok(docs![colon(), space(), inner])
}

fn type_of<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::TypeofTypeAnnotation { argument } = node else {
        return Err(unexpected(node));
    };
    let argument = p.print(argument)?;
    Ok(docs!["typeof", space(), argument])
}

fn type_parameter<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let Node::TypeParameter {
        name,
        variance,
        bound,
    } = node
    else {
        return Err(unexpected(node));
    };
    let sigil = match variance {
        Some(Variance::Plus) => "+",
        Some(Variance::Minus) => "-",
        None => "",
    };
    let bound = p.print_opt(bound.as_deref())?;
    Ok(docs![sigil, name.as_str(), bound])
}

fn type_parameters<'a>(p: &mut Printer<'_, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
    let (Node::TypeParameterDeclaration { params } | Node::TypeParameterInstantiation { params }) =
        node
    else {
        return Err(unexpected(node));
    };
    let params = p.print_all(params)?;
    Ok(delimited("type_parameters", "<", params, ">"))
}

#[cfg(test)]
mod test {
    use crate::ast::Node;
    use crate::registry::Registry;
    use crate::{Config, format_node, format_source, ident};

    fn fmt(node: &Node, max_width: usize) -> String {
        let config = Config {
            max_width,
            indent_size: 2,
        };
        format_node(node, &Registry::default(), &config).unwrap()
    }

    fn param(name: &str, ty: Node) -> Node {
        Node::FunctionTypeParam {
            name: Box::new(ident!(name)),
            optional: false,
            type_annotation: Box::new(ty),
        }
    }

    fn function(params: Vec<Node>, rest: Option<Node>) -> Node {
        Node::FunctionTypeAnnotation {
            type_parameters: None,
            params,
            rest: rest.map(Box::new),
            return_type: Box::new(Node::VoidTypeAnnotation),
        }
    }

    #[test]
    fn null_literal_type_prints_like_other_literals() {
        assert_eq!(fmt(&Node::NullLiteralTypeAnnotation, 80), "null");
        let union = Node::UnionTypeAnnotation {
            types: vec![
                Node::StringLiteralTypeAnnotation {
                    value: "a".into(),
                },
                Node::NullLiteralTypeAnnotation,
                Node::NumericLiteralTypeAnnotation { raw: "1.5".into() },
            ],
        };
        assert_eq!(fmt(&union, 80), "'a' | null | 1.5");
    }

    #[test]
    fn function_type_arrow_and_params() {
        let f = function(
            vec![
                param("a", Node::NumberTypeAnnotation),
                param("b", Node::StringTypeAnnotation),
            ],
            None,
        );
        assert_eq!(fmt(&f, 80), "(a: number, b: string) => void");
        assert_eq!(
            fmt(&f, 10),
            "(\n  a: number,\n  b: string,\n) => void"
        );
        assert_eq!(fmt(&function(vec![], None), 1), "() => void");
    }

    #[test]
    fn rest_param_has_no_trailing_comma() {
        let f = function(
            vec![param("a", Node::NumberTypeAnnotation)],
            Some(param("rest", Node::AnyTypeAnnotation)),
        );
        assert_eq!(fmt(&f, 80), "(a: number, ...rest: any) => void");
        assert_eq!(fmt(&f, 10), "(\n  a: number,\n  ...rest: any\n) => void");
    }

    #[test]
    fn method_property_uses_colon() {
        let obj = Node::ObjectTypeAnnotation {
            properties: vec![
                Node::ObjectTypeProperty {
                    key: Box::new(ident!("run")),
                    value: Box::new(function(vec![param("x", Node::MixedTypeAnnotation)], None)),
                    optional: false,
                    is_static: true,
                    method: true,
                },
                Node::ObjectTypeProperty {
                    key: Box::new(ident!("cb")),
                    value: Box::new(function(vec![], None)),
                    optional: true,
                    is_static: false,
                    method: false,
                },
            ],
        };
        assert_eq!(
            fmt(&obj, 80),
            "{ static run(x: mixed): void, cb?: () => void }"
        );
    }

    #[test]
    fn looser_operands_are_parenthesized() {
        let named = |name: &str| Node::GenericTypeAnnotation {
            id: Box::new(ident!(name)),
            type_parameters: None,
        };
        let union = Node::UnionTypeAnnotation {
            types: vec![named("A"), named("B")],
        };
        let nullable = Node::NullableTypeAnnotation {
            type_annotation: Box::new(union.clone()),
        };
        assert_eq!(fmt(&nullable, 80), "?(A | B)");
        let intersection = Node::IntersectionTypeAnnotation {
            types: vec![union, named("C")],
        };
        assert_eq!(fmt(&intersection, 80), "(A | B) & C");
        let callbacks = Node::UnionTypeAnnotation {
            types: vec![function(vec![], None), Node::StringTypeAnnotation],
        };
        assert_eq!(fmt(&callbacks, 80), "(() => void) | string");
        // tighter operands stay bare
        let plain = Node::UnionTypeAnnotation {
            types: vec![
                Node::NullableTypeAnnotation {
                    type_annotation: Box::new(named("A")),
                },
                Node::IntersectionTypeAnnotation {
                    types: vec![named("B"), named("C")],
                },
            ],
        };
        assert_eq!(fmt(&plain, 80), "?A | B & C");
    }

    #[test]
    fn parenthesized_types_survive_reformatting() {
        let src = "type T = ?(A|B);\ntype U = (()=>void)|string;\ntype V = ((A|B)&C);\n";
        let out = format_source(src, &Config::default()).unwrap();
        assert_eq!(
            out,
            "type T = ?(A | B);\ntype U = (() => void) | string;\ntype V = (A | B) & C;\n"
        );
        assert_eq!(format_source(&out, &Config::default()).unwrap(), out);
    }

    #[test]
    fn generics_and_bounds() {
        let ty = Node::GenericTypeAnnotation {
            id: Box::new(ident!("Map")),
            type_parameters: Some(Box::new(Node::TypeParameterInstantiation {
                params: vec![
                    Node::StringTypeAnnotation,
                    Node::NullableTypeAnnotation {
                        type_annotation: Box::new(Node::NumberTypeAnnotation),
                    },
                ],
            })),
        };
        assert_eq!(fmt(&ty, 80), "Map<string, ?number>");
        let decl = Node::TypeParameterDeclaration {
            params: vec![Node::TypeParameter {
                name: "T".into(),
                variance: Some(crate::ast::Variance::Plus),
                bound: Some(Box::new(Node::TypeAnnotation {
                    type_annotation: Box::new(Node::ExistentialTypeParam),
                })),
            }],
        };
        assert_eq!(fmt(&decl, 80), "<+T: *>");
    }
}
