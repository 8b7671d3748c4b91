//! A parser for the supported subset of Flow-annotated JavaScript.
//!
//! It exists so that formatted output can be read back in, and so the
//! command line tool has something to format. Comments are not accepted.
use chumsky::prelude::*;

use crate::ast::*;
use crate::utils::error::{ParseError, ReportableError};

type ParseExtra<'src> = extra::Err<Rich<'src, char>>;

macro_rules! ParserTrait {
    ($src:lifetime, $output:ty) => { impl Parser<$src, &$src str, $output, ParseExtra<$src>> + Clone + $src };
}

/// Words that can never be identifiers. Contextual words such as `type`
/// and `static` are left out on purpose.
const KEYWORDS: &[&str] = &[
    "const", "let", "var", "if", "else", "return", "typeof", "void", "delete", "true", "false",
    "null", "this", "super",
];

fn sym<'src>(s: &'static str) -> ParserTrait!('src, ()) {
    just(s).padded().ignored()
}

/// `s`, unless the next character is one of `not_followed_by`.
fn op<'src>(s: &'static str, not_followed_by: &'static str) -> ParserTrait!('src, ()) {
    just(s)
        .then_ignore(one_of(not_followed_by).not())
        .padded()
        .ignored()
}

fn keyword<'src>(word: &'static str) -> ParserTrait!('src, ()) {
    text::ident()
        .filter(move |s: &&str| *s == word)
        .ignored()
        .padded()
        .labelled(word)
}

fn identifier_name<'src>() -> ParserTrait!('src, String) {
    text::ident()
        .try_map(|s: &str, span| {
            if KEYWORDS.contains(&s) {
                Err(Rich::custom(span, format!("'{s}' is a reserved word")))
            } else {
                Ok(s.to_string())
            }
        })
        .padded()
        .labelled("identifier")
}

/// Property names may be reserved words.
fn property_name<'src>() -> ParserTrait!('src, String) {
    text::ident()
        .map(|s: &str| s.to_string())
        .padded()
        .labelled("property name")
}

fn ident_node(name: String) -> Node {
    Node::Identifier {
        name,
        type_annotation: None,
    }
}

fn annotation(ty: Node) -> Node {
    Node::TypeAnnotation {
        type_annotation: Box::new(ty),
    }
}

fn number<'src>() -> ParserTrait!('src, String) {
    text::int(10)
        .then(just('.').then(text::digits(10)).or_not())
        .to_slice()
        .map(|s: &str| s.to_string())
        .padded()
        .labelled("number")
}

fn string<'src>() -> ParserTrait!('src, String) {
    let escape = just('\\').ignore_then(choice((
        just('\\'),
        just('\''),
        just('"'),
        just('n').to('\n'),
        just('r').to('\r'),
        just('t').to('\t'),
    )));
    let quoted = |quote: char| {
        none_of([quote, '\\', '\n'])
            .or(escape.clone())
            .repeated()
            .collect::<String>()
            .delimited_by(just(quote), just(quote))
    };
    quoted('\'')
        .or(quoted('"'))
        .padded()
        .labelled("string")
}

/// One node for a single item, `wrap(items)` for several.
fn collapse(types: Vec<Node>, wrap: impl Fn(Vec<Node>) -> Node) -> Node {
    match <[Node; 1]>::try_from(types) {
        Ok([single]) => single,
        Err(types) => wrap(types),
    }
}

fn type_parameter_declaration<'src, P>(ty: P) -> ParserTrait!('src, Node)
where
    P: Parser<'src, &'src str, Node, ParseExtra<'src>> + Clone + 'src,
{
    let variance = choice((
        sym("+").to(Variance::Plus),
        sym("-").to(Variance::Minus),
    ))
    .or_not();
    let bound = sym(":").ignore_then(ty).map(annotation);
    variance
        .then(identifier_name())
        .then(bound.or_not())
        .map(|((variance, name), bound)| Node::TypeParameter {
            name,
            variance,
            bound: bound.map(Box::new),
        })
        .separated_by(sym(","))
        .allow_trailing()
        .at_least(1)
        .collect::<Vec<_>>()
        .delimited_by(sym("<"), sym(">"))
        .map(|params| Node::TypeParameterDeclaration { params })
        .labelled("type parameters")
}

pub(crate) fn type_parser<'src>() -> ParserTrait!('src, Node) {
    recursive(|ty| {
        let keyword_type = text::ident()
            .try_map(|s: &str, span| match s {
                "any" => Ok(Node::AnyTypeAnnotation),
                "boolean" => Ok(Node::BooleanTypeAnnotation),
                "mixed" => Ok(Node::MixedTypeAnnotation),
                "number" => Ok(Node::NumberTypeAnnotation),
                "string" => Ok(Node::StringTypeAnnotation),
                "void" => Ok(Node::VoidTypeAnnotation),
                "this" => Ok(Node::ThisTypeAnnotation),
                "null" => Ok(Node::NullLiteralTypeAnnotation),
                "true" => Ok(Node::BooleanLiteralTypeAnnotation { value: true }),
                "false" => Ok(Node::BooleanLiteralTypeAnnotation { value: false }),
                _ => Err(Rich::custom(span, format!("'{s}' is not a builtin type"))),
            })
            .padded();

        let instantiation = ty
            .clone()
            .separated_by(sym(","))
            .allow_trailing()
            .at_least(1)
            .collect::<Vec<_>>()
            .delimited_by(sym("<"), sym(">"))
            .map(|params| Node::TypeParameterInstantiation { params });
        let generic = identifier_name()
            .then(instantiation.or_not())
            .map(|(name, params)| Node::GenericTypeAnnotation {
                id: Box::new(ident_node(name)),
                type_parameters: params.map(Box::new),
            });

        let type_of = keyword("typeof")
            .ignore_then(identifier_name())
            .map(|name| Node::TypeofTypeAnnotation {
                argument: Box::new(Node::GenericTypeAnnotation {
                    id: Box::new(ident_node(name)),
                    type_parameters: None,
                }),
            });

        let tuple = ty
            .clone()
            .separated_by(sym(","))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(sym("["), sym("]"))
            .map(|types| Node::TupleTypeAnnotation { types });

        let param = identifier_name()
            .then(sym("?").or_not())
            .then_ignore(sym(":"))
            .then(ty.clone())
            .map(|((name, optional), t)| Node::FunctionTypeParam {
                name: Box::new(ident_node(name)),
                optional: optional.is_some(),
                type_annotation: Box::new(t),
            });
        let rest = sym("...").ignore_then(param.clone());
        let params = param
            .separated_by(sym(","))
            .allow_trailing()
            .collect::<Vec<_>>()
            .then(rest.then_ignore(sym(",").or_not()).or_not())
            .delimited_by(sym("("), sym(")"))
            .boxed();
        let signature = type_parameter_declaration(ty.clone())
            .or_not()
            .then(params)
            .boxed();

        let function = signature
            .clone()
            .then_ignore(sym("=>"))
            .then(ty.clone())
            .map(
                |((type_parameters, (params, rest)), ret)| Node::FunctionTypeAnnotation {
                    type_parameters: type_parameters.map(Box::new),
                    params,
                    rest: rest.map(Box::new),
                    return_type: Box::new(ret),
                },
            );

        let method = signature.then_ignore(sym(":")).then(ty.clone()).map(
            |((type_parameters, (params, rest)), ret)| Node::FunctionTypeAnnotation {
                type_parameters: type_parameters.map(Box::new),
                params,
                rest: rest.map(Box::new),
                return_type: Box::new(ret),
            },
        );
        // (optional, method, value)
        let property_body = property_name()
            .map(ident_node)
            .then(choice((
                method.map(|f| (false, true, f)),
                sym("?")
                    .or_not()
                    .then_ignore(sym(":"))
                    .then(ty.clone())
                    .map(|(optional, t)| (optional.is_some(), false, t)),
            )))
            .boxed();
        let property = choice((
            keyword("static")
                .ignore_then(property_body.clone())
                .map(|p| (true, p)),
            property_body.map(|p| (false, p)),
        ))
        .map(
            |(is_static, (key, (optional, method, value)))| Node::ObjectTypeProperty {
                key: Box::new(key),
                value: Box::new(value),
                optional,
                is_static,
                method,
            },
        );
        let object = property
            .separated_by(sym(",").or(sym(";")))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(sym("{"), sym("}"))
            .map(|properties| Node::ObjectTypeAnnotation { properties });

        // a parenthesized type leaves no trace in the tree
        let grouped = ty.clone().delimited_by(sym("("), sym(")"));

        let primary = choice((
            function,
            grouped,
            type_of,
            keyword_type,
            sym("*").to(Node::ExistentialTypeParam),
            string().map(|value| Node::StringLiteralTypeAnnotation { value }),
            number().map(|raw| Node::NumericLiteralTypeAnnotation { raw }),
            tuple,
            object,
            generic,
        ))
        .boxed();

        let nullable = sym("?").repeated().foldr(primary, |_, t| {
            Node::NullableTypeAnnotation {
                type_annotation: Box::new(t),
            }
        });
        let intersection = nullable
            .separated_by(op("&", "&"))
            .at_least(1)
            .collect::<Vec<_>>()
            .map(|types| collapse(types, |types| Node::IntersectionTypeAnnotation { types }));
        intersection
            .separated_by(op("|", "|"))
            .at_least(1)
            .collect::<Vec<_>>()
            .map(|types| collapse(types, |types| Node::UnionTypeAnnotation { types }))
            .boxed()
    })
    .labelled("type")
}

#[derive(Clone, Copy)]
enum Infix {
    Binary(BinaryOp),
    Logical(LogicalOp),
}

enum Postfix {
    Member(Node),
    Computed(Node),
    Call(Vec<Node>),
}

pub(crate) fn expr_parser<'src>() -> ParserTrait!('src, Node) {
    let ty = type_parser();
    recursive(move |expr| {
        let literal = choice((
            number().map(|raw| Node::NumericLiteral { raw }),
            string().map(|value| Node::StringLiteral { value }),
            text::ident()
                .try_map(|s: &str, span| match s {
                    "true" => Ok(Node::BooleanLiteral { value: true }),
                    "false" => Ok(Node::BooleanLiteral { value: false }),
                    "null" => Ok(Node::NullLiteral),
                    "this" => Ok(Node::ThisExpression),
                    "super" => Ok(Node::Super),
                    _ => Err(Rich::custom(span, format!("'{s}' is not a literal"))),
                })
                .padded(),
        ));
        let identifier = identifier_name().map(ident_node);

        let items = expr
            .clone()
            .separated_by(sym(","))
            .allow_trailing()
            .collect::<Vec<_>>()
            .boxed();
        let array = items
            .clone()
            .delimited_by(sym("["), sym("]"))
            .map(|elements| Node::ArrayExpression { elements });

        let key = choice((
            property_name().map(ident_node),
            string().map(|value| Node::StringLiteral { value }),
            number().map(|raw| Node::NumericLiteral { raw }),
        ));
        let object = key
            .then_ignore(sym(":"))
            .then(expr.clone())
            .map(|(key, value)| Node::ObjectProperty {
                key: Box::new(key),
                value: Box::new(value),
            })
            .separated_by(sym(","))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(sym("{"), sym("}"))
            .map(|properties| Node::ObjectExpression { properties });

        // `(e)` marks `e` as parenthesized, `(e: T)` is a type cast
        let paren = sym("(")
            .ignore_then(expr.clone())
            .then(sym(":").ignore_then(ty.clone()).or_not())
            .then_ignore(sym(")"))
            .map(|(inner, cast)| match cast {
                Some(t) => (
                    Node::TypeCastExpression {
                        expression: Box::new(inner),
                        type_annotation: Box::new(annotation(t)),
                    },
                    false,
                ),
                None => inner.into_parenthesized(),
            });

        // the flag tells whether parens around the atom were left unrecorded
        let atom = choice((
            literal.map(|n| (n, false)),
            identifier.map(|n| (n, false)),
            array.map(|n| (n, false)),
            object.map(|n| (n, false)),
            paren,
        ))
        .boxed()
        .labelled("expression");

        let postfix = choice((
            sym(".")
                .ignore_then(property_name())
                .map(|name| Postfix::Member(ident_node(name))),
            expr.clone()
                .delimited_by(sym("["), sym("]"))
                .map(Postfix::Computed),
            items.delimited_by(sym("("), sym(")")).map(Postfix::Call),
        ));
        let member = atom.foldl(postfix.repeated(), |(target, _), pf| {
            let node = match pf {
                Postfix::Member(property) => Node::MemberExpression {
                    object: Box::new(target),
                    property: Box::new(property),
                    computed: false,
                },
                Postfix::Computed(property) => Node::MemberExpression {
                    object: Box::new(target),
                    property: Box::new(property),
                    computed: true,
                },
                Postfix::Call(arguments) => Node::CallExpression {
                    callee: Box::new(target),
                    arguments,
                },
            };
            (node, false)
        });

        let unary_op = choice((
            op("!", "=").to(UnaryOp::Not),
            op("-", "-").to(UnaryOp::Minus),
            op("+", "+").to(UnaryOp::Plus),
            sym("~").to(UnaryOp::BitNot),
            keyword("typeof").to(UnaryOp::Typeof),
            keyword("void").to(UnaryOp::Void),
            keyword("delete").to(UnaryOp::Delete),
        ));
        let unary = unary_op
            .repeated()
            .foldr(member, |operator, (argument, parenthesized_argument)| {
                (
                    Node::UnaryExpression {
                        operator,
                        prefix: true,
                        argument: Box::new(argument),
                        parenthesized_argument,
                        parenthesized: false,
                    },
                    false,
                )
            })
            .map(|(node, _)| node)
            .boxed();

        // from the tightest binding level to the loosest
        let levels = [
            choice((
                op("*", "").to(Infix::Binary(BinaryOp::Mul)),
                op("/", "").to(Infix::Binary(BinaryOp::Div)),
                op("%", "").to(Infix::Binary(BinaryOp::Rem)),
            ))
            .boxed(),
            choice((
                op("+", "").to(Infix::Binary(BinaryOp::Add)),
                op("-", "").to(Infix::Binary(BinaryOp::Sub)),
            ))
            .boxed(),
            choice((
                op("<=", "").to(Infix::Binary(BinaryOp::LessEqual)),
                op(">=", "").to(Infix::Binary(BinaryOp::GreaterEqual)),
                op("<", "").to(Infix::Binary(BinaryOp::LessThan)),
                op(">", "").to(Infix::Binary(BinaryOp::GreaterThan)),
            ))
            .boxed(),
            choice((
                op("===", "").to(Infix::Binary(BinaryOp::StrictEqual)),
                op("!==", "").to(Infix::Binary(BinaryOp::StrictNotEqual)),
                op("==", "").to(Infix::Binary(BinaryOp::Equal)),
                op("!=", "").to(Infix::Binary(BinaryOp::NotEqual)),
            ))
            .boxed(),
            op("&&", "").to(Infix::Logical(LogicalOp::And)).boxed(),
            op("||", "").to(Infix::Logical(LogicalOp::Or)).boxed(),
        ];
        let binary = levels.into_iter().fold(unary, |prec, infix| {
            prec.clone()
                .foldl(infix.then(prec).repeated(), |left, (infix, right)| {
                    let (left, right) = (Box::new(left), Box::new(right));
                    match infix {
                        Infix::Binary(operator) => Node::BinaryExpression {
                            operator,
                            left,
                            right,
                            parenthesized: false,
                        },
                        Infix::Logical(operator) => Node::LogicalExpression {
                            operator,
                            left,
                            right,
                            parenthesized: false,
                        },
                    }
                })
                .boxed()
        });

        let conditional = binary
            .then(
                sym("?")
                    .ignore_then(expr.clone())
                    .then_ignore(sym(":"))
                    .then(expr.clone())
                    .or_not(),
            )
            .map(|(test, branches)| match branches {
                Some((consequent, alternate)) => Node::ConditionalExpression {
                    test: Box::new(test),
                    consequent: Box::new(consequent),
                    alternate: Box::new(alternate),
                    parenthesized: false,
                },
                None => test,
            });

        conditional
            .then(op("=", "=").ignore_then(expr.clone()).or_not())
            .map(|(left, right)| match right {
                Some(right) => Node::AssignmentExpression {
                    left: Box::new(left),
                    right: Box::new(right),
                    parenthesized: false,
                },
                None => left,
            })
            .boxed()
    })
}

fn statement_parser<'src>() -> ParserTrait!('src, Node) {
    let expr = expr_parser();
    let ty = type_parser();
    recursive(move |stmt| {
        let block = stmt
            .clone()
            .repeated()
            .collect::<Vec<_>>()
            .delimited_by(sym("{"), sym("}"))
            .map(|body| Node::BlockStatement { body });

        let if_stmt = keyword("if")
            .ignore_then(expr.clone().delimited_by(sym("("), sym(")")))
            .then(stmt.clone())
            .then(keyword("else").ignore_then(stmt.clone()).or_not())
            .map(|((test, consequent), alternate)| Node::IfStatement {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: alternate.map(Box::new),
            });

        let kind = choice((
            keyword("const").to(DeclarationKind::Const),
            keyword("let").to(DeclarationKind::Let),
            keyword("var").to(DeclarationKind::Var),
        ));
        let binding = identifier_name()
            .then(sym(":").ignore_then(ty.clone()).or_not())
            .map(|(name, t)| Node::Identifier {
                name,
                type_annotation: t.map(|t| Box::new(annotation(t))),
            });
        let declaration = kind
            .then(binding)
            .then(op("=", "=").ignore_then(expr.clone()).or_not())
            .then_ignore(sym(";"))
            .map(|((kind, id), init)| Node::VariableDeclaration {
                kind,
                id: Box::new(id),
                init: init.map(Box::new),
            });

        let return_stmt = keyword("return")
            .ignore_then(expr.clone().or_not())
            .then_ignore(sym(";"))
            .map(|argument| Node::ReturnStatement {
                argument: argument.map(Box::new),
            });

        let type_alias = keyword("type")
            .ignore_then(identifier_name())
            .then(type_parameter_declaration(ty.clone()).or_not())
            .then_ignore(op("=", "="))
            .then(ty.clone())
            .then_ignore(sym(";"))
            .map(|((name, type_parameters), right)| Node::TypeAlias {
                id: Box::new(ident_node(name)),
                type_parameters: type_parameters.map(Box::new),
                right: Box::new(right),
            });

        let expression_stmt = expr
            .clone()
            .then_ignore(sym(";"))
            .map(|expression| Node::ExpressionStatement {
                expression: Box::new(expression),
            });

        choice((
            block,
            if_stmt,
            declaration,
            return_stmt,
            type_alias,
            expression_stmt,
        ))
        .boxed()
        .labelled("statement")
    })
}

fn program_parser<'src>() -> ParserTrait!('src, Node) {
    statement_parser()
        .repeated()
        .collect::<Vec<_>>()
        .padded()
        .then_ignore(end())
        .map(|body| Node::Program { body })
}

fn into_reportable(errs: Vec<Rich<'_, char>>) -> Vec<Box<dyn ReportableError>> {
    errs.into_iter()
        .map(|e| Box::new(ParseError::from(e)) as Box<dyn ReportableError>)
        .collect()
}

pub fn parse_program(src: &str) -> Result<Node, Vec<Box<dyn ReportableError>>> {
    let res = program_parser().parse(src).into_result().map_err(into_reportable);
    if let Ok(Node::Program { body }) = &res {
        log::debug!("parsed {} top-level statements", body.len());
    }
    res
}

pub fn parse_expression(src: &str) -> Result<Node, Vec<Box<dyn ReportableError>>> {
    expr_parser()
        .padded()
        .then_ignore(end())
        .parse(src)
        .into_result()
        .map_err(into_reportable)
}

pub fn parse_type(src: &str) -> Result<Node, Vec<Box<dyn ReportableError>>> {
    type_parser()
        .padded()
        .then_ignore(end())
        .parse(src)
        .into_result()
        .map_err(into_reportable)
}

#[cfg(test)]
mod test;
