pub mod builder;
pub mod operators;

use std::fmt;

pub use operators::{BinaryOp, LogicalOp, UnaryOp};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Const,
    Let,
    Var,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Const => "const",
            DeclarationKind::Let => "let",
            DeclarationKind::Var => "var",
        }
    }
}

/// Variance sigil of a type parameter (`+T` / `-T`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variance {
    Plus,
    Minus,
}

/// A node of the syntax tree handed over by the parser.
///
/// The tree is only ever read while printing. Children are boxed so that the
/// printer can hand out stable `&Node` references to its ancestor path.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    // expressions
    ArrayExpression {
        elements: Vec<Node>,
    },
    AssignmentExpression {
        left: Box<Node>,
        right: Box<Node>,
        parenthesized: bool,
    },
    BinaryExpression {
        operator: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
        parenthesized: bool,
    },
    BooleanLiteral {
        value: bool,
    },
    CallExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    ConditionalExpression {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
        parenthesized: bool,
    },
    Identifier {
        name: String,
        type_annotation: Option<Box<Node>>,
    },
    LogicalExpression {
        operator: LogicalOp,
        left: Box<Node>,
        right: Box<Node>,
        parenthesized: bool,
    },
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        computed: bool,
    },
    NullLiteral,
    NumericLiteral {
        raw: String,
    },
    ObjectExpression {
        properties: Vec<Node>,
    },
    ObjectProperty {
        key: Box<Node>,
        value: Box<Node>,
    },
    StringLiteral {
        value: String,
    },
    Super,
    ThisExpression,
    TypeCastExpression {
        expression: Box<Node>,
        type_annotation: Box<Node>,
    },
    UnaryExpression {
        operator: UnaryOp,
        prefix: bool,
        argument: Box<Node>,
        parenthesized_argument: bool,
        parenthesized: bool,
    },

    // statements
    Program {
        body: Vec<Node>,
    },
    BlockStatement {
        body: Vec<Node>,
    },
    ExpressionStatement {
        expression: Box<Node>,
    },
    IfStatement {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    ReturnStatement {
        argument: Option<Box<Node>>,
    },
    VariableDeclaration {
        kind: DeclarationKind,
        id: Box<Node>,
        init: Option<Box<Node>>,
    },
    TypeAlias {
        id: Box<Node>,
        type_parameters: Option<Box<Node>>,
        right: Box<Node>,
    },

    // type annotations
    AnyTypeAnnotation,
    BooleanTypeAnnotation,
    BooleanLiteralTypeAnnotation {
        value: bool,
    },
    ExistentialTypeParam,
    FunctionTypeAnnotation {
        type_parameters: Option<Box<Node>>,
        params: Vec<Node>,
        rest: Option<Box<Node>>,
        return_type: Box<Node>,
    },
    FunctionTypeParam {
        name: Box<Node>,
        optional: bool,
        type_annotation: Box<Node>,
    },
    GenericTypeAnnotation {
        id: Box<Node>,
        type_parameters: Option<Box<Node>>,
    },
    IntersectionTypeAnnotation {
        types: Vec<Node>,
    },
    MixedTypeAnnotation,
    NullableTypeAnnotation {
        type_annotation: Box<Node>,
    },
    NullLiteralTypeAnnotation,
    NumberTypeAnnotation,
    NumericLiteralTypeAnnotation {
        raw: String,
    },
    ObjectTypeAnnotation {
        properties: Vec<Node>,
    },
    ObjectTypeProperty {
        key: Box<Node>,
        value: Box<Node>,
        optional: bool,
        is_static: bool,
        /// `key(x: T): R` rather than `key: (x: T) => R`
        method: bool,
    },
    StringLiteralTypeAnnotation {
        value: String,
    },
    StringTypeAnnotation,
    ThisTypeAnnotation,
    TupleTypeAnnotation {
        types: Vec<Node>,
    },
    TypeAnnotation {
        type_annotation: Box<Node>,
    },
    TypeofTypeAnnotation {
        argument: Box<Node>,
    },
    TypeParameter {
        name: String,
        variance: Option<Variance>,
        bound: Option<Box<Node>>,
    },
    TypeParameterDeclaration {
        params: Vec<Node>,
    },
    TypeParameterInstantiation {
        params: Vec<Node>,
    },
    UnionTypeAnnotation {
        types: Vec<Node>,
    },
    VoidTypeAnnotation,
}

/// Stable identifier of a node's shape, used as the printer registry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    ArrayExpression,
    AssignmentExpression,
    BinaryExpression,
    BooleanLiteral,
    CallExpression,
    ConditionalExpression,
    Identifier,
    LogicalExpression,
    MemberExpression,
    NullLiteral,
    NumericLiteral,
    ObjectExpression,
    ObjectProperty,
    StringLiteral,
    Super,
    ThisExpression,
    TypeCastExpression,
    UnaryExpression,
    Program,
    BlockStatement,
    ExpressionStatement,
    IfStatement,
    ReturnStatement,
    VariableDeclaration,
    TypeAlias,
    AnyTypeAnnotation,
    BooleanTypeAnnotation,
    BooleanLiteralTypeAnnotation,
    ExistentialTypeParam,
    FunctionTypeAnnotation,
    FunctionTypeParam,
    GenericTypeAnnotation,
    IntersectionTypeAnnotation,
    MixedTypeAnnotation,
    NullableTypeAnnotation,
    NullLiteralTypeAnnotation,
    NumberTypeAnnotation,
    NumericLiteralTypeAnnotation,
    ObjectTypeAnnotation,
    ObjectTypeProperty,
    StringLiteralTypeAnnotation,
    StringTypeAnnotation,
    ThisTypeAnnotation,
    TupleTypeAnnotation,
    TypeAnnotation,
    TypeofTypeAnnotation,
    TypeParameter,
    TypeParameterDeclaration,
    TypeParameterInstantiation,
    UnionTypeAnnotation,
    VoidTypeAnnotation,
}

impl NodeKind {
    pub const ALL: [NodeKind; 51] = [
        NodeKind::ArrayExpression,
        NodeKind::AssignmentExpression,
        NodeKind::BinaryExpression,
        NodeKind::BooleanLiteral,
        NodeKind::CallExpression,
        NodeKind::ConditionalExpression,
        NodeKind::Identifier,
        NodeKind::LogicalExpression,
        NodeKind::MemberExpression,
        NodeKind::NullLiteral,
        NodeKind::NumericLiteral,
        NodeKind::ObjectExpression,
        NodeKind::ObjectProperty,
        NodeKind::StringLiteral,
        NodeKind::Super,
        NodeKind::ThisExpression,
        NodeKind::TypeCastExpression,
        NodeKind::UnaryExpression,
        NodeKind::Program,
        NodeKind::BlockStatement,
        NodeKind::ExpressionStatement,
        NodeKind::IfStatement,
        NodeKind::ReturnStatement,
        NodeKind::VariableDeclaration,
        NodeKind::TypeAlias,
        NodeKind::AnyTypeAnnotation,
        NodeKind::BooleanTypeAnnotation,
        NodeKind::BooleanLiteralTypeAnnotation,
        NodeKind::ExistentialTypeParam,
        NodeKind::FunctionTypeAnnotation,
        NodeKind::FunctionTypeParam,
        NodeKind::GenericTypeAnnotation,
        NodeKind::IntersectionTypeAnnotation,
        NodeKind::MixedTypeAnnotation,
        NodeKind::NullableTypeAnnotation,
        NodeKind::NullLiteralTypeAnnotation,
        NodeKind::NumberTypeAnnotation,
        NodeKind::NumericLiteralTypeAnnotation,
        NodeKind::ObjectTypeAnnotation,
        NodeKind::ObjectTypeProperty,
        NodeKind::StringLiteralTypeAnnotation,
        NodeKind::StringTypeAnnotation,
        NodeKind::ThisTypeAnnotation,
        NodeKind::TupleTypeAnnotation,
        NodeKind::TypeAnnotation,
        NodeKind::TypeofTypeAnnotation,
        NodeKind::TypeParameter,
        NodeKind::TypeParameterDeclaration,
        NodeKind::TypeParameterInstantiation,
        NodeKind::UnionTypeAnnotation,
        NodeKind::VoidTypeAnnotation,
    ];
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // the variant names are the kind names used in diagnostics
        write!(f, "{self:?}")
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::ArrayExpression { .. } => NodeKind::ArrayExpression,
            Node::AssignmentExpression { .. } => NodeKind::AssignmentExpression,
            Node::BinaryExpression { .. } => NodeKind::BinaryExpression,
            Node::BooleanLiteral { .. } => NodeKind::BooleanLiteral,
            Node::CallExpression { .. } => NodeKind::CallExpression,
            Node::ConditionalExpression { .. } => NodeKind::ConditionalExpression,
            Node::Identifier { .. } => NodeKind::Identifier,
            Node::LogicalExpression { .. } => NodeKind::LogicalExpression,
            Node::MemberExpression { .. } => NodeKind::MemberExpression,
            Node::NullLiteral => NodeKind::NullLiteral,
            Node::NumericLiteral { .. } => NodeKind::NumericLiteral,
            Node::ObjectExpression { .. } => NodeKind::ObjectExpression,
            Node::ObjectProperty { .. } => NodeKind::ObjectProperty,
            Node::StringLiteral { .. } => NodeKind::StringLiteral,
            Node::Super => NodeKind::Super,
            Node::ThisExpression => NodeKind::ThisExpression,
            Node::TypeCastExpression { .. } => NodeKind::TypeCastExpression,
            Node::UnaryExpression { .. } => NodeKind::UnaryExpression,
            Node::Program { .. } => NodeKind::Program,
            Node::BlockStatement { .. } => NodeKind::BlockStatement,
            Node::ExpressionStatement { .. } => NodeKind::ExpressionStatement,
            Node::IfStatement { .. } => NodeKind::IfStatement,
            Node::ReturnStatement { .. } => NodeKind::ReturnStatement,
            Node::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
            Node::TypeAlias { .. } => NodeKind::TypeAlias,
            Node::AnyTypeAnnotation => NodeKind::AnyTypeAnnotation,
            Node::BooleanTypeAnnotation => NodeKind::BooleanTypeAnnotation,
            Node::BooleanLiteralTypeAnnotation { .. } => NodeKind::BooleanLiteralTypeAnnotation,
            Node::ExistentialTypeParam => NodeKind::ExistentialTypeParam,
            Node::FunctionTypeAnnotation { .. } => NodeKind::FunctionTypeAnnotation,
            Node::FunctionTypeParam { .. } => NodeKind::FunctionTypeParam,
            Node::GenericTypeAnnotation { .. } => NodeKind::GenericTypeAnnotation,
            Node::IntersectionTypeAnnotation { .. } => NodeKind::IntersectionTypeAnnotation,
            Node::MixedTypeAnnotation => NodeKind::MixedTypeAnnotation,
            Node::NullableTypeAnnotation { .. } => NodeKind::NullableTypeAnnotation,
            Node::NullLiteralTypeAnnotation => NodeKind::NullLiteralTypeAnnotation,
            Node::NumberTypeAnnotation => NodeKind::NumberTypeAnnotation,
            Node::NumericLiteralTypeAnnotation { .. } => NodeKind::NumericLiteralTypeAnnotation,
            Node::ObjectTypeAnnotation { .. } => NodeKind::ObjectTypeAnnotation,
            Node::ObjectTypeProperty { .. } => NodeKind::ObjectTypeProperty,
            Node::StringLiteralTypeAnnotation { .. } => NodeKind::StringLiteralTypeAnnotation,
            Node::StringTypeAnnotation => NodeKind::StringTypeAnnotation,
            Node::ThisTypeAnnotation => NodeKind::ThisTypeAnnotation,
            Node::TupleTypeAnnotation { .. } => NodeKind::TupleTypeAnnotation,
            Node::TypeAnnotation { .. } => NodeKind::TypeAnnotation,
            Node::TypeofTypeAnnotation { .. } => NodeKind::TypeofTypeAnnotation,
            Node::TypeParameter { .. } => NodeKind::TypeParameter,
            Node::TypeParameterDeclaration { .. } => NodeKind::TypeParameterDeclaration,
            Node::TypeParameterInstantiation { .. } => NodeKind::TypeParameterInstantiation,
            Node::UnionTypeAnnotation { .. } => NodeKind::UnionTypeAnnotation,
            Node::VoidTypeAnnotation => NodeKind::VoidTypeAnnotation,
        }
    }

    /// Whether the source wrapped this node in explicit parentheses.
    pub fn is_parenthesized(&self) -> bool {
        match self {
            Node::AssignmentExpression { parenthesized, .. }
            | Node::BinaryExpression { parenthesized, .. }
            | Node::ConditionalExpression { parenthesized, .. }
            | Node::LogicalExpression { parenthesized, .. }
            | Node::UnaryExpression { parenthesized, .. } => *parenthesized,
            _ => false,
        }
    }

    /// Record explicit source parentheses around this node.
    ///
    /// Returns the node and `false` when the flag was absorbed by the node
    /// itself, or the untouched node and `true` when this kind of node has no
    /// parenthesized flag of its own.
    pub fn into_parenthesized(mut self) -> (Node, bool) {
        match &mut self {
            Node::AssignmentExpression { parenthesized, .. }
            | Node::BinaryExpression { parenthesized, .. }
            | Node::ConditionalExpression { parenthesized, .. }
            | Node::LogicalExpression { parenthesized, .. }
            | Node::UnaryExpression { parenthesized, .. } => {
                *parenthesized = true;
                (self, false)
            }
            _ => (self, true),
        }
    }
}
