//! Built-in printing rules, one per [`NodeKind`](crate::ast::NodeKind).
pub mod chain;
pub mod expressions;
pub mod flow;
pub mod list;
pub mod statements;

use crate::ast::Node;
use crate::registry::Registry;
use crate::utils::error::FormatError;

pub fn register_defaults(reg: &mut Registry) {
    expressions::register(reg);
    statements::register(reg);
    flow::register(reg);
}

/// Error for a rule that was handed a node it does not know how to print,
/// which only happens when a rule is registered under the wrong kind.
pub(crate) fn unexpected(node: &Node) -> FormatError {
    FormatError::UnhandledNodeKind(node.kind())
}

/// Quote a string value with single quotes, re-escaping what needs it.
pub fn single_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
