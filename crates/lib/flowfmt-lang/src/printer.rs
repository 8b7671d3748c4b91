//! The tree walker that dispatches every node to its printing rule.
use crate::ast::Node;
use crate::doc::Doc;
use crate::registry::Registry;
use crate::utils::error::FormatError;

/// A printing rule: turns one node into a document fragment, calling back
/// into the [`Printer`] for its children.
pub type PrintRule = for<'r, 'a> fn(&mut Printer<'r, 'a>, &'a Node) -> Result<Doc, FormatError>;

/// Ancestors of the node being printed, innermost last. The node itself is
/// not part of its own path.
#[derive(Clone, Copy, Debug)]
pub struct Path<'p, 'a> {
    ancestors: &'p [&'a Node],
}

impl<'p, 'a> Path<'p, 'a> {
    pub fn parent(&self) -> Option<&'a Node> {
        self.ancestors.last().copied()
    }
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }
}

pub struct Printer<'r, 'a> {
    registry: &'r Registry,
    stack: Vec<&'a Node>,
}

impl<'r, 'a> Printer<'r, 'a> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            stack: Vec::new(),
        }
    }

    /// Print `node` with the rule registered for its kind.
    ///
    /// The node stays on the ancestor stack while its rule runs, and is
    /// popped again whether the rule succeeds or not.
    pub fn print(&mut self, node: &'a Node) -> Result<Doc, FormatError> {
        let kind = node.kind();
        let rule = self
            .registry
            .get(kind)
            .ok_or(FormatError::UnhandledNodeKind(kind))?;
        self.stack.push(node);
        let res = rule(self, node);
        self.stack.pop();
        res
    }

    /// Absent children print as nothing.
    pub fn print_opt(&mut self, node: Option<&'a Node>) -> Result<Doc, FormatError> {
        node.map_or(Ok(Doc::Nil), |n| self.print(n))
    }

    pub fn print_all(
        &mut self,
        nodes: impl IntoIterator<Item = &'a Node>,
    ) -> Result<Vec<Doc>, FormatError> {
        nodes.into_iter().map(|n| self.print(n)).collect()
    }

    /// Ancestors of the node whose rule is currently running.
    pub fn path(&self) -> Path<'_, 'a> {
        let end = self.stack.len().saturating_sub(1);
        Path {
            ancestors: &self.stack[..end],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{docs, ident, number};
    use crate::ast::builder::*;
    use crate::ast::{BinaryOp, NodeKind};
    use crate::doc::text;

    fn depth_rule<'r, 'a>(p: &mut Printer<'r, 'a>, node: &'a Node) -> Result<Doc, FormatError> {
        match node {
            Node::BinaryExpression { left, right, .. } => {
                let l = p.print(left)?;
                let r = p.print(right)?;
                Ok(docs![l, r])
            }
            _ => Ok(text(format!("{}", p.path().depth()))),
        }
    }

    fn parent_kind_rule<'r, 'a>(
        p: &mut Printer<'r, 'a>,
        _node: &'a Node,
    ) -> Result<Doc, FormatError> {
        let parent = p.path().parent().map(|n| n.kind().to_string());
        Ok(text(parent.unwrap_or_else(|| "root".to_string())))
    }

    #[test]
    fn path_excludes_current_node() {
        let mut reg = Registry::new();
        reg.register(NodeKind::BinaryExpression, depth_rule);
        reg.register(NodeKind::Identifier, depth_rule);
        reg.register(NodeKind::NumericLiteral, parent_kind_rule);
        let tree = binary(
            BinaryOp::Add,
            binary(BinaryOp::Add, ident!("a"), number!(1)),
            ident!("b"),
        );
        let mut p = Printer::new(&reg);
        let doc = p.print(&tree).unwrap();
        assert_eq!(
            doc,
            docs![text("2"), text("BinaryExpression"), text("1")]
        );
        assert!(p.path().is_empty());
    }

    #[test]
    fn missing_rule_fails_and_keeps_stack_balanced() {
        let mut reg = Registry::new();
        reg.register(NodeKind::BinaryExpression, depth_rule);
        let tree = binary(BinaryOp::Add, ident!("a"), ident!("b"));
        let mut p = Printer::new(&reg);
        assert_eq!(
            p.print(&tree),
            Err(FormatError::UnhandledNodeKind(NodeKind::Identifier))
        );
        assert_eq!(p.stack.len(), 0);
    }

    #[test]
    fn absent_child_is_nil() {
        let reg = Registry::new();
        let mut p = Printer::new(&reg);
        assert_eq!(p.print_opt(None), Ok(Doc::Nil));
    }
}
