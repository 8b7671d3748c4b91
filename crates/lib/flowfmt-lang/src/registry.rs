use std::collections::HashMap;

use crate::ast::NodeKind;
use crate::printer::PrintRule;

/// Printing rules keyed by node kind.
///
/// [`Registry::default`] holds a rule for every kind in [`NodeKind::ALL`];
/// [`Registry::new`] starts empty so an embedder can assemble its own set.
#[derive(Clone)]
pub struct Registry {
    rules: HashMap<NodeKind, PrintRule>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Install `rule` for `kind`, returning the rule it replaced.
    pub fn register(&mut self, kind: NodeKind, rule: PrintRule) -> Option<PrintRule> {
        self.rules.insert(kind, rule)
    }

    pub fn unregister(&mut self, kind: NodeKind) -> Option<PrintRule> {
        self.rules.remove(&kind)
    }

    pub fn get(&self, kind: NodeKind) -> Option<PrintRule> {
        self.rules.get(&kind).copied()
    }

    pub fn contains(&self, kind: NodeKind) -> bool {
        self.rules.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered kinds in declaration order.
    pub fn kinds(&self) -> Vec<NodeKind> {
        let mut kinds: Vec<_> = self.rules.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl Default for Registry {
    fn default() -> Self {
        let mut reg = Self::new();
        crate::printers::register_defaults(&mut reg);
        reg
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
