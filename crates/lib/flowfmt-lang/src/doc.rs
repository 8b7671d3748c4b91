//! The intermediate document printing rules build.
//!
//! A [`Doc`] is a flat-able sequence of text, whitespace, scope boundaries and
//! conditional [`Marker`]s. Scopes decide as a unit whether they render on a
//! single line; every marker resolves against the innermost scope that is
//! still open where it appears.
use std::fmt;

/// Break-conditional fragments. Each one has a "flat" and a "broken" form and
/// picks between them by the mode of its nearest enclosing scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// nothing / newline
    EmptyOrBreak,
    /// one space / newline
    SpaceOrBreak,
    /// nothing / `,`
    EmptyOrComma,
    /// nothing / one more indent level
    EmptyOrIndent,
    /// nothing / one less indent level
    EmptyOrDedent,
    /// nothing / `(`
    EmptyOrOpenParen,
    /// nothing / `)`
    EmptyOrCloseParen,
}

impl Marker {
    /// Column width of the flat form.
    pub fn flat_width(&self) -> usize {
        match self {
            Marker::SpaceOrBreak => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Doc {
    /// Contributes nothing. Builders return this instead of a placeholder.
    #[default]
    Nil,
    Text(String),
    Space,
    /// Unconditional newline; forces the enclosing scope broken.
    HardBreak,
    ScopeOpen {
        /// Only used in diagnostics and trace logs.
        name: Option<&'static str>,
        indent: bool,
    },
    ScopeClose {
        dedent: bool,
    },
    Marker(Marker),
    Concat(Vec<Doc>),
}

impl Doc {
    pub fn is_nil(&self) -> bool {
        matches!(self, Doc::Nil)
    }

    /// Concatenate fragments, splicing nested concatenations and dropping
    /// [`Doc::Nil`] so the result never holds empty children.
    pub fn concat(docs: impl IntoIterator<Item = Doc>) -> Doc {
        let mut out = Vec::new();
        for d in docs {
            match d {
                Doc::Nil => {}
                Doc::Concat(inner) => out.extend(inner),
                other => out.push(other),
            }
        }
        match out.len() {
            0 => Doc::Nil,
            1 => out.pop().unwrap_or_default(),
            _ => Doc::Concat(out),
        }
    }

    /// `f()` when `cond` holds, [`Doc::Nil`] otherwise.
    pub fn when(cond: bool, f: impl FnOnce() -> Doc) -> Doc {
        if cond { f() } else { Doc::Nil }
    }

    /// Interleave `sep` between the items.
    pub fn join(docs: impl IntoIterator<Item = Doc>, sep: Doc) -> Doc {
        let mut out = Vec::new();
        for (i, d) in docs.into_iter().enumerate() {
            if i > 0 {
                out.push(sep.clone());
            }
            out.push(d);
        }
        Doc::concat(out)
    }

    /// Visit every leaf in order, skipping concatenation nodes.
    pub fn for_each_leaf<'a>(&'a self, f: &mut impl FnMut(&'a Doc)) {
        match self {
            Doc::Nil => {}
            Doc::Concat(children) => children.iter().for_each(|c| c.for_each_leaf(f)),
            leaf => f(leaf),
        }
    }

    pub fn leaf_count(&self) -> usize {
        let mut n = 0;
        self.for_each_leaf(&mut |_| n += 1);
        n
    }
}

impl From<&str> for Doc {
    fn from(s: &str) -> Self {
        text(s)
    }
}

impl From<String> for Doc {
    fn from(s: String) -> Self {
        text(s)
    }
}

/// Concatenate any mix of `Doc`s and string slices.
#[macro_export]
macro_rules! docs {
    ($($d:expr),* $(,)?) => {
        $crate::doc::Doc::concat([$($crate::doc::Doc::from($d)),*])
    };
}

pub fn text(s: impl Into<String>) -> Doc {
    let s = s.into();
    if s.is_empty() { Doc::Nil } else { Doc::Text(s) }
}
pub fn space() -> Doc {
    Doc::Space
}
pub fn hard_break() -> Doc {
    Doc::HardBreak
}

pub fn scope_open(name: &'static str) -> Doc {
    Doc::ScopeOpen {
        name: Some(name),
        indent: true,
    }
}
pub fn scope_open_no_indent(name: &'static str) -> Doc {
    Doc::ScopeOpen {
        name: Some(name),
        indent: false,
    }
}
pub fn scope_close() -> Doc {
    Doc::ScopeClose { dedent: true }
}
pub fn scope_close_no_dedent() -> Doc {
    Doc::ScopeClose { dedent: false }
}

/// Wrap `body` in an indenting scope.
pub fn scoped(name: &'static str, body: Doc) -> Doc {
    Doc::concat([scope_open(name), body, scope_close()])
}
/// Wrap `body` in a scope that leaves the indent depth alone.
pub fn scoped_no_indent(name: &'static str, body: Doc) -> Doc {
    Doc::concat([scope_open_no_indent(name), body, scope_close_no_dedent()])
}

pub fn empty_or_break() -> Doc {
    Doc::Marker(Marker::EmptyOrBreak)
}
pub fn space_or_break() -> Doc {
    Doc::Marker(Marker::SpaceOrBreak)
}
pub fn empty_or_comma() -> Doc {
    Doc::Marker(Marker::EmptyOrComma)
}
pub fn empty_or_indent() -> Doc {
    Doc::Marker(Marker::EmptyOrIndent)
}
pub fn empty_or_dedent() -> Doc {
    Doc::Marker(Marker::EmptyOrDedent)
}
pub fn empty_or_open_paren() -> Doc {
    Doc::Marker(Marker::EmptyOrOpenParen)
}
pub fn empty_or_close_paren() -> Doc {
    Doc::Marker(Marker::EmptyOrCloseParen)
}

pub fn comma() -> Doc {
    text(",")
}
pub fn colon() -> Doc {
    text(":")
}
pub fn semicolon() -> Doc {
    text(";")
}
pub fn period() -> Doc {
    text(".")
}
pub fn question_mark() -> Doc {
    text("?")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn concat_flattens_and_prunes() {
        let d = Doc::concat([
            Doc::Nil,
            docs!["a", Doc::Nil, space()],
            Doc::when(false, || text("never")),
            text(""),
            "b".into(),
        ]);
        assert_eq!(
            d,
            Doc::Concat(vec![Doc::Text("a".into()), Doc::Space, Doc::Text("b".into())])
        );
    }

    #[test]
    fn concat_of_nothing_is_nil() {
        assert!(docs![Doc::Nil, ""].is_nil());
        assert_eq!(docs![Doc::Nil, "x"], Doc::Text("x".into()));
    }

    #[test]
    fn join_separates_only_between_items() {
        let d = Doc::join(["a", "b", "c"].map(text), comma());
        let mut leaves = String::new();
        d.for_each_leaf(&mut |l| {
            if let Doc::Text(t) = l {
                leaves.push_str(t)
            }
        });
        assert_eq!(leaves, "a,b,c");
        assert_eq!(d.leaf_count(), 5);
    }

    #[test]
    fn flat_widths() {
        assert_eq!(Marker::SpaceOrBreak.flat_width(), 1);
        assert_eq!(Marker::EmptyOrComma.flat_width(), 0);
        assert_eq!(Marker::EmptyOrOpenParen.flat_width(), 0);
    }
}
