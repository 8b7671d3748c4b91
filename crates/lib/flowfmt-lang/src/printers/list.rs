//! Delimited lists: collection literals, call arguments and type lists.
//!
//! A list is a single indenting scope. Items are separated by a comma and a
//! space-or-break, and the last item carries an [`empty_or_comma`] so a
//! trailing comma shows up only when the list is broken over several lines.
use itertools::{Itertools, Position};

use crate::doc::*;
use crate::docs;

fn separated(items: Vec<Doc>) -> Doc {
    Doc::concat(items.into_iter().with_position().map(|(pos, item)| match pos {
        Position::First | Position::Middle => docs![item, comma(), space_or_break()],
        Position::Last | Position::Only => docs![item, empty_or_comma()],
    }))
}

/// `open item, item, item close`; breaks to one item per line.
/// An empty list is just the bracket pair.
pub fn delimited(name: &'static str, open: &str, items: Vec<Doc>, close: &str) -> Doc {
    if items.is_empty() {
        return docs![open, close];
    }
    docs![
        open,
        scope_open(name),
        empty_or_break(),
        separated(items),
        empty_or_break(),
        scope_close(),
        close
    ]
}

/// `{ a, b }`, padded with a space inside the braces when flat.
pub fn braced(name: &'static str, items: Vec<Doc>) -> Doc {
    if items.is_empty() {
        return text("{}");
    }
    docs![
        "{",
        scope_open(name),
        space_or_break(),
        separated(items),
        space_or_break(),
        scope_close(),
        "}"
    ]
}
