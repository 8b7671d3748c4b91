//! Resolves the scopes of a [`Doc`] against a width budget and emits text.
//!
//! Rendering runs in two passes over the flattened leaves of the document.
//! [`Layout::measure`] checks scope balance and computes the single-line
//! width of every scope. [`Layout::emit`] walks the leaves once more, decides
//! each scope's [`Mode`] at the column where it opens, and writes the text.
use crate::Config;
use crate::doc::{Doc, Marker};
use crate::utils::error::{FormatError, ScopeViolation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Flat,
    Broken,
}

#[derive(Clone, Debug)]
struct Scope {
    name: Option<&'static str>,
    indent: bool,
    /// width of the scope's content rendered on one line
    flat_width: usize,
    /// text that must follow the close on the same line
    tail_width: usize,
    forced: bool,
}

impl Scope {
    fn display_name(&self) -> String {
        self.name.unwrap_or("<anonymous>").to_string()
    }
}

/// Outcome of one scope after emission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedScope {
    pub name: Option<&'static str>,
    pub mode: Mode,
    pub start_column: usize,
    pub flat_width: usize,
    /// newlines written by markers that resolved against this scope
    pub realized_breaks: usize,
}

#[derive(Clone, Debug)]
pub struct Rendered {
    pub text: String,
    /// In the order the scopes were opened.
    pub scopes: Vec<ResolvedScope>,
}

fn leaf_width(leaf: &Doc) -> usize {
    match leaf {
        Doc::Text(t) => t.chars().count(),
        Doc::Space => 1,
        Doc::Marker(m) => m.flat_width(),
        _ => 0,
    }
}

/// Measured document: the leaves in order plus one entry per scope.
pub struct Layout<'d> {
    leaves: Vec<&'d Doc>,
    scopes: Vec<Scope>,
}

impl<'d> Layout<'d> {
    /// Phase 1. Fails on the first scope discipline violation.
    pub fn measure(doc: &'d Doc) -> Result<Self, FormatError> {
        let mut leaves = Vec::with_capacity(doc.leaf_count());
        doc.for_each_leaf(&mut |leaf| leaves.push(leaf));

        let mut scopes: Vec<Scope> = Vec::new();
        let mut closes = Vec::new();
        let mut stack: Vec<usize> = Vec::new();
        for (position, leaf) in leaves.iter().enumerate() {
            match leaf {
                Doc::ScopeOpen { name, indent } => {
                    stack.push(scopes.len());
                    scopes.push(Scope {
                        name: *name,
                        indent: *indent,
                        flat_width: 0,
                        tail_width: 0,
                        forced: false,
                    });
                    closes.push(position);
                }
                Doc::ScopeClose { dedent } => {
                    let idx = stack
                        .pop()
                        .ok_or(ScopeViolation::UnmatchedClose { position })?;
                    if scopes[idx].indent != *dedent {
                        return Err(ScopeViolation::MismatchedClose {
                            scope: scopes[idx].display_name(),
                        }
                        .into());
                    }
                    closes[idx] = position;
                    if let Some(&parent) = stack.last() {
                        scopes[parent].flat_width += scopes[idx].flat_width;
                        scopes[parent].forced |= scopes[idx].forced;
                    }
                }
                Doc::Marker(marker) => {
                    let top = stack
                        .last()
                        .ok_or(ScopeViolation::MarkerOutsideScope { marker: *marker })?;
                    scopes[*top].flat_width += marker.flat_width();
                }
                Doc::HardBreak => {
                    if let Some(&top) = stack.last() {
                        scopes[top].forced = true;
                    }
                }
                other => {
                    if let Some(&top) = stack.last() {
                        scopes[top].flat_width += leaf_width(other);
                    }
                }
            }
        }
        if let Some(&idx) = stack.last() {
            return Err(ScopeViolation::Unclosed {
                scope: scopes[idx].display_name(),
            }
            .into());
        }

        // run[i]: width of the unbreakable text starting at leaf i. A trailing
        // comma sticks to the text before it, so it counts as one column.
        let mut run = vec![0usize; leaves.len() + 1];
        for i in (0..leaves.len()).rev() {
            run[i] = match leaves[i] {
                Doc::Text(_) | Doc::Space => leaf_width(leaves[i]) + run[i + 1],
                Doc::Marker(Marker::EmptyOrComma) => 1 + run[i + 1],
                Doc::ScopeClose { .. } => run[i + 1],
                _ => 0,
            };
        }
        for (scope, close) in scopes.iter_mut().zip(closes) {
            scope.tail_width = run[close + 1];
        }

        log::debug!(
            "measured document: {} leaves, {} scopes",
            leaves.len(),
            scopes.len()
        );
        Ok(Self { leaves, scopes })
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Phase 2.
    pub fn emit(&self, config: &Config) -> Rendered {
        let mut e = Emitter::new(config);
        let mut resolved = Vec::with_capacity(self.scopes.len());
        // (scope index, mode, whether it changed the indent depth)
        let mut stack: Vec<(usize, Mode, bool)> = Vec::new();
        let mut next_scope = 0;

        for leaf in &self.leaves {
            match leaf {
                Doc::Text(t) => e.text(t),
                Doc::Space => e.space(),
                Doc::HardBreak => e.newline(),
                Doc::ScopeOpen { .. } => {
                    let idx = next_scope;
                    next_scope += 1;
                    let scope = &self.scopes[idx];
                    let start = e.start_column();
                    let needed = start + scope.flat_width + scope.tail_width;
                    let mode = if scope.forced || needed > config.max_width {
                        Mode::Broken
                    } else {
                        Mode::Flat
                    };
                    log::trace!(
                        "scope {:?} at column {start}: width {} + tail {} -> {mode:?}",
                        scope.name,
                        scope.flat_width,
                        scope.tail_width
                    );
                    let indented = scope.indent && mode == Mode::Broken;
                    if indented {
                        e.depth += 1;
                    }
                    stack.push((idx, mode, indented));
                    resolved.push(ResolvedScope {
                        name: scope.name,
                        mode,
                        start_column: start,
                        flat_width: scope.flat_width,
                        realized_breaks: 0,
                    });
                }
                Doc::ScopeClose { .. } => {
                    // balance was checked while measuring
                    if let Some((_, _, true)) = stack.pop() {
                        e.depth = e.depth.saturating_sub(1);
                    }
                }
                Doc::Marker(marker) => {
                    let Some(&(idx, mode, _)) = stack.last() else {
                        continue;
                    };
                    if e.marker(*marker, mode) {
                        resolved[idx].realized_breaks += 1;
                    }
                }
                Doc::Nil | Doc::Concat(_) => {}
            }
        }
        log::debug!("rendered {} bytes", e.out.len());
        Rendered {
            text: e.out,
            scopes: resolved,
        }
    }
}

/// Text sink that tracks the column and writes indentation lazily, so a
/// break followed by an indent change still lands at the right depth.
struct Emitter {
    out: String,
    column: usize,
    depth: usize,
    indent_size: usize,
    /// the current line holds visible text
    dirty: bool,
}

impl Emitter {
    fn new(config: &Config) -> Self {
        Self {
            out: String::new(),
            column: 0,
            depth: 0,
            indent_size: config.indent_size,
            dirty: false,
        }
    }

    fn start_column(&self) -> usize {
        if self.dirty {
            self.column
        } else {
            self.depth * self.indent_size
        }
    }

    fn text(&mut self, t: &str) {
        if !self.dirty {
            let indent = self.depth * self.indent_size;
            self.out.extend(std::iter::repeat_n(' ', indent));
            self.column = indent;
            self.dirty = true;
        }
        self.out.push_str(t);
        self.column += t.chars().count();
    }

    fn space(&mut self) {
        if self.dirty {
            self.out.push(' ');
            self.column += 1;
        }
    }

    fn newline(&mut self) {
        let trimmed = self.out.trim_end_matches(' ').len();
        self.out.truncate(trimmed);
        self.out.push('\n');
        self.column = 0;
        self.dirty = false;
    }

    /// Breaks collapse: a soft break on an empty line is a no-op.
    fn soft_break(&mut self) -> bool {
        if self.dirty {
            self.newline();
            true
        } else {
            false
        }
    }

    /// Returns whether a newline was written.
    fn marker(&mut self, marker: Marker, mode: Mode) -> bool {
        match (mode, marker) {
            (Mode::Flat, Marker::SpaceOrBreak) => {
                self.space();
                false
            }
            (Mode::Flat, _) => false,
            (Mode::Broken, Marker::EmptyOrBreak | Marker::SpaceOrBreak) => self.soft_break(),
            (Mode::Broken, Marker::EmptyOrComma) => {
                self.text(",");
                false
            }
            (Mode::Broken, Marker::EmptyOrIndent) => {
                self.depth += 1;
                false
            }
            (Mode::Broken, Marker::EmptyOrDedent) => {
                self.depth = self.depth.saturating_sub(1);
                false
            }
            (Mode::Broken, Marker::EmptyOrOpenParen) => {
                self.text("(");
                false
            }
            (Mode::Broken, Marker::EmptyOrCloseParen) => {
                self.text(")");
                false
            }
        }
    }
}

/// Resolve and emit `doc` in one go.
pub fn render(doc: &Doc, config: &Config) -> Result<String, FormatError> {
    Layout::measure(doc).map(|layout| layout.emit(config).text)
}
