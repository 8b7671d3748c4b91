//! Core of **flowfmt**, a width-aware pretty printer for Flow-annotated JavaScript.
//!
//! Printing rules looked up in a [`registry::Registry`] turn a syntax tree
//! into a [`doc::Doc`]; [`render`] then decides for every scope whether it
//! fits on one line and emits the final text.

pub mod ast;
pub mod doc;
pub mod parser;
pub mod printer;
pub mod printers;
pub mod registry;
pub mod render;
pub mod utils;

pub use log;

use ast::Node;
use printer::Printer;
use registry::Registry;
use utils::error::{FormatError, ReportableError};

/// Layout parameters for one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum line width in columns.
    pub max_width: usize,
    /// Spaces per indent level.
    pub indent_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_width: 80,
            indent_size: 2,
        }
    }
}

/// Print `node` with the rules of `registry` and render it under `config`.
///
/// Fails without producing any text when a node kind has no rule, or when a
/// rule produced an unbalanced document.
pub fn format_node(node: &Node, registry: &Registry, config: &Config) -> Result<String, FormatError> {
    let doc = Printer::new(registry).print(node)?;
    let layout = render::Layout::measure(&doc)?;
    log::debug!(
        "formatting {} with {} scopes at width {}",
        node.kind(),
        layout.scope_count(),
        config.max_width
    );
    Ok(layout.emit(config).text)
}

/// Parse `src` and format it with the default rule set.
pub fn format_source(src: &str, config: &Config) -> Result<String, Vec<Box<dyn ReportableError>>> {
    let program = parser::parse_program(src)?;
    format_node(&program, &Registry::default(), config)
        .map_err(|e| vec![Box::new(e) as Box<dyn ReportableError>])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::NodeKind;
    use crate::ast::builder::*;
    use crate::render::{Layout, Mode};
    use crate::utils::error::dump_to_string;

    fn at(src: &str, max_width: usize) -> String {
        let config = Config {
            max_width,
            indent_size: 2,
        };
        format_source(src, &config).unwrap_or_else(|e| panic!("{}", dump_to_string(&e)))
    }

    #[test]
    fn unknown_kind_produces_no_text() {
        let mut reg = Registry::default();
        reg.unregister(NodeKind::NumericLiteral);
        let prog = program(vec![
            const_decl("a", crate::ident!("b")),
            const_decl("c", crate::number!(1)),
        ]);
        assert_eq!(
            format_node(&prog, &reg, &Config::default()),
            Err(FormatError::UnhandledNodeKind(NodeKind::NumericLiteral))
        );
    }

    #[test]
    fn idempotent_at_several_widths() {
        let src = "const total: number = price * quantity + shipping - discount;\n\
                   if (user && user.isAdmin || override) { grant(user, ['read', 'write', 'delete']); }\n\
                   const view = { title: title, visible: count > 0 ? true : false, items: [] };\n\
                   type Callback<T> = (error: ?Error, value: T, ...rest: Array<mixed>) => void;\n";
        for width in [80, 60, 40, 20, 10] {
            let once = at(src, width);
            let twice = at(&once, width);
            assert_eq!(once, twice, "not idempotent at width {width}");
        }
    }

    #[test]
    fn flat_scopes_respect_the_width() {
        let src = "fetch(endpoint, { method: 'POST', headers: headers, body: payload }, retries && enabled);\n\
                   if (ready && !sent) { send(payload); log(['sent', count]); }";
        let prog = parser::parse_program(src).unwrap();
        let reg = Registry::default();
        for max_width in [20, 40, 60, 100] {
            let config = Config {
                max_width,
                indent_size: 2,
            };
            let doc = Printer::new(&reg).print(&prog).unwrap();
            let rendered = Layout::measure(&doc).unwrap().emit(&config);
            for scope in &rendered.scopes {
                match scope.mode {
                    Mode::Flat => assert!(scope.start_column + scope.flat_width <= max_width),
                    Mode::Broken => assert!(scope.realized_breaks > 0, "{scope:?}"),
                }
            }
        }
    }

    #[test]
    fn last_list_item_fits_with_its_comma() {
        assert_eq!(
            at("f([aaaa, bbbb], [cccc, dddd]);", 14),
            "f(\n  [\n    aaaa,\n    bbbb,\n  ],\n  [\n    cccc,\n    dddd,\n  ],\n);\n"
        );
    }

    #[test]
    fn minimal_parens_for_plain_chain() {
        assert_eq!(at("a && b && c;", 80), "a && b && c;\n");
    }
}
