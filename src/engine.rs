/// `analyze` is the single entry point the HTTP layer (or any other caller)
/// needs. It owns parser and tree setup per call; there is no cross-request
/// sharing of tree state (see DESIGN.md / SPEC_FULL.md §5).
use tree_sitter::Parser;

use crate::ast::AstDescriptor;
use crate::summary::{ConvenienceRecurrence, RecurrenceModel, Summary};
use crate::walker::Walker;

const SUPPORTED_LANGUAGE: &str = "c";

/// Parse `code` as `language` and return its AST descriptor and recurrence
/// summary. Never fails: unsupported languages, empty input, and degenerate
/// parses all resolve to the empty-summary shape (SPEC_FULL.md §7).
pub fn analyze(language: &str, code: &str) -> (AstDescriptor, Summary) {
    let ast_language = if language.is_empty() { "unknown".to_string() } else { language.to_string() };

    if language != SUPPORTED_LANGUAGE {
        log::debug!("language {:?} is not supported, returning empty summary", language);
        return (unknown_ast(ast_language), Summary::empty());
    }

    if code.trim().is_empty() {
        log::debug!("empty code for language \"c\", returning empty summary");
        return (unknown_ast(ast_language), Summary::empty());
    }

    let mut parser = Parser::new();
    parser
        .set_language(tree_sitter_c::language())
        .expect("tree-sitter-c grammar is ABI-compatible with this tree-sitter version");

    let tree = match parser.parse(code, None) {
        Some(tree) => tree,
        None => {
            log::warn!("tree-sitter produced no tree for {} bytes of input", code.len());
            return (unknown_ast(ast_language), Summary::empty());
        }
    };

    let root = tree.root_node();
    let root_type = root.kind().to_string();

    if root.child_count() == 0 {
        log::warn!("parse produced a degenerate tree with root type {:?}", root_type);
    }

    let mut walker = Walker::new(code);
    walker.run(root);

    let mut summary = walker.into_summary();
    attach_convenience_recurrence(&mut summary);

    (AstDescriptor { language: ast_language, root_type }, summary)
}

fn unknown_ast(language: String) -> AstDescriptor {
    AstDescriptor { language, root_type: "unknown".to_string() }
}

/// Publishes the top-level convenience `recurrence` mirror described in
/// SPEC_FULL.md §4.7: only when exactly one recursive function was found and
/// it fits the divide model with `b > 1`.
fn attach_convenience_recurrence(summary: &mut Summary) {
    if summary.recurrences.len() != 1 {
        return;
    }

    let entry = &summary.recurrences[0];
    if entry.model != Some(RecurrenceModel::Divide) {
        return;
    }

    if let Some(b) = entry.b {
        if b > 1 {
            summary.recurrence = Some(ConvenienceRecurrence { a: entry.a, b, f: entry.f.clone() });
        }
    }
}
