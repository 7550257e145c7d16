/// Small node helpers shared by the size-parameter selector, alias tracker,
/// and tree walker: substring extraction by byte range and first-descendant
/// searches, built on top of [`crate::traverse::depth_first`].
use crate::traverse::depth_first;

pub fn node_text<'s>(node: tree_sitter::Node, src: &'s str) -> &'s str {
    &src[node.start_byte()..node.end_byte()]
}

pub fn trimmed_text<'s>(node: tree_sitter::Node, src: &'s str) -> &'s str {
    node_text(node, src).trim()
}

/// First node matching `kind` in a pre-order depth-first search rooted at
/// `node` (inclusive of `node` itself).
pub fn first_descendant_of_type<'a>(node: tree_sitter::Node<'a>, kind: &str) -> Option<tree_sitter::Node<'a>> {
    if node.kind() == kind {
        return Some(node);
    }

    let mut found = None;
    depth_first(node).traverse(|descendant| {
        if found.is_some() {
            return false;
        }
        if descendant.kind() == kind {
            found = Some(descendant);
            return false;
        }
        true
    });
    found
}

pub fn first_identifier<'a>(node: tree_sitter::Node<'a>) -> Option<tree_sitter::Node<'a>> {
    first_descendant_of_type(node, "identifier")
}

pub fn first_identifier_text<'s>(node: tree_sitter::Node, src: &'s str) -> Option<&'s str> {
    first_identifier(node).map(|id| node_text(id, src))
}

/// Direct children of `node` whose kind equals `kind`, in source order.
pub fn children_of_type<'a>(node: tree_sitter::Node<'a>, kind: &str) -> Vec<tree_sitter::Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).filter(|c| c.kind() == kind).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> tree_sitter::Tree {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(tree_sitter_c::language()).unwrap();
        parser.parse(src, None).unwrap()
    }

    #[test]
    fn finds_first_identifier_in_function_declarator() {
        let src = "int f(int n) { return n; }";
        let tree = parse(src);
        let func = first_descendant_of_type(tree.root_node(), "function_definition").unwrap();
        let declarator = func.child_by_field_name("declarator").unwrap();
        let name = first_identifier_text(declarator, src).unwrap();
        assert_eq!(name, "f");
    }

    #[test]
    fn returns_none_when_type_absent() {
        let src = "int f(int n) { return n; }";
        let tree = parse(src);
        assert!(first_descendant_of_type(tree.root_node(), "while_statement").is_none());
    }
}
