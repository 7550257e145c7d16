/// DepthFirstWalk is a small helper to do simple iterations over a tree-sitter node/tree,
/// implementing Iterator for simple for-in uses, as well as a callback-based traversal function,
/// useful if you want to/need to not traverse deeper when a specific condition is met.
pub struct DepthFirstWalk<'a> {
    root: tree_sitter::Node<'a>,
    cursor: tree_sitter::TreeCursor<'a>,
    done: bool,
}

pub fn depth_first<'a>(node: tree_sitter::Node<'a>) -> DepthFirstWalk<'a> {
    DepthFirstWalk{
        root: node,
        cursor: node.walk(),
        done: false,
    }
}

impl<'a> Iterator for DepthFirstWalk<'a> {
    type Item = tree_sitter::Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();

        if self.cursor.goto_first_child() {
            return Some(node);
        }
        if self.cursor.goto_next_sibling() {
            return Some(node);
        }

        loop {
            self.cursor.goto_parent();

            if self.cursor.node() == self.root {
                self.done = true;
                return Some(node);
            }

            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
        }
    }
}

impl<'a> DepthFirstWalk<'a> {
    /// Call the given cb for each node, skipping any descendants of a given node if the cb returns
    /// false. Additionally, call on_descent when descending down into a new "layer" and on_ascent
    /// when coming back up.
    pub fn traverse_with_depth<F, D, A>(&mut self, mut cb: F, mut on_descent: D, mut on_ascent: A)
        where F: FnMut(tree_sitter::Node<'a>) -> bool,
              D: FnMut(tree_sitter::Node<'a>, tree_sitter::Node<'a>),
              A: FnMut(tree_sitter::Node<'a>, tree_sitter::Node<'a>)
              {
        'outer: loop {
            let mut node = self.cursor.node();
            if cb(node) {
                if self.cursor.goto_first_child() {
                    on_descent(node, self.cursor.node());
                    continue;
                }
            }

            if self.cursor.goto_next_sibling() {
                continue;
            }

            loop {
                self.cursor.goto_parent();
                on_ascent(node, self.cursor.node());

                node = self.cursor.node();

                if node == self.root {
                    return;
                }

                if self.cursor.goto_next_sibling() {
                    continue 'outer;
                }
            }
        }
    }

    /// Call the given cb for each node, skipping any descendants of a given node if the cb returns
    /// false.
    pub fn traverse<F>(&mut self, cb: F) where F: FnMut(tree_sitter::Node<'a>) -> bool {
        self.traverse_with_depth(cb, |_, _|{}, |_, _|{})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_tree() -> tree_sitter::Tree {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(tree_sitter_c::language()).unwrap();
        parser
            .parse("int foo(int a, int b, int c) { return a + b + c; }", None)
            .unwrap()
    }

    #[test]
    /// The iterator form of depth_first visits the same nodes, in the same
    /// order, as the callback form with a callback that always descends.
    fn test_depth_first_matches_traverse_all() {
        let tree = sample_tree();

        let mut via_iterator = vec![];
        for node in depth_first(tree.root_node()) {
            via_iterator.push(node.kind());
        }

        let mut via_traverse = vec![];
        depth_first(tree.root_node()).traverse(|node| {
            via_traverse.push(node.kind());
            true
        });

        assert_eq!(via_iterator, via_traverse);
        assert!(via_iterator.contains(&"function_definition"));
        assert!(via_iterator.contains(&"parameter_list"));
        assert!(via_iterator.contains(&"parameter_declaration"));
        assert!(via_iterator.contains(&"compound_statement"));
        assert!(via_iterator.contains(&"return_statement"));
        assert!(via_iterator.contains(&"binary_expression"));

        // foo, a, b, c: one identifier per declared name, none of them
        // reached twice.
        assert_eq!(via_iterator.iter().filter(|&&k| k == "identifier").count(), 4);
    }

    #[test]
    /// Returning false from the callback skips descent into that node's
    /// children: the identifiers inside the first binary_expression
    /// encountered are never visited.
    fn test_traverse_can_skip_descent() {
        let tree = sample_tree();

        let mut node_kinds = vec![];
        depth_first(tree.root_node()).traverse(|node| {
            node_kinds.push(node.kind());
            node.kind() != "binary_expression"
        });

        assert_eq!(node_kinds.iter().filter(|&&k| k == "binary_expression").count(), 1);
        // Only the 4 declared names (foo, a, b, c) are reached; the
        // identifiers inside the pruned expression (a + b + c) are not.
        assert_eq!(node_kinds.iter().filter(|&&k| k == "identifier").count(), 4);
    }

    #[test]
    /// traverse_with_depth(cb, on_descent, on_ascent) reports a matching
    /// descend/ascend transition for every layer entered, starting at the
    /// root and ending back at it.
    fn test_traverse_with_depth_brackets_every_layer() {
        let tree = sample_tree();
        let root_kind = tree.root_node().kind();

        let transitions = std::cell::RefCell::new(vec![]);

        depth_first(tree.root_node()).traverse_with_depth(
            |_| true,
            |from, to| {
                transitions.borrow_mut().push(("DESCEND", from.kind(), to.kind()));
            },
            |from, to| {
                transitions.borrow_mut().push(("ASCEND", from.kind(), to.kind()));
            },
        );

        let transitions = transitions.into_inner();
        assert!(!transitions.is_empty());

        let descents = transitions.iter().filter(|(dir, _, _)| *dir == "DESCEND").count();
        let ascents = transitions.iter().filter(|(dir, _, _)| *dir == "ASCEND").count();
        assert_eq!(descents, ascents);

        assert_eq!(transitions.first().unwrap().1, root_kind);
        assert_eq!(transitions.last().unwrap().2, root_kind);
    }
}
