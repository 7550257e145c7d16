/// Chooses the function parameter treated as the input size `n`.
///
/// Run on entering a `function_definition`, over the `parameter_declaration`
/// children of the `parameter_list` descended from the `declarator` field:
///
/// 1. If any parameter's identifier is literally `n`, pick it.
/// 2. Otherwise pick the rightmost parameter whose declarator has no pointer.
/// 3. Otherwise no size parameter is recorded.
use crate::nodeutil::{first_descendant_of_type, first_identifier_text, node_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeParam {
    pub name: String,
    pub index: usize,
}

pub fn select<'a>(function_definition: tree_sitter::Node<'a>, src: &'a str) -> Option<SizeParam> {
    let declarator = function_definition.child_by_field_name("declarator")?;
    let param_list = first_descendant_of_type(declarator, "parameter_list")?;

    let mut cursor = param_list.walk();
    let params: Vec<tree_sitter::Node> = param_list
        .children(&mut cursor)
        .filter(|c| c.kind() == "parameter_declaration")
        .collect();

    for (index, param) in params.iter().enumerate() {
        if let Some(name) = first_identifier_text(*param, src) {
            if name == "n" {
                return Some(SizeParam { name: name.to_string(), index });
            }
        }
    }

    for (index, param) in params.iter().enumerate().rev() {
        if is_pointer_declaration(*param, src) {
            continue;
        }
        if let Some(name) = first_identifier_text(*param, src) {
            return Some(SizeParam { name: name.to_string(), index });
        }
    }

    None
}

fn is_pointer_declaration(param: tree_sitter::Node, src: &str) -> bool {
    if first_descendant_of_type(param, "pointer_declarator").is_some() {
        return true;
    }
    node_text(param, src).contains('*')
}
