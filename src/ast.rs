use serde::Serialize;

/// Minimal AST descriptor returned alongside a [`crate::summary::Summary`].
///
/// Deliberately thin: callers that need the full tree reparse with
/// `tree-sitter` directly. This is just enough to confirm what got parsed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AstDescriptor {
    pub language: String,
    #[serde(rename = "rootType")]
    pub root_type: String,
}

impl AstDescriptor {
    pub fn unknown() -> Self {
        AstDescriptor {
            language: "unknown".to_string(),
            root_type: "unknown".to_string(),
        }
    }
}
