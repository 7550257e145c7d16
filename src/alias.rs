/// Per-function mapping from local variable name to a recorded size
/// reduction, learned from simple assignments and initializers whose RHS
/// reduces the size parameter (e.g. `mid = n/2`). Consulted when a self-call
/// argument is a bare identifier rather than an expression.
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasKind {
    Divide,
    Shift,
    Decrement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub name: String,
    pub kind: AliasKind,
    pub k: u64,
}

/// Last-seen-wins table, scoped to a single function frame and discarded on
/// function exit.
#[derive(Debug, Default)]
pub struct AliasTable {
    entries: HashMap<String, AliasEntry>,
}

impl AliasTable {
    pub fn new() -> Self {
        AliasTable::default()
    }

    pub fn upsert(&mut self, name: &str, kind: AliasKind, k: u64) {
        self.entries.insert(
            name.to_string(),
            AliasEntry { name: name.to_string(), kind, k },
        );
    }

    pub fn get(&self, name: &str) -> Option<&AliasEntry> {
        self.entries.get(name)
    }
}
