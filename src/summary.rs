use serde::Serialize;

/// Work-per-level derived from a function's deepest lexical loop nesting.
///
/// `0 -> "1"`, `1 -> "n"`, `d >= 2 -> "n^d"`.
pub fn f_for_depth(depth: u32) -> String {
    match depth {
        0 => "1".to_string(),
        1 => "n".to_string(),
        d => format!("n^{}", d),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopKind {
    For,
    While,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoopRecord {
    pub kind: LoopKind,
    /// Always the literal `"n"`; the bound expression itself is not analyzed.
    pub bound: String,
    pub depth: u32,
}

impl LoopRecord {
    pub fn new(kind: LoopKind, depth: u32) -> Self {
        LoopRecord { kind, bound: "n".to_string(), depth }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceModel {
    Divide,
    Decrease,
}

/// Recurrence evidence embedded in a [`FunctionRecord`].
///
/// Field order matches the wire shape: `a, f, b?, model?, c?, b_ambiguous?`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Recurrence {
    pub a: u64,
    pub f: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<RecurrenceModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b_ambiguous: Option<bool>,
}

/// Flattened, top-level counterpart of [`Recurrence`] carrying the owning
/// function's name up front.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecurrenceEntry {
    pub function: String,
    pub a: u64,
    pub f: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<RecurrenceModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b_ambiguous: Option<bool>,
}

impl RecurrenceEntry {
    pub fn from_recurrence(function: String, r: &Recurrence) -> Self {
        RecurrenceEntry {
            function,
            a: r.a,
            f: r.f.clone(),
            b: r.b,
            model: r.model,
            c: r.c,
            b_ambiguous: r.b_ambiguous,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FunctionRecord {
    pub name: String,
    pub is_recursive: bool,
    pub calls: Vec<String>,
    #[serde(rename = "loopCount")]
    pub loop_count: u32,
    #[serde(rename = "maxLoopDepth")]
    pub max_loop_depth: u32,
    #[serde(rename = "sizeParam", skip_serializing_if = "Option::is_none")]
    pub size_param: Option<String>,
    #[serde(rename = "sizeParamIndex", skip_serializing_if = "Option::is_none")]
    pub size_param_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

/// Caller-convenience mirror of the sole [`RecurrenceEntry`], published only
/// when exactly one recursive function was found and it fits the divide model.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConvenienceRecurrence {
    pub a: u64,
    pub b: u64,
    pub f: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub loops: Vec<LoopRecord>,
    pub calls: Vec<String>,
    pub functions: Vec<FunctionRecord>,
    pub recurrences: Vec<RecurrenceEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<ConvenienceRecurrence>,
}

impl Summary {
    pub fn empty() -> Self {
        Summary {
            loops: Vec::new(),
            calls: Vec::new(),
            functions: Vec::new(),
            recurrences: Vec::new(),
            recurrence: None,
        }
    }
}
