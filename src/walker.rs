/// Depth-first tree walker: the state machine that turns a parsed C tree into
/// a [`Summary`]. Maintains one mutable frame ([`WalkState`]) per function,
/// overwritten on entry rather than pushed onto an explicit stack, mirroring
/// the fact that C does not permit nested function definitions.
use tree_sitter::Node;

use crate::alias::{AliasEntry, AliasKind, AliasTable};
use crate::expr::{self, Reduction};
use crate::nodeutil::{first_identifier_text, node_text};
use crate::size_param;
use crate::summary::{
    f_for_depth, FunctionRecord, LoopKind, LoopRecord, Recurrence, RecurrenceEntry,
    RecurrenceModel, Summary,
};

/// Mutable frame active while traversing one function body.
struct WalkState {
    current_fn: String,
    loop_depth: u32,
    max_loop_depth: u32,
    loop_count: u32,
    saw_recursive_call: bool,
    current_fn_calls: Vec<String>,
    size_param_name: Option<String>,
    size_param_index: Option<usize>,
    aliases: AliasTable,
    self_calls_a: u64,
    has_divide_b: bool,
    divide_b: u64,
    b_ambiguous: bool,
    has_decrease: bool,
    decrease_c: u64,
}

impl WalkState {
    fn new(current_fn: String) -> Self {
        WalkState {
            current_fn,
            loop_depth: 0,
            max_loop_depth: 0,
            loop_count: 0,
            saw_recursive_call: false,
            current_fn_calls: Vec::new(),
            size_param_name: None,
            size_param_index: None,
            aliases: AliasTable::new(),
            self_calls_a: 0,
            has_divide_b: false,
            divide_b: 0,
            b_ambiguous: false,
            has_decrease: false,
            decrease_c: 0,
        }
    }
}

pub struct Walker<'a> {
    src: &'a str,
    state: Option<WalkState>,
    /// Loop nesting depth while outside of any function frame. Real C source
    /// never has loops at file scope, but the walker stays well-defined if
    /// it does.
    ambient_loop_depth: u32,
    calls: Vec<String>,
    loops: Vec<LoopRecord>,
    functions: Vec<FunctionRecord>,
    recurrences: Vec<RecurrenceEntry>,
}

impl<'a> Walker<'a> {
    pub fn new(src: &'a str) -> Self {
        Walker {
            src,
            state: None,
            ambient_loop_depth: 0,
            calls: Vec::new(),
            loops: Vec::new(),
            functions: Vec::new(),
            recurrences: Vec::new(),
        }
    }

    pub fn run(&mut self, root: Node<'a>) {
        self.visit(root);
    }

    pub fn into_summary(self) -> Summary {
        Summary {
            loops: self.loops,
            calls: self.calls,
            functions: self.functions,
            recurrences: self.recurrences,
            recurrence: None,
        }
    }

    fn visit(&mut self, node: Node<'a>) {
        match node.kind() {
            "function_definition" => self.visit_function_definition(node),
            "for_statement" => self.visit_loop(node, LoopKind::For),
            "while_statement" => self.visit_loop(node, LoopKind::While),
            "assignment_expression" | "init_declarator" => self.visit_assignment_or_init(node),
            "call_expression" => self.visit_call(node),
            _ => self.descend(node),
        }
    }

    fn descend(&mut self, node: Node<'a>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child);
        }
    }

    fn visit_function_definition(&mut self, node: Node<'a>) {
        let declarator = node.child_by_field_name("declarator");
        let name = declarator
            .and_then(|d| first_identifier_text(d, self.src))
            .unwrap_or("")
            .to_string();

        log::debug!("entering function frame {:?}", name);

        // C forbids nested function definitions, so the caller's frame is
        // always None here in valid input; saving/restoring keeps the walker
        // well-defined if it isn't.
        let caller_frame = self.state.take();

        let mut frame = WalkState::new(name.clone());
        if let Some(sp) = size_param::select(node, self.src) {
            frame.size_param_name = Some(sp.name);
            frame.size_param_index = Some(sp.index);
        }
        self.state = Some(frame);

        self.descend(node);

        let frame = self.state.take().expect("frame pushed above");
        self.finalize_function(name, frame);

        self.state = caller_frame;
    }

    fn finalize_function(&mut self, name: String, frame: WalkState) {
        let is_recursive = frame.saw_recursive_call;

        let recurrence = if is_recursive {
            Some(build_recurrence(&frame))
        } else {
            None
        };

        log::debug!(
            "exiting function frame {:?} (recursive={}, loops={}, maxDepth={})",
            name,
            is_recursive,
            frame.loop_count,
            frame.max_loop_depth
        );

        if let Some(rec) = &recurrence {
            self.recurrences.push(RecurrenceEntry::from_recurrence(name.clone(), rec));
        }

        self.functions.push(FunctionRecord {
            name,
            is_recursive,
            calls: frame.current_fn_calls,
            loop_count: frame.loop_count,
            max_loop_depth: frame.max_loop_depth,
            size_param: frame.size_param_name,
            size_param_index: frame.size_param_index,
            recurrence,
        });
    }

    fn visit_loop(&mut self, node: Node<'a>, kind: LoopKind) {
        let depth = self.loop_depth() + 1;
        self.loops.push(LoopRecord::new(kind, depth));

        if let Some(state) = self.state.as_mut() {
            state.loop_count += 1;
            if depth > state.max_loop_depth {
                state.max_loop_depth = depth;
            }
        }

        self.inc_loop_depth();
        self.descend(node);
        self.dec_loop_depth();
    }

    fn loop_depth(&self) -> u32 {
        self.state.as_ref().map(|s| s.loop_depth).unwrap_or(self.ambient_loop_depth)
    }

    fn inc_loop_depth(&mut self) {
        match self.state.as_mut() {
            Some(state) => state.loop_depth += 1,
            None => self.ambient_loop_depth += 1,
        }
    }

    fn dec_loop_depth(&mut self) {
        match self.state.as_mut() {
            Some(state) => state.loop_depth -= 1,
            None => self.ambient_loop_depth -= 1,
        }
    }

    fn visit_assignment_or_init(&mut self, node: Node<'a>) {
        if let Some(size_name) = self.state.as_ref().and_then(|s| s.size_param_name.clone()) {
            let (lhs_name, rhs_text) = match node.kind() {
                "assignment_expression" => {
                    let lhs = node
                        .child_by_field_name("left")
                        .and_then(|left| first_identifier_text(left, self.src));
                    let rhs = node
                        .child_by_field_name("right")
                        .map(|right| node_text(right, self.src));
                    (lhs, rhs)
                }
                "init_declarator" => {
                    let lhs = first_identifier_text(node, self.src);
                    let rhs = node
                        .child_by_field_name("value")
                        .map(|value| node_text(value, self.src));
                    (lhs, rhs)
                }
                _ => (None, None),
            };

            if let (Some(lhs_name), Some(rhs_text)) = (lhs_name, rhs_text) {
                if let Some(reduction) = expr::analyze(rhs_text, &size_name) {
                    log::trace!("alias {:?} <- {:?} ({:?})", lhs_name, rhs_text, reduction);
                    let lhs_name = lhs_name.to_string();
                    if let Some(state) = self.state.as_mut() {
                        upsert_alias(&mut state.aliases, &lhs_name, reduction);
                    }
                }
            }
        }

        self.descend(node);
    }

    fn visit_call(&mut self, node: Node<'a>) {
        let name = node
            .child_by_field_name("function")
            .map(|f| node_text(f, self.src).trim().to_string())
            .unwrap_or_default();

        if !name.is_empty() {
            self.calls.push(name.clone());

            if let Some(state) = self.state.as_mut() {
                state.current_fn_calls.push(name.clone());
            }

            let is_self_call = self.state.as_ref().map(|s| s.current_fn == name).unwrap_or(false);
            if is_self_call {
                self.analyze_self_call(node);
            }
        }

        self.descend(node);
    }

    fn analyze_self_call(&mut self, node: Node<'a>) {
        let (size_name, size_index) = {
            let state = self.state.as_mut().expect("self-call implies an active frame");
            state.saw_recursive_call = true;
            state.self_calls_a += 1;

            match (state.size_param_name.clone(), state.size_param_index) {
                (Some(name), Some(index)) => (name, index),
                _ => return,
            }
        };

        let args_node = match node.child_by_field_name("arguments") {
            Some(n) => n,
            None => return,
        };

        let args_text = node_text(args_node, self.src).trim();
        let inner = args_text
            .strip_prefix('(')
            .unwrap_or(args_text)
            .strip_suffix(')')
            .unwrap_or(args_text);
        let tokens: Vec<&str> = inner.split(',').map(|t| t.trim()).collect();

        let token = match tokens.get(size_index) {
            Some(t) if !t.is_empty() => *t,
            _ => return,
        };

        if let Some(reduction) = expr::analyze(token, &size_name) {
            log::trace!("self-call reduction on {:?}: {:?}", size_name, reduction);
            self.apply_reduction(reduction);
            return;
        }

        if expr::is_simple_identifier(token) {
            let alias = self.state.as_ref().and_then(|s| s.aliases.get(token).cloned());
            if let Some(alias) = alias {
                log::trace!("self-call reduction via alias {:?}: {:?}", token, alias);
                self.apply_alias(alias);
            }
        }
    }

    fn apply_reduction(&mut self, reduction: Reduction) {
        let state = self.state.as_mut().expect("self-call implies an active frame");
        match reduction {
            Reduction::Divide(k) | Reduction::Shift(k) => consider_divide(state, k),
            Reduction::Decrement(c) => consider_decrease(state, c),
        }
    }

    fn apply_alias(&mut self, alias: AliasEntry) {
        let state = self.state.as_mut().expect("self-call implies an active frame");
        match alias.kind {
            AliasKind::Divide | AliasKind::Shift => consider_divide(state, alias.k),
            AliasKind::Decrement => consider_decrease(state, alias.k),
        }
    }
}

fn upsert_alias(table: &mut AliasTable, name: &str, reduction: Reduction) {
    match reduction {
        Reduction::Divide(k) => table.upsert(name, AliasKind::Divide, k),
        Reduction::Shift(k) => table.upsert(name, AliasKind::Shift, k),
        Reduction::Decrement(c) => table.upsert(name, AliasKind::Decrement, c),
    }
}

fn consider_divide(state: &mut WalkState, b: u64) {
    if !state.has_divide_b {
        state.has_divide_b = true;
        state.divide_b = b;
        return;
    }
    if b != state.divide_b {
        state.b_ambiguous = true;
        if b < state.divide_b {
            state.divide_b = b;
        }
    }
}

fn consider_decrease(state: &mut WalkState, c: u64) {
    if !state.has_decrease {
        state.has_decrease = true;
        state.decrease_c = c;
        return;
    }
    if c < state.decrease_c {
        state.decrease_c = c;
    }
}

fn build_recurrence(frame: &WalkState) -> Recurrence {
    let mut rec = Recurrence {
        a: frame.self_calls_a,
        f: f_for_depth(frame.max_loop_depth),
        b: None,
        model: None,
        c: None,
        b_ambiguous: None,
    };

    if frame.has_decrease {
        rec.model = Some(RecurrenceModel::Decrease);
        rec.c = Some(frame.decrease_c);
    }

    // Divide is checked last and overwrites the model when both reduction
    // families were observed on the same function: specified precedence,
    // not necessarily intended by whoever wrote it that way originally.
    if frame.has_divide_b && frame.divide_b > 1 {
        rec.model = Some(RecurrenceModel::Divide);
        rec.b = Some(frame.divide_b);
        rec.c = None;
        rec.b_ambiguous = if frame.b_ambiguous { Some(true) } else { None };
    }

    rec
}
