/// Recognizes the three size-reducing idioms this analyzer understands over a
/// chosen parameter name: `n/k`, `n>>k`, `n-c`. Operates on raw substrings,
/// not sub-trees (a deliberate simplification, see DESIGN.md) that
/// tolerates formatting variation but misses idioms involving parentheses,
/// compound arithmetic, or commutation (e.g. `2*n/...`). Do not try to
/// "improve" the matching beyond these three idioms.

/// Largest shift amount honored before the resulting divide factor is
/// clamped; `2^29` still fits comfortably in a `u64`.
const MAX_SHIFT: u32 = 29;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Size shrinks by division, e.g. `n/2`.
    Divide(u64),
    /// Size shrinks by a right shift, e.g. `n>>1`; the magnitude is already
    /// the resulting divide factor (`2^k`).
    Shift(u64),
    /// Size shrinks by subtraction, e.g. `n-1`.
    Decrement(u64),
}

/// `e` is an expression's source text, `param` is the size-parameter name.
/// Returns `None` when `param` does not appear in `e`, or when the matched
/// idiom's magnitude fails to parse or falls outside its valid range.
pub fn analyze(e: &str, param: &str) -> Option<Reduction> {
    let trimmed = e.trim();
    let trimmed = trimmed.trim_end_matches(';').trim();

    if param.is_empty() || !trimmed.contains(param) {
        return None;
    }

    if let Some(idx) = trimmed.find('/') {
        let suffix = trimmed[idx + 1..].trim();
        return parse_u64(suffix).filter(|&k| k > 1).map(Reduction::Divide);
    }

    if let Some(idx) = trimmed.find(">>") {
        let suffix = trimmed[idx + 2..].trim();
        return parse_u64(suffix).map(|k| {
            let k = k.min(MAX_SHIFT as u64) as u32;
            Reduction::Shift(1u64 << k)
        });
    }

    if let Some(idx) = trimmed.find('-') {
        let suffix = trimmed[idx + 1..].trim();
        return parse_u64(suffix).filter(|&c| c > 0).map(Reduction::Decrement);
    }

    None
}

fn parse_u64(s: &str) -> Option<u64> {
    s.parse::<u64>().ok()
}

/// ASCII alphanumeric-plus-underscore, no operators: the shape a bare alias
/// reference must have for self-call analysis to consult the alias table.
pub fn is_simple_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
