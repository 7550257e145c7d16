//! Recurrence-inference static analyzer for C source text.
//!
//! [`analyze`] is the only entry point callers need: parse a snippet of C,
//! walk it once, and come back with an [`AstDescriptor`] and a [`Summary`]
//! describing loops, calls, and any inferred divide-and-conquer /
//! decrease-and-conquer recurrence per function.
//!
//! Solving the recurrence to a closed-form Big-O, other source languages,
//! control flow through arbitrary expressions, and interprocedural analysis
//! across function boundaries are all out of scope for this crate.

pub mod alias;
pub mod ast;
pub mod engine;
pub mod error;
pub mod expr;
pub mod nodeutil;
pub mod size_param;
pub mod summary;
pub mod traverse;
pub mod walker;

pub use ast::AstDescriptor;
pub use engine::analyze;
pub use error::AnalyzeError;
pub use summary::Summary;
