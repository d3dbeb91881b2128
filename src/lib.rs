//! Traversal and in-place rewriting of grammar ASTs.
//!
//! * `ast` - the closed set of grammar node kinds, and a builder for them.
//! * `walk` - depth-first walker which lets visitors replace the node they're visiting.
//! * `inspect` - read-only walk driven by a predicate.

pub mod ast;
pub mod error;
pub mod inspect;
pub mod parser;
pub mod print;
pub mod semantic;
pub mod walk;

pub use ast::{AstBuilder, Expression, ExpressionKind, Slot};
pub use error::WalkError;
pub use inspect::inspect;
pub use print::Printer;
pub use walk::{walk, BackRef, Visitor};
