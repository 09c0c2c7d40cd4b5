//! Best-effort syntactic feedback on formula text: structural validation,
//! a sample-value preview, and caret-aware snippet insertion. Not a
//! parser; see [`validate`] for what is and is not checked.

mod checker;
mod scanner;

pub use checker::{copy_to_formula, format_preview, validate};
