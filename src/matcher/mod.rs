//! Matching engine for chat commands.
//!
//! ```text
//! message → Patterns::base → (name, rest) → scan(rest) per overload → MatchResult
//! ```
//!
//! [`Patterns`] is compiled once per registry; [`scan`] runs once per overload on
//! every match and never fails.

mod patterns;
mod result;
mod scanner;

pub use patterns::{BaseMatch, Patterns, Token, TokenKind};
pub use result::{FieldValue, MatchResult, Unknown};
pub use scanner::scan;
