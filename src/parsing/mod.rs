//! Everything about reading scopes and scope selectors.
//! The most important items here are [`Scope`] and [`parse_selector`].
mod scope;
mod lexer;
mod selector_parser;

pub use self::scope::*;
pub use self::lexer::*;
pub use self::selector_parser::{parse_selector, ParsedSelector, SelectorError};
pub(crate) use self::selector_parser::parse_selector_quietly;
