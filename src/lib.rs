//! Welcome to the tmselect docs.
//!
//! tmselect decides how well a TextMate scope selector, like `source.js meta.tag - string`,
//! matches a scope, and ranks competing selectors the way TextMate and Sublime Text themes
//! expect. It is the piece of a highlighter that turns "which color rule applies here?" into a
//! number.
//!
//! The [`parsing`](parsing/index.html) module holds the scope chain model and the selector
//! parser. The [`matching`](matching/index.html) module weighs parsed selectors against scopes,
//! caches the results and picks the best rule out of a [`RuleSet`](matching/struct.RuleSet.html).
//!
//! ```
//! use tmselect::matching::{CachingWeigher, ParsingWeigher, SelectorWeigher};
//! use tmselect::parsing::Scope;
//! use std::str::FromStr;
//!
//! let weigher = CachingWeigher::new(ParsingWeigher);
//! let scope = Scope::from_str("text.html.basic source.js.embedded.html string.quoted").unwrap();
//! let plain = weigher.weigh("string", &scope);
//! let embedded = weigher.weigh("source.js string", &scope);
//! assert!(embedded > plain);
//! ```
#![doc(html_root_url = "https://docs.rs/tmselect/0.1.0")]

pub mod parsing;
pub mod matching;
