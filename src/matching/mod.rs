//! Weighing selectors against scopes, and picking the best rule for a scope.
mod weigh;
mod selector;
mod weigher;
mod caching;
mod rules;

pub use self::weigh::*;
pub use self::selector::*;
pub use self::weigher::*;
pub use self::caching::*;
pub use self::rules::*;
