use std::sync::Arc;

use crate::parsing::{parse_selector, Scope};
use super::weigh::Weigh;

/// Weighs selector text against a scope.
///
/// Implementations never fail: selectors that can't be parsed, or that don't match, weigh
/// [`Weigh::ZERO`]. They must be usable from many highlighting threads at once.
pub trait SelectorWeigher: Send + Sync {
    fn weigh(&self, selector: &str, scope: &Scope) -> Weigh;
}

/// Parses the selector on every call and evaluates it.
///
/// Wrap it in a [`CachingWeigher`] to avoid paying for the parse and the chain walk again for
/// selector/scope pairs seen before.
///
/// # Examples
///
/// ```
/// use tmselect::matching::{ParsingWeigher, SelectorWeigher, Weigh};
/// use tmselect::parsing::Scope;
/// use std::str::FromStr;
///
/// let scope = Scope::from_str("source.js string.quoted.double").unwrap();
/// assert!(ParsingWeigher.weigh("string.quoted", &scope).is_match());
/// assert_eq!(ParsingWeigher.weigh("string.quoted.double.triple", &scope), Weigh::ZERO);
/// assert_eq!(ParsingWeigher.weigh("((", &scope), Weigh::ZERO);
/// ```
///
/// [`CachingWeigher`]: struct.CachingWeigher.html
#[derive(Debug, Default, Clone, Copy)]
pub struct ParsingWeigher;

impl SelectorWeigher for ParsingWeigher {
    fn weigh(&self, selector: &str, scope: &Scope) -> Weigh {
        parse_selector(selector).node.map_or(Weigh::ZERO, |node| node.weigh(scope))
    }
}

impl<'a, W: SelectorWeigher + ?Sized> SelectorWeigher for &'a W {
    #[inline]
    fn weigh(&self, selector: &str, scope: &Scope) -> Weigh {
        (**self).weigh(selector, scope)
    }
}

impl<W: SelectorWeigher + ?Sized> SelectorWeigher for Arc<W> {
    #[inline]
    fn weigh(&self, selector: &str, scope: &Scope) -> Weigh {
        (**self).weigh(selector, scope)
    }
}
