//! Picking among competing rules, like the scope rules of a color scheme.

use crate::parsing::Scope;
use super::weigh::Weigh;
use super::weigher::SelectorWeigher;

/// An ordered list of selector rules, each carrying a payload such as a style.
///
/// # Examples
///
/// ```
/// use tmselect::matching::{ParsingWeigher, RuleSet};
/// use tmselect::parsing::Scope;
/// use std::str::FromStr;
///
/// let rules: RuleSet<&str> = vec![
///     ("string", "green"),
///     ("string.quoted.double", "lime"),
///     ("comment", "grey"),
/// ].into_iter().collect();
///
/// let scope = Scope::from_str("source.js string.quoted.double").unwrap();
/// let (_, color) = rules.best_match(&ParsingWeigher, &scope).unwrap();
/// assert_eq!(*color, "lime");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet<T> {
    rules: Vec<(String, T)>,
}

impl<T> RuleSet<T> {
    pub fn new() -> RuleSet<T> {
        RuleSet { rules: Vec::new() }
    }

    pub fn push<S: Into<String>>(&mut self, selector: S, payload: T) {
        self.rules.push((selector.into(), payload));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.rules.iter().map(|(selector, payload)| (selector.as_str(), payload))
    }

    /// Returns the rule whose selector weighs the most against `scope`.
    ///
    /// Only actual matches count. When several rules weigh the same, the one declared first
    /// wins.
    pub fn best_match<W>(&self, weigher: &W, scope: &Scope) -> Option<(Weigh, &T)>
        where W: SelectorWeigher + ?Sized
    {
        let mut best: Option<(Weigh, &T)> = None;
        for (weigh, payload) in self.matches(weigher, scope) {
            if best.map_or(true, |(top, _)| weigh > top) {
                best = Some((weigh, payload));
            }
        }
        best
    }

    /// Every matching rule, strongest first. Equal weighs keep declaration order.
    pub fn ranked<W>(&self, weigher: &W, scope: &Scope) -> Vec<(Weigh, &T)>
        where W: SelectorWeigher + ?Sized
    {
        let mut ranked: Vec<(Weigh, &T)> = self.matches(weigher, scope).collect();
        // stable, so ties stay in declaration order
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked
    }

    fn matches<'a, 'w, W>(&'a self,
                          weigher: &'w W,
                          scope: &'w Scope)
                          -> impl Iterator<Item = (Weigh, &'a T)> + 'w
        where W: SelectorWeigher + ?Sized,
              'a: 'w
    {
        self.rules
            .iter()
            .map(move |(selector, payload)| (weigher.weigh(selector, scope), payload))
            .filter(|(weigh, _)| weigh.is_match())
    }
}

impl<T> Default for RuleSet<T> {
    fn default() -> RuleSet<T> {
        RuleSet::new()
    }
}

impl<S: Into<String>, T> FromIterator<(S, T)> for RuleSet<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> RuleSet<T> {
        RuleSet {
            rules: iter.into_iter().map(|(selector, payload)| (selector.into(), payload)).collect(),
        }
    }
}
