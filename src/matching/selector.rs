//! Scope selector trees and the ranking rules used to weigh them against a scope.
//!
//! Scores follow the ordering described at
//! [https://manual.macromates.com/en/scope_selectors](https://manual.macromates.com/en/scope_selectors).
use std::fmt;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use crate::parsing::{parse_selector_quietly, Scope, SelectorError};
use super::weigh::{Priority, Weigh};

/// Score of a literal that matches a scope, before specificity adjustments.
///
/// Must stay large enough that one more dot in a literal outweighs the nesting decay.
pub const BASE_SCORE: u64 = 1000;

/// Multiplier applied to the innermost scope. Each step towards the root lowers it by one.
pub const NESTING_WEIGHT: u64 = 100;

/// Scopes nested deeper than this never match. Selector groups and exclusions can't nest deeper
/// than this either.
pub const MAX_SCOPE_DEPTH: usize = 100;

static MATCH_ANY: SelectorNode = SelectorNode::Selector(String::new());

/// A parsed scope selector.
///
/// Build one with [`FromStr`] (strict) or [`parse_selector`] (resilient), then call
/// [`weigh`](#method.weigh) as many times as needed. Trees are immutable and carry no
/// evaluation state, so one tree can be shared by any number of threads.
///
/// [`parse_selector`]: ../parsing/fn.parse_selector.html
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorNode {
    /// A single dotted scope name like `string.quoted`. Empty text matches anything.
    Selector(String),
    /// Descendant path with exclusions, like `^source.php meta.tag - string`.
    ScopeSelector(ScopeSelector),
    /// `a | b`: the first alternative that matches at all wins.
    Conjunction(Vec<SelectorNode>),
    /// `a, b`: the best matching alternative wins.
    SelectorList(Vec<SelectorNode>),
}

/// A path of segments to find along a scope's ancestor chain, plus selectors that veto the match.
///
/// Segments are written outermost first, so in `a.b c.d` the scope itself has to match `c.d`
/// (or some ancestor does) and `a.b` has to match a scope further up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSelector {
    segments: Vec<SelectorNode>,
    exclusions: Vec<SelectorNode>,
    anchored: bool,
    priority: Priority,
}

impl SelectorNode {
    /// Weighs this selector against `scope` and its ancestors.
    ///
    /// # Examples
    ///
    /// ```
    /// use tmselect::matching::{SelectorNode, Weigh};
    /// use tmselect::parsing::Scope;
    /// use std::str::FromStr;
    ///
    /// let scope = Scope::from_str("source.js string.quoted.double").unwrap();
    /// let general = SelectorNode::from_str("string").unwrap().weigh(&scope);
    /// let specific = SelectorNode::from_str("string.quoted").unwrap().weigh(&scope);
    /// assert!(specific > general);
    /// assert_eq!(SelectorNode::from_str("string - source").unwrap().weigh(&scope), Weigh::ZERO);
    /// ```
    pub fn weigh(&self, scope: &Scope) -> Weigh {
        match *self {
            SelectorNode::Selector(ref text) => weigh_literal(text, scope),
            SelectorNode::ScopeSelector(ref selector) => selector.weigh(scope),
            SelectorNode::Conjunction(ref alternatives) => {
                alternatives.iter()
                    .map(|node| node.weigh(scope))
                    .find(|weigh| weigh.is_match())
                    .unwrap_or(Weigh::ZERO)
            }
            SelectorNode::SelectorList(ref alternatives) => {
                alternatives.iter()
                    .map(|node| node.weigh(scope))
                    .max()
                    .unwrap_or(Weigh::ZERO)
            }
        }
    }
}

/// A literal matches a scope named exactly like it, or any scope it is a dotted prefix of.
fn weigh_literal(text: &str, scope: &Scope) -> Weigh {
    let name = scope.name();
    let matches = text.is_empty()
        || name == text
        || (name.starts_with(text) && name.as_bytes().get(text.len()) == Some(&b'.'));
    if !matches {
        return Weigh::ZERO;
    }
    // more dots in the literal is more specific; a more qualified scope chain scores lower
    let specificity = BASE_SCORE + text.matches('.').count() as u64;
    match specificity.saturating_sub(scope.dot_count() as u64) {
        0 => Weigh::ZERO,
        score => Weigh::new(score, Priority::Normal),
    }
}

impl ScopeSelector {
    /// An empty `segments` list is stored as a single empty literal, which matches anything.
    pub fn new(segments: Vec<SelectorNode>,
               exclusions: Vec<SelectorNode>,
               anchored: bool,
               priority: Priority)
               -> ScopeSelector {
        let segments = if segments.is_empty() { vec![MATCH_ANY.clone()] } else { segments };
        ScopeSelector {
            segments,
            exclusions,
            anchored,
            priority,
        }
    }

    pub fn segments(&self) -> &[SelectorNode] {
        if self.segments.is_empty() {
            std::slice::from_ref(&MATCH_ANY)
        } else {
            &self.segments
        }
    }

    pub fn exclusions(&self) -> &[SelectorNode] {
        &self.exclusions
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Matches the segments innermost first while walking up the ancestor chain.
    ///
    /// Every step up the chain lowers the multiplier applied to a segment's score, so matches
    /// closer to the scope count for more. If any exclusion matches the scope, the whole
    /// selector doesn't.
    ///
    /// An anchored selector that matched all its segments but didn't reach the root scores `0`
    /// while keeping its own priority, rather than returning [`Weigh::ZERO`].
    pub fn weigh(&self, scope: &Scope) -> Weigh {
        if self.exclusions.iter().any(|exclusion| exclusion.weigh(scope).is_match()) {
            return Weigh::ZERO;
        }
        if scope.depth() > MAX_SCOPE_DEPTH {
            return Weigh::ZERO;
        }

        let mut pending = self.segments().iter().rev().peekable();
        let mut current = Some(scope);
        let mut nesting_weight = NESTING_WEIGHT;
        let mut total: u64 = 0;

        while let (Some(segment), Some(node)) = (pending.peek(), current) {
            let weigh = segment.weigh(node);
            if weigh.is_match() {
                // nested groups multiply up quickly
                total = total.saturating_add(weigh.score.saturating_mul(nesting_weight));
                pending.next();
            }
            nesting_weight = nesting_weight.saturating_sub(1);
            current = node.parent();
        }

        if pending.peek().is_some() {
            return Weigh::ZERO;
        }

        let reached_root = current.map_or(true, Scope::is_empty);
        if !self.anchored || reached_root {
            Weigh::new(total, self.priority)
        } else {
            Weigh::new(0, self.priority)
        }
    }
}

impl FromStr for SelectorNode {
    type Err = SelectorError;

    /// Parses a selector, failing on the first problem instead of recovering.
    ///
    /// Use [`parse_selector`] for the forgiving behaviour the weighers rely on.
    ///
    /// [`parse_selector`]: ../parsing/fn.parse_selector.html
    fn from_str(s: &str) -> Result<SelectorNode, SelectorError> {
        let parsed = parse_selector_quietly(s);
        if let Some(error) = parsed.errors.into_iter().next() {
            return Err(error);
        }
        parsed.node.ok_or(SelectorError::Empty)
    }
}

impl fmt::Display for SelectorNode {
    /// Writes the selector back out in a canonical form that parses to an equal tree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SelectorNode::Selector(ref text) => f.write_str(text),
            SelectorNode::ScopeSelector(ref selector) => write!(f, "{}", selector),
            SelectorNode::Conjunction(ref alternatives) => write_joined(f, alternatives, " | "),
            SelectorNode::SelectorList(ref alternatives) => write_joined(f, alternatives, ", "),
        }
    }
}

impl fmt::Display for ScopeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.priority {
            Priority::High => f.write_str("L:")?,
            Priority::Low => f.write_str("R:")?,
            Priority::Normal => {}
        }
        if self.anchored {
            f.write_str("^")?;
        }
        let mut first = true;
        for segment in self.segments().iter().filter(|s| **s != MATCH_ANY) {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            match *segment {
                SelectorNode::Selector(ref text) => f.write_str(text)?,
                ref nested => write!(f, "({})", nested)?,
            }
        }
        for exclusion in &self.exclusions {
            if first {
                write!(f, "-{}", exclusion)?;
                first = false;
            } else {
                write!(f, " -{}", exclusion)?;
            }
        }
        Ok(())
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, nodes: &[SelectorNode], separator: &str) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i != 0 {
            f.write_str(separator)?;
        }
        match *node {
            SelectorNode::Conjunction(_) | SelectorNode::SelectorList(_) => write!(f, "({})", node)?,
            _ => write!(f, "{}", node)?,
        }
    }
    Ok(())
}
