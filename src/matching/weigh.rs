use std::fmt;

use serde_derive::{Deserialize, Serialize};

/// Priority tier of a selector, set with the `L:` (high) and `R:` (low) prefixes.
///
/// A match with a higher priority always outranks one with a lower priority, whatever the
/// scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Normal,
    High,
}

/// How strongly a selector matches a scope.
///
/// Ordered by `priority` first and `score` second, so the greatest `Weigh` among a set of
/// candidate rules picks the winner. [`Weigh::ZERO`] means "no match".
///
/// # Examples
///
/// ```
/// use tmselect::matching::{Weigh, Priority};
/// let low = Weigh::new(90_000, Priority::Low);
/// let normal = Weigh::new(10, Priority::Normal);
/// assert!(normal > low);
/// assert!(Weigh::new(11, Priority::Normal) > normal);
/// assert!(low > Weigh::ZERO);
/// ```
// field order matters for the derived `Ord`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Weigh {
    pub priority: Priority,
    pub score: u64,
}

impl Weigh {
    pub const ZERO: Weigh = Weigh { priority: Priority::Low, score: 0 };

    #[inline]
    pub const fn new(score: u64, priority: Priority) -> Weigh {
        Weigh { priority, score }
    }

    /// Whether this counts as a match. Only the score is considered, so an anchored selector that
    /// failed its anchor is not a match even though it keeps its priority.
    #[inline]
    pub fn is_match(self) -> bool {
        self.score > 0
    }
}

impl Default for Weigh {
    fn default() -> Weigh {
        Weigh::ZERO
    }
}

impl fmt::Display for Weigh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.score, self.priority)
    }
}
