use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use dashmap::DashMap;
use fnv::FnvBuildHasher;
use tracing::trace;

use crate::parsing::Scope;
use super::weigh::Weigh;
use super::weigher::SelectorWeigher;

/// Settings for a [`CachingWeigher`].
///
/// [`CachingWeigher`]: struct.CachingWeigher.html
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of remembered results. When full, the cache is emptied before the next
    /// result is stored. `0` disables caching.
    pub capacity: usize,
}

impl CacheConfig {
    pub const DEFAULT_CAPACITY: usize = 4096;

    pub fn with_capacity(mut self, capacity: usize) -> CacheConfig {
        self.capacity = capacity;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> CacheConfig {
        CacheConfig { capacity: CacheConfig::DEFAULT_CAPACITY }
    }
}

/// The selector text and the full scope chain, both compared by content.
#[derive(Clone, PartialEq, Eq)]
struct CacheKey {
    selector: Box<str>,
    scope: Scope,
}

/// What lookups compare, so a borrowed `(&str, &Scope)` can find an owned key.
trait KeyView {
    fn selector(&self) -> &str;
    fn scope(&self) -> &Scope;
}

impl KeyView for CacheKey {
    fn selector(&self) -> &str {
        &self.selector
    }

    fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl<'a> KeyView for (&'a str, &'a Scope) {
    fn selector(&self) -> &str {
        self.0
    }

    fn scope(&self) -> &Scope {
        self.1
    }
}

impl<'a> Borrow<dyn KeyView + 'a> for CacheKey {
    fn borrow(&self) -> &(dyn KeyView + 'a) {
        self
    }
}

// owned and borrowed keys must hash the same
impl Hash for dyn KeyView + '_ {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.selector().hash(state);
        self.scope().hash(state);
    }
}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self as &dyn KeyView).hash(state)
    }
}

impl PartialEq for dyn KeyView + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.selector() == other.selector() && self.scope() == other.scope()
    }
}

impl Eq for dyn KeyView + '_ {}

/// Remembers the results of another weigher.
///
/// Safe to share between threads without extra locking. Results are pure functions of the
/// selector and scope, so entries can be dropped at any time: the cache only ever changes how
/// fast an answer comes back, never the answer itself.
///
/// # Examples
///
/// ```
/// use tmselect::matching::{CachingWeigher, ParsingWeigher, SelectorWeigher};
/// use tmselect::parsing::Scope;
/// use std::str::FromStr;
///
/// let weigher = CachingWeigher::new(ParsingWeigher);
/// let scope = Scope::from_str("source.js comment.line").unwrap();
/// let first = weigher.weigh("comment", &scope);
/// assert_eq!(weigher.len(), 1);
/// assert_eq!(weigher.weigh("comment", &scope), first);
/// assert_eq!(weigher.len(), 1);
/// ```
pub struct CachingWeigher<W> {
    inner: W,
    config: CacheConfig,
    entries: DashMap<CacheKey, Weigh, FnvBuildHasher>,
}

impl<W: SelectorWeigher> CachingWeigher<W> {
    pub fn new(inner: W) -> CachingWeigher<W> {
        CachingWeigher::with_config(inner, CacheConfig::default())
    }

    pub fn with_config(inner: W, config: CacheConfig) -> CachingWeigher<W> {
        CachingWeigher {
            inner,
            config,
            entries: DashMap::with_hasher(FnvBuildHasher::default()),
        }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// The wrapped weigher.
    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// Number of results currently remembered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets every remembered result.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl<W: SelectorWeigher> SelectorWeigher for CachingWeigher<W> {
    fn weigh(&self, selector: &str, scope: &Scope) -> Weigh {
        if let Some(cached) = self.entries.get(&(selector, scope) as &dyn KeyView) {
            trace!(selector, "selector weigh cache hit");
            return *cached;
        }

        let weigh = self.inner.weigh(selector, scope);
        if self.config.capacity == 0 {
            return weigh;
        }
        if self.entries.len() >= self.config.capacity {
            trace!(capacity = self.config.capacity, "selector weigh cache full, sweeping");
            self.entries.clear();
        }
        self.entries.insert(CacheKey { selector: Box::from(selector), scope: scope.clone() }, weigh);
        weigh
    }
}

impl<W: fmt::Debug> fmt::Debug for CachingWeigher<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingWeigher")
            .field("inner", &self.inner)
            .field("config", &self.config)
            .field("len", &self.entries.len())
            .finish()
    }
}
