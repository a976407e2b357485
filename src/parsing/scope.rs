// see DESIGN.md
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use fnv::FnvHasher;

/// A node in a hierarchy of scopes, annotating a piece of text with semantic information.
///
/// Each node carries a dotted name (by convention lowercase atoms separated by dots, like
/// `string.quoted.double.js`) and a link to the node it is nested in. The chain always ends in
/// the empty root sentinel returned by [`Scope::root`].
///
/// Example chain for a JS string inside a script tag in an HTML file, outermost first:
/// `text.html.basic source.js.embedded.html string.quoted.double.js`
///
/// A `Scope` is an immutable, reference-counted handle, so cloning one is cheap and a chain can
/// be shared between threads. Pushing a child never modifies the parent.
///
/// Two scopes are equal when their whole chains have the same names, regardless of whether they
/// were built from the same nodes.
///
/// [`Scope::root`]: #method.root
#[derive(Clone)]
pub struct Scope {
    node: Arc<ScopeNode>,
}

struct ScopeNode {
    name: Option<Box<str>>,
    parent: Option<Scope>,
    depth: usize,
    dot_count: usize,
    empty: bool,
    hash: u64,
}

impl Scope {
    /// The empty root sentinel every chain is built on.
    pub fn root() -> Scope {
        Scope::with_parent(None, None)
    }

    fn with_parent(name: Option<&str>, parent: Option<Scope>) -> Scope {
        let mut hasher = FnvHasher::default();
        if let Some(ref p) = parent {
            hasher.write_u64(p.node.hash);
        }
        name.hash(&mut hasher);

        let (depth, parent_dots, parent_empty) = match parent {
            Some(ref p) => (p.depth() + 1, p.dot_count(), p.is_empty()),
            None => (0, 0, true),
        };
        let dots = name.map_or(0, |n| n.matches('.').count());

        Scope {
            node: Arc::new(ScopeNode {
                name: name.map(Box::from),
                parent,
                depth,
                dot_count: parent_dots + dots,
                empty: parent_empty && name.map_or(true, str::is_empty),
                hash: hasher.finish(),
            }),
        }
    }

    /// Returns a new scope named `name` nested inside this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use tmselect::parsing::Scope;
    /// let string = Scope::root().push("source.js").push("string.quoted.double");
    /// assert_eq!(string.name(), "string.quoted.double");
    /// assert_eq!(string.parent().unwrap().name(), "source.js");
    /// assert_eq!(string.depth(), 2);
    /// assert_eq!(string.dot_count(), 3);
    /// ```
    pub fn push(&self, name: &str) -> Scope {
        Scope::with_parent(Some(name), Some(self.clone()))
    }

    /// Builds a chain from names listed outermost first, on top of the root sentinel.
    pub fn from_names<'a, I>(names: I) -> Scope
        where I: IntoIterator<Item = &'a str>
    {
        names.into_iter().fold(Scope::root(), |scope, name| scope.push(name))
    }

    /// The name of this node. The root sentinel has the empty name.
    pub fn name(&self) -> &str {
        self.node.name.as_deref().unwrap_or("")
    }

    #[inline]
    pub fn parent(&self) -> Option<&Scope> {
        self.node.parent.as_ref()
    }

    /// Number of ancestors between this node and the root. The root itself has depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.node.depth
    }

    /// Total number of `.` characters in the names from the root down to this node.
    #[inline]
    pub fn dot_count(&self) -> usize {
        self.node.dot_count
    }

    /// True for the root sentinel, and for nodes with empty names sitting directly on top of it.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.node.empty
    }

    /// Iterates from this node up to and including the root.
    pub fn iter(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }
}

impl Default for Scope {
    fn default() -> Scope {
        Scope::root()
    }
}

/// Iterator over a scope and its ancestors, innermost first.
///
/// Returned by [`Scope::iter`].
///
/// [`Scope::iter`]: struct.Scope.html#method.iter
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a Scope>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Scope;

    fn next(&mut self) -> Option<&'a Scope> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

impl PartialEq for Scope {
    fn eq(&self, other: &Scope) -> bool {
        let mut pairs = self.iter().zip(other.iter());
        self.depth() == other.depth()
            && self.node.hash == other.node.hash
            && pairs.all(|(a, b)| Arc::ptr_eq(&a.node, &b.node) || a.node.name == b.node.name)
    }
}

impl Eq for Scope {}

impl Hash for Scope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.node.hash);
    }
}

impl FromStr for Scope {
    type Err = Infallible;

    /// Parses a chain from a whitespace separated list of names, outermost first.
    fn from_str(s: &str) -> Result<Scope, Infallible> {
        Ok(Scope::from_names(s.split_whitespace()))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.iter()
            .filter(|s| s.node.name.is_some())
            .map(Scope::name)
            .collect();
        names.reverse();
        write!(f, "{}", names.join(" "))
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self)
    }
}
