use crate::middleware::Compose;
use crate::params::Params;
use crate::pattern::{Segment, SegmentPattern};

use std::cmp::Ordering;
use std::fmt;
use std::vec;

/// A registered route endpoint: the middleware stack attached to a terminal
/// node, its precomputed composed form, and the route as declared.
pub(crate) struct Endpoint<T> {
    pub(crate) route: String,
    pub(crate) middleware: Vec<T>,
    pub(crate) composed: T,
}

/// One level of the route tree, covering a single path segment.
///
/// A node is terminal iff it carries an endpoint. Nodes own their children
/// exclusively; the tree is mutated only while routes are being registered
/// and is read-only once sorted.
pub(crate) struct Node<T> {
    // the raw segment as declared, e.g. `:id(\d+)`
    component: String,
    pattern: SegmentPattern,
    children: Vec<Node<T>>,
    endpoint: Option<Endpoint<T>>,
    // a catch-all node also matches any deeper, otherwise-unmatched suffix
    catch_all: bool,
}

impl<T> Node<T> {
    /// The root of a tree. Its own pattern is never matched against, only
    /// its children's are.
    pub(crate) fn root() -> Self {
        Node {
            component: String::new(),
            pattern: SegmentPattern::compile("").expect("an empty segment always compiles"),
            children: Vec::new(),
            endpoint: None,
            catch_all: false,
        }
    }

    fn new(segment: Segment) -> Self {
        Node {
            component: segment.raw,
            pattern: segment.pattern,
            children: Vec::new(),
            endpoint: None,
            catch_all: false,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.children.is_empty() && self.endpoint.is_none()
    }

    /// Returns the route already registered along a path of the same shape
    /// as `segments`, if any. Shape equality is compiled-pattern equality at
    /// every level, so parameter names are irrelevant.
    pub(crate) fn functional_duplicate(&self, segments: &[Segment]) -> Option<&str> {
        let (segment, rest) = match segments.split_first() {
            Some(next) => next,
            None => return self.endpoint.as_ref().map(|e| e.route.as_str()),
        };

        let child = self
            .children
            .iter()
            .find(|child| child.pattern == segment.pattern)?;
        child.functional_duplicate(rest)
    }

    /// Extends the tree with the remaining segments of a route, sharing
    /// existing branches whose compiled pattern is textually identical.
    ///
    /// The caller must have ruled out functional duplicates beforehand; with
    /// that established, insertion cannot fail.
    pub(crate) fn insert(
        &mut self,
        route: &str,
        mut segments: vec::IntoIter<Segment>,
        middleware: Vec<T>,
        catch_all: bool,
    ) where
        T: Compose,
    {
        let segment = match segments.next() {
            Some(segment) => segment,
            None => {
                self.endpoint = Some(Endpoint {
                    route: route.to_owned(),
                    composed: T::compose(&middleware),
                    middleware,
                });
                self.catch_all = catch_all;
                return;
            }
        };

        let index = match self
            .children
            .iter()
            .position(|child| child.pattern == segment.pattern)
        {
            Some(index) => index,
            None => {
                self.children.push(Node::new(segment));
                self.children.len() - 1
            }
        };

        self.children[index].insert(route, segments, middleware, catch_all);
    }

    /// Recursively reorders children into match priority order. Idempotent;
    /// the sort is stable, so otherwise-tied children keep declaration order.
    pub(crate) fn sort(&mut self) {
        self.children.sort_by(Self::priority);
        for child in &mut self.children {
            child.sort();
        }
    }

    // The sibling comparator. First rule that discriminates wins:
    // non-catch-all before catch-all, literal before parameterized, required
    // first key before optional, prefixed first key before bare.
    fn priority(left: &Self, right: &Self) -> Ordering {
        if left.catch_all != right.catch_all {
            return if left.catch_all {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let (l, r) = (left.pattern.keys(), right.pattern.keys());
        if l.is_empty() != r.is_empty() {
            return if l.is_empty() {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        if let (Some(l), Some(r)) = (l.first(), r.first()) {
            if l.optional != r.optional {
                return if l.optional {
                    Ordering::Greater
                } else {
                    Ordering::Less
                };
            }
            if l.prefix.is_empty() != r.prefix.is_empty() {
                return if l.prefix.is_empty() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                };
            }
        }

        Ordering::Equal
    }

    /// Matches the remaining path components against this subtree, walking
    /// children in sorted order with backtracking across siblings: a child
    /// may match the current component but fail deeper in the path, in which
    /// case later, lower-priority siblings still get their turn.
    ///
    /// Parameters are bound only while a successful match unwinds, so a
    /// failed branch commits nothing.
    pub(crate) fn find<'n, 'p>(
        &'n self,
        components: &[&'p str],
        params: &mut Params<'n, 'p>,
    ) -> Option<&'n Endpoint<T>> {
        let (component, rest) = match components.split_first() {
            Some((component, rest)) => (*component, rest),
            None => return self.endpoint.as_ref(),
        };

        // artifact of consecutive slashes in the request path
        if component.is_empty() {
            return self.find(rest, params);
        }

        for child in &self.children {
            if !child.pattern.matches(component) {
                continue;
            }

            if let Some(endpoint) = child.find(rest, params) {
                child.pattern.bind(component, params);
                return Some(endpoint);
            }
        }

        // the catch-all absorbs any unmatched suffix
        if self.catch_all {
            return self.endpoint.as_ref();
        }

        None
    }
}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("component", &self.component)
            .field("pattern", &self.pattern.source())
            .field("catch_all", &self.catch_all)
            .field("terminal", &self.endpoint.is_some())
            .field("children", &self.children)
            .finish()
    }
}
