use crate::error::{InsertError, MatchError};
use crate::middleware::Compose;
use crate::params::Params;
use crate::pattern::compile_route;
use crate::tree::Node;

use std::array;
use std::fmt;

/// The HTTP methods the router supports. Any other verb is rejected with a
/// hard error by both registration and matching.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Every supported method, in trie order.
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    /// Parses an HTTP verb string. Verbs are uppercase per RFC 9110.
    pub fn parse(method: &str) -> Option<Method> {
        match method {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "PATCH" => Some(Method::Patch),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }

    /// The verb as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful route match.
pub struct Matched<'r, 'p, T> {
    /// The parameters bound from the matched path.
    pub params: Params<'r, 'p>,
    /// The middleware stack exactly as registered.
    pub middleware: &'r [T],
    /// The stack composed into a single handler at registration time.
    pub composed: &'r T,
    /// The route pattern as declared.
    pub pattern: &'r str,
}

/// A router holding one route tree per supported HTTP method.
///
/// Routes are registered up front, [`sort`](Router::sort) is called once,
/// and matching is read-only from then on: [`at`](Router::at) takes `&self`,
/// performs no I/O and is safe to call concurrently from any number of
/// request-handling contexts.
///
/// ```
/// use routree::{Middleware, Next, Router};
/// use std::sync::Arc;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
///
/// type Ctx = Vec<&'static str>;
///
/// let auth: Middleware<Ctx> = Arc::new(|ctx, next| {
///     ctx.push("auth");
///     next.run(ctx);
/// });
/// let show: Middleware<Ctx> = Arc::new(|ctx, _next| ctx.push("show"));
///
/// let mut router = Router::new();
/// router.insert("GET", r"/users/:id(\d+)", vec![auth, show.clone()])?;
/// router.insert("GET", "/users/me", vec![show])?;
/// router.sort();
///
/// let matched = router.at("GET", "/users/42")?;
/// assert_eq!(matched.params.get("id"), Some("42"));
///
/// let mut ctx = Ctx::new();
/// (matched.composed.as_ref())(&mut ctx, Next::empty());
/// assert_eq!(ctx, ["auth", "show"]);
/// # Ok(())
/// # }
/// ```
pub struct Router<T> {
    trees: [Node<T>; 5],
}

impl<T> Router<T> {
    /// Constructs an empty router.
    pub fn new() -> Self {
        Router {
            trees: array::from_fn(|_| Node::root()),
        }
    }

    /// Returns `true` if no routes are registered for any method.
    pub fn is_empty(&self) -> bool {
        self.trees.iter().all(Node::is_empty)
    }

    /// Registers `middleware` for `pattern` under the given method.
    ///
    /// Fails if the method is unsupported, if the pattern uses a `+`/`*`
    /// repetition modifier, or if a functionally identical route is already
    /// registered for the method. A failed insertion leaves the router
    /// untouched.
    pub fn insert(
        &mut self,
        method: &str,
        pattern: &str,
        middleware: Vec<T>,
    ) -> Result<(), InsertError>
    where
        T: Compose,
    {
        self.add(method, pattern, middleware, false)
    }

    /// Like [`insert`](Router::insert), but the route also matches any
    /// deeper path suffix that no other route claims.
    pub fn insert_catch_all(
        &mut self,
        method: &str,
        pattern: &str,
        middleware: Vec<T>,
    ) -> Result<(), InsertError>
    where
        T: Compose,
    {
        self.add(method, pattern, middleware, true)
    }

    fn add(
        &mut self,
        method: &str,
        pattern: &str,
        middleware: Vec<T>,
        catch_all: bool,
    ) -> Result<(), InsertError>
    where
        T: Compose,
    {
        let method = Method::parse(method).ok_or_else(|| InsertError::UnsupportedMethod {
            method: method.to_owned(),
        })?;
        let segments = compile_route(pattern)?;

        let tree = &mut self.trees[method as usize];
        if let Some(with) = tree.functional_duplicate(&segments) {
            return Err(InsertError::Conflict {
                with: with.to_owned(),
            });
        }

        debug!("registered route {} {}", method, pattern);
        tree.insert(pattern, segments.into_iter(), middleware, catch_all);
        Ok(())
    }

    /// Sorts every tree into match priority order.
    ///
    /// Must be called after the last [`insert`](Router::insert) and before
    /// the first [`at`](Router::at); it makes matching independent of the
    /// order routes were declared in. Idempotent.
    pub fn sort(&mut self) {
        for (method, tree) in Method::ALL.iter().zip(&mut self.trees) {
            tree.sort();
            debug!("sorted route tree for {}", method);
        }
    }

    /// Matches a request path against the tree for the given method.
    ///
    /// Returns the bound parameters and the registered middleware on
    /// success, [`MatchError::NotFound`] if no route matches, and
    /// [`MatchError::UnsupportedMethod`] for an unrecognized verb.
    pub fn at<'r, 'p>(&'r self, method: &str, path: &'p str) -> Result<Matched<'r, 'p, T>, MatchError> {
        let method = Method::parse(method).ok_or_else(|| MatchError::UnsupportedMethod {
            method: method.to_owned(),
        })?;

        let components: Vec<&str> = path.split('/').collect();
        let mut params = Params::new();

        match self.trees[method as usize].find(&components, &mut params) {
            Some(endpoint) => Ok(Matched {
                params,
                middleware: &endpoint.middleware,
                composed: &endpoint.composed,
                pattern: &endpoint.route,
            }),
            None => Err(MatchError::NotFound),
        }
    }

    /// The methods with at least one registered route.
    pub fn allowed_methods(&self) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|&method| !self.trees[method as usize].is_empty())
            .collect()
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}
