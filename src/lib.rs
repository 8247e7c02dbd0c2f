//! A deterministic, priority-sorted HTTP route tree.
//!
//! `routree` decomposes registered routes into one path-segment trie per
//! HTTP method and matches request paths against it, producing the bound
//! parameters and the middleware stack to execute. Pattern ambiguity is
//! resolved by a fixed priority order rather than declaration order, so
//! routing behaves the same no matter how application code happens to
//! register its endpoints.
//!
//! # Patterns
//!
//! Route patterns are `/`-separated segments:
//!
//! ```text
//! Syntax            Matches
//! /literal          the literal segment only
//! /:name            any single segment, captured as `name`
//! /:name?           like `:name`, but the capture is optional
//! /:id(\d+)         a segment accepted by the custom regex
//! /pre-:fx          a literal prefix followed by a capture
//! /:id(\d+)-:name   multiple captures within one segment
//! ```
//!
//! Repetition modifiers (`:name+`, `:name*`) are not supported and are
//! rejected at registration time.
//!
//! Two routes whose segments compile to textually identical patterns are
//! functionally identical, even if their parameter names differ; registering
//! the second is an error rather than a silent overwrite.
//!
//! # Priority
//!
//! After registration, [`Router::sort`] orders every group of sibling
//! segments: literal segments match before parameterized ones, required
//! parameters before optional ones, prefixed parameters before bare ones,
//! and catch-all routes last. Ties keep declaration order. Matching walks
//! children in that order and backtracks across siblings, so a branch that
//! matches the current segment but dead-ends deeper in the path never
//! shadows a lower-priority branch that matches the whole path.
//!
//! # Usage
//!
//! ```
//! use routree::{Middleware, Next, Router};
//! use std::sync::Arc;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! type Ctx = Vec<String>;
//!
//! let greet: Middleware<Ctx> = Arc::new(|ctx, _next| ctx.push("hello".into()));
//!
//! let mut router = Router::new();
//! router.insert("GET", "/hello/:user", vec![greet])?;
//! router.sort();
//!
//! let matched = router.at("GET", "/hello/world")?;
//! assert_eq!(matched.params.get("user"), Some("world"));
//!
//! let mut ctx = Ctx::new();
//! (matched.composed.as_ref())(&mut ctx, Next::empty());
//! assert_eq!(ctx, ["hello"]);
//! # Ok(())
//! # }
//! ```
//!
//! The router never executes middleware itself; it composes and returns it.
//! Handlers are opaque to the tree, so a framework can route any type that
//! implements [`Compose`] — [`Middleware`] is a ready-made synchronous
//! implementation.

#![deny(clippy::all)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod error;
mod middleware;
mod params;
mod pattern;
mod router;
mod tree;

pub use error::{InsertError, MatchError};
pub use middleware::{Compose, Middleware, Next};
pub use params::{Params, ParamsIter};
pub use router::{Matched, Method, Router};
