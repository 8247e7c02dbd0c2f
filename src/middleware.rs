use std::sync::Arc;

/// Folds a middleware stack into a single handler of the same type.
///
/// The route tree stores handlers opaquely and precomputes the composed form
/// of every registered stack at insertion time, so the handler type decides
/// what composition means. [`Middleware`] provides a ready-made synchronous
/// implementation; frameworks with their own handler representation
/// implement this trait instead.
pub trait Compose: Sized {
    /// Composes `stack` into one handler that runs the whole stack.
    fn compose(stack: &[Self]) -> Self;
}

// Lets the router double as a plain routing table in tests, benches and
// tools that never execute handlers.
impl Compose for () {
    fn compose(_: &[Self]) -> Self {}
}

/// A shared synchronous middleware function over a caller-provided request
/// context.
///
/// Each middleware receives the context and a [`Next`] handle; calling
/// [`Next::run`] invokes the remainder of the stack, and not calling it
/// short-circuits.
///
/// ```
/// use routree::{Compose, Middleware, Next};
/// use std::sync::Arc;
///
/// let trace: Middleware<Vec<&str>> = Arc::new(|ctx, next| {
///     ctx.push("enter");
///     next.run(ctx);
///     ctx.push("exit");
/// });
/// let handler: Middleware<Vec<&str>> = Arc::new(|ctx, _next| ctx.push("handler"));
///
/// let composed = Compose::compose(&[trace, handler]);
/// let mut ctx = Vec::new();
/// (composed.as_ref())(&mut ctx, Next::empty());
/// assert_eq!(ctx, ["enter", "handler", "exit"]);
/// ```
pub type Middleware<Ctx> = Arc<dyn Fn(&mut Ctx, Next<'_, Ctx>) + Send + Sync>;

/// The remainder of a middleware stack.
pub struct Next<'a, Ctx> {
    stack: &'a [Middleware<Ctx>],
}

impl<Ctx> Next<'_, Ctx> {
    /// A `Next` with nothing left to run, for invoking a composed stack from
    /// the outside.
    pub fn empty() -> Next<'static, Ctx> {
        Next { stack: &[] }
    }

    /// Runs the rest of the stack.
    pub fn run(self, ctx: &mut Ctx) {
        if let Some((head, rest)) = self.stack.split_first() {
            (head.as_ref())(ctx, Next { stack: rest });
        }
    }
}

impl<Ctx: 'static> Compose for Middleware<Ctx> {
    fn compose(stack: &[Self]) -> Self {
        let stack = stack.to_vec();
        Arc::new(move |ctx, _next| Next { stack: &stack }.run(ctx))
    }
}
