//! Sequential composition.
//!
//! # Responsibilities
//! - Close a partial handler over a terminal handler (`sequence`)
//! - Join two partial handlers into a longer gate (`sequence_partial`)
//!
//! # Design Decisions
//! - No matching logic lives here; these types only thread `next` through
//! - `Chain` borrows its continuation per call, so `(a.and(b)).and(c)` and
//!   `a.and(b.and(c))` run the exact same calls in the same order

use async_trait::async_trait;

use crate::handler::{Handler, Outcome, PartialHandler, Result};
use crate::http::RequestContext;

/// A partial handler closed over an owned continuation.
#[derive(Debug, Clone)]
pub struct Sequence<P, H> {
    partial: P,
    next: H,
}

/// Two partial handlers run one after the other.
#[derive(Debug, Clone)]
pub struct Chain<P, Q> {
    first: P,
    second: Q,
}

/// A partial handler closed over a borrowed continuation, only alive for
/// the duration of one call.
pub struct Closed<'a, P: ?Sized> {
    partial: &'a P,
    next: &'a dyn Handler,
}

impl<'a, P: ?Sized> Closed<'a, P> {
    pub fn new(partial: &'a P, next: &'a dyn Handler) -> Self {
        Self { partial, next }
    }
}

/// Close `partial` over `next`, producing a handler.
pub fn sequence<P, H>(partial: P, next: H) -> Sequence<P, H>
where
    P: PartialHandler,
    H: Handler,
{
    Sequence { partial, next }
}

/// Compose two gates into one; the continuation is supplied later.
pub fn sequence_partial<P, Q>(first: P, second: Q) -> Chain<P, Q>
where
    P: PartialHandler,
    Q: PartialHandler,
{
    Chain { first, second }
}

#[async_trait]
impl<P, H> Handler for Sequence<P, H>
where
    P: PartialHandler,
    H: Handler,
{
    async fn call(&self, ctx: &mut RequestContext) -> Result<Outcome> {
        self.partial.apply(&self.next, ctx).await
    }
}

#[async_trait]
impl<P, Q> PartialHandler for Chain<P, Q>
where
    P: PartialHandler,
    Q: PartialHandler,
{
    async fn apply(&self, next: &dyn Handler, ctx: &mut RequestContext) -> Result<Outcome> {
        let rest = Closed::new(&self.second, next);
        self.first.apply(&rest, ctx).await
    }
}

#[async_trait]
impl<'a, P> Handler for Closed<'a, P>
where
    P: PartialHandler + ?Sized,
{
    async fn call(&self, ctx: &mut RequestContext) -> Result<Outcome> {
        self.partial.apply(self.next, ctx).await
    }
}

/// Builder-style composition for partial handlers.
///
/// ```ignore
/// let tree = get().and(route("/protected")).and(basic_auth(check)).then(text("ok"));
/// ```
pub trait PartialHandlerExt: PartialHandler + Sized {
    /// Close over a terminal handler.
    fn then<H: Handler>(self, next: H) -> Sequence<Self, H> {
        sequence(self, next)
    }

    /// Append another gate.
    fn and<Q: PartialHandler>(self, other: Q) -> Chain<Self, Q> {
        sequence_partial(self, other)
    }
}

impl<P: PartialHandler> PartialHandlerExt for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::text;
    use axum::http::{HeaderValue, Method};

    /// Appends its tag to `x-trail`, then either continues or declines.
    struct Tag {
        name: &'static str,
        pass: bool,
    }

    fn tag(name: &'static str, pass: bool) -> Tag {
        Tag { name, pass }
    }

    #[async_trait]
    impl PartialHandler for Tag {
        async fn apply(&self, next: &dyn Handler, ctx: &mut RequestContext) -> Result<Outcome> {
            ctx.response_mut()
                .headers_mut()
                .append("x-trail", HeaderValue::from_static(self.name));
            if self.pass {
                next.call(ctx).await
            } else {
                Ok(Outcome::NotHandled)
            }
        }
    }

    fn trail(ctx: &RequestContext) -> Vec<String> {
        ctx.response()
            .headers()
            .get_all("x-trail")
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_sequence_invokes_next_on_pass() {
        let h = sequence(tag("a", true), text("done"));
        let mut ctx = RequestContext::new(Method::GET, "/");
        assert_eq!(h.call(&mut ctx).await.unwrap(), Outcome::Handled);
        assert_eq!(trail(&ctx), vec!["a"]);
        assert_eq!(ctx.response().body(), b"done".as_slice());
    }

    #[tokio::test]
    async fn test_sequence_skips_next_on_decline() {
        let h = tag("a", false).then(text("done"));
        let mut ctx = RequestContext::new(Method::GET, "/");
        assert_eq!(h.call(&mut ctx).await.unwrap(), Outcome::NotHandled);
        assert!(ctx.response().body().is_empty());
    }

    #[tokio::test]
    async fn test_chain_is_associative() {
        for (pa, pb, pc) in [
            (true, true, true),
            (true, false, true),
            (false, true, true),
            (true, true, false),
        ] {
            let left = tag("a", pa).and(tag("b", pb)).and(tag("c", pc)).then(text("end"));
            let right = tag("a", pa).and(tag("b", pb).and(tag("c", pc))).then(text("end"));

            let mut l = RequestContext::new(Method::GET, "/x");
            let mut r = RequestContext::new(Method::GET, "/x");
            let lo = left.call(&mut l).await.unwrap();
            let ro = right.call(&mut r).await.unwrap();

            assert_eq!(lo, ro);
            assert_eq!(trail(&l), trail(&r));
            assert_eq!(l.response().body(), r.response().body());
            assert_eq!(l.response().status(), r.response().status());
        }
    }

    #[tokio::test]
    async fn test_chain_runs_gates_in_order() {
        let h = sequence_partial(tag("first", true), tag("second", true)).then(text("x"));
        let mut ctx = RequestContext::new(Method::GET, "/");
        h.call(&mut ctx).await.unwrap();
        assert_eq!(trail(&ctx), vec!["first", "second"]);
    }
}
