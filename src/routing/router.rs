//! Sub-route rooting.
//!
//! # Responsibilities
//! - Consume a path prefix for everything nested under a sub-route
//! - Undo the consumption exactly when the nested tree declines
//!
//! # Design Decisions
//! - Save/restore of the whole state, not push/pop, so a miss deep inside
//!   nested sub-routes can never leak into a sibling alternative
//! - On `Handled` the rooted state is left in place: the request is done
//! - On a fault the state is left as is; faults end the request too

use async_trait::async_trait;

use crate::handler::{sequence, Chain, Handler, Outcome, PartialHandler, PartialHandlerExt, Result, Sequence};
use crate::http::RequestContext;
use crate::routing::filter::{route_starts_with, Filter};
use crate::routing::matcher::PathPrefixMatcher;

/// Gate that runs `next` with `prefix` consumed from the effective path.
#[derive(Debug, Clone)]
pub struct Rooted {
    prefix: String,
}

/// Run `next` with `prefix` consumed, without checking that it matches.
pub fn rooted(prefix: impl Into<String>) -> Rooted {
    Rooted {
        prefix: prefix.into(),
    }
}

#[async_trait]
impl PartialHandler for Rooted {
    async fn apply(&self, next: &dyn Handler, ctx: &mut RequestContext) -> Result<Outcome> {
        let snapshot = ctx.routing_mut().enter(&self.prefix);
        tracing::trace!(
            prefix = %ctx.routing().consumed_prefix(),
            remaining = %ctx.effective_path(),
            "entered sub-route"
        );

        let outcome = next.call(ctx).await?;
        if !outcome.is_handled() {
            ctx.routing_mut().restore(snapshot);
        }
        Ok(outcome)
    }
}

/// Prefix gate followed by rooting, awaiting its nested tree.
pub type SubRouteGate = Chain<Filter<PathPrefixMatcher>, Rooted>;

/// A sub-route closed over its nested tree.
pub type SubRoute<H> = Sequence<SubRouteGate, H>;

/// Gate form of [`sub_route`], for chaining with further partial handlers.
pub fn sub_route_gate(prefix: impl Into<String>) -> SubRouteGate {
    let prefix = prefix.into();
    route_starts_with(prefix.clone()).and(rooted(prefix))
}

/// Match `prefix` at the start of the effective path, then evaluate `next`
/// as if the path started after it.
pub fn sub_route<H: Handler>(prefix: impl Into<String>, next: H) -> SubRoute<H> {
    sequence(sub_route_gate(prefix), next)
}

/// Evaluate `next` with `prefix` consumed, whether or not it matches.
pub fn handler_with_rooted_path<H: Handler>(prefix: impl Into<String>, next: H) -> Sequence<Rooted, H> {
    sequence(rooted(prefix), next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{choose, handler_fn, HandlerExt};
    use crate::http::text;
    use crate::routing::route;
    use axum::http::Method;
    use futures_util::FutureExt;

    async fn body_for(tree: &dyn Handler, path: &str) -> Option<String> {
        let mut ctx = RequestContext::new(Method::GET, path);
        match tree.call(&mut ctx).await.unwrap() {
            Outcome::Handled => Some(String::from_utf8(ctx.response().body().to_vec()).unwrap()),
            Outcome::NotHandled => None,
        }
    }

    #[tokio::test]
    async fn test_sub_route_strips_prefix() {
        let tree = sub_route("/api", route("/a").then(text("a")));
        assert_eq!(body_for(&tree, "/api/a").await.as_deref(), Some("a"));
        assert_eq!(body_for(&tree, "/a").await, None);
    }

    #[tokio::test]
    async fn test_failed_sub_route_restores_prefix() {
        let tree = choose(vec![
            sub_route("/api", route("/missing").then(text("h1"))).boxed(),
            route("/api/other").then(text("h2")).boxed(),
        ]);

        let mut ctx = RequestContext::new(Method::GET, "/api/other");
        assert_eq!(tree.call(&mut ctx).await.unwrap(), Outcome::Handled);
        assert_eq!(ctx.response().body(), b"h2".as_slice());
        assert_eq!(ctx.routing().consumed_prefix(), "");
    }

    #[tokio::test]
    async fn test_restore_is_exact_at_depth() {
        let tree = sub_route(
            "/a",
            choose(vec![
                sub_route("/b", sub_route("/c", route("/nope").then(text("deep")))).boxed(),
                // sibling must see "/b/c/d" relative to "/a"
                route("/b/c/d").then(text("sibling")).boxed(),
            ]),
        );
        assert_eq!(body_for(&tree, "/a/b/c/d").await.as_deref(), Some("sibling"));
    }

    #[tokio::test]
    async fn test_handled_leaves_rooting_in_place() {
        let tree = sub_route(
            "/api",
            handler_fn(|ctx| {
                async move {
                    let seen = ctx.routing().consumed_prefix().to_string();
                    ctx.response_mut().write_body(seen.as_bytes());
                    Ok(Outcome::Handled)
                }
                .boxed()
            }),
        );
        let mut ctx = RequestContext::new(Method::GET, "/api/x");
        tree.call(&mut ctx).await.unwrap();
        assert_eq!(ctx.response().body(), b"/api".as_slice());
        assert_eq!(ctx.routing().consumed_prefix(), "/api");
    }

    #[tokio::test]
    async fn test_handler_with_rooted_path_skips_the_gate() {
        let tree = handler_with_rooted_path("/v1", route("/ping").then(text("pong")));
        assert_eq!(body_for(&tree, "/v1/ping").await.as_deref(), Some("pong"));
        // prefix does not apply, so the full path is compared
        assert_eq!(body_for(&tree, "/ping").await.as_deref(), Some("pong"));
    }

    #[tokio::test]
    async fn test_sub_route_gate_chains() {
        let tree = sub_route_gate("/admin").and(route("/stats")).then(text("stats"));
        assert_eq!(body_for(&tree, "/admin/stats").await.as_deref(), Some("stats"));
        assert_eq!(body_for(&tree, "/stats").await, None);
    }
}
