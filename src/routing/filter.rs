//! Gating partial handlers built from matchers.
//!
//! A filter calls `next` when its matcher accepts the request and returns
//! `NotHandled` otherwise, without touching the response.

use async_trait::async_trait;
use axum::http::Method;

use crate::handler::{Handler, Outcome, PartialHandler, Result};
use crate::http::RequestContext;
use crate::routing::matcher::{Matcher, MethodMatcher, PathMatcher, PathPrefixMatcher};

/// Partial handler that only continues when `M` matches.
#[derive(Debug, Clone)]
pub struct Filter<M> {
    matcher: M,
}

impl<M: Matcher> Filter<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }
}

#[async_trait]
impl<M: Matcher> PartialHandler for Filter<M> {
    async fn apply(&self, next: &dyn Handler, ctx: &mut RequestContext) -> Result<Outcome> {
        if self.matcher.matches(ctx) {
            next.call(ctx).await
        } else {
            tracing::trace!(matcher = ?self.matcher, path = %ctx.effective_path(), "gate declined");
            Ok(Outcome::NotHandled)
        }
    }
}

/// Continue only when the effective path equals `path`.
pub fn route(path: impl Into<String>) -> Filter<PathMatcher> {
    Filter::new(PathMatcher::new(path))
}

/// Continue only when the effective path starts with `prefix`.
pub fn route_starts_with(prefix: impl Into<String>) -> Filter<PathPrefixMatcher> {
    Filter::new(PathPrefixMatcher::new(prefix))
}

/// Continue only for requests using `expected`.
pub fn method(expected: Method) -> Filter<MethodMatcher> {
    Filter::new(MethodMatcher::new(expected))
}

pub fn get() -> Filter<MethodMatcher> {
    method(Method::GET)
}

pub fn post() -> Filter<MethodMatcher> {
    method(Method::POST)
}

pub fn put() -> Filter<MethodMatcher> {
    method(Method::PUT)
}

pub fn patch() -> Filter<MethodMatcher> {
    method(Method::PATCH)
}

pub fn delete() -> Filter<MethodMatcher> {
    method(Method::DELETE)
}

pub fn head() -> Filter<MethodMatcher> {
    method(Method::HEAD)
}

pub fn options() -> Filter<MethodMatcher> {
    method(Method::OPTIONS)
}
