//! Request predicates used by routing gates.
//!
//! # Responsibilities
//! - Match the request method (exact)
//! - Match the effective path exactly (case-sensitive, byte for byte)
//! - Match the effective path by prefix
//!
//! # Design Decisions
//! - Paths are compared against the effective path, so nested sub-routes
//!   see only what is left after their parents' prefixes
//! - No trailing-slash normalisation, no percent-decoding
//! - Matching is a pure read of the context; it never writes the response

use axum::http::Method;

use crate::http::RequestContext;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, ctx: &RequestContext) -> bool;
}

/// Matches the request method.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    expected: Method,
}

impl MethodMatcher {
    pub fn new(expected: Method) -> Self {
        Self { expected }
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, ctx: &RequestContext) -> bool {
        ctx.method() == self.expected
    }
}

/// Matches the effective path exactly.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    path: String,
}

impl PathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for PathMatcher {
    fn matches(&self, ctx: &RequestContext) -> bool {
        ctx.effective_path() == self.path
    }
}

/// Matches the effective path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, ctx: &RequestContext) -> bool {
        ctx.effective_path().starts_with(&self.prefix)
    }
}
