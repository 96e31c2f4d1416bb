//! Consumed-prefix bookkeeping for nested sub-routes.
//!
//! # Design Decisions
//! - One slot per request, owned by the context, no locking
//! - Entering a sub-route returns the previous state; the caller restores it
//!   verbatim on a miss, so siblings always start from the same prefix
//! - A stale prefix that no longer matches the request path is ignored

/// Path prefix consumed by the enclosing sub-routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingState {
    consumed_prefix: String,
}

impl RoutingState {
    pub fn consumed_prefix(&self) -> &str {
        &self.consumed_prefix
    }

    /// Strip the consumed prefix from `full_path` when it applies.
    ///
    /// Falls back to `full_path` unchanged when no prefix is set (blank
    /// counts as unset) or when the path does not start with it.
    pub fn effective_path<'p>(&self, full_path: &'p str) -> &'p str {
        let prefix = self.consumed_prefix.as_str();
        if prefix.trim().is_empty() {
            return full_path;
        }
        full_path.strip_prefix(prefix).unwrap_or(full_path)
    }

    /// Extend the consumed prefix by `segment`, returning the prior state.
    pub fn enter(&mut self, segment: &str) -> RoutingState {
        let snapshot = self.clone();
        self.consumed_prefix.push_str(segment);
        snapshot
    }

    /// Put back a state returned by [`RoutingState::enter`].
    pub fn restore(&mut self, snapshot: RoutingState) {
        *self = snapshot;
    }
}
