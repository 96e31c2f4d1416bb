//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming RequestContext (method, path, routing state)
//!     → filter.rs (method / exact path / prefix gates)
//!     → matcher.rs (evaluate the predicate against the effective path)
//!     → router.rs (sub_route: consume prefix, run nested tree, restore on miss)
//!     → state.rs (the consumed-prefix slot)
//! ```
//!
//! # Design Decisions
//! - Routes are handler trees built once, immutable at runtime
//! - No regex and no route table: a route is a gate composed with a handler
//! - Deterministic: first matching alternative wins
//! - Case-sensitive, byte-exact path comparison

pub mod filter;
pub mod matcher;
pub mod router;
pub mod state;

pub use filter::{delete, get, head, method, options, patch, post, put, route, route_starts_with, Filter};
pub use matcher::{Matcher, MethodMatcher, PathMatcher, PathPrefixMatcher};
pub use router::{handler_with_rooted_path, rooted, sub_route, sub_route_gate, Rooted, SubRoute, SubRouteGate};
pub use state::RoutingState;
