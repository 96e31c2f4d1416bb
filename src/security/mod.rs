//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → credentials.rs (first `Authorization: Basic` value, base64 decode)
//!     → basic_auth.rs (verifier decides; 401 challenge on failure)
//!     → principal.rs (identity attached to the context)
//!     → Pass to `next`
//! ```
//!
//! # Design Decisions
//! - Fail closed: anything short of a verified principal is challenged
//! - No trust in client input; malformed headers degrade to "absent"
//! - Credentials are never logged

pub mod basic_auth;
pub mod credentials;
pub mod principal;
pub mod users;

pub use basic_auth::{basic_auth, basic_auth_with, challenge, BasicAuth, Predicate, Verifier};
pub use credentials::Credentials;
pub use principal::{Principal, BASIC_SCHEME};
pub use users::StaticUsers;
