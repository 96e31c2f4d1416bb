//! Basic credentials extraction (RFC 7617).
//!
//! # Responsibilities
//! - Find the first `Basic` value among the `Authorization` headers
//! - Decode `base64(user:password)` into [`Credentials`]
//!
//! # Design Decisions
//! - Any decoding problem yields `None`, treated as absent credentials
//! - Several `Basic` values are tolerated; only the first one counts
//! - Parsing never writes to the response
//! - The password never appears in `Debug` output

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

pub const BASIC_PREFIX: &str = "Basic ";

/// A user/password pair presented by the client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Credentials from the first `Basic` authorization header, if any.
    ///
    /// The scheme is matched on raw bytes, so a first `Basic` value that is
    /// not valid text still counts and yields `None`.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let token = headers
            .get_all(AUTHORIZATION)
            .iter()
            .find_map(|v| v.as_bytes().strip_prefix(BASIC_PREFIX.as_bytes()))?;
        Self::decode(std::str::from_utf8(token).ok()?)
    }

    /// Decode the base64 token that follows `Basic `.
    pub fn decode(token: &str) -> Option<Self> {
        let bytes = BASE64.decode(token.trim()).ok()?;
        let decoded = String::from_utf8(bytes).ok()?;
        let (user, password) = decoded.split_once(':')?;
        Some(Self::new(user, password))
    }

    /// The header value a client would send for these credentials.
    pub fn to_header_value(&self) -> String {
        let token = BASE64.encode(format!("{}:{}", self.user, self.password));
        format!("{BASIC_PREFIX}{token}")
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
