//! Basic authentication gate.
//!
//! # Responsibilities
//! - Read Basic credentials from the request
//! - Ask a caller-supplied verifier for a principal
//! - Attach the principal and continue, or answer with a 401 challenge
//!
//! # Design Decisions
//! - A challenge is `Handled`: the 401 is the final answer for this request,
//!   so enclosing alternatives are not tried
//! - Absent, malformed and rejected credentials all produce the same challenge
//! - Nothing is written before the verifier has decided

use async_trait::async_trait;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};

use crate::handler::{Handler, Outcome, PartialHandler, Result};
use crate::http::RequestContext;
use crate::security::credentials::Credentials;
use crate::security::principal::{Principal, BASIC_SCHEME};

/// Decides whether credentials identify a principal.
pub trait Verifier: Send + Sync {
    fn verify(&self, credentials: &Credentials) -> Option<Principal>;
}

impl<F> Verifier for F
where
    F: Fn(&Credentials) -> Option<Principal> + Send + Sync,
{
    fn verify(&self, credentials: &Credentials) -> Option<Principal> {
        self(credentials)
    }
}

/// Verifier from a yes/no check; accepted users get a plain Basic principal.
#[derive(Debug, Clone)]
pub struct Predicate<F> {
    check: F,
}

impl<F> Verifier for Predicate<F>
where
    F: Fn(&Credentials) -> bool + Send + Sync,
{
    fn verify(&self, credentials: &Credentials) -> Option<Principal> {
        (self.check)(credentials).then(|| Principal::basic(credentials.user()))
    }
}

/// Partial handler guarding `next` with Basic authentication.
#[derive(Debug, Clone)]
pub struct BasicAuth<V> {
    verifier: V,
}

/// Guard with a predicate over the presented user and password.
pub fn basic_auth<F>(check: F) -> BasicAuth<Predicate<F>>
where
    F: Fn(&Credentials) -> bool + Send + Sync,
{
    BasicAuth {
        verifier: Predicate { check },
    }
}

/// Guard with a verifier that returns the principal to attach.
pub fn basic_auth_with<V: Verifier>(verifier: V) -> BasicAuth<V> {
    BasicAuth { verifier }
}

/// Write the 401 challenge.
pub fn challenge(ctx: &mut RequestContext) {
    let response = ctx.response_mut();
    response.set_status(StatusCode::UNAUTHORIZED);
    response.set_header(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_SCHEME));
}

#[async_trait]
impl<V: Verifier> PartialHandler for BasicAuth<V> {
    async fn apply(&self, next: &dyn Handler, ctx: &mut RequestContext) -> Result<Outcome> {
        let principal = match Credentials::from_headers(ctx.headers()) {
            Some(credentials) => {
                let principal = self.verifier.verify(&credentials);
                if principal.is_none() {
                    tracing::debug!(path = %ctx.path(), "Basic credentials rejected");
                }
                principal
            }
            None => {
                tracing::debug!(path = %ctx.path(), "Basic credentials absent or malformed");
                None
            }
        };

        match principal {
            Some(principal) => {
                tracing::debug!(user = %principal.name(), "Basic credentials accepted");
                ctx.set_user(principal);
                next.call(ctx).await
            }
            None => {
                challenge(ctx);
                Ok(Outcome::Handled)
            }
        }
    }
}
