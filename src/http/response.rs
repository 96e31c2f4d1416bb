//! Terminal output handlers.
//!
//! # Responsibilities
//! - Write content type and body for plain text and JSON leaves
//! - Hand structured values to a content negotiator and write its output
//! - Set the response status ahead of the rest of the pipeline
//!
//! # Design Decisions
//! - A leaf returns `Handled` only after headers and body are fully written
//! - Encoding failures are faults, never `NotHandled`
//! - Content-Length is left to the host, which sees the final body

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use bytes::Bytes;
use serde::Serialize;

use crate::handler::{Handler, Outcome, PartialHandler, Result};
use crate::http::RequestContext;

pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";
pub const APPLICATION_JSON_UTF8: &str = "application/json; charset=utf-8";

/// Output of a content negotiator.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub content_type: HeaderValue,
    pub body: Bytes,
}

/// Chooses a wire format for a value given the request's `Accept` header.
pub trait ContentNegotiator: Send + Sync {
    fn negotiate(&self, accept: Option<&str>, value: &serde_json::Value) -> Result<Encoded>;
}

/// Negotiator that always answers with JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonNegotiator;

impl ContentNegotiator for JsonNegotiator {
    fn negotiate(&self, _accept: Option<&str>, value: &serde_json::Value) -> Result<Encoded> {
        Ok(Encoded {
            content_type: HeaderValue::from_static(APPLICATION_JSON_UTF8),
            body: Bytes::from(serde_json::to_vec(value)?),
        })
    }
}

fn write(ctx: &mut RequestContext, content_type: HeaderValue, body: &[u8]) -> Outcome {
    let response = ctx.response_mut();
    response.set_header(CONTENT_TYPE, content_type);
    response.write_body(body);
    Outcome::Handled
}

/// Plain text leaf.
#[derive(Debug, Clone)]
pub struct Text {
    body: Bytes,
}

pub fn text(body: impl Into<String>) -> Text {
    Text {
        body: Bytes::from(body.into()),
    }
}

#[async_trait]
impl Handler for Text {
    async fn call(&self, ctx: &mut RequestContext) -> Result<Outcome> {
        Ok(write(ctx, HeaderValue::from_static(TEXT_PLAIN_UTF8), &self.body))
    }
}

/// JSON leaf; the value is encoded on every call.
#[derive(Debug, Clone)]
pub struct Json<T> {
    value: T,
}

pub fn json<T>(value: T) -> Json<T>
where
    T: Serialize + Send + Sync,
{
    Json { value }
}

#[async_trait]
impl<T> Handler for Json<T>
where
    T: Serialize + Send + Sync,
{
    async fn call(&self, ctx: &mut RequestContext) -> Result<Outcome> {
        let body = serde_json::to_vec(&self.value)?;
        Ok(write(ctx, HeaderValue::from_static(APPLICATION_JSON_UTF8), &body))
    }
}

/// Leaf that delegates format selection to a [`ContentNegotiator`].
pub struct Serialized<T> {
    value: T,
    negotiator: Arc<dyn ContentNegotiator>,
}

pub fn serialize<T, N>(value: T, negotiator: N) -> Serialized<T>
where
    T: Serialize + Send + Sync,
    N: ContentNegotiator + 'static,
{
    Serialized {
        value,
        negotiator: Arc::new(negotiator),
    }
}

#[async_trait]
impl<T> Handler for Serialized<T>
where
    T: Serialize + Send + Sync,
{
    async fn call(&self, ctx: &mut RequestContext) -> Result<Outcome> {
        let value = serde_json::to_value(&self.value)?;
        let accept = ctx.headers().get(ACCEPT).and_then(|v| v.to_str().ok());
        let encoded = self.negotiator.negotiate(accept, &value)?;
        Ok(write(ctx, encoded.content_type, &encoded.body))
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Serialized<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Serialized").field("value", &self.value).finish()
    }
}

/// Gate that sets the status code, then always continues.
///
/// The previous status is put back if `next` declines.
#[derive(Debug, Clone, Copy)]
pub struct Status {
    code: StatusCode,
}

pub fn status(code: StatusCode) -> Status {
    Status { code }
}

#[async_trait]
impl PartialHandler for Status {
    async fn apply(&self, next: &dyn Handler, ctx: &mut RequestContext) -> Result<Outcome> {
        let previous = ctx.response().status();
        ctx.response_mut().set_status(self.code);
        let outcome = next.call(ctx).await?;
        if outcome == Outcome::NotHandled {
            ctx.response_mut().set_status(previous);
        }
        Ok(outcome)
    }
}
