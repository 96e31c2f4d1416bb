//! Handler tree host adapter.
//!
//! # Responsibilities
//! - Buffer the request body (bounded by `limits.max_body_size`)
//! - Build a `RequestContext` and evaluate the handler tree once
//! - Send the built response, or hand the request on when the tree declines
//!
//! # Design Decisions
//! - The body is read before the tree runs so handlers see a plain `Bytes`
//! - Over the limit is 413; any other body read failure is 400
//! - A declined request is re-assembled from the same parts and bytes
//! - Handler faults stop here and become a 500; the tree never sees them again

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use uuid::Uuid;

use crate::handler::{evaluate, Handler, Outcome, SharedHandler};
use crate::http::{RequestContext, X_REQUEST_ID};

/// Middleware state: the tree to evaluate and the body limit.
#[derive(Clone)]
pub struct TreeState {
    root: SharedHandler,
    max_body_size: usize,
}

impl TreeState {
    pub fn new(root: SharedHandler, max_body_size: usize) -> Self {
        Self {
            root,
            max_body_size,
        }
    }

    pub fn from_handler<H: Handler + 'static>(root: H, max_body_size: usize) -> Self {
        Self::new(Arc::new(root), max_body_size)
    }
}

pub async fn handler_tree_middleware(
    State(state): State<TreeState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    let request_id = parts
        .headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let bytes = match Limited::new(body, state.max_body_size).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            tracing::warn!(
                request_id = %request_id,
                limit = state.max_body_size,
                "Request body over limit"
            );
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Request body unreadable");
            return (StatusCode::BAD_REQUEST, "Request body could not be read").into_response();
        }
    };

    let mut ctx = RequestContext::from_parts(&parts, bytes.clone()).with_request_id(&request_id);

    match evaluate(state.root.as_ref(), &mut ctx).await {
        Ok(Outcome::Handled) => ctx.into_response(),
        Ok(Outcome::NotHandled) => next.run(Request::from_parts(parts, Body::from(bytes))).await,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                method = %parts.method,
                path = %parts.uri.path(),
                error = %e,
                "Handler tree failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
