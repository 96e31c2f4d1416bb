//! Per-request state handed to the handler tree.
//!
//! # Responsibilities
//! - Expose the request (method, path, headers, buffered body, request ID)
//! - Hold the response under construction (status, headers, body)
//! - Carry the principal slot and the routing state
//! - Provide a typed extension bag for other intra-pipeline state
//!
//! # Design Decisions
//! - Owned by exactly one in-flight evaluation, so nothing here is locked
//! - The path is kept as delivered by the host; no decoding or normalisation
//! - Response starts as `200 OK`, no headers, empty body

use axum::body::Body;
use axum::http::{request, Extensions, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::Response;
use bytes::{Bytes, BytesMut};

use crate::routing::RoutingState;
use crate::security::Principal;

/// Response being assembled by the handler tree.
#[derive(Debug, Clone)]
pub struct OutgoingResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: BytesMut,
}

impl Default for OutgoingResponse {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
        }
    }
}

impl OutgoingResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Replace any existing values of `name`.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Append bytes to the body sink.
    pub fn write_body(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    /// Convert into the host's response type.
    pub fn into_http(self) -> Response {
        let mut response = Response::new(Body::from(self.body.freeze()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Request/response pair for one evaluation of the handler tree.
#[derive(Debug)]
pub struct RequestContext {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Bytes,
    request_id: Option<String>,
    response: OutgoingResponse,
    user: Option<Principal>,
    routing: RoutingState,
    extensions: Extensions,
}

impl RequestContext {
    /// Context for a body-less request with no headers.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            request_id: None,
            response: OutgoingResponse::default(),
            user: None,
            routing: RoutingState::default(),
            extensions: Extensions::new(),
        }
    }

    /// Context built by the host from parsed request parts and a buffered body.
    pub fn from_parts(parts: &request::Parts, body: Bytes) -> Self {
        let mut ctx = Self::new(parts.method.clone(), parts.uri.path());
        ctx.headers = parts.headers.clone();
        ctx.body = body;
        ctx
    }

    /// Append a request header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Full request path, ignoring any consumed sub-route prefix.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path left to match after the prefixes consumed by enclosing sub-routes.
    pub fn effective_path(&self) -> &str {
        self.routing.effective_path(&self.path)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn response(&self) -> &OutgoingResponse {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut OutgoingResponse {
        &mut self.response
    }

    /// Principal set by an authentication gate, if any.
    pub fn user(&self) -> Option<&Principal> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, principal: Principal) {
        self.user = Some(principal);
    }

    pub fn routing(&self) -> &RoutingState {
        &self.routing
    }

    pub fn routing_mut(&mut self) -> &mut RoutingState {
        &mut self.routing
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }

    /// Consume the context, keeping only the response.
    pub fn into_response(self) -> Response {
        self.response.into_http()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{ACCEPT, CONTENT_TYPE};
    use axum::http::Request;

    #[test]
    fn test_new_context_defaults() {
        let ctx = RequestContext::new(Method::GET, "/a");
        assert_eq!(ctx.method(), Method::GET);
        assert_eq!(ctx.path(), "/a");
        assert_eq!(ctx.effective_path(), "/a");
        assert!(ctx.user().is_none());
        assert_eq!(ctx.response().status(), StatusCode::OK);
        assert!(ctx.response().headers().is_empty());
        assert!(ctx.response().body().is_empty());
    }

    #[test]
    fn test_extensions_carry_typed_state() {
        #[derive(Debug, Clone, PartialEq)]
        struct Tenant(&'static str);

        let mut ctx = RequestContext::new(Method::GET, "/");
        assert!(ctx.extensions().get::<Tenant>().is_none());
        ctx.extensions_mut().insert(Tenant("mi6"));
        assert_eq!(ctx.extensions().get::<Tenant>(), Some(&Tenant("mi6")));
    }

    #[test]
    fn test_from_parts_copies_request() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("http://example.com/api/items?page=2")
            .header(ACCEPT, "application/json")
            .body(())
            .unwrap();
        let (parts, _) = req.into_parts();

        let ctx = RequestContext::from_parts(&parts, Bytes::from_static(b"{}"));
        assert_eq!(ctx.method(), Method::POST);
        assert_eq!(ctx.path(), "/api/items");
        assert_eq!(ctx.headers().get(ACCEPT).unwrap(), "application/json");
        assert_eq!(ctx.body().as_ref(), b"{}");
    }

    #[test]
    fn test_headers_are_multi_valued() {
        let ctx = RequestContext::new(Method::GET, "/")
            .with_header(ACCEPT, HeaderValue::from_static("text/plain"))
            .with_header(ACCEPT, HeaderValue::from_static("application/json"));
        assert_eq!(ctx.headers().get_all("accept").iter().count(), 2);
    }

    #[test]
    fn test_response_into_http() {
        let mut ctx = RequestContext::new(Method::GET, "/");
        ctx.response_mut().set_status(StatusCode::CREATED);
        ctx.response_mut()
            .set_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        ctx.response_mut().write_body(b"ab");
        ctx.response_mut().write_body(b"cd");

        let response = ctx.into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/plain");
    }
}
