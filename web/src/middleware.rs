//! Request ID middleware.
//!
//! Built from `tower_http::request_id`:
//!
//! 1. A malformed `x-request-id` header (not a UUID) is dropped
//! 2. [`SetRequestId`] fills in a fresh UUID v4 when the header is missing,
//!    and stores it in request extensions
//! 3. [`PropagateRequestId`] copies the header onto the response
//!
//! [`request_span`] is the matching `TraceLayer` span maker, so every log
//! line for a request carries its ID.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use todo_web::middleware::{request_id_layer, request_span};
//! use tower_http::trace::TraceLayer;
//!
//! let app = Router::new()
//!     .route("/api/todos", get(list_todos))
//!     .layer(TraceLayer::new_for_http().make_span_with(request_span))
//!     .layer(request_id_layer());
//! ```

use axum::{extract::Request, http::HeaderName};
use tower::{util::MapRequest, Layer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestId, SetRequestId};
use tracing::Span;
use uuid::Uuid;

/// Header name for the request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create a layer that assigns and echoes request IDs.
#[must_use]
pub const fn request_id_layer() -> RequestIdLayer {
    RequestIdLayer
}

/// Layer for request ID tracking.
///
/// Must sit outside the `TraceLayer` so the span sees the final ID.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestIdLayer;

/// Service produced by [`RequestIdLayer`].
pub type RequestIdService<S> =
    MapRequest<SetRequestId<PropagateRequestId<S>, MakeRequestUuid>, fn(Request) -> Request>;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        let header = HeaderName::from_static(REQUEST_ID_HEADER);
        let propagate = PropagateRequestId::new(inner, header.clone());
        let set = SetRequestId::new(propagate, header, MakeRequestUuid);
        MapRequest::new(set, drop_malformed_id as fn(Request) -> Request)
    }
}

/// Span maker for `TraceLayer::make_span_with`.
pub fn request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    )
}

fn drop_malformed_id(mut request: Request) -> Request {
    let malformed = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .is_some_and(|v| !v.to_str().is_ok_and(|s| Uuid::parse_str(s).is_ok()));

    if malformed {
        tracing::debug!("Discarding malformed request ID");
        request.headers_mut().remove(REQUEST_ID_HEADER);
    }
    request
}
