//! Custom Axum extractors.
//!
//! - `RequestId`: the ID assigned by [`request_id_layer`](crate::middleware::request_id_layer)
//!
//! # Examples
//!
//! ```ignore
//! use todo_web::RequestId;
//!
//! async fn handler(request_id: RequestId) -> Result<Json<Response>, AppError> {
//!     tracing::info!(request_id = %request_id, "Processing request");
//!     Ok(Json(response))
//! }
//! ```

use crate::middleware::REQUEST_ID_HEADER;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::fmt;
use tower_http::request_id::RequestId as AssignedRequestId;
use uuid::Uuid;

/// Request ID for log correlation.
///
/// Read from the ID the middleware stored in request extensions. Without
/// the middleware, falls back to the `x-request-id` header, or a fresh UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .extensions
            .get::<AssignedRequestId>()
            .map(AssignedRequestId::header_value)
            .or_else(|| parts.headers.get(REQUEST_ID_HEADER))
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(request_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_falls_back_to_header() {
        let id = Uuid::new_v4();
        let (mut parts, ()) = Request::builder()
            .header(REQUEST_ID_HEADER, id.to_string())
            .body(())
            .unwrap()
            .into_parts();

        let extracted = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted, RequestId(id));
    }

    #[tokio::test]
    async fn test_prefers_extension() {
        let id = Uuid::new_v4();
        let (mut parts, ()) = Request::builder()
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
            .body(())
            .unwrap()
            .into_parts();
        parts
            .extensions
            .insert(AssignedRequestId::new(id.to_string().parse().unwrap()));

        let extracted = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted, RequestId(id));
    }
}
