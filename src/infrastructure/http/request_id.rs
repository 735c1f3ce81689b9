use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Tag every request with a fresh id. Logs emitted while handling the request
/// carry it as a span field, and it is echoed back in the `x-request-id` header.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let mut response = async move {
        tracing::debug!("Request received");
        next.run(request).await
    }
    .instrument(span)
    .await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(X_REQUEST_ID, header_value);
    }

    response
}
