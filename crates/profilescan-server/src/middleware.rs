use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const MAX_REQUEST_ID_LEN: usize = 128;

/// Request ID stored as a request extension by [`request_id`].
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Returns the caller's `x-request-id` if it is short and made of
/// `[A-Za-z0-9._-]`, otherwise `None`.
fn accepted_request_id(value: Option<&HeaderValue>) -> Option<String> {
    let id = value?.to_str().ok()?.trim();
    let well_formed = !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));
    well_formed.then(|| id.to_owned())
}

/// Tags each request with an ID and runs the rest of the stack inside a
/// `request` span carrying it, so per-handle fetch logs can be traced back to
/// the analyze call that caused them.
///
/// A well-formed inbound `x-request-id` is reused; anything else is replaced
/// with a fresh `UUIDv4`. The ID is echoed on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = accepted_request_id(req.headers().get(&REQUEST_ID_HEADER))
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::info_span!("request", request_id = %id);
    let mut res = next.run(req).instrument(span).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    res
}
