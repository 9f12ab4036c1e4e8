use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use profilescan_core::AccountRecord;
use profilescan_scraper::normalize_handles;
use serde::Serialize;
use serde_json::Value;

use super::AppState;
use crate::budget::BudgetExhausted;
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeResponse {
    pub accounts: Vec<AccountRecord>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

/// `POST /api/analyze` with `{"handles": [...]}`.
///
/// The body is read leniently: anything that is not a JSON object with a
/// `handles` array analyzes nothing and returns an empty list. Per-handle
/// failures are reported inside each record, so an admitted batch always
/// answers 200. A batch whose distinct handles do not fit in the fetch budget
/// gets 429 with `Retry-After` and nothing is fetched.
pub(super) async fn analyze_handles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Response {
    let raw = handles_from_body(&body);
    let handles = normalize_handles(&raw);
    tracing::info!(
        request_id = %req_id.0,
        submitted = raw.len(),
        distinct = handles.len(),
        "analyze request"
    );

    if let Err(exhausted) = state.fetch_budget.try_spend(handles.len()).await {
        tracing::warn!(
            request_id = %req_id.0,
            fetches = handles.len(),
            retry_after_secs = exhausted.retry_after_secs(),
            "fetch budget exhausted"
        );
        return budget_exhausted(exhausted);
    }

    let accounts = state.analyzer.analyze(handles).await;
    Json(AnalyzeResponse { accounts }).into_response()
}

fn budget_exhausted(exhausted: BudgetExhausted) -> Response {
    let retry_after = exhausted.retry_after_secs();
    let mut res = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorBody {
            error: ErrorDetail {
                code: "rate_limited",
                message: format!("profile fetch budget exhausted; retry in {retry_after}s"),
            },
        }),
    )
        .into_response();
    res.headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    res
}

/// Pulls the raw handle list out of a request body. Non-string items are
/// stringified (`123` → `"123"`) and left for normalization to sort out.
pub(super) fn handles_from_body(body: &[u8]) -> Vec<String> {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return Vec::new();
    };
    let Some(items) = value.get("handles").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}
