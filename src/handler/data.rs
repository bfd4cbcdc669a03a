//! Data route module
//!
//! Reads and replaces the JSON blob held in [`crate::store::BlobStore`].

use crate::config::AppState;
use crate::http;
use crate::logger;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Request, Response, StatusCode};
use serde_json::{json, Value};

/// Return the current blob
pub async fn get_data(state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    let blob = state.blob.snapshot().await;
    let mut resp = http::build_json_response(StatusCode::OK, &*blob);
    if is_head {
        if let Some(len) = resp.body().size_hint().exact() {
            resp.headers_mut().insert(CONTENT_LENGTH, HeaderValue::from(len));
        }
        *resp.body_mut() = Full::new(Bytes::new());
    }
    resp
}

/// Replace the blob with the request's JSON body
///
/// Requests not declared as JSON, and empty or falsy bodies, are rejected
/// with a structured 400 and leave the stored blob untouched. Declared JSON
/// that does not parse gets a plain 400.
pub async fn post_data<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let declared_json = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_json_content_type);
    if !declared_json {
        return no_json_response();
    }

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            return http::build_400_response();
        }
    };

    if body.iter().all(|&b| is_json_whitespace(b)) {
        return no_json_response();
    }

    let value: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            logger::log_warning(&format!("Invalid JSON body: {e}"));
            return http::build_400_response();
        }
    };

    match state.blob.store_if_truthy(value).await {
        Some(stored) => {
            logger::log_received_data(&stored);
            http::build_json_response(StatusCode::OK, &json!({"status": "success"}))
        }
        None => no_json_response(),
    }
}

/// `application/json` or any `application/*+json` type, parameters ignored
fn is_json_content_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

// RFC 8259 insignificant whitespace; form feed and friends are not JSON
const fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn no_json_response() -> Response<Full<Bytes>> {
    http::build_json_response(
        StatusCode::BAD_REQUEST,
        &json!({"status": "fail", "reason": "No JSON received"}),
    )
}
