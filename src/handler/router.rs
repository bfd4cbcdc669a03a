//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: matches method + path, dispatches
//! to the image or data handler, stamps common headers and writes the access log.

use crate::config::{AppState, RoutesConfig};
use crate::handler::{data, image};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

const IMAGE_ALLOW: &str = "GET, HEAD, OPTIONS";
const DATA_ALLOW: &str = "GET, HEAD, POST, OPTIONS";
const HEALTH_ALLOW: &str = "GET, HEAD";

/// What a request path resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Health,
    Image,
    Data,
    Unknown,
}

impl Route {
    fn resolve(path: &str, routes: &RoutesConfig) -> Self {
        // Health checks take priority over everything else
        if routes.health.enabled
            && (path == routes.health.liveness_path || path == routes.health.readiness_path)
        {
            return Self::Health;
        }
        if path == routes.image_path {
            return Self::Image;
        }
        if path == routes.data_path {
            return Self::Data;
        }
        Self::Unknown
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let started = Instant::now();
    let access_log = state.access_log_enabled();
    let entry = access_log.then(|| start_access_entry(&req, peer_addr));

    let mut response = route_request(req, &state).await;
    http::apply_common_headers(
        &mut response,
        &state.config.http.server_name,
        state.config.http.enable_cors,
    );

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch request to the handler for its route
async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let enable_cors = state.config.http.enable_cors;
    let route = Route::resolve(req.uri().path(), &state.config.routes);
    let method = req.method().clone();

    match (route, method) {
        (Route::Health, Method::GET | Method::HEAD) => http::build_health_response("ok"),
        (Route::Health, _) => http::build_405_response(HEALTH_ALLOW),

        (Route::Image, Method::GET) => image::serve_image(&state.config.image, false).await,
        (Route::Image, Method::HEAD) => image::serve_image(&state.config.image, true).await,
        (Route::Image, Method::OPTIONS) => http::build_options_response(IMAGE_ALLOW, enable_cors),
        (Route::Image, m) => method_not_allowed(&m, IMAGE_ALLOW),

        (Route::Data, Method::GET) => data::get_data(state, false).await,
        (Route::Data, Method::HEAD) => data::get_data(state, true).await,
        (Route::Data, Method::POST) => data::post_data(req, state).await,
        (Route::Data, Method::OPTIONS) => http::build_options_response(DATA_ALLOW, enable_cors),
        (Route::Data, m) => method_not_allowed(&m, DATA_ALLOW),

        (Route::Unknown, _) => http::build_404_response(),
    }
}

fn method_not_allowed(method: &Method, allow: &'static str) -> Response<Full<Bytes>> {
    logger::log_warning(&format!("Method not allowed: {method}"));
    http::build_405_response(allow)
}

fn start_access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
