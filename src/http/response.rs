//! HTTP response building module
//!
//! Builders for the handful of response shapes the proxy emits, decoupled
//! from route logic.

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

fn log_build_error(kind: &str, err: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {kind} response: {err}"));
}

/// Build a rendered-page response.
pub fn build_html_response(content: String) -> Response<Full<Bytes>> {
    let content_length = content.len();
    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a JSON response for API endpoints.
pub fn build_json_response(content: String) -> Response<Full<Bytes>> {
    let content_length = content.len();
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a static-asset response with the extension-derived content type.
pub fn build_file_response(content: Vec<u8>, content_type: &'static str) -> Response<Full<Bytes>> {
    let content_length = content.len();
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("file", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found with a caller-chosen plain-text body. The video
/// branch answers `Not found`, the static fallback `not found`.
pub fn build_404_response(body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from(body)))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, POST, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, POST, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build the generic server-error response used when request processing
/// fails past the not-found cases.
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("500 Internal Server Error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("500 Internal Server Error")))
        })
}
