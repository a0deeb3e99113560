//! JSON API passthrough
//!
//! An explicit compile-time registry of API endpoints, replacing
//! resolve-a-module-by-request-path dispatch. Unknown endpoints are a
//! declared 404 rather than an unhandled resolution failure.

use crate::error::ProxyError;
use crate::http;
use crate::logger;
use crate::page;
use crate::search::SearchIndex;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Dispatch `/api/{endpoint}` against the registry.
pub fn dispatch<S: SearchIndex>(
    endpoint: &str,
    index: &S,
) -> Result<Response<Full<Bytes>>, ProxyError> {
    let response = match endpoint {
        "featured" => http::build_json_response(page::featured_json(index)?),
        "tags" => http::build_json_response(serde_json::to_string(&index.list_tags())?),
        "channels" => http::build_json_response(serde_json::to_string(&index.list_channels())?),
        "speakers" => http::build_json_response(serde_json::to_string(&index.list_speakers())?),
        unknown => {
            logger::log_warning(&format!("Unknown API endpoint: /api/{unknown}"));
            http::build_404_response("not found")
        }
    };
    Ok(response)
}
