//! Request routing dispatch module
//!
//! The single dispatch path of the proxy: classify the request path,
//! gather per-kind metadata, and either render the shell or terminate
//! with a plain status response. `handle_request` is the hyper boundary;
//! `respond` is the framework-free core the tests drive directly.

use crate::api;
use crate::config::AppState;
use crate::error::ProxyError;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use crate::page::{self, PageOverrides};
use crate::route::{self, Route};
use crate::search::SearchIndex;
use crate::videos::VideoSource;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling.
///
/// GET and POST dispatch identically through the classifier; OPTIONS
/// answers the preflight; everything else is 405. A processing error past
/// the not-found cases surfaces as a generic 500.
pub async fn handle_request<S: SearchIndex, V: VideoSource>(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState<S, V>>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    match req.method() {
        &Method::GET | &Method::POST => {}
        &Method::OPTIONS => {
            return Ok(http::build_options_response(state.config.http.enable_cors))
        }
        method => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            return Ok(http::build_405_response());
        }
    }

    let path = req.uri().path().to_string();
    let cookie_header = req
        .headers()
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    match respond(&path, cookie_header.as_deref(), &state).await {
        Ok(response) => Ok(response),
        Err(e) => {
            logger::log_error(&format!("Request failed for {path}: {e}"));
            Ok(http::build_500_response())
        }
    }
}

/// Classify and answer one request.
pub async fn respond<S: SearchIndex, V: VideoSource>(
    path: &str,
    cookie_header: Option<&str>,
    state: &AppState<S, V>,
) -> Result<Response<Full<Bytes>>, ProxyError> {
    if state.config.logging.access_log {
        logger::log_request_path(path);
    }
    let night_mode = page::night_mode(cookie_header);

    match route::classify(path) {
        Route::Home => render_page(state, night_mode, PageOverrides::default()),

        Route::Contributors => {
            let board = tokio::fs::read_to_string(state.config.board_path())
                .await
                .map_err(ProxyError::Board)?;
            render_page(
                state,
                night_mode,
                PageOverrides {
                    title: Some("DevTube – Community and Contributors".to_string()),
                    board: Some(board),
                    ..PageOverrides::default()
                },
            )
        }

        Route::SpeakerProfile { handle } => {
            logger::log_speaker_request(&handle);
            render_page(
                state,
                night_mode,
                PageOverrides {
                    title: Some(format!("DevTube - Videos by @{handle}")),
                    speaker: Some(format!("\"{handle}\"")),
                    og_image: Some(page::speaker_og_image(&handle)),
                    ..PageOverrides::default()
                },
            )
        }

        Route::DirectLink { kind, param } => {
            logger::log_direct_link_request(kind.as_str());
            render_page(
                state,
                night_mode,
                PageOverrides {
                    title: Some(format!(
                        "DevTube - Videos, tutorials, webinars about {param}"
                    )),
                    ..PageOverrides::default()
                },
            )
        }

        Route::Api { endpoint } => api::dispatch(&endpoint, &state.index),

        Route::VideoDetail { object_id } => {
            logger::log_video_request(&object_id);
            serve_video_detail(state, night_mode, &object_id).await
        }

        Route::Fallback { path } => {
            Ok(static_files::serve(&state.config.static_dir(), &path).await)
        }
    }
}

/// Two-step remote lookup: restrict the search to the exact identifier,
/// then fetch the full record. The sort key is carried for interface
/// fidelity; it cannot reorder a single exact match.
async fn serve_video_detail<S: SearchIndex, V: VideoSource>(
    state: &AppState<S, V>,
    night_mode: bool,
    object_id: &str,
) -> Result<Response<Full<Bytes>>, ProxyError> {
    let mut refinement = HashMap::new();
    refinement.insert("objectID".to_string(), object_id.to_string());

    let video_id = state
        .index
        .search(None, &refinement, "-satisfaction")
        .into_iter()
        .flatten()
        .map(|hit| hit.object_id)
        .next();

    let video = match video_id {
        Some(id) => state
            .videos
            .fetch(std::slice::from_ref(&id))
            .await
            .map_err(ProxyError::Fetch)?
            .into_iter()
            .next()
            .flatten(),
        None => None,
    };

    let Some(video) = video else {
        return Ok(http::build_404_response("Not found"));
    };

    let overrides = PageOverrides {
        title: Some(format!("{} – Watch @ Dev.Tube", video.title)),
        description: Some(video.description.clone()),
        og_image: Some(page::video_og_image(&video.object_id)),
        preloaded_entity: Some(serde_json::to_string(&video)?),
        ..PageOverrides::default()
    };
    render_page(state, night_mode, overrides)
}

/// Funnel for every non-terminal branch: fresh featured payload, defaults
/// merged with overrides, one shell render.
fn render_page<S: SearchIndex, V: VideoSource>(
    state: &AppState<S, V>,
    night_mode: bool,
    overrides: PageOverrides,
) -> Result<Response<Full<Bytes>>, ProxyError> {
    let featured = page::featured_json(&state.index)?;
    let vars = page::page_vars(&overrides, night_mode, featured);
    let html = state.renderer.render(&vars)?;
    Ok(http::build_html_response(html))
}
