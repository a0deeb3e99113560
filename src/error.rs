//! Request-processing error type
//!
//! Expected absences (unknown video id, missing static file) are not
//! errors; they are ordinary 404 responses built inline. This type covers
//! the failures that terminate a request with a generic server error:
//! an unreadable board resource, a broken template, or a failed fetch.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("contributors board read failed: {0}")]
    Board(#[source] std::io::Error),

    #[error("template registration failed: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("template render failed: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("content fetch failed: {0}")]
    Fetch(#[source] std::io::Error),
}
