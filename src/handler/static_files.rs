//! Static fallback serving
//!
//! Paths that match no page route are tried against the asset directory.
//! One attempt: open-and-read, no existence pre-check, so there is no
//! check/use race window. Any read failure is a plain 404.

use crate::http::{self, mime};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve `path` relative to the asset directory, or 404 `not found`.
pub async fn serve(static_dir: &str, path: &str) -> Response<Full<Bytes>> {
    // Strip the leading slash and neutralize traversal segments. The
    // replace can leave another leading slash behind; strip that too so
    // the join stays inside the asset directory.
    let clean_path = path.trim_start_matches('/').replace("..", "");
    let file_path = Path::new(static_dir).join(clean_path.trim_start_matches('/'));

    match fs::read(&file_path).await {
        Ok(content) => {
            let content_type =
                mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
            http::build_file_response(content, content_type)
        }
        Err(_) => http::build_404_response("not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let response = serve("no_such_dir", "/nonexistent/file.png").await;
        assert_eq!(response.status(), 404);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"not found");
    }

    #[tokio::test]
    async fn test_existing_file_is_served() {
        // Tests run from the crate root; the shipped template doubles as a fixture.
        let response = serve("static", "/index.html").await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["Content-Type"].to_str().unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_traversal_is_neutralized() {
        let response = serve("static", "/../Cargo.toml").await;
        assert_eq!(response.status(), 404);
    }
}
