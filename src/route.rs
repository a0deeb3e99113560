//! Request path classification module
//!
//! Maps an incoming path onto one of the seven page kinds served by the
//! proxy. Classification is a pure function of the path: ordered
//! prefix/equality tests, first match wins. The order matters because the
//! prefixes overlap (`/@` vs an arbitrary static path, `/api` vs `/video/`).

/// Discriminator for shareable landing-page links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Channel,
    Tag,
}

impl LinkKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Tag => "tag",
        }
    }
}

/// The page kind a request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, empty path, or `/find` — the search/home page.
    Home,
    /// `/contributors…` — community page with the board payload.
    Contributors,
    /// `/@{handle}` — speaker profile page.
    SpeakerProfile { handle: String },
    /// `/channel/{param}` or `/tag/{param}` landing page.
    DirectLink { kind: LinkKind, param: String },
    /// `/api/{endpoint}` — JSON API passthrough.
    Api { endpoint: String },
    /// `/video/{id}` — video detail page.
    VideoDetail { object_id: String },
    /// Anything else: try the static dir, otherwise 404.
    Fallback { path: String },
}

/// Classify a request path.
///
/// Total and deterministic; no path is rejected here. Handles that look
/// odd (empty speaker handle, empty video id) still classify and resolve
/// to an empty listing or a 404 downstream.
pub fn classify(path: &str) -> Route {
    if path.is_empty() || path == "/" || path == "/find" {
        return Route::Home;
    }
    if path.starts_with("/contributors") {
        return Route::Contributors;
    }
    if let Some(handle) = path.strip_prefix("/@") {
        return Route::SpeakerProfile {
            handle: handle.to_string(),
        };
    }
    if let Some(param) = path.strip_prefix("/channel/") {
        return Route::DirectLink {
            kind: LinkKind::Channel,
            param: param.to_string(),
        };
    }
    if let Some(param) = path.strip_prefix("/tag/") {
        return Route::DirectLink {
            kind: LinkKind::Tag,
            param: param.to_string(),
        };
    }
    if let Some(rest) = path.strip_prefix("/api") {
        return Route::Api {
            endpoint: rest.trim_start_matches('/').to_string(),
        };
    }
    if path.starts_with("/video/") {
        // Third segment of "/video/<id>"; extra segments are ignored.
        let object_id = path.split('/').nth(2).unwrap_or_default();
        return Route::VideoDetail {
            object_id: object_id.to_string(),
        };
    }
    Route::Fallback {
        path: path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_variants() {
        assert_eq!(classify(""), Route::Home);
        assert_eq!(classify("/"), Route::Home);
        assert_eq!(classify("/find"), Route::Home);
    }

    #[test]
    fn test_contributors_prefix() {
        assert_eq!(classify("/contributors"), Route::Contributors);
        assert_eq!(classify("/contributors/2019"), Route::Contributors);
    }

    #[test]
    fn test_speaker_handle() {
        assert_eq!(
            classify("/@octocat"),
            Route::SpeakerProfile {
                handle: "octocat".to_string()
            }
        );
        // No validation on the handle; whatever follows /@ is accepted.
        assert_eq!(
            classify("/@weird/handle"),
            Route::SpeakerProfile {
                handle: "weird/handle".to_string()
            }
        );
    }

    #[test]
    fn test_direct_links() {
        assert_eq!(
            classify("/tag/rust"),
            Route::DirectLink {
                kind: LinkKind::Tag,
                param: "rust".to_string()
            }
        );
        assert_eq!(
            classify("/channel/devoxx"),
            Route::DirectLink {
                kind: LinkKind::Channel,
                param: "devoxx".to_string()
            }
        );
    }

    #[test]
    fn test_api_endpoint() {
        assert_eq!(
            classify("/api/featured"),
            Route::Api {
                endpoint: "featured".to_string()
            }
        );
        assert_eq!(
            classify("/api"),
            Route::Api {
                endpoint: String::new()
            }
        );
    }

    #[test]
    fn test_video_detail() {
        assert_eq!(
            classify("/video/abc123"),
            Route::VideoDetail {
                object_id: "abc123".to_string()
            }
        );
        // Trailing segments after the id are ignored.
        assert_eq!(
            classify("/video/abc123/extra"),
            Route::VideoDetail {
                object_id: "abc123".to_string()
            }
        );
        assert_eq!(
            classify("/video/"),
            Route::VideoDetail {
                object_id: String::new()
            }
        );
    }

    #[test]
    fn test_fallback() {
        assert_eq!(
            classify("/nonexistent/file.png"),
            Route::Fallback {
                path: "/nonexistent/file.png".to_string()
            }
        );
        // "/videos" does not match the "/video/" prefix.
        assert_eq!(
            classify("/videos"),
            Route::Fallback {
                path: "/videos".to_string()
            }
        );
    }

    #[test]
    fn test_order_is_load_bearing() {
        // "/api" wins over the video prefix test for "/api/video/x".
        assert_eq!(
            classify("/api/video/x"),
            Route::Api {
                endpoint: "video/x".to_string()
            }
        );
        // "/@..." wins over fallback even for strange handles.
        assert!(matches!(
            classify("/@"),
            Route::SpeakerProfile { handle } if handle.is_empty()
        ));
    }

    #[test]
    fn test_determinism() {
        for path in ["/", "/tag/rust", "/video/x", "/whatever"] {
            assert_eq!(classify(path), classify(path));
        }
    }
}
