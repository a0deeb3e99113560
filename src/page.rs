//! Page metadata assembly
//!
//! Everything that goes into the rendered HTML shell besides the template
//! itself: default title/description/OpenGraph image, the meta tag
//! sequence for the document head, the per-request featured payload, the
//! night-mode cookie flag, and the social-card image URL builders.

use crate::search::{Channel, SearchIndex, Speaker, Tag};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;
use serde_json::{json, Value};

pub const DEFAULT_TITLE: &str = "DevTube - The best developer videos in one place";
pub const DEFAULT_DESCRIPTION: &str = "Enjoy the best tech conference videos, webinars \
     and tutorials and share it with friends, colleagues, and the world.";
pub const DEFAULT_OG_IMAGE: &str = "https://dev.tube/open_graph.jpg";

/// One document-head tag; carries either `name` or `property`.
#[derive(Debug, Clone, Serialize)]
pub struct MetaTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub content: String,
}

impl MetaTag {
    fn named(name: &str, content: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            property: None,
            content: content.to_string(),
        }
    }

    fn property(property: &str, content: &str) -> Self {
        Self {
            name: None,
            property: Some(property.to_string()),
            content: content.to_string(),
        }
    }
}

/// Route-specific render overrides; unset keys fall back to defaults.
#[derive(Debug, Clone, Default)]
pub struct PageOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub og_image: Option<String>,
    pub board: Option<String>,
    pub speaker: Option<String>,
    pub preloaded_entity: Option<String>,
}

/// The head tag sequence: description plus the social-card entries.
/// Always fully populated, whatever the route.
pub fn meta_tags(title: &str, description: &str, og_image: &str) -> Vec<MetaTag> {
    vec![
        MetaTag::named("description", description),
        MetaTag::property("og:title", title),
        MetaTag::property("og:description", description),
        MetaTag::property("og:image", og_image),
        MetaTag::property("twitter:title", title),
        MetaTag::property("twitter:description", description),
        MetaTag::property("twitter:image", og_image),
        MetaTag::property("twitter:card", "summary_large_image"),
        MetaTag::property("twitter:site", "@WatchDevTube"),
        MetaTag::property("twitter:creator", "@WatchDevTube"),
    ]
}

/// Night mode is a cookie named `nightMode`, parsed structurally. A value
/// merely containing the substring ("theme=nightModeish") does not count.
pub fn night_mode(cookie_header: Option<&str>) -> bool {
    let Some(header) = cookie_header else {
        return false;
    };
    header.split(';').any(|pair| {
        let name = pair.split_once('=').map_or(pair, |(n, _)| n);
        name.trim() == "nightMode"
    })
}

#[derive(Serialize)]
struct FeaturedPayload {
    tags: Vec<Tag>,
    channels: Vec<Channel>,
    speakers: Vec<Speaker>,
}

/// The featured listings, serialized for verbatim embedding. Recomputed on
/// every qualifying request; never cached across requests.
pub fn featured_json<S: SearchIndex>(index: &S) -> Result<String, serde_json::Error> {
    serde_json::to_string(&FeaturedPayload {
        tags: index.list_tags(),
        channels: index.list_channels(),
        speakers: index.list_speakers(),
    })
}

/// Cloudinary overlay image for a speaker card: the avatar-service URL is
/// base64-embedded via `l_fetch:` and the uppercased handle becomes the
/// overlay text. The handle is accepted as-is, no charset validation.
pub fn speaker_og_image(handle: &str) -> String {
    let avatar_url = BASE64.encode(format!("http://avatars.io/twitter/{handle}"));
    format!(
        "https://res.cloudinary.com/eduardsi/image/upload/\
         l_fetch:{avatar_url},w_180,h_180,g_south_west,x_650,y_270,r_max,bo_2px_solid_white/\
         e_colorize,co_white,l_text:Lato_35:@{},g_south_west,x_220,y_307/dazzle_xcifcf.png",
        handle.to_uppercase()
    )
}

/// Thumbnail convention keyed by the video identifier.
pub fn video_og_image(object_id: &str) -> String {
    format!("https://img.youtube.com/vi/{object_id}/maxresdefault.jpg")
}

/// Merge defaults with overrides (overrides win) into the template
/// variable mapping.
pub fn page_vars(overrides: &PageOverrides, night_mode: bool, featured: String) -> Value {
    let title = overrides.title.as_deref().unwrap_or(DEFAULT_TITLE);
    let description = overrides
        .description
        .as_deref()
        .unwrap_or(DEFAULT_DESCRIPTION);
    let og_image = overrides.og_image.as_deref().unwrap_or(DEFAULT_OG_IMAGE);

    let mut vars = json!({
        "title": title,
        "nightMode": night_mode,
        "featured": featured,
        "meta": meta_tags(title, description, og_image),
    });
    let map = vars.as_object_mut().unwrap_or_else(|| unreachable!());
    if let Some(board) = &overrides.board {
        map.insert("board".to_string(), Value::String(board.clone()));
    }
    if let Some(speaker) = &overrides.speaker {
        map.insert("speaker".to_string(), Value::String(speaker.clone()));
    }
    if let Some(entity) = &overrides.preloaded_entity {
        map.insert("preloadedEntity".to_string(), Value::String(entity.clone()));
    }
    vars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_mode_requires_cookie_name() {
        assert!(night_mode(Some("nightMode=on")));
        assert!(night_mode(Some("a=1; nightMode=true; b=2")));
        assert!(night_mode(Some("nightMode")));
        assert!(!night_mode(None));
        assert!(!night_mode(Some("theme=nightMode")));
        assert!(!night_mode(Some("pref=xnightModey")));
    }

    #[test]
    fn test_meta_sequence_is_fully_populated() {
        let tags = meta_tags("t", "d", "img");
        assert_eq!(tags.len(), 10);
        assert_eq!(tags[0].name.as_deref(), Some("description"));
        assert!(tags[1..].iter().all(|m| m.property.is_some()));
        assert_eq!(tags[7].content, "summary_large_image");
    }

    #[test]
    fn test_speaker_og_image_embeds_avatar_and_overlay() {
        let url = speaker_og_image("octocat");
        let encoded = BASE64.encode("http://avatars.io/twitter/octocat");
        assert_eq!(encoded, "aHR0cDovL2F2YXRhcnMuaW8vdHdpdHRlci9vY3RvY2F0");
        assert!(url.contains(&encoded));
        assert!(url.contains("@OCTOCAT"));
    }

    #[test]
    fn test_page_vars_defaults() {
        let vars = page_vars(&PageOverrides::default(), false, "{}".to_string());
        assert_eq!(vars["title"], DEFAULT_TITLE);
        assert_eq!(vars["nightMode"], false);
        assert_eq!(vars["meta"].as_array().unwrap().len(), 10);
        assert!(vars.get("board").is_none());
    }

    #[test]
    fn test_page_vars_overrides_win() {
        let overrides = PageOverrides {
            title: Some("Custom".to_string()),
            og_image: Some("http://example.com/x.jpg".to_string()),
            preloaded_entity: Some("{\"objectID\":\"x\"}".to_string()),
            ..PageOverrides::default()
        };
        let vars = page_vars(&overrides, true, "{}".to_string());
        assert_eq!(vars["title"], "Custom");
        assert_eq!(vars["nightMode"], true);
        assert_eq!(vars["preloadedEntity"], "{\"objectID\":\"x\"}");
        // og:image in the meta sequence reflects the override.
        let metas = vars["meta"].as_array().unwrap();
        assert!(metas
            .iter()
            .any(|m| m["property"] == "og:image" && m["content"] == "http://example.com/x.jpg"));
        // Description stays at the default.
        assert_eq!(metas[0]["content"], DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_video_og_image_convention() {
        assert_eq!(
            video_og_image("abc123"),
            "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
        );
    }
}
