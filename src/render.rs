//! Template shell wrapper
//!
//! The proxy renders exactly one template, the SPA shell `index.html`.
//! The engine itself is a dependency (handlebars); this module only wires
//! it: one named template, dev mode re-reads the file on every render so
//! edits show up without a restart.

use crate::error::ProxyError;
use handlebars::Handlebars;
use serde_json::Value;
use std::path::Path;

const TEMPLATE_NAME: &str = "index.html";

pub struct Renderer {
    hb: Handlebars<'static>,
}

impl Renderer {
    /// Register the shell from `<static_dir>/index.html`.
    pub fn from_file(path: &Path, dev_mode: bool) -> Result<Self, ProxyError> {
        let mut hb = Handlebars::new();
        hb.set_dev_mode(dev_mode);
        hb.register_template_file(TEMPLATE_NAME, path)?;
        Ok(Self { hb })
    }

    /// Register the shell from an in-memory string.
    pub fn from_template_str(template: &str) -> Result<Self, ProxyError> {
        let mut hb = Handlebars::new();
        hb.register_template_string(TEMPLATE_NAME, template)?;
        Ok(Self { hb })
    }

    pub fn render(&self, vars: &Value) -> Result<String, ProxyError> {
        Ok(self.hb.render(TEMPLATE_NAME, vars)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SHELL: &str = "<title>{{title}}</title>\
        {{#each meta}}<meta {{#if name}}name=\"{{name}}\"{{else}}property=\"{{property}}\"{{/if}} content=\"{{content}}\">{{/each}}\
        <script>window.featured = {{{featured}}}</script>";

    #[test]
    fn test_render_interpolates_title_and_meta() {
        let renderer = Renderer::from_template_str(SHELL).unwrap();
        let html = renderer
            .render(&json!({
                "title": "DevTube",
                "featured": "{\"tags\":[]}",
                "meta": [
                    {"name": "description", "content": "d"},
                    {"property": "og:title", "content": "DevTube"},
                ],
            }))
            .unwrap();
        assert!(html.contains("<title>DevTube</title>"));
        assert!(html.contains("name=\"description\" content=\"d\""));
        assert!(html.contains("property=\"og:title\""));
        // Triple-stash keeps the payload verbatim.
        assert!(html.contains("window.featured = {\"tags\":[]}"));
    }

    #[test]
    fn test_missing_template_file_is_an_error() {
        let result = Renderer::from_file(Path::new("no/such/shell.html"), false);
        assert!(result.is_err());
    }
}
