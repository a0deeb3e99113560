//! HTTP protocol layer module
//!
//! Response builders and MIME detection, shared by the page renderer, the
//! API registry, and the static fallback.

pub mod mime;
pub mod response;

pub use response::{
    build_404_response, build_405_response, build_500_response, build_file_response,
    build_html_response, build_json_response, build_options_response,
};
