//! Request handler module
//!
//! Path classification, per-kind dispatch, and the static fallback.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
