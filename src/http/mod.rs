//! HTTP protocol layer module
//!
//! Provides protocol-level helpers (MIME types, cache validation, response
//! builders), decoupled from how paths are resolved.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_301_response, build_304_response, build_error_response, build_file_response,
    build_html_response, empty_body, ResponseBody,
};
