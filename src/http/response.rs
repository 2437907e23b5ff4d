//! HTTP response building module
//!
//! Provides builders for the responses the file server produces.

use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED, LOCATION};
use hyper::{Response, StatusCode};
use std::io;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Methods the server answers
pub const ALLOWED_METHODS: &str = "GET, HEAD";

/// Body type of every response: buffered pages or streamed file contents
pub type ResponseBody = UnsyncBoxBody<Bytes, io::Error>;

/// Body holding `data` in memory
pub fn full_body(data: Bytes) -> ResponseBody {
    Full::new(data).map_err(|never| match never {}).boxed_unsync()
}

pub fn empty_body() -> ResponseBody {
    Empty::<Bytes>::new().map_err(|never| match never {}).boxed_unsync()
}

/// Build 200 response for a file
///
/// `content_length` is the size of the file; on `HEAD` the caller passes an
/// empty body and the header still carries the full length.
pub fn build_file_response(
    body: ResponseBody,
    content_length: u64,
    content_type: &str,
    last_modified: Option<&str>,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length);

    if let Some(date) = last_modified {
        builder = builder.header(LAST_MODIFIED, date);
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(empty_body())
    })
}

/// Build 304 Not Modified response
pub fn build_304_response(last_modified: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(LAST_MODIFIED, last_modified)
        .body(empty_body())
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(empty_body())
        })
}

/// Build 301 redirect, used to add the trailing slash to directory URLs
pub fn build_301_response(location: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0)
        .body(empty_body())
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(empty_body())
        })
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<ResponseBody> {
    let content_length = content.len() as u64;
    let body = if is_head {
        empty_body()
    } else {
        full_body(Bytes::from(content))
    };
    build_file_response(body, content_length, HTML_CONTENT_TYPE, None)
}

/// Build an error page for `status`
pub fn build_error_response(
    status: StatusCode,
    message: &str,
    is_head: bool,
) -> Response<ResponseBody> {
    let page = error_page(status, message);
    let content_length = page.len();
    let body = if is_head {
        empty_body()
    } else {
        full_body(Bytes::from(page))
    };

    let mut builder = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, HTML_CONTENT_TYPE)
        .header(CONTENT_LENGTH, content_length);

    if status == StatusCode::METHOD_NOT_ALLOWED {
        builder = builder.header(ALLOW, ALLOWED_METHODS);
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        let mut fallback = Response::new(empty_body());
        *fallback.status_mut() = status;
        fallback
    })
}

fn error_page(status: StatusCode, message: &str) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n<meta charset=\"utf-8\">\n<title>{code} {reason}</title>\n</head>\n\
         <body>\n<h1>{code} {reason}</h1>\n<p>{}</p>\n</body>\n\
         </html>\n",
        escape_html(message)
    )
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
