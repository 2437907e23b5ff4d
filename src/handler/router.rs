//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, then static
//! file resolution. Every error becomes an error page; nothing here fails the
//! connection.

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::static_files;
use crate::http::{self, ResponseBody};
use crate::logger;
use hyper::header::{HeaderName, HeaderValue, IF_MODIFIED_SINCE, IF_NONE_MATCH, SERVER};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) request path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<ResponseBody>, Infallible> {
    let method = req.method();
    let is_head = *method == Method::HEAD;

    let result = match check_http_method(method) {
        Ok(()) => {
            let ctx = RequestContext {
                path: req.uri().path(),
                query: req.uri().query(),
                is_head,
                if_modified_since: header_string(&req, IF_MODIFIED_SINCE),
                if_none_match: header_string(&req, IF_NONE_MATCH),
            };

            static_files::serve_path(&ctx, &state).await
        }
        Err(e) => Err(e),
    };

    let mut response = result.unwrap_or_else(|err| error_response(&err, is_head));

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    Ok(response)
}

fn header_string<B>(req: &Request<B>, name: HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Only GET and HEAD are served
fn check_http_method(method: &Method) -> Result<(), ServeError> {
    match *method {
        Method::GET | Method::HEAD => Ok(()),
        _ => Err(ServeError::MethodNotAllowed(method.clone())),
    }
}

fn error_response(err: &ServeError, is_head: bool) -> Response<ResponseBody> {
    let message = match err {
        ServeError::Internal(_) => {
            logger::log_error(&err.to_string());
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    http::build_error_response(err.status(), &message, is_head)
}
