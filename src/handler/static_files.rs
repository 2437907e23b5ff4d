//! Static file serving module
//!
//! Translates request paths into paths below the served root and serves
//! files, index files and directory listings from there.

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, ResponseBody};
use crate::logger;
use futures_util::TryStreamExt;
use http_body_util::{BodyExt, StreamBody};
use hyper::body::Frame;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio_util::io::ReaderStream;

/// A request path mapped onto the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    /// The request path ended with `/`
    pub trailing_slash: bool,
}

/// Map a request path onto `root`
///
/// The path is percent-decoded and normalized lexically: empty and `.`
/// segments are dropped, `..` removes the previous segment but never climbs
/// above `root`, and segments carrying a backslash or NUL are discarded.
pub fn translate_path(root: &Path, request_path: &str) -> Result<ResolvedPath, ServeError> {
    let decoded = percent_decode_str(request_path)
        .decode_utf8()
        .map_err(|_| ServeError::MalformedRequest(format!("path is not UTF-8: {request_path}")))?;

    let trailing_slash = decoded.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains(['\\', '\0']) => {}
            s => segments.push(s),
        }
    }

    let mut path = root.to_path_buf();
    path.extend(segments);

    Ok(ResolvedPath {
        path,
        trailing_slash,
    })
}

/// Check that `path`, with symlinks resolved, still lies inside `root`
async fn ensure_within_root(root: &Path, path: &Path) -> Result<(), ServeError> {
    let canonical = fs::canonicalize(path)
        .await
        .map_err(|e| ServeError::from_lookup(&e))?;

    if canonical.starts_with(root) {
        Ok(())
    } else {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path.display(),
            canonical.display()
        ));
        Err(ServeError::Forbidden("Path is outside the served directory"))
    }
}

/// Serve whatever the request path names below the served root
pub async fn serve_path(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> Result<Response<ResponseBody>, ServeError> {
    let resolved = translate_path(&state.root, ctx.path)?;
    ensure_within_root(&state.root, &resolved.path).await?;

    let metadata = fs::metadata(&resolved.path)
        .await
        .map_err(|e| ServeError::from_lookup(&e))?;

    if metadata.is_dir() {
        return serve_directory(ctx, state, &resolved).await;
    }

    if resolved.trailing_slash {
        return Err(ServeError::NotFound("File not found"));
    }

    serve_file(ctx, state, &resolved.path).await
}

/// Serve a directory: redirect to the slash form, then index file, then listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    resolved: &ResolvedPath,
) -> Result<Response<ResponseBody>, ServeError> {
    if !resolved.trailing_slash {
        return Ok(http::build_301_response(&redirect_location(ctx.path, ctx.query)));
    }

    for index_file in &state.config.http.index_files {
        let index_path = resolved.path.join(index_file);
        let is_file = fs::metadata(&index_path)
            .await
            .is_ok_and(|m| m.is_file());
        if is_file && ensure_within_root(&state.root, &index_path).await.is_ok() {
            return serve_file(ctx, state, &index_path).await;
        }
    }

    if !state.config.http.directory_listing {
        return Err(ServeError::Forbidden("Directory listing is disabled"));
    }

    listing::list_directory(ctx, &resolved.path).await
}

/// Location for the slash form of a directory URL
///
/// Leading slashes collapse to one so the result stays a path on this host
/// and never reads as a scheme-relative `//host/...` URL.
fn redirect_location(path: &str, query: Option<&str>) -> String {
    let location = match path.trim_start_matches('/') {
        "" => "/".to_string(),
        path => format!("/{path}/"),
    };
    match query {
        Some(query) => format!("{location}?{query}"),
        None => location,
    }
}

/// Serve a single file with its Content-Type, Content-Length and Last-Modified
///
/// The body streams from the open file rather than being read up front.
async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    path: &Path,
) -> Result<Response<ResponseBody>, ServeError> {
    let file = fs::File::open(path)
        .await
        .map_err(|e| ServeError::from_lookup(&e))?;
    let metadata = file.metadata().await.map_err(ServeError::from_io)?;

    let modified = metadata.modified().ok();
    let last_modified = modified.map(cache::format_http_date);

    if let (Some(time), Some(date)) = (modified, last_modified.as_deref()) {
        if cache::is_not_modified(
            ctx.if_modified_since.as_deref(),
            ctx.if_none_match.as_deref(),
            time,
        ) {
            return Ok(http::build_304_response(date));
        }
    }

    let body = if ctx.is_head {
        http::empty_body()
    } else {
        StreamBody::new(ReaderStream::new(file).map_ok(Frame::data)).boxed_unsync()
    };
    let content_type = state.mime.content_type_for(path);

    Ok(http::build_file_response(
        body,
        metadata.len(),
        content_type,
        last_modified.as_deref(),
    ))
}
