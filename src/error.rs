//! Error taxonomy
//!
//! Startup errors (`Bind`, `InvalidAddress`, `Root`, `Config`) are fatal and end the process.
//! The remaining variants are per-request and are turned into error pages by the handler.

use hyper::{Method, StatusCode};
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),

    #[error("cannot serve directory '{}': {source}", .path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("internal error: {0}")]
    Internal(#[source] std::io::Error),
}

impl ServeError {
    /// Status code used when this error ends a request
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify an I/O error raised while resolving or opening a served path
    ///
    /// Any lookup failure other than a permission problem means the path does
    /// not name something servable (`ENOTDIR`, `ENAMETOOLONG`, `ELOOP`, ...).
    pub fn from_lookup(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::Forbidden("Permission denied"),
            _ => Self::NotFound("File not found"),
        }
    }

    /// Classify an I/O error raised after the served file was opened
    pub fn from_io(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound("File not found"),
            std::io::ErrorKind::PermissionDenied => Self::Forbidden("Permission denied"),
            _ => Self::Internal(err),
        }
    }
}
