// Application state module
// Immutable state shared by every connection task

use super::types::Config;
use crate::error::ServeError;
use crate::http::mime::MimeTable;
use std::path::{Path, PathBuf};

/// Shared application state, built once before the listener starts
pub struct AppState {
    pub config: Config,
    /// Canonical served root; every resolved path must stay below it
    pub root: PathBuf,
    pub mime: MimeTable,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ServeError> {
        let root = canonical_root(Path::new(&config.server.root))?;
        let mime = MimeTable::with_overrides(&config.mime.overrides);

        Ok(Self { config, root, mime })
    }
}

fn canonical_root(path: &Path) -> Result<PathBuf, ServeError> {
    let root = path.canonicalize().map_err(|source| ServeError::Root {
        path: path.to_path_buf(),
        source,
    })?;

    if !root.is_dir() {
        return Err(ServeError::Root {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
        });
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::config::MimeOverride;
    use clap::Parser;

    fn test_config(root: &Path) -> Config {
        let cli = Cli::try_parse_from(["wasm-serve"]).unwrap();
        let mut cfg = Config::load_isolated(&cli).unwrap();
        cfg.server.root = root.to_string_lossy().into_owned();
        cfg
    }

    #[test]
    fn test_root_is_canonicalized() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(test_config(dir.path())).unwrap();
        assert_eq!(state.root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_root_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            AppState::new(test_config(&missing)),
            Err(ServeError::Root { .. })
        ));
    }

    #[test]
    fn test_root_must_be_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            AppState::new(test_config(&file)),
            Err(ServeError::Root { .. })
        ));
    }

    #[test]
    fn test_configured_overrides_reach_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = test_config(dir.path());
        cfg.mime.overrides.push(MimeOverride {
            extension: ".data".to_string(),
            content_type: "application/x-data".to_string(),
        });
        let state = AppState::new(cfg).unwrap();
        assert_eq!(
            state.mime.content_type_for(Path::new("a.data")),
            "application/x-data"
        );
        assert_eq!(
            state.mime.content_type_for(Path::new("a.wasm")),
            "application/wasm"
        );
    }
}
