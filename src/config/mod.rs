// Configuration module entry point
// Loads layered configuration and builds the shared runtime state

mod state;
mod types;

use crate::cli::Cli;
use crate::error::ServeError;
use config::FileFormat;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::path::Path;

// Re-export public types
pub use state::AppState;
pub use types::{Config, MimeOverride};

/// Config file looked up in the working directory when `--config` is not given
const DEFAULT_CONFIG_FILE: &str = "wasm-serve.toml";

/// Environment variable prefix, e.g. `WASM_SERVE_SERVER__PORT=9000`
const ENV_PREFIX: &str = "WASM_SERVE";

impl Config {
    /// Load configuration: defaults, optional file, environment, then command line
    pub fn load(cli: &Cli) -> Result<Self, ServeError> {
        Self::load_layered(cli, Some(Path::new(DEFAULT_CONFIG_FILE)), None)
    }

    /// Defaults and command line only; ignores the process environment and
    /// any `wasm-serve.toml` in the working directory
    #[cfg(test)]
    pub fn load_isolated(cli: &Cli) -> Result<Self, ServeError> {
        Self::load_layered(cli, None, Some(config::Map::new()))
    }

    /// `default_file` is only read as TOML and only when `--config` is absent.
    /// `env` replaces the process environment when given.
    fn load_layered(
        cli: &Cli,
        default_file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ServeError> {
        let file = match (&cli.config, default_file) {
            (Some(path), _) => Some(config::File::from(path.clone()).required(true)),
            (None, Some(path)) => Some(
                config::File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            ),
            (None, None) => None,
        };

        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.root", ".")?
            .set_default("logging.level", "info")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 0)?
            .set_default(
                "http.server_name",
                concat!("wasm-serve/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("http.directory_listing", true)?;

        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("server.host", cli.bind.clone())?
            .set_override_option(
                "server.root",
                cli.directory
                    .as_ref()
                    .map(|dir| dir.to_string_lossy().into_owned()),
            )?
            .set_override_option(
                "server.workers",
                cli.workers.and_then(|w| i64::try_from(w).ok()),
            )?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        cfg.mime.overrides.extend(cli.mime.iter().cloned());
        Ok(cfg)
    }

    /// Resolve the listen address; an empty host means all IPv4 interfaces
    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServeError> {
        let host = self.server.host.trim();
        let host = if host.is_empty() { "0.0.0.0" } else { host };

        if let Ok(ip) = host.trim_matches(|c| c == '[' || c == ']').parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, self.server.port));
        }

        (host, self.server.port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| ServeError::InvalidAddress(format!("{host}:{}", self.server.port)))
    }
}
