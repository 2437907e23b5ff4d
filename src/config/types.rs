// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub mime: MimeConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served as the URL root
    pub root: String,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Whole-connection timeout in seconds, 0 disables it
    pub connection_timeout: u64,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    /// Files tried, in order, when a directory is requested
    #[serde(default = "default_index_files")]
    pub index_files: Vec<String>,
    pub directory_listing: bool,
}

fn default_index_files() -> Vec<String> {
    vec!["index.html".to_string(), "index.htm".to_string()]
}

/// MIME override configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct MimeConfig {
    /// Entries added on top of the built-in `.wasm` override
    #[serde(default)]
    pub overrides: Vec<MimeOverride>,
}

/// One extension → MIME type override
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MimeOverride {
    /// Extension including its leading dot, e.g. `.wasm`
    pub extension: String,
    pub content_type: String,
}
