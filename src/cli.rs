//! Command-line interface
//!
//! Mirrors the familiar `http.server` surface: an optional positional port,
//! `--bind` and `--directory`, plus `--config` and repeatable `--mime` overrides.

use crate::config::MimeOverride;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "wasm-serve", version)]
#[command(about = "Serve a directory over HTTP with .wasm files as application/wasm")]
pub struct Cli {
    /// Port to listen on [default: 8000]
    pub port: Option<u16>,

    /// Address to bind to [default: 0.0.0.0, all interfaces]
    #[arg(short, long, value_name = "HOST")]
    pub bind: Option<String>,

    /// Directory to serve [default: current directory]
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Configuration file (TOML); wasm-serve.toml is read when present
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extra MIME override, e.g. --mime .data=application/octet-stream
    #[arg(short, long, value_name = "EXT=TYPE", value_parser = parse_mime_override)]
    pub mime: Vec<MimeOverride>,

    /// Number of runtime worker threads [default: CPU cores]
    #[arg(short, long, value_name = "N")]
    pub workers: Option<usize>,
}

/// Parse `EXT=TYPE` where EXT carries its leading dot
fn parse_mime_override(arg: &str) -> Result<MimeOverride, String> {
    let Some((extension, content_type)) = arg.split_once('=') else {
        return Err(format!("expected EXT=TYPE, got '{arg}'"));
    };

    if !extension.starts_with('.') || extension.len() < 2 {
        return Err(format!("extension must start with '.', got '{extension}'"));
    }
    if content_type.trim().is_empty() {
        return Err(format!("missing MIME type for '{extension}'"));
    }

    Ok(MimeOverride {
        extension: extension.to_string(),
        content_type: content_type.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["wasm-serve"]).unwrap();
        assert!(cli.port.is_none());
        assert!(cli.bind.is_none());
        assert!(cli.mime.is_empty());
    }

    #[test]
    fn test_positional_port_and_flags() {
        let cli = Cli::try_parse_from([
            "wasm-serve",
            "9000",
            "--bind",
            "127.0.0.1",
            "-d",
            "public",
            "-m",
            ".data=application/x-data",
            "-m",
            ".mem=application/octet-stream",
        ])
        .unwrap();

        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1"));
        assert_eq!(cli.directory, Some(PathBuf::from("public")));
        assert_eq!(cli.mime.len(), 2);
        assert_eq!(cli.mime[0].extension, ".data");
        assert_eq!(cli.mime[0].content_type, "application/x-data");
    }

    #[test]
    fn test_mime_override_rejected() {
        assert!(parse_mime_override("wasm=application/wasm").is_err());
        assert!(parse_mime_override(".wasm").is_err());
        assert!(parse_mime_override(".=text/plain").is_err());
        assert!(parse_mime_override(".wasm=  ").is_err());
        assert!(Cli::try_parse_from(["wasm-serve", "notaport"]).is_err());
    }
}
