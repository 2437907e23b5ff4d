//! MIME type detection module
//!
//! Returns the Content-Type for a served file. The override table is consulted
//! first; the built-in extension table is the fallback.

use crate::config::MimeOverride;
use std::collections::HashMap;
use std::path::Path;

/// Fallback for files no table knows about
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Entries every table starts with
const BUILTIN_OVERRIDES: &[(&str, &str)] = &[(".wasm", "application/wasm")];

/// Extension → MIME type overrides, keyed by extension including the leading dot
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct MimeTable {
    overrides: HashMap<String, String>,
}

impl MimeTable {
    /// Table holding only the built-in entries
    pub fn builtin() -> Self {
        let overrides = BUILTIN_OVERRIDES
            .iter()
            .map(|(ext, mime)| ((*ext).to_string(), (*mime).to_string()))
            .collect();
        Self { overrides }
    }

    /// Built-in entries followed by `extra`; later entries win
    pub fn with_overrides(extra: &[MimeOverride]) -> Self {
        let mut table = Self::builtin();
        for entry in extra {
            table
                .overrides
                .insert(entry.extension.clone(), entry.content_type.clone());
        }
        table
    }

    /// Look an extension up as given, then lowercased
    pub fn lookup(&self, extension: &str) -> Option<&str> {
        self.overrides
            .get(extension)
            .or_else(|| self.overrides.get(&extension.to_lowercase()))
            .map(String::as_str)
    }

    /// Content-Type for `path`: override table, then the built-in table
    pub fn content_type_for(&self, path: &Path) -> &str {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return DEFAULT_CONTENT_TYPE;
        };

        if let Some(mime) = self.lookup(&format!(".{ext}")) {
            return mime;
        }

        get_content_type(Some(&ext.to_lowercase()))
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Get MIME Content-Type based on file extension (without the dot)
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("csv") => "text/csv",
        Some("xml") => "application/xml",

        // Scripts and data
        Some("js" | "mjs") => "application/javascript",
        Some("json" | "map") => "application/json",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Video
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("ogv") => "video/ogg",

        // Audio
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg" | "oga") => "audio/ogg",
        Some("flac") => "audio/flac",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Archives and documents
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",
        Some("tar") => "application/x-tar",

        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> MimeTable {
        let extra: Vec<MimeOverride> = entries
            .iter()
            .map(|(ext, mime)| MimeOverride {
                extension: (*ext).to_string(),
                content_type: (*mime).to_string(),
            })
            .collect();
        MimeTable::with_overrides(&extra)
    }

    #[test]
    fn test_wasm_is_application_wasm() {
        let mime = MimeTable::builtin();
        assert_eq!(mime.content_type_for(Path::new("app.wasm")), "application/wasm");
        assert_eq!(
            mime.content_type_for(Path::new("dir/pocketsphinx.wasm")),
            "application/wasm"
        );
    }

    #[test]
    fn test_lookup_falls_back_to_lowercase() {
        let mime = MimeTable::builtin();
        assert_eq!(mime.content_type_for(Path::new("APP.WASM")), "application/wasm");
        assert_eq!(mime.lookup(".Wasm"), Some("application/wasm"));
    }

    #[test]
    fn test_override_beats_default_table() {
        let mime = table(&[(".html", "text/plain")]);
        assert_eq!(mime.content_type_for(Path::new("index.html")), "text/plain");
        assert_eq!(
            mime.content_type_for(Path::new("index.htm")),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_later_override_replaces_builtin() {
        let mime = table(&[(".wasm", "application/x-wasm")]);
        assert_eq!(mime.content_type_for(Path::new("a.wasm")), "application/x-wasm");
    }

    #[test]
    fn test_default_inference() {
        let mime = MimeTable::default();
        assert_eq!(
            mime.content_type_for(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(mime.content_type_for(Path::new("main.JS")), "application/javascript");
        assert_eq!(mime.content_type_for(Path::new("style.css")), "text/css");
        assert_eq!(mime.content_type_for(Path::new("archive.tar.gz")), "application/gzip");
    }

    #[test]
    fn test_unknown_extension() {
        let mime = MimeTable::default();
        assert_eq!(mime.content_type_for(Path::new("blob.xyz")), DEFAULT_CONTENT_TYPE);
        assert_eq!(mime.content_type_for(Path::new("Makefile")), DEFAULT_CONTENT_TYPE);
        assert_eq!(mime.content_type_for(Path::new(".bashrc")), DEFAULT_CONTENT_TYPE);
        assert_eq!(get_content_type(None), DEFAULT_CONTENT_TYPE);
    }
}
