//! Directory listing module

use crate::error::ServeError;
use crate::handler::router::RequestContext;
use crate::http::{self, response::escape_html, ResponseBody};
use crate::logger;
use hyper::Response;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::Path;
use tokio::fs;

/// Characters left unescaped in listing links
const HREF_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

#[derive(Debug, Clone)]
struct ListingEntry {
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

impl ListingEntry {
    fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    fn link_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Render an HTML listing of `dir`
pub async fn list_directory(
    ctx: &RequestContext<'_>,
    dir: &Path,
) -> Result<Response<ResponseBody>, ServeError> {
    let entries = read_entries(dir).await.map_err(|e| {
        logger::log_warning(&format!("Cannot list '{}': {e}", dir.display()));
        ServeError::NotFound("No permission to list directory")
    })?;

    let display_path = percent_decode_str(ctx.path).decode_utf8_lossy();
    let html = render_listing(&display_path, &entries);

    Ok(http::build_html_response(html, ctx.is_head))
}

async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let is_symlink = entry
            .file_type()
            .await
            .is_ok_and(|t| t.is_symlink());
        // Follows symlinks, so a link to a directory is listed as one
        let is_dir = fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());

        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));

    for entry in entries {
        let href = utf8_percent_encode(&entry.link_name(), HREF_ENCODE_SET).to_string();
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape_html(&href),
            escape_html(&entry.display_name())
        ));
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}
