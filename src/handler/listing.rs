//! Directory listing module
//!
//! Generates the HTML index page for directories without an index file.

use crate::handler::router::RequestContext;
use crate::http::{self, response::escape_html, ResponseBody};
use hyper::{Response, StatusCode};
use std::path::Path;
use tokio::fs;

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    /// Target is a directory (after following symlinks)
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Text shown for the entry: `dir/` for directories, `link@` for symlinks
    fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Percent-encoded relative link to the entry
    fn href(&self) -> String {
        let encoded = urlencoding::encode(&self.name);
        if self.is_dir {
            format!("{encoded}/")
        } else {
            encoded.into_owned()
        }
    }
}

/// Build a listing response for `dir`, requested as `ctx.path`
pub async fn list_directory(ctx: &RequestContext<'_>, dir: &Path) -> Response<ResponseBody> {
    let Ok(entries) = read_entries(dir).await else {
        return ctx.error(StatusCode::NOT_FOUND, "No permission to list directory");
    };

    let decoded = urlencoding::decode_binary(ctx.path.as_bytes());
    let display_path = String::from_utf8_lossy(&decoded);

    http::build_html_response(render_listing(&display_path, &entries), ctx.is_head)
}

/// Read and sort the entries of `dir`, case-insensitively by name
async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut read_dir = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        let is_symlink = entry
            .file_type()
            .await
            .is_ok_and(|t| t.is_symlink());
        // fs::metadata follows links, so a link to a directory links as one
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

/// Render the listing page
pub fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));

    let mut page = String::new();
    page.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{title}</title>\n</head>\n"));
    page.push_str(&format!("<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for entry in entries {
        page.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            entry.href(),
            escape_html(&entry.display_name()),
        ));
    }
    page.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool, is_symlink: bool) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            is_dir,
            is_symlink,
        }
    }

    #[test]
    fn test_render_entries() {
        let page = render_listing(
            "/assets/",
            &[
                entry("docs", true, false),
                entry("my file.txt", false, false),
                entry("latest", true, true),
                entry("<b>.txt", false, false),
            ],
        );
        assert!(page.contains("<title>Directory listing for /assets/</title>"));
        assert!(page.contains("<h1>Directory listing for /assets/</h1>"));
        assert!(page.contains(r#"<li><a href="docs/">docs/</a></li>"#));
        assert!(page.contains(r#"<li><a href="my%20file.txt">my file.txt</a></li>"#));
        assert!(page.contains(r#"<li><a href="latest/">latest@</a></li>"#));
        assert!(page.contains(r#"<li><a href="%3Cb%3E.txt">&lt;b&gt;.txt</a></li>"#));
    }

    #[test]
    fn test_title_escaped() {
        let page = render_listing("/<script>/", &[]);
        assert!(page.contains("Directory listing for /&lt;script&gt;/"));
        assert!(!page.contains("<script>"));
    }

    #[tokio::test]
    async fn test_read_entries_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("A.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("c")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A.txt", "b.txt", "c"]);
        assert!(entries[2].is_dir);
        assert!(!entries[0].is_dir);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_entries_symlink() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let alias = entries.iter().find(|e| e.name == "alias").unwrap();
        assert!(alias.is_symlink);
        assert!(alias.is_dir);
        assert_eq!(alias.display_name(), "alias@");
        assert_eq!(alias.href(), "alias/");
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let ctx = RequestContext {
            path: "/gone/",
            query: None,
            is_head: false,
            if_modified_since: None,
            has_if_none_match: false,
            peer_addr: None,
            access_log: false,
        };
        let resp = list_directory(&ctx, Path::new("/definitely/not/here")).await;
        assert_eq!(resp.status(), 404);
    }
}
