//! HTML for the `/admin` pages.
//!
//! Everything interpolated into markup goes through [`escape`].

use std::fmt::Write;

use crate::domain::models::uploaded_file::UploadedFile;

pub const SITE_HEADER: &str = "File Upload Management";
pub const SITE_TITLE: &str = "File Admin";
pub const INDEX_TITLE: &str = "Welcome to File Upload Administration";

const STYLE: &str = "body{font-family:sans-serif;margin:0}\
header{background:#417690;color:#fff;padding:12px 24px}\
header a{color:#fff;text-decoration:none}\
main{padding:16px 24px}\
table{border-collapse:collapse;width:100%}\
th,td{border-bottom:1px solid #ddd;padding:6px;text-align:left}\
aside{float:right;width:220px;margin-left:16px}\
.message{background:#dfd;padding:8px;margin-bottom:12px}\
.button{padding:2px 8px;border:1px solid #417690;border-radius:3px}";

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{title} | {site_title}</title><style>{style}</style></head>\
         <body><header><a href=\"/admin/files/\"><strong>{header}</strong></a></header>\
         <main>{body}</main></body></html>",
        title = escape(title),
        site_title = SITE_TITLE,
        style = STYLE,
        header = SITE_HEADER,
        body = body,
    )
}

/// Everything the list page shows.
#[derive(Debug)]
pub struct FileListPage {
    pub files: Vec<UploadedFile>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
    pub search: Option<String>,
    pub content_type: Option<String>,
    pub content_types: Vec<String>,
    pub deleted: Option<u64>,
}

impl FileListPage {
    fn link(&self, page: u32, content_type: Option<&str>) -> String {
        let mut params = Vec::new();
        if let Some(ref q) = self.search {
            params.push(format!("q={}", urlencoding::encode(q)));
        }
        if let Some(ct) = content_type {
            params.push(format!("content_type={}", urlencoding::encode(ct)));
        }
        if page > 1 {
            params.push(format!("page={}", page));
        }
        if params.is_empty() {
            "/admin/files/".to_string()
        } else {
            format!("/admin/files/?{}", params.join("&"))
        }
    }
}

fn flash(deleted: u64) -> String {
    if deleted == 0 {
        "Items must be selected in order to perform actions on them. No items have been changed."
            .to_string()
    } else {
        format!("Successfully deleted {} file(s).", deleted)
    }
}

pub fn file_list(page: &FileListPage) -> String {
    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1>", INDEX_TITLE);

    if let Some(deleted) = page.deleted {
        let _ = write!(body, "<p class=\"message\">{}</p>", escape(&flash(deleted)));
    }

    // Content-type filter
    body.push_str("<aside><h3>By content type</h3><ul>");
    let _ = write!(
        body,
        "<li><a href=\"{}\">All</a></li>",
        escape(&page.link(1, None))
    );
    for ct in &page.content_types {
        let selected = page.content_type.as_deref() == Some(ct.as_str());
        let _ = write!(
            body,
            "<li><a href=\"{}\">{}{}</a></li>",
            escape(&page.link(1, Some(ct))),
            if selected { "&#9656; " } else { "" },
            escape(ct)
        );
    }
    body.push_str("</ul></aside>");

    let _ = write!(
        body,
        "<form method=\"get\" action=\"/admin/files/\">\
         <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search name or type\">",
        escape(page.search.as_deref().unwrap_or(""))
    );
    if let Some(ref ct) = page.content_type {
        let _ = write!(
            body,
            "<input type=\"hidden\" name=\"content_type\" value=\"{}\">",
            escape(ct)
        );
    }
    body.push_str("<button type=\"submit\">Search</button></form>");

    body.push_str(
        "<form method=\"post\" action=\"/admin/files/delete/\">\
         <p><button type=\"submit\">Delete selected files</button></p>\
         <table><thead><tr><th></th><th>ID</th><th>Original name</th><th>File Size</th>\
         <th>Content type</th><th>Preview</th><th>Download</th><th>Created at</th>\
         <th>Updated at</th></tr></thead><tbody>",
    );

    for file in &page.files {
        let (preview, download) = if file.storage_url.is_empty() {
            ("No URL".to_string(), "No URL".to_string())
        } else {
            (
                format!(
                    "<a href=\"{}\" target=\"_blank\" class=\"button\">Preview</a>",
                    escape(&file.storage_url)
                ),
                format!(
                    "<a href=\"{}\" target=\"_blank\" class=\"button\">Download</a>",
                    escape(&file.download_url())
                ),
            )
        };

        let _ = write!(
            body,
            "<tr><td><input type=\"checkbox\" name=\"ids\" value=\"{id}\"></td>\
             <td><a href=\"/admin/files/{id}/\">{id}</a></td><td>{name}</td><td>{size}</td>\
             <td>{ct}</td><td>{preview}</td><td>{download}</td><td>{created}</td>\
             <td>{updated}</td></tr>",
            id = file.id,
            name = escape(&file.original_name),
            size = escape(&file.file_size_display()),
            ct = escape(file.content_type.as_deref().unwrap_or("-")),
            preview = preview,
            download = download,
            created = file.created_at.format("%Y-%m-%d %H:%M"),
            updated = file.updated_at.format("%Y-%m-%d %H:%M"),
        );
    }

    body.push_str("</tbody></table></form>");

    let _ = write!(
        body,
        "<p>{} uploaded file{}",
        page.total,
        if page.total == 1 { "" } else { "s" }
    );
    if page.pages > 1 {
        let _ = write!(body, " &middot; page {} of {}", page.page, page.pages);
        if page.page > 1 {
            let _ = write!(
                body,
                " <a href=\"{}\">previous</a>",
                escape(&page.link(page.page - 1, page.content_type.as_deref()))
            );
        }
        if page.page < page.pages {
            let _ = write!(
                body,
                " <a href=\"{}\">next</a>",
                escape(&page.link(page.page + 1, page.content_type.as_deref()))
            );
        }
    }
    body.push_str("</p>");

    layout("Uploaded Files", &body)
}

pub fn file_detail(file: &UploadedFile) -> String {
    let url_box = if file.storage_url.is_empty() {
        "No URL".to_string()
    } else {
        format!(
            "<div style=\"max-width:400px\"><input type=\"text\" value=\"{}\" readonly \
             style=\"width:100%;margin-bottom:5px\" onclick=\"this.select();\"><br>\
             <small>Click to select and copy</small></div>",
            escape(&file.storage_url)
        )
    };

    let preview = match file.thumbnail_url() {
        Some(thumbnail) => format!(
            "<img src=\"{}\" style=\"max-width:200px;max-height:200px;border:1px solid #ddd\">",
            escape(&thumbnail)
        ),
        None => "Not an image".to_string(),
    };

    let rows = [
        ("ID", file.id.to_string()),
        ("Original name", escape(&file.original_name)),
        ("Storage URL", url_box),
        ("Image Preview", preview),
        (
            "File size",
            file.file_size
                .map(|size| size.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("File Size", escape(&file.file_size_display())),
        ("Size (MB)", escape(&file.file_size_mb_display())),
        (
            "Content type",
            escape(file.content_type.as_deref().unwrap_or("-")),
        ),
        ("Created at", file.created_at.to_rfc3339()),
        ("Updated at", file.updated_at.to_rfc3339()),
    ];

    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1><table>", escape(&file.to_string()));
    for (label, value) in rows {
        let _ = write!(body, "<tr><th>{}</th><td>{}</td></tr>", label, value);
    }
    let _ = write!(
        body,
        "</table><form method=\"post\" action=\"/admin/files/{}/delete/\" \
         onsubmit=\"return confirm('Delete this record? The stored file is kept.');\">\
         <p><button type=\"submit\">Delete</button> <a href=\"/admin/files/\">Back to list</a></p>\
         </form>",
        file.id
    );

    layout(&file.original_name, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn file(name: &str, content_type: &str) -> UploadedFile {
        let now = Utc::now();
        UploadedFile {
            id: 7,
            original_name: name.to_string(),
            storage_url: "https://res.cloudinary.com/demo/image/upload/v1/x.png".to_string(),
            file_size: Some(2048),
            content_type: Some(content_type.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn page(files: Vec<UploadedFile>) -> FileListPage {
        FileListPage {
            total: files.len() as u64,
            files,
            page: 1,
            pages: 1,
            search: None,
            content_type: None,
            content_types: vec!["image/png".to_string()],
            deleted: None,
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#x27;b&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn list_escapes_file_names() {
        let html = file_list(&page(vec![file("<script>.png", "image/png")]));
        assert!(html.contains("&lt;script&gt;.png"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("2.0 KB"));
        assert!(html.contains("/upload/fl_attachment/"));
    }

    #[test]
    fn list_shows_flash_messages() {
        let mut listing = page(vec![]);
        listing.deleted = Some(3);
        assert!(file_list(&listing).contains("Successfully deleted 3 file(s)."));
        listing.deleted = Some(0);
        assert!(file_list(&listing).contains("No items have been changed."));
    }

    #[test]
    fn pagination_links_keep_filters() {
        let mut listing = page(vec![]);
        listing.total = 60;
        listing.pages = 3;
        listing.page = 2;
        listing.search = Some("q r".to_string());
        listing.content_type = Some("image/png".to_string());
        let html = file_list(&listing);
        assert!(html.contains("page 2 of 3"));
        assert!(html.contains("/admin/files/?q=q%20r&amp;content_type=image%2Fpng&amp;page=3"));
        assert!(html.contains("/admin/files/?q=q%20r&amp;content_type=image%2Fpng\">previous"));
    }

    #[test]
    fn detail_previews_images_only() {
        let image = file_detail(&file("cat.png", "image/png"));
        assert!(image.contains("w_200,h_200,c_fit,q_auto"));

        let pdf = file_detail(&file("doc.pdf", "application/pdf"));
        assert!(pdf.contains("Not an image"));
        assert!(pdf.contains("/admin/files/7/delete/"));
    }
}
