//! HTML pages for the gallery.

use std::fmt::Write;
use vitrine_core::GalleryEntry;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Percent-encode an object name for a URL path, keeping `/` separators.
pub fn encode_path(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(byte as char)
            }
            other => {
                let _ = write!(out, "%{other:02X}");
            }
        }
    }
    out
}

/// Upload form plus a thumbnail link for every image.
pub fn index_page(images: &[String]) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Vitrine</title></head>
<body style="background-color: green;">
<form method="post" enctype="multipart/form-data" action="/upload">
  <label for="file">Choose file to upload</label>
  <input type="file" id="file" name="form_file" accept="image/jpeg"/>
  <button>Submit</button>
</form>
<ul>
"#,
    );
    for name in images {
        let path = escape_html(&encode_path(name));
        let _ = writeln!(
            html,
            r#"<li><a href="/files/{path}"><img src="/serve-image/{path}" alt="{alt}" style="width:100px;height:auto;"></a></li>"#,
            alt = escape_html(name),
        );
    }
    html.push_str("</ul>\n</body>\n</html>\n");
    html
}

/// Single image with its title and description.
pub fn image_page(entry: &GalleryEntry) -> String {
    let title = escape_html(&entry.annotation.title);
    let description = escape_html(&entry.annotation.description);
    let path = escape_html(&encode_path(&entry.name));
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<h1>{title}</h1>
<img src="/serve-image/{path}" alt="{title}" style="max-width:100%;">
<p>{description}</p>
<a href="/">Back</a>
</body>
</html>
"#
    )
}
