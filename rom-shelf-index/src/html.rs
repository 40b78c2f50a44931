//! HTML index generation.
//!
//! One self-contained page: inline CSS/JS, a collapsible section per
//! system, and a table of ROM name / size / artwork links. Markup is
//! built by pushing into a `String`; values pass through `escape_html`.

use crate::scanner::LibraryMap;

/// Render the index page for a scanned library.
pub fn generate_html(mapping: &LibraryMap) -> String {
    let mut html = String::new();
    html.push_str(PAGE_HEAD);
    html.push_str("<body>\n<h1>ROMs Index</h1>\n");
    html.push_str(&format!(
        "<p class=\"timestamp\">Generated on {}</p>\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    for (system_name, system) in mapping {
        let system_id = system_name.replace('.', "_");
        html.push_str("<div class=\"system\">\n");
        html.push_str(&format!(
            "<div class=\"system-header\" data-system=\"{id}\" onclick=\"toggleSystem('{id}')\">\n",
            id = escape_html(&system_id)
        ));
        html.push_str(&format!(
            "<span>\u{1F4C1} {} ({} ROMs)</span>\n<span class=\"caret\">\u{25BC}</span>\n</div>\n",
            escape_html(system_name),
            system.count
        ));
        html.push_str(&format!(
            "<div class=\"system-content\" id=\"{}\">\n<table>\n\
             <tr><th>ROM</th><th>Size</th><th>Artwork</th></tr>\n",
            escape_html(&system_id)
        ));

        for rom in &system.roms {
            let rom_path = format!("ROMs/{system_name}/{}", rom.file);
            html.push_str("<tr>\n");
            html.push_str(&format!(
                "<td><a href=\"{}\">{}</a></td>\n",
                escape_html(&rom_path),
                escape_html(&rom.file)
            ));
            html.push_str(&format!(
                "<td class=\"size\">{}</td>\n",
                format_size(rom.size)
            ));
            html.push_str("<td>");
            if let Some(art) = &rom.artwork {
                if let Some(cover) = &art.cover {
                    push_artwork_link(&mut html, system_name, cover, "Cover");
                }
                if let Some(screenshot) = &art.screenshot {
                    push_artwork_link(&mut html, system_name, screenshot, "Screenshot");
                }
            }
            html.push_str("</td>\n</tr>\n");
        }

        html.push_str("</table>\n</div>\n</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_artwork_link(html: &mut String, system_name: &str, file: &str, label: &str) {
    let path = escape_html(&format!("ROMs/{system_name}/{file}"));
    html.push_str(&format!(
        "<a href=\"{path}\"><img src=\"{path}\" class=\"artwork\" alt=\"{label}\" title=\"{label}\"></a>"
    ));
}

/// Render a byte count: `X.XX KB` below 1 MB, `X.XX MB` at or above.
pub fn format_size(bytes: u64) -> String {
    let size_kb = bytes as f64 / 1024.0;
    let size_mb = size_kb / 1024.0;
    if size_mb >= 1.0 {
        format!("{size_mb:.2} MB")
    } else {
        format!("{size_kb:.2} KB")
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>ROMs Index</title>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<style>
body { font-family: Arial, sans-serif; margin: 20px; }
.system { margin-bottom: 20px; }
.system-header {
    background: #f0f0f0;
    padding: 10px;
    cursor: pointer;
    user-select: none;
    display: flex;
    justify-content: space-between;
    align-items: center;
}
.system-header:hover { background: #e0e0e0; }
.system-content { display: block; margin-left: 20px; overflow-x: auto; }
.caret { transition: transform 0.2s; font-size: 20px; }
.collapsed .caret { transform: rotate(-90deg); }
.collapsed + .system-content { display: none; }
.artwork { max-width: 100px; max-height: 100px; margin: 0 10px; }
table { border-collapse: collapse; width: 100%; }
th, td { padding: 8px; text-align: left; border-bottom: 1px solid #ddd; }
th { background-color: #f5f5f5; }
.size { color: #666; }
.timestamp { color: #999; font-size: 0.8em; }
</style>
<script>
function toggleSystem(systemId) {
    const header = document.querySelector(`[data-system="${systemId}"]`);
    header.classList.toggle('collapsed');
}
</script>
</head>
"#;
