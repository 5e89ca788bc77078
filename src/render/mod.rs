//! Server-side HTML rendering.
//!
//! Every page is a plain function from domain data to a `String`; handlers
//! decide what to load and wrap the result in `Html`.

pub mod csv;
mod pages;

pub use pages::*;

use axum::http::StatusCode;
use std::fmt::Write;

pub const APP_TITLE: &str = "Vaccination Management System";

/// Escape text for use in HTML bodies and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn opt(value: Option<&str>) -> String {
    escape(value.unwrap_or(""))
}

/// Wrap `body` in the shared page chrome.
pub fn layout(title: &str, flash: Option<&str>, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | {APP_TITLE}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
table {{ border-collapse: collapse; }}
th, td {{ border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }}
.flash {{ background: #eef6ff; border: 1px solid #9cc3f0; padding: 0.5rem; }}
.Done {{ color: #2a7a2a; }}
.Upcoming {{ color: #8a5a00; }}
</style>
</head>
<body>
<header>
<h1>{APP_TITLE}</h1>
<nav><a href="/">Children</a> | <a href="/add">Add child</a> | <a href="/reminders">Reminders</a> | <a href="/reports">Reports</a> | <a href="/admin">Admin</a> | <a href="/schedule">Vaccine Schedule</a></nav>
</header>
"#,
        title = escape(title),
    );
    if let Some(message) = flash {
        let _ = writeln!(html, r#"<p class="flash">{}</p>"#, escape(message));
    }
    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    layout(
        status.canonical_reason().unwrap_or("Error"),
        None,
        &format!("<h2>{}</h2>\n<p>{}</p>", status.as_u16(), escape(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("Asha"), "Asha");
    }

    #[test]
    fn layout_shows_flash_escaped() {
        let html = layout("Children", Some("<hi>"), "<p>body</p>");
        assert!(html.contains(APP_TITLE));
        assert!(html.contains(r#"<p class="flash">&lt;hi&gt;</p>"#));
        assert!(html.contains("<p>body</p>"));
    }
}
