//! Static redirect page rendering.
//!
//! A page forwards the visitor with a `window.location` script and carries a
//! `<noscript>` meta refresh as fallback. Output depends only on the target
//! URL and the page language, so re-rendering is byte-identical.

use std::borrow::Cow;
use std::fmt::Write;

/// Extension every generated page name carries.
pub const PAGE_EXTENSION: &str = ".html";

/// Render the redirect document for `url`.
pub fn render_page(url: &str, lang: &str) -> String {
    let url = embeddable_url(url);
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
    <head>
        <meta charset="utf-8">
        <script>window.location.href = "{url}";</script>
        <meta name="robots" content="noindex, nofollow">
    </head>
    <body>
        <noscript>
            <meta http-equiv="refresh" content="0;url={url}">
        </noscript>
    </body>
</html>"#
    )
}

/// Percent-encode characters that could escape the JS string or attribute value.
/// Anything else (including `&` in query strings) is kept verbatim.
fn embeddable_url(url: &str) -> Cow<'_, str> {
    let needs_escape = |c: char| {
        matches!(c, '"' | '<' | '>' | '\\' | '\'') || c.is_ascii_control() || c == ' '
    };
    if !url.chars().any(needs_escape) {
        return Cow::Borrowed(url);
    }
    let mut out = String::with_capacity(url.len() + 8);
    for c in url.chars() {
        if needs_escape(c) {
            let _ = write!(out, "%{:02X}", c as u32);
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}
