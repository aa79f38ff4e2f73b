// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML escaping and description link conversion.

use regex::Regex;
use std::sync::LazyLock;

/// An anchor already written by the feed's editors.
static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s+href="([^"]+)"\s+target="_blank">[^<]+</a>"#)
        .expect("anchor pattern is valid")
});

/// Markdown link or bare URL. The markdown alternative is listed first so it
/// wins when both could match at the same position.
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)|(https?://[^\s<>]+)").expect("link pattern is valid")
});

/// Escape text for element content.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escape text for a double-quoted attribute value; newlines become spaces.
pub fn escape_attribute(value: &str) -> String {
    escape_html(value).replace('\n', " ")
}

/// Turn description text into HTML with clickable links.
///
/// Text that already contains an editor-written anchor is trusted and
/// returned unchanged. Otherwise the text is escaped and markdown links and
/// bare `http(s)` URLs become `target="_blank"` anchors.
pub fn convert_urls_to_links(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    if ANCHOR.is_match(text) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 32);
    let mut last = 0;

    for caps in LINK.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&escape_html(&text[last..whole.start()]));

        match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(label), Some(url), _) if is_web_url(url.as_str()) => {
                out.push_str(&anchor(url.as_str(), label.as_str()));
            }
            (_, _, Some(url)) => out.push_str(&anchor(url.as_str(), url.as_str())),
            _ => out.push_str(&escape_html(whole.as_str())),
        }
        last = whole.end();
    }

    out.push_str(&escape_html(&text[last..]));
    out
}

fn is_web_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn anchor(href: &str, label: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank">{}</a>"#,
        escape_attribute(href),
        escape_html(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_attribute("line one\nline two"), "line one line two");
    }

    #[test]
    fn test_bare_url() {
        assert_eq!(
            convert_urls_to_links("Route: https://ridewithgps.com/routes/1 see you"),
            r#"Route: <a href="https://ridewithgps.com/routes/1" target="_blank">https://ridewithgps.com/routes/1</a> see you"#
        );
    }

    #[test]
    fn test_markdown_link() {
        assert_eq!(
            convert_urls_to_links("See [the route](https://ridewithgps.com/routes/1)."),
            r#"See <a href="https://ridewithgps.com/routes/1" target="_blank">the route</a>."#
        );
    }

    #[test]
    fn test_markdown_link_with_url_label_is_linked_once() {
        let html = convert_urls_to_links("[https://a.example](https://a.example)");
        assert_eq!(
            html,
            r#"<a href="https://a.example" target="_blank">https://a.example</a>"#
        );
        assert_eq!(html.matches("<a ").count(), 1);
    }

    #[test]
    fn test_existing_anchor_passes_through() {
        let text = r#"Details <a href="https://x.example" target="_blank">here</a> & more"#;
        assert_eq!(convert_urls_to_links(text), text);
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(
            convert_urls_to_links("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
        assert_eq!(
            convert_urls_to_links("[click](javascript:alert(1))"),
            "[click](javascript:alert(1))"
        );
    }

    #[test]
    fn test_empty_description() {
        assert_eq!(convert_urls_to_links(""), "");
    }
}
