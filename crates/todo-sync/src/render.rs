//! Todo Text Rendering
//!
//! Turns raw todo text into the HTML fragment shown in the list:
//! shortcut expansion, word truncation, URL linkification and escaping.

use url::Url;

use crate::config::WidgetConfig;

/// Appended to text cut at the word limit
pub const ELLIPSIS: &str = "...";

/// Current local time in `h:mm:ss AM/PM` form
pub fn local_time_string() -> String {
    chrono::Local::now().format("%-I:%M:%S %p").to_string()
}

/// Replace the first occurrence of `shortcut` with `now`
pub fn apply_shortcut(text: &str, shortcut: &str, now: &str) -> String {
    if shortcut.is_empty() {
        return text.to_string();
    }
    text.replacen(shortcut, now, 1)
}

/// Keep at most `limit` whitespace-separated words.
///
/// Text within the limit is returned untouched; longer text is re-joined
/// with single spaces and gets [`ELLIPSIS`].
pub fn truncate_words(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > limit {
        let mut cut = words[..limit].join(" ");
        cut.push_str(ELLIPSIS);
        cut
    } else {
        text.to_string()
    }
}

/// True if the whole string parses as an http(s) URL
pub fn is_http_url(text: &str) -> bool {
    match Url::parse(text) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Escape for HTML text and attribute context
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Display text before linkification: shortcut expanded, then truncated
pub fn display_text(text: &str, config: &WidgetConfig, now: &str) -> String {
    let expanded = apply_shortcut(text, &config.time_shortcut, now);
    truncate_words(&expanded, config.word_limit)
}

/// Full pipeline; the result is safe to assign as `innerHTML`
pub fn render_todo_html(text: &str, config: &WidgetConfig, now: &str) -> String {
    let shown = display_text(text, config, now);
    if is_http_url(&shown) {
        let escaped = escape_html(&shown);
        format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escaped, escaped
        )
    } else {
        escape_html(&shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: &str = "3:04:05 PM";

    #[test]
    fn test_time_shortcut_then_escape() {
        let html = render_todo_html("check >time now <b>", &WidgetConfig::default(), NOW);
        assert_eq!(html, "check 3:04:05 PM now &lt;b&gt;");
    }

    #[test]
    fn test_only_first_shortcut_replaced() {
        assert_eq!(apply_shortcut(">time >time", ">time", NOW), "3:04:05 PM >time");
    }

    #[test]
    fn test_url_becomes_anchor() {
        let html = render_todo_html("https://example.com", &WidgetConfig::default(), NOW);
        assert_eq!(
            html,
            r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">https://example.com</a>"#
        );
    }

    #[test]
    fn test_non_http_scheme_is_plain_text() {
        assert!(!is_http_url("javascript:alert(1)"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("see https://example.com"));
        assert!(is_http_url("http://example.com/a?b=c"));
    }

    #[test]
    fn test_long_text_truncated_with_ellipsis() {
        let long = (1..=60).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let shown = truncate_words(&long, 50);
        assert!(shown.ends_with("w50..."));
        assert_eq!(shown.split_whitespace().count(), 50);
    }

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_words("  two   words ", 50), "  two   words ");
    }

    #[test]
    fn test_escape_quotes_and_amp() {
        assert_eq!(escape_html(r#"a & "b" 'c'"#), "a &amp; &quot;b&quot; &#39;c&#39;");
    }
}
