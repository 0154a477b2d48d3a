pub mod time;

/// Escape text for use inside ENML markup.
///
/// Converts `&`, `<`, `>`, `"` and `'` to their entity forms.
///
/// # Examples
///
/// ```
/// use evernote_logger_core::escape_html;
///
/// assert_eq!(escape_html("Plan<X>"), "Plan&lt;X&gt;");
/// assert_eq!(escape_html("Tom & Jerry's \"Show\""), "Tom &amp; Jerry&#x27;s &quot;Show&quot;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
