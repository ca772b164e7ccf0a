//! Escaping for text placed into HTML.
//!
//! User and server text is always rendered as plain text content; anything
//! that builds markup goes through [`escape_html`] first.

use std::borrow::Cow;

/// Escapes `&`, `<`, `>`, `"` and `'`.
///
/// Borrows the input unchanged when nothing needs escaping.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & \"b\""), "a &amp; &quot;b&quot;");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(escape_html("hello there"), Cow::Borrowed(_)));
    }
}
