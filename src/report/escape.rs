// src/report/escape.rs
//! Centralized escaping for everything interpolated into the HTML report.

/// Escapes text for safe embedding in HTML body or attribute positions.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Neutralizes literal title markers before general escaping. Snippets
/// containing `<title>` would otherwise be able to terminate the report's
/// own head section if escaping ever regressed; the markers are rewritten
/// as entities up front and survive `escape` double-encoded, which is the
/// historical output shape.
#[must_use]
pub fn neutralize_title(text: &str) -> String {
    text.replace("<title>", "&lt;title&gt;")
        .replace("</title>", "&lt;/title&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(
            escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;"
        );
    }

    #[test]
    fn test_ampersand_escaped_first() {
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_title_markers_are_neutralized() {
        let neutralized = neutralize_title("<title>boom</title>");
        assert!(!neutralized.contains("<title>"));
        assert!(!neutralized.contains("</title>"));
    }
}
