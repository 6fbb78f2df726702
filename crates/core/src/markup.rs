//! Markup rendering seam for project body content.
//!
//! A full markdown engine lives outside this crate; callers pass any
//! [`MarkupRenderer`]. [`ParagraphRenderer`] is the built-in fallback.

/// Turns user-entered markup into display HTML.
pub trait MarkupRenderer {
    fn render(&self, source: &str) -> String;
}

/// Escapes HTML and wraps blank-line separated blocks in `<p>` elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphRenderer;

impl MarkupRenderer for ParagraphRenderer {
    fn render(&self, source: &str) -> String {
        let normalized = source.replace("\r\n", "\n");
        normalized
            .split("\n\n")
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .map(|block| format!("<p>{}</p>", escape_html(block).replace('\n', "<br>")))
            .collect()
    }
}

fn escape_html(text: &str) -> String {
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
