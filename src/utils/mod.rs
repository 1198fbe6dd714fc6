//! Utility functions and helpers.

pub mod http;
pub mod url;

use unicode_segmentation::UnicodeSegmentation;

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text for XML content using the five predefined entities.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Cut `text` to at most `max` grapheme clusters, appending an ellipsis when cut.
pub fn truncate_graphemes(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.grapheme_indices(true).nth(max) {
        None => text.to_string(),
        Some((idx, _)) => format!("{}…", text[..idx].trim_end()),
    }
}
