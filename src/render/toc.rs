// src/render/toc.rs

//! Table of contents from the `h2`/`h3` headings of an article body.

use scraper::{ElementRef, Html, Selector};

use crate::utils::escape_html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// 2 or 3
    pub level: u8,
    pub text: String,
    /// Fragment target, when the heading carries one
    pub anchor: Option<String>,
}

/// Headings in document order.
pub fn extract(body_html: &str) -> Vec<TocEntry> {
    let Ok(heading_selector) = Selector::parse("h2, h3") else {
        return Vec::new();
    };
    let Ok(anchor_selector) = Selector::parse("a[name], a[id]") else {
        return Vec::new();
    };

    let fragment = Html::parse_fragment(body_html);
    fragment
        .select(&heading_selector)
        .filter_map(|heading| {
            let text = heading_text(heading);
            if text.is_empty() {
                return None;
            }
            let level = if heading.value().name() == "h2" { 2 } else { 3 };
            let anchor = heading
                .value()
                .id()
                .map(str::to_string)
                .or_else(|| {
                    heading.select(&anchor_selector).next().and_then(|a| {
                        a.value()
                            .attr("name")
                            .or_else(|| a.value().id())
                            .map(str::to_string)
                    })
                })
                .filter(|a| !a.is_empty());
            Some(TocEntry {
                level,
                text,
                anchor,
            })
        })
        .collect()
}

fn heading_text(heading: ElementRef<'_>) -> String {
    heading
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rendered table of contents; empty when the body has no headings.
pub fn render(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut out = String::from(
        "<aside class=\"toc\"><h2 class=\"toc-title\">Table of Contents</h2><ul>",
    );
    for entry in entries {
        let text = escape_html(&entry.text);
        let item = match &entry.anchor {
            Some(anchor) => format!("<a href=\"#{}\">{text}</a>", escape_html(anchor)),
            None => text,
        };
        out.push_str(&format!("<li class=\"toc-h{}\">{item}</li>", entry.level));
    }
    out.push_str("</ul></aside>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r##"
        <h1>Title</h1>
        <h2 id="intro">Intro</h2>
        <p>text</p>
        <h3><a name="setup-steps" href="#setup-steps"></a>
            Setup   steps</h3>
        <h2>No <code>anchor</code></h2>
        <h4>Ignored</h4>
    "##;

    #[test]
    fn extracts_h2_and_h3_in_order() {
        let toc = extract(BODY);
        assert_eq!(
            toc,
            vec![
                TocEntry {
                    level: 2,
                    text: "Intro".into(),
                    anchor: Some("intro".into())
                },
                TocEntry {
                    level: 3,
                    text: "Setup steps".into(),
                    anchor: Some("setup-steps".into())
                },
                TocEntry {
                    level: 2,
                    text: "No anchor".into(),
                    anchor: None
                },
            ]
        );
    }

    #[test]
    fn renders_links_only_for_anchored_headings() {
        let html = render(&extract(BODY));
        assert!(html.contains("<li class=\"toc-h2\"><a href=\"#intro\">Intro</a></li>"));
        assert!(html.contains("<li class=\"toc-h2\">No anchor</li>"));
    }

    #[test]
    fn no_headings_renders_nothing() {
        assert!(extract("<p>plain</p>").is_empty());
        assert_eq!(render(&[]), "");
    }
}
