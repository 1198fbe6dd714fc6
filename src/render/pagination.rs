// src/render/pagination.rs

//! Windowed page navigation.
//!
//! Shows the first and last page, up to two pages either side of the
//! current one, and an ellipsis for any gap:
//!
//! ```text
//! current = 6, total = 12:   ‹ 1 … 4 5 [6] 7 8 … 12 ›
//! current = 2, total = 4:    ‹ 1 [2] 3 4 ›
//! ```

use crate::utils::escape_html;
use crate::utils::url::query_string;

/// Pages either side of the current one.
const DELTA: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Page numbers and gaps to show for `current` out of `total`.
pub fn visible_pages(current: u32, total: u32) -> Vec<PageItem> {
    if total <= 1 {
        return Vec::new();
    }

    let start = current.saturating_sub(DELTA).max(2);
    let end = (total - 1).min(current.saturating_add(DELTA));

    let mut items = vec![PageItem::Page(1)];
    if current.saturating_sub(DELTA) > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if current.saturating_add(DELTA) < total - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total));
    items
}

/// Link to `page`, keeping the other query parameters in order.
pub fn page_url(base: &str, params: &[(String, String)], page: u32) -> String {
    let mut pairs: Vec<(String, String)> = Vec::with_capacity(params.len() + 1);
    let mut replaced = false;
    for (key, value) in params {
        if key == "page" {
            if !replaced {
                pairs.push(("page".to_string(), page.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((key.clone(), value.clone()));
        }
    }
    if !replaced {
        pairs.push(("page".to_string(), page.to_string()));
    }
    format!("{base}?{}", query_string(&pairs))
}

/// Pagination bar; empty when there is only one page.
pub fn render(current: u32, total: u32, base: &str, params: &[(String, String)]) -> String {
    let items = visible_pages(current, total);
    if items.is_empty() {
        return String::new();
    }

    let link = |page: u32, label: &str| {
        format!(
            "<a class=\"page-link\" href=\"{}\">{label}</a>",
            escape_html(&page_url(base, params, page))
        )
    };
    let disabled = |label: &str| format!("<span class=\"page-link disabled\">{label}</span>");

    let mut out = String::from("<nav class=\"pagination\" aria-label=\"Pagination\">");
    out.push_str(&if current > 1 {
        link(current - 1, "‹ Previous")
    } else {
        disabled("‹ Previous")
    });

    for item in items {
        match item {
            PageItem::Ellipsis => out.push_str("<span class=\"page-gap\">…</span>"),
            PageItem::Page(n) if n == current => {
                out.push_str(&format!("<span class=\"page-link current\" aria-current=\"page\">{n}</span>"))
            }
            PageItem::Page(n) => out.push_str(&link(n, &n.to_string())),
        }
    }

    out.push_str(&if current < total {
        link(current + 1, "Next ›")
    } else {
        disabled("Next ›")
    });
    out.push_str("</nav>");
    out
}
