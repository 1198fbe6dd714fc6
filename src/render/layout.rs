// src/render/layout.rs

//! Page chrome shared by every HTML response: head, navigation, footer.

use chrono::{Datelike, Utc};

use crate::models::Config;
use crate::seo::PageMeta;
use crate::utils::escape_html;

const STYLESHEET: &str = r#"
*,*::before,*::after{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,"Segoe UI",Roboto,sans-serif;color:#111827;background:#f9fafb;line-height:1.5}
a{color:inherit}
.page{display:flex;flex-direction:column;min-height:100vh}
.container{max-width:1200px;margin:0 auto;padding:0 1rem}
main{flex:1;padding:2rem 0}
.site-nav{position:sticky;top:0;z-index:50;background:rgba(255,255,255,.95);border-bottom:1px solid #e5e7eb}
.site-nav .container{display:flex;align-items:center;justify-content:space-between;height:4rem;gap:1rem}
.brand{font-weight:700;font-size:1.25rem;text-decoration:none}
.nav-links a{margin-left:1rem;text-decoration:none;color:#4b5563}
.search-form input{padding:.4rem .6rem;border:1px solid #d1d5db;border-radius:.375rem}
.grid{display:grid;gap:1.5rem;grid-template-columns:repeat(auto-fill,minmax(300px,1fr))}
.card{background:#fff;border-radius:.5rem;box-shadow:0 1px 3px rgba(0,0,0,.08);padding:1rem;display:flex;flex-direction:column;gap:.75rem}
.card img.cover{width:100%;height:12rem;object-fit:cover;border-radius:.5rem}
.tag{display:inline-block;font-size:.75rem;background:#eef2ff;border-radius:.25rem;padding:0 .4rem;margin-right:.25rem}
.avatar{display:inline-flex;align-items:center;justify-content:center;width:2rem;height:2rem;border-radius:50%;background:#e5e7eb;overflow:hidden;font-weight:600}
.avatar img{width:100%;height:100%;object-fit:cover}
.muted{color:#6b7280;font-size:.875rem}
.notice{background:#fffbeb;border:1px solid #fde68a;color:#92400e;border-radius:.5rem;padding:1rem;margin-bottom:1.5rem}
.empty{text-align:center;padding:3rem 0}
.button{display:inline-block;border:1px solid #d1d5db;border-radius:.375rem;padding:.4rem .9rem;text-decoration:none;background:#fff}
.pagination{display:flex;justify-content:center;gap:.5rem;margin-top:2rem}
.page-link{padding:.3rem .7rem;border:1px solid #d1d5db;border-radius:.375rem;text-decoration:none}
.page-link.current{background:#111827;color:#fff}
.page-link.disabled{opacity:.5}
.article-body img{max-width:100%}
.article-body pre{overflow-x:auto;background:#1f2937;color:#f9fafb;padding:1rem;border-radius:.5rem}
.article-body :not(pre)>code{background:#f3f4f6;padding:.1rem .3rem;border-radius:.25rem;font-size:.9em}
.article-body .highlight .c,.article-body .highlight .c1,.article-body .highlight .cm,.article-body .highlight .cs{color:#9ca3af;font-style:italic}
.article-body .highlight .k,.article-body .highlight .kd,.article-body .highlight .kn,.article-body .highlight .kr,.article-body .highlight .kt{color:#c084fc}
.article-body .highlight .s,.article-body .highlight .s1,.article-body .highlight .s2,.article-body .highlight .sb,.article-body .highlight .sr{color:#86efac}
.article-body .highlight .m,.article-body .highlight .mi,.article-body .highlight .mf,.article-body .highlight .kc{color:#fdba74}
.article-body .highlight .nf,.article-body .highlight .fm,.article-body .highlight .nc,.article-body .highlight .nb{color:#93c5fd}
.article-body .highlight .nt,.article-body .highlight .na,.article-body .highlight .nv{color:#fca5a5}
.article-body .highlight .o,.article-body .highlight .p{color:#e5e7eb}
.article-body .highlight .err{color:#f87171}
.toc{background:#fff;border-radius:.5rem;padding:1rem;margin:1.5rem 0}
.toc-h3{margin-left:1rem}
.site-footer{border-top:1px solid #e5e7eb;padding:2rem 0;background:#fff}
.footer-grid{display:grid;gap:2rem;grid-template-columns:repeat(auto-fit,minmax(200px,1fr))}
"#;

/// Wrap `body` in the full document for a page.
pub fn document(config: &Config, meta: &PageMeta, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         {head}<style>{STYLESHEET}</style>\n</head>\n<body>\n<div class=\"page\">\n\
         {nav}\n<main><div class=\"container\">\n{body}\n</div></main>\n{footer}\n</div>\n</body>\n</html>\n",
        head = meta.head_tags(config),
        nav = navigation(config),
        footer = footer(config),
    )
}

fn navigation(config: &Config) -> String {
    format!(
        "<header class=\"site-nav\"><div class=\"container\">\
         <div><a class=\"brand\" href=\"/\">{name}</a>\
         <nav class=\"nav-links\"><a href=\"/\">Home</a><a href=\"/trending\">Trending</a><a href=\"/authors\">Authors</a></nav></div>\
         <form class=\"search-form\" action=\"/search\" method=\"get\" role=\"search\">\
         <input type=\"search\" name=\"q\" placeholder=\"Search articles...\" aria-label=\"Search articles\">\
         </form></div></header>",
        name = escape_html(&config.site.name),
    )
}

fn footer(config: &Config) -> String {
    let name = escape_html(&config.site.name);
    format!(
        "<footer class=\"site-footer\"><div class=\"container\"><div class=\"footer-grid\">\
         <div><p class=\"brand\">{name}</p><p class=\"muted\">{tagline}</p></div>\
         <div><h3>Explore</h3><ul>\
         <li><a href=\"/\">Latest Articles</a></li>\
         <li><a href=\"/trending\">Trending</a></li>\
         <li><a href=\"/authors\">Popular Authors</a></li></ul></div>\
         <div><h3>Resources</h3><ul>\
         <li><a href=\"https://dev.to\" target=\"_blank\" rel=\"noopener noreferrer\">Dev.to Community</a></li>\
         <li><a href=\"https://dev.to/api\" target=\"_blank\" rel=\"noopener noreferrer\">Dev.to API</a></li></ul></div>\
         <div><h3>About</h3><p class=\"muted\">Server-rendered in Rust on top of the Dev.to API.</p></div>\
         </div><p class=\"muted\">© {year} {name}. All rights reserved.</p></div></footer>",
        tagline = escape_html(&config.site.tagline),
        year = Utc::now().year(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_has_chrome_and_body() {
        let config = Config::default();
        let html = document(&config, &PageMeta::home(&config), "<p id=\"x\">hello</p>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("<title>DevArt - Programming Articles &amp; Developer Resources</title>"));
        assert!(html.contains("action=\"/search\""));
        assert!(html.contains("<p id=\"x\">hello</p>"));
        assert!(html.contains("https://dev.to/api"));
        assert!(html.contains("All rights reserved."));
    }

    #[test]
    fn site_name_is_escaped() {
        let mut config = Config::default();
        config.site.name = "A<B>".into();
        let html = document(&config, &PageMeta::authors(&config), "");
        assert!(html.contains("<a class=\"brand\" href=\"/\">A&lt;B&gt;</a>"));
    }

    #[test]
    fn stylesheet_colors_highlighted_code() {
        let config = Config::default();
        let html = document(&config, &PageMeta::home(&config), "");
        assert!(html.contains(".article-body .highlight .k,"));
        assert!(html.contains(".article-body .highlight .s,"));
        assert!(html.contains(".article-body .highlight .c,"));
    }
}
