// src/seo/robots.rs

//! robots.txt for the mirror.

use crate::models::Config;

const CRAWLERS: [&str; 4] = ["Googlebot", "Bingbot", "Slurp", "DuckDuckBot"];

const DISALLOWED: [&str; 4] = ["/api/", "/_next/", "/admin/", "*.json$"];

const ALLOWED: [&str; 5] = ["/sitemap*.xml", "/article/", "/author/", "/trending", "/search"];

/// Render robots.txt with the sitemap location under the configured origin.
pub fn robots_txt(config: &Config) -> String {
    let mut lines = vec![
        "User-agent: *".to_string(),
        "Allow: /".to_string(),
        String::new(),
        "# Sitemaps".to_string(),
        format!("Sitemap: {}", config.site_url("/sitemap.xml")),
        String::new(),
        "# Crawl-delay for respectful crawling".to_string(),
        "Crawl-delay: 1".to_string(),
        String::new(),
        "# Allow all search engines".to_string(),
    ];

    for crawler in CRAWLERS {
        lines.push(format!("User-agent: {crawler}"));
        lines.push("Allow: /".to_string());
        lines.push(String::new());
    }

    lines.push("# Block unnecessary paths".to_string());
    lines.extend(DISALLOWED.iter().map(|p| format!("Disallow: {p}")));
    lines.push(String::new());

    lines.push("# Allow important pages".to_string());
    lines.extend(ALLOWED.iter().map(|p| format!("Allow: {p}")));

    lines.join("\n")
}
