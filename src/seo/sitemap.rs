// src/seo/sitemap.rs

//! XML sitemap generation.
//!
//! Four documents are served:
//!
//! ```text
//! /sitemap.xml           # index: static pages + articles + authors
//! /sitemap-static.xml    # fixed top-level pages
//! /sitemap-articles.xml  # latest + top articles, with image and news blocks
//! /sitemap-authors.xml   # unique authors of those articles
//! ```
//!
//! Listing fetches run in parallel and each is settled on its own: a failed
//! or timed-out source counts as empty. Only when every source fails is the
//! error variant of a document served, with a short cache lifetime.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{AppError, Result};
use crate::models::{Article, Config};
use crate::services::ContentSource;
use crate::utils::escape_xml;
use crate::utils::http::with_timeout;

const NS_SITEMAP: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const NS_IMAGE: &str = "http://www.google.com/schemas/sitemap-image/1.1";
const NS_NEWS: &str = "http://www.google.com/schemas/sitemap-news/0.9";
const NS_XHTML: &str = "http://www.w3.org/1999/xhtml";

/// Articles fetched per source for the articles and authors sitemaps.
const SECTION_PER_PAGE: u32 = 50;

/// Articles newer than this many days get a news block.
const NEWS_WINDOW_DAYS: i64 = 2;

/// Which sitemap document to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    Index,
    Static,
    Articles,
    Authors,
}

impl FromStr for SitemapKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "index" | "sitemap" | "all" => Ok(Self::Index),
            "static" => Ok(Self::Static),
            "articles" => Ok(Self::Articles),
            "authors" => Ok(Self::Authors),
            other => Err(AppError::validation(format!(
                "Unknown sitemap '{other}' (expected index, static, articles or authors)"
            ))),
        }
    }
}

/// A rendered sitemap and how long it may be cached.
#[derive(Debug, Clone)]
pub struct Sitemap {
    pub xml: String,
    pub max_age_secs: u64,
    /// Shared caches may keep it as long as browsers; false for error variants
    pub shared: bool,
}

impl Sitemap {
    /// `Cache-Control` value for this document.
    pub fn cache_control(&self) -> String {
        if self.shared {
            format!(
                "public, max-age={0}, s-maxage={0}",
                self.max_age_secs
            )
        } else {
            format!("public, max-age={}", self.max_age_secs)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
}

impl ChangeFreq {
    fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
        }
    }
}

#[derive(Debug, Clone)]
struct ImageBlock {
    loc: String,
    title: String,
    caption: Option<String>,
}

#[derive(Debug, Clone)]
struct NewsBlock {
    publication: String,
    published: DateTime<Utc>,
    title: String,
    keywords: String,
}

#[derive(Debug, Clone)]
struct UrlEntry {
    loc: String,
    lastmod: DateTime<Utc>,
    changefreq: ChangeFreq,
    priority: &'static str,
    image: Option<ImageBlock>,
    news: Option<NewsBlock>,
}

impl UrlEntry {
    fn new(loc: String, lastmod: DateTime<Utc>, changefreq: ChangeFreq, priority: &'static str) -> Self {
        Self {
            loc,
            lastmod,
            changefreq,
            priority,
            image: None,
            news: None,
        }
    }
}

/// Timestamp in the `YYYY-MM-DDTHH:MM:SS.sssZ` form.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn render_urlset(namespaces: &[(&str, &str)], entries: &[UrlEntry]) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset");
    for (i, (prefix, uri)) in namespaces.iter().enumerate() {
        let attr = if prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{prefix}")
        };
        if i == 0 {
            let _ = write!(out, " {attr}=\"{uri}\"");
        } else {
            let _ = write!(out, "\n        {attr}=\"{uri}\"");
        }
    }
    out.push_str(">\n");

    for entry in entries {
        out.push_str("  <url>\n");
        let _ = writeln!(out, "    <loc>{}</loc>", escape_xml(&entry.loc));
        let _ = writeln!(out, "    <lastmod>{}</lastmod>", iso_timestamp(entry.lastmod));
        let _ = writeln!(out, "    <changefreq>{}</changefreq>", entry.changefreq.as_str());
        let _ = writeln!(out, "    <priority>{}</priority>", entry.priority);

        if let Some(image) = &entry.image {
            out.push_str("    <image:image>\n");
            let _ = writeln!(out, "      <image:loc>{}</image:loc>", escape_xml(&image.loc));
            let _ = writeln!(out, "      <image:title>{}</image:title>", escape_xml(&image.title));
            if let Some(caption) = &image.caption {
                let _ = writeln!(out, "      <image:caption>{}</image:caption>", escape_xml(caption));
            }
            out.push_str("    </image:image>\n");
        }

        if let Some(news) = &entry.news {
            out.push_str("    <news:news>\n      <news:publication>\n");
            let _ = writeln!(out, "        <news:name>{}</news:name>", escape_xml(&news.publication));
            out.push_str("        <news:language>en</news:language>\n      </news:publication>\n");
            let _ = writeln!(
                out,
                "      <news:publication_date>{}</news:publication_date>",
                iso_timestamp(news.published)
            );
            let _ = writeln!(out, "      <news:title>{}</news:title>", escape_xml(&news.title));
            let _ = writeln!(out, "      <news:keywords>{}</news:keywords>", escape_xml(&news.keywords));
            out.push_str("    </news:news>\n");
        }

        out.push_str("  </url>\n");
    }

    out.push_str("</urlset>");
    out
}

fn empty_urlset() -> String {
    render_urlset(&[("", NS_SITEMAP)], &[])
}

/// Top-level pages: path, priority, change frequency.
const STATIC_PAGES: [(&str, &str, ChangeFreq); 4] = [
    ("", "1.0", ChangeFreq::Daily),
    ("/trending", "0.8", ChangeFreq::Daily),
    ("/authors", "0.7", ChangeFreq::Weekly),
    ("/search", "0.6", ChangeFreq::Weekly),
];

fn static_entries(config: &Config, now: DateTime<Utc>) -> Vec<UrlEntry> {
    STATIC_PAGES
        .iter()
        .map(|(path, priority, freq)| UrlEntry::new(config.site_url(path), now, *freq, priority))
        .collect()
}

/// Articles from the latest and top listings, with how many sources failed.
#[derive(Debug, Default)]
pub struct SourceArticles {
    pub articles: Vec<Article>,
    pub failed_sources: usize,
}

impl SourceArticles {
    /// Every source failed, so the result says nothing about upstream content.
    pub fn all_failed(&self) -> bool {
        self.failed_sources == 2
    }
}

/// Fetch latest and top listings in parallel, each raced against `timeout_secs`.
pub async fn fetch_sources(
    source: &dyn ContentSource,
    per_page: u32,
    timeout_secs: u64,
) -> SourceArticles {
    let (latest, top) = futures::join!(
        with_timeout("latest articles", timeout_secs, source.latest_articles(1, per_page)),
        with_timeout("top articles", timeout_secs, source.top_articles(1, per_page)),
    );

    let mut collected = SourceArticles::default();
    for (name, result) in [("latest", latest), ("top", top)] {
        match result {
            Ok(list) => collected.articles.extend(list),
            Err(e) => {
                log::warn!("Sitemap source '{name}' failed: {e}");
                collected.failed_sources += 1;
            }
        }
    }
    collected
}

/// Drop repeated article ids, keeping the first occurrence.
pub fn dedupe_by_id(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles.into_iter().filter(|a| seen.insert(a.id)).collect()
}

/// One sitemap row per author username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorEntry {
    pub username: String,
    pub name: String,
    pub last_article: DateTime<Utc>,
}

/// Unique authors in first-seen order; the last-seen article supplies the
/// name and date.
pub fn unique_authors(articles: &[Article]) -> Vec<AuthorEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut authors: Vec<AuthorEntry> = Vec::new();
    for article in articles {
        let entry = AuthorEntry {
            username: article.user.username.clone(),
            name: article.user.name.clone(),
            last_article: article.published_at,
        };
        match index.get(article.user.username.as_str()) {
            Some(&slot) => authors[slot] = entry,
            None => {
                index.insert(article.user.username.as_str(), authors.len());
                authors.push(entry);
            }
        }
    }
    authors
}

/// Sitemap of the fixed top-level pages.
pub fn static_sitemap(config: &Config, now: DateTime<Utc>) -> Sitemap {
    Sitemap {
        xml: render_urlset(&[("", NS_SITEMAP)], &static_entries(config, now)),
        max_age_secs: config.cache.static_secs,
        shared: true,
    }
}

/// Sitemap of recent and popular articles.
pub async fn articles_sitemap(
    config: &Config,
    source: &dyn ContentSource,
    now: DateTime<Utc>,
) -> Sitemap {
    let fetched = fetch_sources(source, SECTION_PER_PAGE, config.api.sitemap_timeout_secs).await;
    if fetched.all_failed() {
        return error_sitemap(config, empty_urlset());
    }

    let entries: Vec<UrlEntry> = dedupe_by_id(fetched.articles)
        .into_iter()
        .map(|article| {
            let mut entry = UrlEntry::new(
                config.site_url(&article.site_path()),
                article.published_at,
                ChangeFreq::Weekly,
                "0.8",
            );
            entry.image = article.cover_image.as_ref().map(|cover| ImageBlock {
                loc: cover.clone(),
                title: article.title.clone(),
                caption: Some(article.description.clone()),
            });
            if article.is_recent(now, NEWS_WINDOW_DAYS) {
                entry.news = Some(NewsBlock {
                    publication: config.site.name.clone(),
                    published: article.published_at,
                    title: article.title.clone(),
                    keywords: article.tag_list.join(", "),
                });
            }
            entry
        })
        .collect();

    Sitemap {
        xml: render_urlset(
            &[("", NS_SITEMAP), ("image", NS_IMAGE), ("news", NS_NEWS)],
            &entries,
        ),
        max_age_secs: config.cache.sitemap_secs,
        shared: true,
    }
}

/// Sitemap of author pages.
pub async fn authors_sitemap(
    config: &Config,
    source: &dyn ContentSource,
    _now: DateTime<Utc>,
) -> Sitemap {
    let fetched = fetch_sources(source, SECTION_PER_PAGE, config.api.sitemap_timeout_secs).await;
    if fetched.all_failed() {
        return error_sitemap(config, empty_urlset());
    }

    let entries: Vec<UrlEntry> = unique_authors(&fetched.articles)
        .into_iter()
        .map(|author| {
            UrlEntry::new(
                config.site_url(&format!("/author/{}", author.username)),
                author.last_article,
                ChangeFreq::Weekly,
                "0.6",
            )
        })
        .collect();

    Sitemap {
        xml: render_urlset(&[("", NS_SITEMAP)], &entries),
        max_age_secs: config.cache.authors_sitemap_secs,
        shared: true,
    }
}

/// Combined sitemap: static pages, articles, then authors.
pub async fn index_sitemap(
    config: &Config,
    source: &dyn ContentSource,
    now: DateTime<Utc>,
) -> Sitemap {
    let fetched = fetch_sources(
        source,
        config.feeds.sitemap_per_page,
        config.api.sitemap_timeout_secs,
    )
    .await;
    if fetched.all_failed() {
        let home = UrlEntry::new(config.site_url(""), now, ChangeFreq::Daily, "1.0");
        return error_sitemap(config, render_urlset(&[("", NS_SITEMAP)], &[home]));
    }

    let articles = dedupe_by_id(fetched.articles);
    let mut entries = static_entries(config, now);

    entries.extend(articles.iter().map(|article| {
        let mut entry = UrlEntry::new(
            config.site_url(&article.site_path()),
            article.published_at,
            ChangeFreq::Weekly,
            "0.7",
        );
        entry.image = article.cover_image.as_ref().map(|cover| ImageBlock {
            loc: cover.clone(),
            title: article.title.clone(),
            caption: None,
        });
        entry
    }));

    entries.extend(unique_authors(&articles).into_iter().map(|author| {
        UrlEntry::new(
            config.site_url(&format!("/author/{}", author.username)),
            now,
            ChangeFreq::Weekly,
            "0.6",
        )
    }));

    Sitemap {
        xml: render_urlset(
            &[
                ("", NS_SITEMAP),
                ("news", NS_NEWS),
                ("xhtml", NS_XHTML),
                ("image", NS_IMAGE),
            ],
            &entries,
        ),
        max_age_secs: config.cache.sitemap_secs,
        shared: true,
    }
}

fn error_sitemap(config: &Config, xml: String) -> Sitemap {
    Sitemap {
        xml,
        max_age_secs: config.cache.error_secs,
        shared: false,
    }
}

/// Build the requested sitemap.
pub async fn build(
    kind: SitemapKind,
    config: &Config,
    source: &dyn ContentSource,
    now: DateTime<Utc>,
) -> Sitemap {
    match kind {
        SitemapKind::Index => index_sitemap(config, source, now).await,
        SitemapKind::Static => static_sitemap(config, now),
        SitemapKind::Articles => articles_sitemap(config, source, now).await,
        SitemapKind::Authors => authors_sitemap(config, source, now).await,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::models::sample_article;
    use crate::services::feeds::tests::StubSource;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.site.base_url = "https://mirror.test".into();
        config
    }

    #[test]
    fn iso_timestamp_has_millis_and_z() {
        assert_eq!(iso_timestamp(now()), "2024-01-02T00:00:00.000Z");
    }

    #[test]
    fn kind_parses_names() {
        assert_eq!("Articles".parse::<SitemapKind>().unwrap(), SitemapKind::Articles);
        assert_eq!("index".parse::<SitemapKind>().unwrap(), SitemapKind::Index);
        assert!("feeds".parse::<SitemapKind>().is_err());
    }

    #[test]
    fn static_sitemap_lists_four_pages() {
        let sitemap = static_sitemap(&config(), now());
        assert_eq!(sitemap.xml.matches("<url>").count(), 4);
        assert!(sitemap.xml.contains("<loc>https://mirror.test</loc>"));
        assert!(sitemap.xml.contains("<loc>https://mirror.test/trending</loc>"));
        assert!(sitemap.xml.contains("<priority>0.6</priority>"));
        assert_eq!(sitemap.cache_control(), "public, max-age=86400, s-maxage=86400");
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let mut first = sample_article(1, "a", "one");
        first.title = "first".into();
        let mut dup = sample_article(1, "a", "one");
        dup.title = "dup".into();
        let other = sample_article(2, "b", "two");
        let kept = dedupe_by_id(vec![first, other, dup]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].title, "first");
    }

    #[test]
    fn unique_authors_keep_position_and_last_date() {
        let mut a1 = sample_article(1, "ann", "x");
        a1.published_at = now() - Duration::days(5);
        let b = sample_article(2, "bob", "y");
        let mut a2 = sample_article(3, "ann", "z");
        a2.published_at = now() - Duration::days(1);

        let authors = unique_authors(&[a1, b, a2.clone()]);
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].username, "ann");
        assert_eq!(authors[0].last_article, a2.published_at);
        assert_eq!(authors[1].username, "bob");
    }

    #[tokio::test]
    async fn articles_sitemap_escapes_and_adds_blocks() {
        let mut recent = sample_article(1, "jane", "fresh");
        recent.title = "Tom & <Jerry>".into();
        recent.description = "\"quoted\" 'text'".into();
        recent.cover_image = Some("https://img.test/a.png?x=1&y=2".into());
        recent.published_at = now() - Duration::hours(12);
        recent.tag_list = vec!["rust".into(), "web".into()];

        let mut old = sample_article(2, "joe", "stale");
        old.published_at = now() - Duration::days(10);

        let source = StubSource {
            latest: Some(vec![recent.clone(), old]),
            top: Some(vec![recent]),
            ..StubSource::default()
        };
        let sitemap = articles_sitemap(&config(), &source, now()).await;
        let xml = &sitemap.xml;

        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains("<loc>https://mirror.test/article/jane/fresh</loc>"));
        assert!(xml.contains("<image:title>Tom &amp; &lt;Jerry&gt;</image:title>"));
        assert!(xml.contains("<image:caption>&quot;quoted&quot; &apos;text&apos;</image:caption>"));
        assert!(xml.contains("<image:loc>https://img.test/a.png?x=1&amp;y=2</image:loc>"));
        assert_eq!(xml.matches("<news:news>").count(), 1);
        assert!(xml.contains("<news:keywords>rust, web</news:keywords>"));
        assert!(xml.contains("<news:name>DevArt</news:name>"));
        assert_eq!(sitemap.cache_control(), "public, max-age=3600, s-maxage=3600");
    }

    #[tokio::test]
    async fn one_failed_source_still_renders() {
        let source = StubSource {
            top: Some(vec![sample_article(5, "kim", "only")]),
            ..StubSource::default()
        };
        let sitemap = articles_sitemap(&config(), &source, now()).await;
        assert!(sitemap.shared);
        assert_eq!(sitemap.xml.matches("<url>").count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_is_dropped_after_timeout() {
        let mut config = config();
        config.api.sitemap_timeout_secs = 5;
        let source = StubSource {
            latest: Some(vec![sample_article(1, "ann", "fresh")]),
            top: Some(vec![sample_article(2, "bob", "stale")]),
            top_delay_secs: Some(30),
            ..StubSource::default()
        };

        let fetched = fetch_sources(&source, 10, config.api.sitemap_timeout_secs).await;
        assert_eq!(fetched.failed_sources, 1);
        assert_eq!(fetched.articles.len(), 1);

        let sitemap = articles_sitemap(&config, &source, now()).await;
        assert!(sitemap.shared);
        assert!(sitemap.xml.contains("/article/ann/fresh</loc>"));
        assert!(!sitemap.xml.contains("/article/bob/stale"));
    }

    #[tokio::test]
    async fn all_sources_failed_serves_empty_urlset() {
        let source = StubSource::default();
        let sitemap = authors_sitemap(&config(), &source, now()).await;
        assert!(!sitemap.xml.contains("<url>"));
        assert!(sitemap.xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert_eq!(sitemap.cache_control(), "public, max-age=300");
    }

    #[tokio::test]
    async fn authors_sitemap_has_one_row_per_author() {
        let source = StubSource {
            latest: Some(vec![sample_article(1, "ann", "a"), sample_article(2, "bob", "b")]),
            top: Some(vec![sample_article(3, "ann", "c")]),
            ..StubSource::default()
        };
        let sitemap = authors_sitemap(&config(), &source, now()).await;
        assert_eq!(sitemap.xml.matches("<url>").count(), 2);
        assert!(sitemap.xml.contains("<loc>https://mirror.test/author/ann</loc>"));
        assert_eq!(sitemap.max_age_secs, 7200);
    }

    #[tokio::test]
    async fn index_sitemap_orders_sections() {
        let mut article = sample_article(1, "ann", "a");
        article.cover_image = Some("https://img.test/c.png".into());
        let source = StubSource {
            latest: Some(vec![article.clone()]),
            top: Some(vec![article]),
            ..StubSource::default()
        };
        let sitemap = index_sitemap(&config(), &source, now()).await;
        let xml = &sitemap.xml;

        assert_eq!(xml.matches("<url>").count(), 4 + 1 + 1);
        let home = xml.find("<loc>https://mirror.test</loc>").unwrap();
        let art = xml.find("/article/ann/a</loc>").unwrap();
        let author = xml.find("/author/ann</loc>").unwrap();
        assert!(home < art && art < author);
        assert!(xml.contains("<priority>0.7</priority>"));
        assert!(!xml.contains("<image:caption>"));
        assert!(xml.contains("xmlns:xhtml"));
    }

    #[tokio::test]
    async fn index_sitemap_falls_back_to_home_only() {
        let source = StubSource::default();
        let sitemap = index_sitemap(&config(), &source, now()).await;
        assert_eq!(sitemap.xml.matches("<url>").count(), 1);
        assert!(sitemap.xml.contains("<loc>https://mirror.test</loc>"));
        assert!(!sitemap.shared);
    }
}
