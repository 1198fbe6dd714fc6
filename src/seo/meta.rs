// src/seo/meta.rs

//! Per-page head metadata: title, description, canonical link, OpenGraph,
//! Twitter cards, robots directives, and schema.org JSON-LD for articles.

use std::fmt::Write as _;

use serde_json::json;

use crate::models::{Article, Config};
use crate::utils::{escape_html, truncate_graphemes};

/// Longest description emitted in meta tags, in grapheme clusters.
pub const DESCRIPTION_LIMIT: usize = 160;

const ROBOTS_INDEX: &str =
    "index, follow, max-image-preview:large, max-snippet:-1, max-video-preview:-1";
const ROBOTS_NOINDEX: &str = "noindex, follow";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OgType {
    Website,
    Article,
    Profile,
}

impl OgType {
    fn as_str(self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
            OgType::Profile => "profile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwitterCard {
    Summary,
    SummaryLargeImage,
}

impl TwitterCard {
    fn as_str(self) -> &'static str {
        match self {
            TwitterCard::Summary => "summary",
            TwitterCard::SummaryLargeImage => "summary_large_image",
        }
    }
}

/// Head metadata for one page.
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
    /// Absolute URL
    pub canonical: String,
    pub og_type: OgType,
    pub twitter_card: TwitterCard,
    pub image: Option<String>,
    pub author: Option<String>,
    pub robots_index: bool,
    /// Serialized JSON-LD document, if any
    pub json_ld: Option<String>,
}

impl PageMeta {
    fn website(config: &Config, title: String, description: String, path: &str) -> Self {
        Self {
            title,
            description,
            keywords: config.site.keywords.clone(),
            canonical: config.site_url(path),
            og_type: OgType::Website,
            twitter_card: TwitterCard::SummaryLargeImage,
            image: None,
            author: None,
            robots_index: true,
            json_ld: None,
        }
    }

    pub fn home(config: &Config) -> Self {
        Self::website(
            config,
            format!(
                "{} - Programming Articles & Developer Resources",
                config.site.name
            ),
            config.site.description.clone(),
            "",
        )
    }

    pub fn trending(config: &Config) -> Self {
        Self::website(
            config,
            format!("Trending Articles | {}", config.site.name),
            "The most popular programming articles from the past week, ranked by community reactions."
                .to_string(),
            "/trending",
        )
    }

    pub fn search(config: &Config, query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            return Self::website(
                config,
                format!("Search | {}", config.site.name),
                "Search programming articles by tag and topic.".to_string(),
                "/search",
            );
        }
        let mut meta = Self::website(
            config,
            format!("Search results for \"{query}\" | {}", config.site.name),
            format!("Programming articles tagged \"{query}\"."),
            &format!("/search?q={}", crate::utils::url::encode_component(query)),
        );
        meta.robots_index = false;
        meta
    }

    pub fn authors(config: &Config) -> Self {
        Self::website(
            config,
            format!("Popular Authors | {}", config.site.name),
            "Discover the most engaged writers in the developer community.".to_string(),
            "/authors",
        )
    }

    pub fn author(config: &Config, username: &str) -> Self {
        let mut meta = Self::website(
            config,
            format!("@{username} | {}", config.site.name),
            format!("Articles written by @{username}."),
            &format!("/author/{username}"),
        );
        meta.og_type = OgType::Profile;
        meta.twitter_card = TwitterCard::Summary;
        meta.author = Some(username.to_string());
        meta
    }

    /// Metadata for a loaded article, including its JSON-LD document.
    pub fn article(config: &Config, article: &Article) -> Self {
        let image = article
            .cover_image
            .clone()
            .or_else(|| Some(article.social_image.clone()).filter(|s| !s.is_empty()));
        let description = if article.description.is_empty() {
            format!("Read the latest article by @{} on {}.", article.user.username, config.site.name)
        } else {
            article.description.clone()
        };

        Self {
            title: article.title.clone(),
            description,
            keywords: article.tag_list.join(", "),
            canonical: config.site_url(&article.site_path()),
            og_type: OgType::Article,
            twitter_card: TwitterCard::SummaryLargeImage,
            image,
            author: Some(article.user.display_name().to_string()),
            robots_index: true,
            json_ld: Some(article_json_ld(config, article)),
        }
    }

    /// Metadata for an article page whose content could not be loaded.
    pub fn article_unavailable(config: &Config, username: &str, slug: &str) -> Self {
        let mut meta = Self::website(
            config,
            format!("Article by @{username} | {}", config.site.name),
            format!(
                "Read the latest article by @{username} on {} - your source for programming articles and developer insights.",
                config.site.name
            ),
            &format!("/article/{username}/{slug}"),
        );
        meta.og_type = OgType::Article;
        meta.author = Some(username.to_string());
        meta
    }

    pub fn not_found(config: &Config) -> Self {
        let mut meta = Self::website(
            config,
            format!("Page Not Found | {}", config.site.name),
            "The page you are looking for does not exist.".to_string(),
            "",
        );
        meta.robots_index = false;
        meta
    }

    pub fn error(config: &Config) -> Self {
        let mut meta = Self::website(
            config,
            format!("Something went wrong | {}", config.site.name),
            "An unexpected error occurred.".to_string(),
            "",
        );
        meta.robots_index = false;
        meta
    }

    /// Render the `<head>` tags for this page.
    pub fn head_tags(&self, config: &Config) -> String {
        let title = escape_html(&self.title);
        let description = escape_html(&truncate_graphemes(&self.description, DESCRIPTION_LIMIT));
        let canonical = escape_html(&self.canonical);
        let site_name = escape_html(&config.site.name);

        let mut out = String::new();
        let _ = writeln!(out, "<title>{title}</title>");
        let _ = writeln!(out, "<meta name=\"description\" content=\"{description}\">");
        if !self.keywords.is_empty() {
            let _ = writeln!(
                out,
                "<meta name=\"keywords\" content=\"{}\">",
                escape_html(&self.keywords)
            );
        }
        if let Some(author) = &self.author {
            let _ = writeln!(out, "<meta name=\"author\" content=\"{}\">", escape_html(author));
        }
        let robots = if self.robots_index { ROBOTS_INDEX } else { ROBOTS_NOINDEX };
        let _ = writeln!(out, "<meta name=\"robots\" content=\"{robots}\">");
        let _ = writeln!(out, "<link rel=\"canonical\" href=\"{canonical}\">");

        let _ = writeln!(out, "<meta property=\"og:title\" content=\"{title}\">");
        let _ = writeln!(out, "<meta property=\"og:description\" content=\"{description}\">");
        let _ = writeln!(out, "<meta property=\"og:type\" content=\"{}\">", self.og_type.as_str());
        let _ = writeln!(out, "<meta property=\"og:url\" content=\"{canonical}\">");
        let _ = writeln!(out, "<meta property=\"og:site_name\" content=\"{site_name}\">");
        out.push_str("<meta property=\"og:locale\" content=\"en_US\">\n");

        let _ = writeln!(
            out,
            "<meta name=\"twitter:card\" content=\"{}\">",
            self.twitter_card.as_str()
        );
        let _ = writeln!(out, "<meta name=\"twitter:title\" content=\"{title}\">");
        let _ = writeln!(out, "<meta name=\"twitter:description\" content=\"{description}\">");

        if let Some(image) = &self.image {
            let image = escape_html(image);
            let _ = writeln!(out, "<meta property=\"og:image\" content=\"{image}\">");
            let _ = writeln!(out, "<meta name=\"twitter:image\" content=\"{image}\">");
        }

        if let Some(json_ld) = &self.json_ld {
            let _ = writeln!(
                out,
                "<script type=\"application/ld+json\">{}</script>",
                json_ld.replace("</", "<\\/")
            );
        }
        out
    }
}

/// schema.org `Article` document for an article page.
pub fn article_json_ld(config: &Config, article: &Article) -> String {
    let url = config.site_url(&article.site_path());
    let image = article
        .cover_image
        .clone()
        .unwrap_or_else(|| article.social_image.clone());

    json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": article.title,
        "description": article.description,
        "image": image,
        "datePublished": article.published_at.to_rfc3339(),
        "dateModified": article.modified_at().to_rfc3339(),
        "author": {
            "@type": "Person",
            "name": article.user.display_name(),
            "url": config.site_url(&format!("/author/{}", article.user.username)),
        },
        "publisher": {
            "@type": "Organization",
            "name": config.site.name,
            "url": config.site_url(""),
        },
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": url,
        },
        "keywords": article.tag_list.join(", "),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_article;

    #[test]
    fn titles_follow_page_kind() {
        let config = Config::default();
        assert_eq!(
            PageMeta::home(&config).title,
            "DevArt - Programming Articles & Developer Resources"
        );
        assert_eq!(PageMeta::trending(&config).title, "Trending Articles | DevArt");
        assert_eq!(PageMeta::search(&config, " ").title, "Search | DevArt");
        assert_eq!(
            PageMeta::search(&config, "rust").title,
            "Search results for \"rust\" | DevArt"
        );
        assert_eq!(PageMeta::authors(&config).title, "Popular Authors | DevArt");
        assert_eq!(PageMeta::author(&config, "jane").title, "@jane | DevArt");
        assert_eq!(
            PageMeta::article_unavailable(&config, "jane", "x").title,
            "Article by @jane | DevArt"
        );
    }

    #[test]
    fn head_tags_escape_and_truncate() {
        let config = Config::default();
        let mut article = sample_article(1, "jane", "hello");
        article.title = "Tom & \"Jerry\"".into();
        article.description = "x".repeat(200);
        let head = PageMeta::article(&config, &article).head_tags(&config);

        assert!(head.contains("<title>Tom &amp; &quot;Jerry&quot;</title>"));
        let expected = format!("{}…", "x".repeat(DESCRIPTION_LIMIT));
        assert!(head.contains(&format!("<meta name=\"description\" content=\"{expected}\">")));
        assert!(head.contains(
            "<link rel=\"canonical\" href=\"https://devto.30tools.com/article/jane/hello\">"
        ));
        assert!(head.contains("<meta property=\"og:type\" content=\"article\">"));
        assert!(head.contains("<meta property=\"og:locale\" content=\"en_US\">"));
        assert!(head.contains(ROBOTS_INDEX));
        assert!(head.contains("application/ld+json"));
    }

    #[test]
    fn json_ld_describes_article() {
        let config = Config::default();
        let mut article = sample_article(7, "jane", "hello");
        article.cover_image = Some("https://img.test/c.png".into());
        let doc: serde_json::Value = serde_json::from_str(&article_json_ld(&config, &article)).unwrap();

        assert_eq!(doc["@type"], "Article");
        assert_eq!(doc["headline"], "Article 7");
        assert_eq!(doc["image"], "https://img.test/c.png");
        assert_eq!(doc["author"]["@type"], "Person");
        assert_eq!(doc["author"]["url"], "https://devto.30tools.com/author/jane");
        assert_eq!(doc["publisher"]["name"], "DevArt");
        assert_eq!(doc["keywords"], "rust, web");
        assert_eq!(doc["datePublished"], doc["dateModified"]);
    }

    #[test]
    fn json_ld_cannot_close_script_tag() {
        let config = Config::default();
        let mut article = sample_article(1, "jane", "x");
        article.title = "</script><b>".into();
        let head = PageMeta::article(&config, &article).head_tags(&config);
        assert!(!head.contains("</script><b>"));
    }

    #[test]
    fn profile_and_error_pages() {
        let config = Config::default();
        let author = PageMeta::author(&config, "jane");
        assert_eq!(author.og_type, OgType::Profile);
        assert_eq!(author.canonical, "https://devto.30tools.com/author/jane");
        let noindex = "<meta name=\"robots\" content=\"noindex, follow\">";
        assert!(PageMeta::not_found(&config).head_tags(&config).contains(noindex));
        assert!(PageMeta::error(&config).head_tags(&config).contains(noindex));
        assert!(PageMeta::search(&config, "rust").head_tags(&config).contains(noindex));
        assert!(!PageMeta::search(&config, "  ").head_tags(&config).contains(noindex));
    }
}
