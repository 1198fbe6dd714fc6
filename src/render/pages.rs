// src/render/pages.rs

//! Full HTML documents for each route.
//!
//! Every function here is pure: handlers fetch the data, pages turn it
//! into markup. Upstream failures arrive as messages inside the feed
//! results and are rendered as notices, never as errors.

use chrono::{DateTime, Utc};

use crate::models::{Article, AuthorStats, Config};
use crate::render::components::{
    GridContext, api_status_notice, articles_grid, author_card, avatar,
    visitor_badge,
};
use crate::render::layout::document;
use crate::render::{time, toc};
use crate::seo::PageMeta;
use crate::services::{ArticleResult, FeedResult};
use crate::utils::escape_html;
use crate::utils::url::encode_component;

const ERROR_LOADING: &str = "Error loading articles";
const ERROR_SEARCHING: &str = "Error searching articles";

fn page_header(title: &str, subtitle: &str, badge: &str) -> String {
    format!(
        "<div class=\"page-header\"><h1>{}</h1><p class=\"muted\">{}</p>{badge}</div>",
        escape_html(title),
        escape_html(subtitle)
    )
}

fn section(title: &str, description: &str, content: &str, more_href: Option<&str>) -> String {
    let more = more_href
        .map(|href| format!("<a class=\"button\" href=\"{}\">View all</a>", escape_html(href)))
        .unwrap_or_default();
    format!(
        "<section class=\"section\"><h2>{}</h2><p class=\"muted\">{}</p>{content}{more}</section>",
        escape_html(title),
        escape_html(description)
    )
}

fn page_params(page: u32) -> Vec<(String, String)> {
    if page > 1 {
        vec![("page".to_string(), page.to_string())]
    } else {
        Vec::new()
    }
}

/// Landing page: latest and trending sections.
pub fn home(config: &Config, latest: &FeedResult, trending: &FeedResult, now: DateTime<Utc>) -> String {
    let grid = |feed: &FeedResult, base_url: &str| {
        articles_grid(
            feed,
            GridContext {
                page: 1,
                base_url,
                params: &[],
                error_label: ERROR_LOADING,
                paginate: false,
            },
            now,
        )
    };

    let body = format!(
        "{header}{latest}{trending}",
        header = page_header(&config.site.name, &config.site.tagline, &visitor_badge(config, "/")),
        latest = section(
            "Latest Articles",
            "Fresh content from the developer community",
            &grid(latest, "/"),
            None,
        ),
        trending = section(
            "Trending Articles",
            "Popular articles from the past week",
            &grid(trending, "/trending"),
            Some("/trending"),
        ),
    );
    document(config, &PageMeta::home(config), &body)
}

/// Paginated top articles of the week.
pub fn trending(config: &Config, feed: &FeedResult, page: u32, now: DateTime<Utc>) -> String {
    let params = page_params(page);
    let body = format!(
        "{}{}",
        page_header(
            "Trending Articles",
            "The most popular articles from the past week",
            &visitor_badge(config, "/trending"),
        ),
        articles_grid(
            feed,
            GridContext {
                page,
                base_url: "/trending",
                params: &params,
                error_label: ERROR_LOADING,
                paginate: true,
            },
            now,
        ),
    );
    document(config, &PageMeta::trending(config), &body)
}

/// Search page; `feed` is ignored when the query is blank.
pub fn search(config: &Config, query: &str, feed: &FeedResult, page: u32, now: DateTime<Utc>) -> String {
    let query = query.trim();
    let badge = visitor_badge(config, "/search");

    let body = if query.is_empty() {
        format!(
            "{}<div class=\"empty\"><h2>Start searching</h2>\
             <p class=\"muted\">Use the search bar above to find articles by tag or topic.</p></div>",
            page_header("Search Articles", "Find programming articles by tag", &badge),
        )
    } else {
        let params = vec![("q".to_string(), query.to_string())];
        let count = if feed.articles.is_empty() {
            String::new()
        } else {
            let n = feed.articles.len();
            format!(" <span class=\"muted\">({n} result{})</span>", if n == 1 { "" } else { "s" })
        };
        format!(
            "{header}<h2>Search results for &quot;{q}&quot;{count}</h2>{grid}",
            header = page_header("Search Results", &format!("Results for \"{query}\""), &badge),
            q = escape_html(query),
            grid = articles_grid(
                feed,
                GridContext {
                    page,
                    base_url: "/search",
                    params: &params,
                    error_label: ERROR_SEARCHING,
                    paginate: true,
                },
                now,
            ),
        )
    };
    document(config, &PageMeta::search(config, query), &body)
}

/// Popular-authors grid.
pub fn authors(config: &Config, authors: &[AuthorStats]) -> String {
    let grid = if authors.is_empty() {
        api_status_notice("No authors could be loaded right now. Please try again later.")
    } else {
        let cards: String = authors.iter().map(author_card).collect();
        format!("<div class=\"grid\">{cards}</div>")
    };
    let body = format!(
        "{}{grid}",
        page_header(
            "Popular Authors",
            "Writers with the most engaged articles right now",
            &visitor_badge(config, "/authors"),
        )
    );
    document(config, &PageMeta::authors(config), &body)
}

/// Author profile with their paginated articles.
pub fn author(config: &Config, username: &str, feed: &FeedResult, page: u32, now: DateTime<Utc>) -> String {
    let path = format!("/author/{username}");
    let params = page_params(page);
    let profile = feed.articles.first().map(|a| &a.user);

    let (avatar_html, name) = match profile {
        Some(user) => (avatar(user), user.display_name().to_string()),
        None => (String::new(), username.to_string()),
    };

    let header = format!(
        "<div class=\"page-header author-header\">{avatar_html}<h1>{name}</h1>\
         <p class=\"muted\">@{user}</p>\
         <a class=\"button\" href=\"https://dev.to/{encoded}\" target=\"_blank\" rel=\"noopener noreferrer\">View on Dev.to</a>{badge}</div>",
        name = escape_html(&name),
        user = escape_html(username),
        encoded = encode_component(username),
        badge = visitor_badge(config, &path),
    );

    let body = format!(
        "{header}<h2>Articles</h2>{}",
        articles_grid(
            feed,
            GridContext {
                page,
                base_url: &path,
                params: &params,
                error_label: ERROR_LOADING,
                paginate: true,
            },
            now,
        )
    );
    document(config, &PageMeta::author(config, username), &body)
}

/// Single article, or a notice when it could not be loaded.
pub fn article(
    config: &Config,
    username: &str,
    slug: &str,
    result: &ArticleResult,
    now: DateTime<Utc>,
) -> String {
    match &result.article {
        Some(article) => document(
            config,
            &PageMeta::article(config, article),
            &article_body(config, article, now),
        ),
        None => {
            let message = result
                .error
                .clone()
                .unwrap_or_else(|| "Article not found or failed to load".to_string());
            let retry = format!("/article/{username}/{slug}");
            let body = format!(
                "<a class=\"button\" href=\"/\">← Back to Articles</a>{}\
                 <div class=\"empty\"><a class=\"button\" href=\"{}\">Try Again</a> \
                 <a class=\"button\" href=\"/\">Back to Home</a></div>",
                api_status_notice(&message),
                escape_html(&retry),
            );
            document(config, &PageMeta::article_unavailable(config, username, slug), &body)
        }
    }
}

fn article_body(config: &Config, article: &Article, now: DateTime<Utc>) -> String {
    let cover = article
        .cover_image
        .as_ref()
        .map(|src| {
            format!(
                "<img class=\"cover\" src=\"{}\" alt=\"{}\">",
                escape_html(src),
                escape_html(&article.title)
            )
        })
        .unwrap_or_default();
    let tags: String = article
        .tag_list
        .iter()
        .map(|t| format!("<span class=\"tag\">#{}</span>", escape_html(t)))
        .collect();
    let description = if article.description.is_empty() {
        String::new()
    } else {
        format!("<p class=\"lead muted\">{}</p>", escape_html(&article.description))
    };
    let body_html = article.body_html.as_deref().unwrap_or_default();
    let contents = toc::render(&toc::extract(body_html));
    let author_href = escape_html(&format!("/author/{}", article.user.username));
    let upstream = escape_html(&article.url);

    format!(
        "<a class=\"button\" href=\"/\">← Back to Articles</a>\
         <article class=\"article\">{cover}<div>{tags}</div>\
         <h1>{title}</h1>{description}\
         <div class=\"card author-byline\"><a href=\"{author_href}\">{avatar}</a>\
         <div><a href=\"{author_href}\">{name}</a>\
         <div class=\"muted\"><time datetime=\"{published}\">{ago}</time> · {minutes} min read · ♥ {reactions} · 💬 {comments}</div></div>\
         <a class=\"button\" href=\"{upstream}\" target=\"_blank\" rel=\"noopener noreferrer\">View on Dev.to</a></div>\
         {contents}\
         <div class=\"article-body\">{body_html}</div>\
         <footer class=\"article-footer muted\"><span>♥ {reactions} reactions</span> · <span>💬 {comments} comments</span> \
         <a class=\"button\" href=\"{upstream}#comments\" target=\"_blank\" rel=\"noopener noreferrer\">Discuss on Dev.to</a></footer>\
         </article>{badge}",
        title = escape_html(&article.title),
        avatar = avatar(&article.user),
        name = escape_html(article.user.display_name()),
        published = article.published_at.to_rfc3339(),
        ago = time::time_ago(article.published_at, now),
        minutes = article.reading_time_minutes,
        reactions = article.public_reactions_count,
        comments = article.comments_count,
        badge = visitor_badge(config, &article.site_path()),
    )
}

/// 404 page.
pub fn not_found(config: &Config) -> String {
    let body = "<div class=\"empty\"><h1>404</h1><h2>Page Not Found</h2>\
                <p class=\"muted\">The page you are looking for doesn't exist or has been moved.</p>\
                <a class=\"button\" href=\"/\">Back to Home</a> \
                <a class=\"button\" href=\"/trending\">Trending Articles</a></div>";
    document(config, &PageMeta::not_found(config), body)
}

/// Generic failure page.
pub fn error(config: &Config, message: &str) -> String {
    let body = format!(
        "<div class=\"empty\"><h1>Something went wrong!</h1>{}\
         <a class=\"button\" href=\"/\">Try again</a></div>",
        api_status_notice(message)
    );
    document(config, &PageMeta::error(config), &body)
}
