// src/render/components.rs

//! Reusable page fragments.

use chrono::{DateTime, Utc};

use crate::models::{Article, AuthorStats, Config, User};
use crate::render::{pagination, time};
use crate::services::{FeedResult, total_pages_hint};
use crate::utils::escape_html;
use crate::utils::url::encode_component;

/// Tags shown on cards before the rest are summarized.
const CARD_TAGS: usize = 3;

/// Round avatar with an initial when there is no image.
pub fn avatar(user: &User) -> String {
    let image = if user.profile_image_90.is_empty() {
        &user.profile_image
    } else {
        &user.profile_image_90
    };
    if image.is_empty() {
        format!("<span class=\"avatar\">{}</span>", escape_html(&user.initial()))
    } else {
        format!(
            "<span class=\"avatar\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></span>",
            escape_html(image),
            escape_html(user.display_name())
        )
    }
}

fn tag_badges(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("<span class=\"tag\">#{}</span>", escape_html(t)))
        .collect()
}

/// Summary card for an article in a grid.
pub fn article_card(article: &Article, now: DateTime<Utc>) -> String {
    let href = escape_html(&article.site_path());
    let author_href = escape_html(&format!("/author/{}", article.user.username));
    let title = escape_html(&article.title);

    let cover = article
        .cover_image
        .as_ref()
        .map(|src| {
            format!(
                "<img class=\"cover\" src=\"{}\" alt=\"{title}\" loading=\"lazy\">",
                escape_html(src)
            )
        })
        .unwrap_or_default();
    let shown = CARD_TAGS.min(article.tag_list.len());

    format!(
        "<article class=\"card\">{cover}\
         <div>{tags}</div>\
         <a href=\"{href}\"><h3>{title}</h3></a>\
         <p class=\"muted\">{description}</p>\
         <div class=\"byline\"><a href=\"{author_href}\">{avatar}</a> \
         <a href=\"{author_href}\">{name}</a>\
         <div class=\"muted\"><time datetime=\"{published}\">{ago}</time> · {minutes} min read</div></div>\
         <div class=\"card-footer muted\"><span>♥ {reactions}</span> <span>💬 {comments}</span> \
         <a class=\"button\" href=\"{href}\">Read More</a> \
         <a href=\"{external}\" target=\"_blank\" rel=\"noopener noreferrer\" aria-label=\"Open on Dev.to\">↗</a></div>\
         </article>",
        tags = tag_badges(&article.tag_list[..shown]),
        description = escape_html(&article.description),
        avatar = avatar(&article.user),
        name = escape_html(article.user.display_name()),
        published = article.published_at.to_rfc3339(),
        ago = time::time_ago(article.published_at, now),
        minutes = article.reading_time_minutes,
        reactions = article.public_reactions_count,
        comments = article.comments_count,
        external = escape_html(&article.url),
    )
}

/// Warning box.
pub fn api_status_notice(message: &str) -> String {
    format!(
        "<div class=\"notice\" role=\"status\">{}</div>",
        escape_html(message)
    )
}

/// Call-to-action shown when a listing came back empty.
pub fn empty_state(message: &str, retry_href: &str) -> String {
    format!(
        "<div class=\"empty\"><p class=\"muted\">{}</p>\
         <a class=\"button\" href=\"{}\">Try Again</a></div>",
        escape_html(message),
        escape_html(retry_href)
    )
}

/// Where a grid lives, for pagination and retry links.
#[derive(Debug, Clone, Copy)]
pub struct GridContext<'a> {
    pub page: u32,
    pub base_url: &'a str,
    pub params: &'a [(String, String)],
    /// Prefix of the error notice, e.g. "Error loading articles"
    pub error_label: &'a str,
    pub paginate: bool,
}

/// Article grid with error notices, fallback banner and pagination.
pub fn articles_grid(feed: &FeedResult, ctx: GridContext<'_>, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    if let Some(error) = &feed.error {
        let mut message = format!("{}: {error}", ctx.error_label);
        if feed.using_fallback {
            message.push_str(". Showing sample articles below.");
        }
        out.push_str(&api_status_notice(&message));
    }
    if feed.using_fallback {
        out.push_str(&api_status_notice(
            "We're currently experiencing issues with the Dev.to API. Showing sample articles below.",
        ));
    }

    if !feed.articles.is_empty() {
        out.push_str("<div class=\"grid\">");
        for article in &feed.articles {
            out.push_str(&article_card(article, now));
        }
        out.push_str("</div>");
    }

    if ctx.paginate && !feed.using_fallback && !feed.articles.is_empty() {
        out.push_str(&pagination::render(
            ctx.page,
            total_pages_hint(ctx.page, feed.has_more),
            ctx.base_url,
            ctx.params,
        ));
    }

    if feed.articles.is_empty() && feed.error.is_none() {
        let retry = pagination::page_url(ctx.base_url, ctx.params, ctx.page);
        out.push_str(&empty_state("No articles found.", &retry));
    }
    out
}

/// visitorbadge.io counter for a page, if enabled.
pub fn visitor_badge(config: &Config, path: &str) -> String {
    if !config.site.visitor_badge {
        return String::new();
    }
    let encoded = encode_component(&config.site_url(path));
    format!(
        "<div class=\"visitor-badge\"><a href=\"https://visitorbadge.io/status?path={encoded}\" \
         target=\"_blank\" rel=\"noopener noreferrer\">\
         <img src=\"https://api.visitorbadge.io/api/combined?path={encoded}&amp;countColor=%23263759&amp;style=flat-square&amp;labelStyle=upper\" \
         alt=\"Visitor Badge\"></a></div>"
    )
}

/// Card on the popular-authors page.
pub fn author_card(stats: &AuthorStats) -> String {
    let user = &stats.user;
    let href = escape_html(&format!("/author/{}", user.username));
    let (tags, hidden) = stats.leading_tags(CARD_TAGS);
    let more = if hidden > 0 {
        format!("<span class=\"tag\">+{hidden}</span>")
    } else {
        String::new()
    };

    format!(
        "<article class=\"card author-card\">\
         <a href=\"{href}\">{avatar}</a>\
         <a href=\"{href}\"><h3>{name}</h3></a><p class=\"muted\">@{username}</p>\
         <p class=\"muted\">{articles} · ♥ {reactions} · 💬 {comments}</p>\
         <div>{tags}{more}</div>\
         <a class=\"button\" href=\"{href}\">View Articles</a>\
         </article>",
        avatar = avatar(user),
        name = escape_html(user.display_name()),
        username = escape_html(&user.username),
        articles = if stats.article_count == 1 {
            "1 article".to_string()
        } else {
            format!("{} articles", stats.article_count)
        },
        reactions = stats.total_reactions,
        comments = stats.total_comments,
        tags = tag_badges(tags),
    )
}
