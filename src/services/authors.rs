//! Popular-authors aggregation over a few article listings.

use std::collections::HashMap;

use crate::models::{Article, AuthorStats};
use crate::services::ContentSource;

/// Authors shown on the popular-authors page.
pub const POPULAR_AUTHORS_LIMIT: usize = 24;

/// Articles requested per listing when gathering authors.
const LISTING_SIZE: u32 = 30;

/// Fetch several listings in parallel and rank their authors by engagement.
///
/// A listing that fails contributes nothing.
pub async fn popular_authors(source: &dyn ContentSource, limit: usize) -> Vec<AuthorStats> {
    let (latest_1, latest_2, top_1) = futures::join!(
        source.latest_articles(1, LISTING_SIZE),
        source.latest_articles(2, LISTING_SIZE),
        source.top_articles(1, LISTING_SIZE),
    );

    let mut articles = Vec::new();
    for (name, result) in [("latest p1", latest_1), ("latest p2", latest_2), ("top p1", top_1)] {
        match result {
            Ok(list) => articles.extend(list),
            Err(e) => log::warn!("Popular authors: {name} failed: {e}"),
        }
    }

    rank_authors(&articles, limit)
}

/// Group articles by author and sort by engagement, highest first.
///
/// Ties keep the order in which authors were first seen.
pub fn rank_authors(articles: &[Article], limit: usize) -> Vec<AuthorStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut authors: Vec<AuthorStats> = Vec::new();

    for article in articles {
        let slot = *index
            .entry(article.user.username.as_str())
            .or_insert_with(|| {
                authors.push(AuthorStats::new(article.user.clone()));
                authors.len() - 1
            });
        authors[slot].record(article);
    }

    authors.sort_by(|a, b| b.engagement().cmp(&a.engagement()));
    authors.truncate(limit);
    authors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_article;
    use crate::services::feeds::tests::StubSource;

    fn by(username: &str, id: u64, reactions: u64, comments: u64) -> Article {
        let mut article = sample_article(id, username, &format!("p{id}"));
        article.public_reactions_count = reactions;
        article.comments_count = comments;
        article
    }

    #[test]
    fn ranks_by_reactions_plus_comments() {
        let articles = vec![
            by("low", 1, 1, 0),
            by("high", 2, 50, 5),
            by("mid", 3, 10, 10),
            by("low", 4, 2, 0),
        ];
        let ranked = rank_authors(&articles, 24);
        let names: Vec<_> = ranked.iter().map(|a| a.user.username.as_str()).collect();
        assert_eq!(names, ["high", "mid", "low"]);
        assert_eq!(ranked[2].article_count, 2);
        assert_eq!(ranked[2].total_reactions, 3);
    }

    #[test]
    fn ties_keep_first_seen_order_and_limit_applies() {
        let articles = vec![by("b", 1, 5, 0), by("a", 2, 5, 0), by("c", 3, 5, 0)];
        let ranked = rank_authors(&articles, 2);
        let names: Vec<_> = ranked.iter().map(|a| a.user.username.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[tokio::test]
    async fn failed_listing_contributes_nothing() {
        let source = StubSource {
            latest: Some(vec![by("jane", 1, 3, 1)]),
            top: None,
            ..StubSource::default()
        };
        let ranked = popular_authors(&source, POPULAR_AUTHORS_LIMIT).await;
        // latest is served for both pages, so jane is counted twice
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].article_count, 2);

        let calls = source.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert!(calls.contains(&"top:1".to_string()));
    }
}
