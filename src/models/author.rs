//! Per-author engagement aggregated from article listings.

use serde::Serialize;

use crate::models::{Article, User};

/// Aggregated activity of one author across fetched listings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthorStats {
    pub user: User,
    pub article_count: usize,
    pub total_reactions: u64,
    pub total_comments: u64,
    /// Unique tags in first-seen order
    pub tags: Vec<String>,
}

impl AuthorStats {
    pub fn new(user: User) -> Self {
        Self {
            user,
            article_count: 0,
            total_reactions: 0,
            total_comments: 0,
            tags: Vec::new(),
        }
    }

    /// Fold one article into the totals.
    pub fn record(&mut self, article: &Article) {
        self.article_count += 1;
        self.total_reactions += article.public_reactions_count;
        self.total_comments += article.comments_count;
        for tag in &article.tag_list {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
    }

    /// Ranking key: reactions plus comments.
    pub fn engagement(&self) -> u64 {
        self.total_reactions + self.total_comments
    }

    /// The first `n` tags and how many were left out.
    pub fn leading_tags(&self, n: usize) -> (&[String], usize) {
        let shown = n.min(self.tags.len());
        (&self.tags[..shown], self.tags.len() - shown)
    }
}
