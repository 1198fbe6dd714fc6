//! Article data structure as served by the content API.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::User;

/// An article from the content API.
///
/// List endpoints and the detail endpoint disagree on the wire shape of the
/// tag fields: lists send `tag_list` as an array and `tags` as a comma-joined
/// string, the detail endpoint swaps them. Both forms deserialize to the same
/// representation here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: u64,

    pub title: String,

    #[serde(default, deserialize_with = "string_or_null")]
    pub description: String,

    #[serde(default, deserialize_with = "string_or_null")]
    pub readable_publish_date: String,

    pub slug: String,

    #[serde(default, deserialize_with = "string_or_null")]
    pub path: String,

    /// Canonical article URL on the upstream site
    #[serde(default, deserialize_with = "string_or_null")]
    pub url: String,

    #[serde(default)]
    pub comments_count: u64,

    #[serde(default)]
    pub public_reactions_count: u64,

    #[serde(default)]
    pub positive_reactions_count: u64,

    #[serde(default)]
    pub cover_image: Option<String>,

    #[serde(default, deserialize_with = "string_or_null")]
    pub social_image: String,

    #[serde(default, deserialize_with = "string_or_null")]
    pub canonical_url: String,

    pub published_at: DateTime<Utc>,

    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub reading_time_minutes: u32,

    /// Always a list, whatever the wire form
    #[serde(default, deserialize_with = "tag_list")]
    pub tag_list: Vec<String>,

    /// Always the comma-joined form
    #[serde(default, deserialize_with = "tags_joined")]
    pub tags: String,

    pub user: User,

    #[serde(default)]
    pub body_html: Option<String>,

    #[serde(default)]
    pub body_markdown: Option<String>,
}

impl Article {
    /// Path of this article on the mirror.
    pub fn site_path(&self) -> String {
        format!("/article/{}/{}", self.user.username, self.slug)
    }

    /// Whether the article was published strictly after `now - days`.
    pub fn is_recent(&self, now: DateTime<Utc>, days: i64) -> bool {
        self.published_at > now - Duration::days(days)
    }

    /// Last modification time, falling back to publication.
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.edited_at.unwrap_or(self.published_at)
    }
}

/// Wire forms accepted for tag fields.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagField {
    List(Vec<String>),
    Joined(String),
}

impl TagField {
    fn into_list(self) -> Vec<String> {
        match self {
            TagField::List(tags) => tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            TagField::Joined(joined) => split_tags(&joined),
        }
    }
}

/// Split a comma-separated tag string, trimming each entry.
pub fn split_tags(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn tag_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<TagField>::deserialize(deserializer)?;
    Ok(field.map(TagField::into_list).unwrap_or_default())
}

fn tags_joined<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<TagField>::deserialize(deserializer)?;
    Ok(field
        .map(|f| f.into_list().join(", "))
        .unwrap_or_default())
}

pub(crate) fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
