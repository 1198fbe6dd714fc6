//! Article author as embedded in API responses.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use super::article::string_or_null;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct User {
    /// Display name
    #[serde(default, deserialize_with = "string_or_null")]
    pub name: String,

    /// Unique handle, used in every author URL
    pub username: String,

    #[serde(default)]
    pub twitter_username: Option<String>,

    #[serde(default)]
    pub github_username: Option<String>,

    #[serde(default)]
    pub website_url: Option<String>,

    #[serde(default, deserialize_with = "string_or_null")]
    pub profile_image: String,

    #[serde(default, deserialize_with = "string_or_null")]
    pub profile_image_90: String,
}

impl User {
    /// Avatar fallback: first grapheme of the display name, else of the handle.
    pub fn initial(&self) -> String {
        let source = if self.name.trim().is_empty() {
            &self.username
        } else {
            self.name.trim()
        };
        source
            .graphemes(true)
            .next()
            .map(|g| g.to_uppercase())
            .unwrap_or_default()
    }

    /// Name to show, falling back to the handle.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_uses_first_grapheme() {
        let user = User {
            name: "élodie".into(),
            username: "elo".into(),
            ..User::default()
        };
        assert_eq!(user.initial(), "É");

        let flag = User {
            name: "🇰🇷 Kim".into(),
            username: "kim".into(),
            ..User::default()
        };
        assert_eq!(flag.initial(), "🇰🇷");
    }

    #[test]
    fn blank_name_falls_back_to_username() {
        let user = User {
            name: "  ".into(),
            username: "ghost".into(),
            ..User::default()
        };
        assert_eq!(user.initial(), "G");
        assert_eq!(user.display_name(), "ghost");
    }
}
