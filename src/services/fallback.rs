//! Sample articles shown when the first page of a listing cannot be fetched.

use chrono::{DateTime, Utc};

use crate::models::{Article, User, split_tags};

struct Sample {
    id: u64,
    title: &'static str,
    description: &'static str,
    slug: &'static str,
    name: &'static str,
    username: &'static str,
    website: &'static str,
    tags: &'static str,
    comments: u64,
    reactions: u64,
    reading_minutes: u32,
    body_html: &'static str,
    body_markdown: &'static str,
}

const SAMPLES: [Sample; 2] = [
    Sample {
        id: 1,
        title: "Getting Started with React Hooks",
        description: "Learn the basics of React Hooks and how to use them effectively in your applications.",
        slug: "getting-started-with-react-hooks",
        name: "John Developer",
        username: "johndev",
        website: "https://johndev.com",
        tags: "react, javascript, hooks, frontend",
        comments: 15,
        reactions: 42,
        reading_minutes: 5,
        body_html: "<h1>Getting Started with React Hooks</h1><p>React Hooks are a powerful feature...</p>",
        body_markdown: "# Getting Started with React Hooks\n\nReact Hooks are a powerful feature...",
    },
    Sample {
        id: 2,
        title: "Building Modern Web Applications with Next.js",
        description: "Explore the features of Next.js and learn how to build fast, scalable web applications.",
        slug: "building-modern-web-applications-with-nextjs",
        name: "Sarah Frontend",
        username: "sarahfe",
        website: "https://sarahfe.dev",
        tags: "nextjs, react, javascript, webdev",
        comments: 23,
        reactions: 67,
        reading_minutes: 8,
        body_html: "<h1>Building Modern Web Applications with Next.js</h1><p>Next.js is a powerful React framework...</p>",
        body_markdown: "# Building Modern Web Applications with Next.js\n\nNext.js is a powerful React framework...",
    },
];

/// The built-in sample articles, stamped as published at `now`.
pub fn fallback_articles(now: DateTime<Utc>) -> Vec<Article> {
    SAMPLES
        .iter()
        .map(|s| {
            let url = format!("https://dev.to/example/{}", s.slug);
            Article {
                id: s.id,
                title: s.title.to_string(),
                description: s.description.to_string(),
                readable_publish_date: now.format("%b %-d").to_string(),
                slug: s.slug.to_string(),
                path: format!("/example/{}", s.slug),
                url: url.clone(),
                comments_count: s.comments,
                public_reactions_count: s.reactions,
                positive_reactions_count: s.reactions,
                cover_image: None,
                social_image: "https://via.placeholder.com/1000x420".to_string(),
                canonical_url: url,
                published_at: now,
                edited_at: None,
                reading_time_minutes: s.reading_minutes,
                tag_list: split_tags(s.tags),
                tags: s.tags.to_string(),
                user: User {
                    name: s.name.to_string(),
                    username: s.username.to_string(),
                    twitter_username: Some(s.username.to_string()),
                    github_username: Some(s.username.to_string()),
                    website_url: Some(s.website.to_string()),
                    profile_image: "https://via.placeholder.com/150".to_string(),
                    profile_image_90: "https://via.placeholder.com/90".to_string(),
                },
                body_html: Some(s.body_html.to_string()),
                body_markdown: Some(s.body_markdown.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_complete_articles() {
        let samples = fallback_articles(Utc::now());
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].tag_list, vec!["react", "javascript", "hooks", "frontend"]);
        assert_eq!(samples[1].user.username, "sarahfe");
        assert!(samples.iter().all(|a| a.body_html.is_some()));
    }
}
