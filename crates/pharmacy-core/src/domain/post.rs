use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image shown when a post has no featured image or it fails to load.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Read time shown for posts saved before read time was recorded.
pub const DEFAULT_READ_TIME: &str = "5 min read";

/// Lifecycle status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            other => Err(format!("unknown post status: {other}")),
        }
    }
}

/// Search engine and social overrides for a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub og_image: Option<String>,
    pub no_index: bool,
}

/// Post entity - a blog article managed from the admin area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: Option<Uuid>,
    pub author_name: String,
    pub category: String,
    pub featured_image: Option<String>,
    pub read_time: Option<String>,
    pub status: PostStatus,
    pub seo: SeoOverrides,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Whether the post is visible on the public blog at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.status == PostStatus::Published && self.published_at.is_some_and(|at| at <= now)
    }
}

/// Public projection of a post used by the blog pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub author: String,
    pub category: String,
    pub image: String,
    pub read_time: String,
}

impl From<Post> for BlogPost {
    fn from(post: Post) -> Self {
        Self {
            slug: post.slug,
            title: post.title,
            excerpt: post.excerpt,
            content: post.content,
            date: post.published_at.unwrap_or(post.created_at),
            author: post.author_name,
            category: post.category,
            image: post
                .featured_image
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            read_time: post
                .read_time
                .unwrap_or_else(|| DEFAULT_READ_TIME.to_string()),
        }
    }
}
