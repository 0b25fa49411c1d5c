//! Post, category and tag models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,

    /// Post title
    pub title: String,

    /// Slug (URL-friendly, unique)
    pub slug: String,

    /// Short description for listings
    pub excerpt: String,

    /// Raw markdown content, may contain math
    pub content: String,

    pub author: String,

    pub featured_image: Option<String>,

    /// Creation date
    pub created: DateTime<Local>,

    /// Last updated date
    pub updated: Option<DateTime<Local>>,

    /// Only published posts are visible in listings and detail views
    pub published: bool,

    /// Category slugs
    pub categories: Vec<String>,

    /// Tag slugs
    pub tags: Vec<String>,

    /// Source file path (relative)
    pub source: String,
}

impl Post {
    /// Create an unpublished post. The author is resolved by the caller.
    pub fn new(id: u64, title: String, slug: String, author: String, created: DateTime<Local>) -> Self {
        Self {
            id,
            title,
            slug,
            excerpt: String::new(),
            content: String::new(),
            author,
            featured_image: None,
            created,
            updated: None,
            published: false,
            categories: Vec::new(),
            tags: Vec::new(),
            source: String::new(),
        }
    }

    pub fn in_category(&self, slug: &str) -> bool {
        self.categories.iter().any(|c| c == slug)
    }

    pub fn has_tag(&self, slug: &str) -> bool {
        self.tags.iter().any(|t| t == slug)
    }

    /// Whether both posts share at least one category
    pub fn shares_category_with(&self, other: &Post) -> bool {
        self.categories.iter().any(|c| other.in_category(c))
    }
}

/// Which taxonomy a facet belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    Category,
    Tag,
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetKind::Category => write!(f, "category"),
            FacetKind::Tag => write!(f, "tag"),
        }
    }
}

/// A category or a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub id: u64,
    pub kind: FacetKind,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Facet {
    pub fn new(id: u64, kind: FacetKind, name: &str, slug: String) -> Self {
        Self {
            id,
            kind,
            name: name.to_string(),
            slug,
            description: None,
        }
    }
}
