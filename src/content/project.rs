//! Portfolio project model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A portfolio project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub title: String,
    pub slug: String,
    /// One-line summary for the project list
    pub summary: String,
    /// Raw markdown description, may contain math
    pub description: String,
    /// Live site or demo
    pub url: Option<String>,
    pub repository: Option<String>,
    pub technologies: Vec<String>,
    pub featured_image: Option<String>,
    /// Position in the list, lower first
    pub order: i64,
    pub created: DateTime<Local>,
    pub source: String,
}

impl Project {
    pub fn new(id: u64, title: String, slug: String, created: DateTime<Local>) -> Self {
        Self {
            id,
            title,
            slug,
            summary: String::new(),
            description: String::new(),
            url: None,
            repository: None,
            technologies: Vec::new(),
            featured_image: None,
            order: 0,
            created,
            source: String::new(),
        }
    }
}

/// Display order: ascending `order`, newest first among equals
pub fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| b.created.cmp(&a.created)));
}
