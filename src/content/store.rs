//! In-memory content store implementing the post repository

use indexmap::IndexMap;
use std::path::PathBuf;

use super::post::{Facet, FacetKind, Post};
use super::project::{sort_projects, Project};
use super::slug::derive_slug;
use crate::error::{ContentError, Result};
use crate::listing::{self, FacetCount, FacetFilter};

/// Read access to posts and their taxonomy
pub trait PostRepository {
    /// Published posts, newest first
    fn published_posts(&self) -> Vec<&Post>;

    /// A published post by slug
    fn post_by_slug(&self, slug: &str) -> Result<&Post>;

    fn categories(&self) -> Vec<&Facet>;

    fn tags(&self) -> Vec<&Facet>;

    /// Published posts matching any selected category or tag, newest first
    fn filter_posts(&self, filter: &FacetFilter) -> Vec<&Post> {
        filter.apply(self.published_posts())
    }

    /// Every category with its published post count
    fn category_counts(&self) -> Vec<FacetCount> {
        listing::aggregate(self.categories(), &self.published_posts())
    }

    /// Every tag with its published post count
    fn tag_counts(&self) -> Vec<FacetCount> {
        listing::aggregate(self.tags(), &self.published_posts())
    }
}

/// Read access to portfolio projects
pub trait ProjectRepository {
    /// Projects in display order
    fn projects(&self) -> &[Project];

    fn project(&self, id: u64) -> Result<&Project> {
        self.projects()
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ContentError::not_found("project", id.to_string()))
    }
}

/// All site content, held in memory
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    /// Every post, drafts included, newest first
    posts: Vec<Post>,
    categories: IndexMap<String, Facet>,
    tags: IndexMap<String, Facet>,
    projects: Vec<Project>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category by name, returning its slug. Known names are reused.
    pub fn add_category(&mut self, name: &str, description: Option<String>) -> String {
        let slug = register(&mut self.categories, FacetKind::Category, name);
        if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
            if let Some(facet) = self.categories.get_mut(&slug) {
                facet.description = Some(description);
            }
        }
        slug
    }

    /// Register a tag by name, returning its slug. Known names are reused.
    pub fn add_tag(&mut self, name: &str) -> String {
        register(&mut self.tags, FacetKind::Tag, name)
    }

    /// Add a post, keeping newest-first order. Slugs must be unique.
    pub fn add_post(&mut self, post: Post) -> Result<()> {
        if self.posts.iter().any(|p| p.slug == post.slug) {
            return Err(ContentError::DuplicateSlug {
                slug: post.slug,
                path: PathBuf::from(post.source),
            });
        }
        let pos = self
            .posts
            .iter()
            .position(|p| p.created < post.created)
            .unwrap_or(self.posts.len());
        self.posts.insert(pos, post);
        Ok(())
    }

    pub fn add_project(&mut self, project: Project) {
        self.projects.push(project);
        sort_projects(&mut self.projects);
    }

    /// Every post, drafts included, newest first
    pub fn all_posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn slug_taken(&self, slug: &str) -> bool {
        self.posts.iter().any(|p| p.slug == slug)
    }

    pub fn next_post_id(&self) -> u64 {
        self.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    pub fn next_project_id(&self) -> u64 {
        self.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    pub fn category(&self, slug: &str) -> Option<&Facet> {
        self.categories.get(slug)
    }

    pub fn tag(&self, slug: &str) -> Option<&Facet> {
        self.tags.get(slug)
    }
}

fn register(registry: &mut IndexMap<String, Facet>, kind: FacetKind, name: &str) -> String {
    let name = name.trim();
    if let Some(existing) = registry.values().find(|f| f.name == name) {
        return existing.slug.clone();
    }
    let slug = derive_slug(name);
    if !registry.contains_key(&slug) {
        let id = registry.len() as u64 + 1;
        registry.insert(slug.clone(), Facet::new(id, kind, name, slug.clone()));
    }
    slug
}

impl PostRepository for ContentStore {
    fn published_posts(&self) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.published).collect()
    }

    fn post_by_slug(&self, slug: &str) -> Result<&Post> {
        self.posts
            .iter()
            .find(|p| p.published && p.slug == slug)
            .ok_or_else(|| ContentError::not_found("post", slug))
    }

    fn categories(&self) -> Vec<&Facet> {
        self.categories.values().collect()
    }

    fn tags(&self) -> Vec<&Facet> {
        self.tags.values().collect()
    }
}

impl ProjectRepository for ContentStore {
    fn projects(&self) -> &[Project] {
        &self.projects
    }
}
