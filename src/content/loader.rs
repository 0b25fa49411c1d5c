//! Content loader - loads posts, projects and taxonomy from the source directory

use anyhow::{Context, Result};
use chrono::Local;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::slug::slug_or_derive;
use super::{ContentStore, FrontMatter, MarkdownRenderer, Post, Project, ProjectRepository};
use crate::error::ContentError;
use crate::Folio;

/// Declared categories and tags (`_data/taxonomy.yml`)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Taxonomy {
    categories: Vec<TaxonomyEntry>,
    tags: Vec<TaxonomyEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TaxonomyEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl TaxonomyEntry {
    fn into_parts(self) -> (String, Option<String>) {
        match self {
            TaxonomyEntry::Name(name) => (name, None),
            TaxonomyEntry::Detailed { name, description } => (name, description),
        }
    }
}

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Load everything into a content store
    pub fn load(&self) -> Result<ContentStore> {
        let mut store = ContentStore::new();
        self.load_taxonomy(&mut store)?;
        self.load_posts(&mut store)?;
        self.load_projects(&mut store)?;

        tracing::info!(
            "Loaded {} posts ({} published) and {} projects",
            store.all_posts().len(),
            store.all_posts().iter().filter(|p| p.published).count(),
            store.projects().len()
        );
        Ok(store)
    }

    fn load_taxonomy(&self, store: &mut ContentStore) -> Result<()> {
        let path = self.folio.taxonomy_path();
        if !path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&path)?;
        let taxonomy: Taxonomy = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;

        for entry in taxonomy.categories {
            let (name, description) = entry.into_parts();
            store.add_category(&name, description);
        }
        for entry in taxonomy.tags {
            let (name, _) = entry.into_parts();
            store.add_tag(&name);
        }
        tracing::debug!("Loaded taxonomy from {:?}", path);
        Ok(())
    }

    /// Load all posts from source/_posts
    fn load_posts(&self, store: &mut ContentStore) -> Result<()> {
        for path in markdown_files(&self.folio.posts_dir()) {
            let post = match self.load_post(&path, store) {
                Ok(post) => post,
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                    continue;
                }
            };
            tracing::debug!("Loaded post: {}", post.slug);
            store.add_post(post)?;
        }
        Ok(())
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path, store: &mut ContentStore) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content).map_err(|e| ContentError::FrontMatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let title = fm.title.clone().unwrap_or_else(|| file_stem(path));
        let slug = slug_or_derive(fm.slug.as_deref(), &title);
        let created = fm
            .parse_date()
            .or_else(|| file_modified(path))
            .unwrap_or_else(Local::now);

        let author = self.folio.config.resolve_author(fm.author.as_deref());

        let (more_excerpt, full) = MarkdownRenderer::split_excerpt(body);
        let excerpt = fm
            .excerpt
            .clone()
            .or(more_excerpt)
            .unwrap_or_default();

        let mut post = Post::new(store.next_post_id(), title, slug, author, created);
        post.excerpt = excerpt.trim().to_string();
        post.content = full;
        post.featured_image = fm.featured_image.clone();
        post.updated = fm.parse_updated();
        post.published = fm.published;
        post.categories = fm.categories.iter().map(|c| store.add_category(c, None)).collect();
        post.tags = fm.tags.iter().map(|t| store.add_tag(t)).collect();
        post.source = self.relative_source(path);

        Ok(post)
    }

    /// Load all projects from source/_projects
    fn load_projects(&self, store: &mut ContentStore) -> Result<()> {
        for path in markdown_files(&self.folio.projects_dir()) {
            match self.load_project(&path, store.next_project_id()) {
                Ok(project) => {
                    tracing::debug!("Loaded project: {}", project.slug);
                    store.add_project(project);
                }
                Err(e) => {
                    tracing::warn!("Failed to load project {:?}: {}", path, e);
                }
            }
        }
        Ok(())
    }

    fn load_project(&self, path: &Path, id: u64) -> Result<Project> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content).map_err(|e| ContentError::FrontMatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let title = fm.title.clone().unwrap_or_else(|| file_stem(path));
        let slug = slug_or_derive(fm.slug.as_deref(), &title);
        let created = fm
            .parse_date()
            .or_else(|| file_modified(path))
            .unwrap_or_else(Local::now);

        let mut project = Project::new(id, title, slug, created);
        project.summary = fm.summary.unwrap_or_default();
        project.description = body.trim().to_string();
        project.url = fm.url;
        project.repository = fm.repository;
        project.technologies = fm.technologies;
        project.featured_image = fm.featured_image;
        project.order = fm.order.unwrap_or(0);
        project.source = self.relative_source(path);

        Ok(project)
    }

    fn relative_source(&self, path: &Path) -> String {
        path.strip_prefix(&self.folio.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}

/// Markdown files under `dir`, in path order
fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_markdown_file(p))
        .collect()
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string()
}

fn file_modified(path: &Path) -> Option<chrono::DateTime<Local>> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(chrono::DateTime::<Local>::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostRepository;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site() -> (TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "_config.yml", "title: Test\nfull_name: Ada Lovelace\n");
        write(
            dir.path(),
            "source/_data/taxonomy.yml",
            "categories:\n  - name: Machine Learning\n    description: Models\n  - Empty\ntags:\n  - Python\n",
        );
        write(
            dir.path(),
            "source/_posts/first.md",
            "---\ntitle: First Post\ndate: 2024-01-01\npublished: true\ncategories: Machine Learning\ntags: [Python, Rust]\n---\nIntro $x$.\n<!-- more -->\nRest.\n",
        );
        write(
            dir.path(),
            "source/_posts/second.md",
            "---\ntitle: Second\nslug: custom-slug\nauthor: Grace\nexcerpt: Short.\ndate: 2024-02-01\npublished: true\n---\nBody.\n",
        );
        write(
            dir.path(),
            "source/_posts/draft.md",
            "---\ntitle: Draft\ndate: 2024-03-01\n---\nNot yet.\n",
        );
        write(dir.path(), "source/_posts/broken.md", "---\ntitle: [oops\n---\n");
        write(
            dir.path(),
            "source/_projects/folio.md",
            "---\ntitle: Folio\nsummary: This site\ntechnologies: [Rust]\norder: 1\n---\nA *site*.\n",
        );
        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    #[test]
    fn test_load_site() {
        let (_dir, folio) = site();
        let store = ContentLoader::new(&folio).load().unwrap();

        assert_eq!(store.all_posts().len(), 3);
        let published: Vec<&str> = store.published_posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(published, vec!["custom-slug", "first-post"]);

        let first = store.post_by_slug("first-post").unwrap();
        assert_eq!(first.author, "Ada Lovelace");
        assert_eq!(first.excerpt, "Intro $x$.");
        assert!(first.content.contains("Rest."));
        assert!(!first.content.contains("<!-- more -->"));
        assert_eq!(first.categories, vec!["machine-learning"]);
        assert_eq!(first.tags, vec!["python", "rust"]);
        assert_eq!(first.source, "_posts/first.md");

        let second = store.post_by_slug("custom-slug").unwrap();
        assert_eq!(second.author, "Grace");
        assert_eq!(second.excerpt, "Short.");
    }

    #[test]
    fn test_taxonomy_and_counts() {
        let (_dir, folio) = site();
        let store = ContentLoader::new(&folio).load().unwrap();

        let categories = store.category_counts();
        assert_eq!(categories[0].slug, "machine-learning");
        assert_eq!(categories[0].post_count, 1);
        assert_eq!(categories[0].description.as_deref(), Some("Models"));
        assert!(categories.iter().any(|c| c.slug == "empty" && c.post_count == 0));

        let tags: Vec<&str> = PostRepository::tags(&store).iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(tags, vec!["python", "rust"]);
    }

    #[test]
    fn test_load_projects() {
        let (_dir, folio) = site();
        let store = ContentLoader::new(&folio).load().unwrap();
        let projects = store.projects();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].slug, "folio");
        assert_eq!(projects[0].summary, "This site");
        assert_eq!(projects[0].description, "A *site*.");
    }

    #[test]
    fn test_duplicate_slug_is_error() {
        let (dir, folio) = site();
        write(
            dir.path(),
            "source/_posts/zzz.md",
            "---\ntitle: First Post\npublished: true\n---\nDupe.\n",
        );
        assert!(ContentLoader::new(&folio).load().is_err());
    }

    #[test]
    fn test_unsluggable_title_gets_fallback_slug() {
        let (dir, folio) = site();
        write(
            dir.path(),
            "source/_posts/bang.md",
            "---\ntitle: \"!!!\"\ndate: 2024-04-01\npublished: true\n---\nLoud.\n",
        );
        let store = ContentLoader::new(&folio).load().unwrap();
        let post = store.post_by_slug("post").unwrap();
        assert_eq!(post.title, "!!!");
    }

    #[test]
    fn test_missing_source_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let store = ContentLoader::new(&folio).load().unwrap();
        assert!(store.all_posts().is_empty());
        assert!(store.projects().is_empty());
    }
}
