//! Create a new post

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::PathBuf;

use crate::content::slug::slug_or_derive;
use crate::content::{unique_slug, FrontMatter};
use crate::Folio;

/// Options for a new post
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub author: Option<String>,
    pub slug: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub publish: bool,
}

/// Write a new post file and return its path.
///
/// The slug is derived from the title unless given, then made unique
/// against every existing post, drafts included.
pub fn create_post(folio: &Folio, post: &NewPost) -> Result<PathBuf> {
    let store = folio.load_store()?;

    let base = slug_or_derive(post.slug.as_deref(), &post.title);
    let slug = unique_slug(&base, |candidate| {
        store.slug_taken(candidate) || folio.posts_dir().join(format!("{}.md", candidate)).exists()
    });

    let front_matter = FrontMatter {
        title: Some(post.title.clone()),
        slug: Some(slug.clone()),
        date: Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        published: post.publish,
        author: Some(folio.config.resolve_author(post.author.as_deref())),
        categories: post.categories.clone(),
        tags: post.tags.clone(),
        ..Default::default()
    };

    let path = write_post_file(folio, &slug, &front_matter, "")?;
    tracing::info!("Created post {} at {:?}", slug, path);
    Ok(path)
}

/// Write `<posts_dir>/<slug>.md` with the given front-matter and body
pub(crate) fn write_post_file(
    folio: &Folio,
    slug: &str,
    front_matter: &FrontMatter,
    body: &str,
) -> Result<PathBuf> {
    let dir = folio.posts_dir();
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{}.md", slug));
    let content = format!("{}\n{}", front_matter.to_block()?, body);
    fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(path)
}
