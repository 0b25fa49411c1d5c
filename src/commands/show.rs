//! Print view models as JSON

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::content::ContentStore;
use crate::helpers::{full_url_for, url_for};
use crate::views::{
    BlogDetailView, BlogListView, BlogQuery, ProjectDetailView, ProjectListView, SiteContext,
    WithSite,
};
use crate::Folio;

/// Which view to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowTarget {
    Blog(BlogQuery),
    Post(String),
    Projects,
    Project(u64),
}

pub fn run(folio: &Folio, target: &ShowTarget) -> Result<()> {
    let store = folio.load_store()?;
    let value = render(folio, &store, target)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Build the view for `target` together with its site context
pub fn render(folio: &Folio, store: &ContentStore, target: &ShowTarget) -> Result<Value> {
    let config = &folio.config;
    let renderer = folio.renderer();

    match target {
        ShowTarget::Blog(query) => {
            let view = BlogListView::build(store, config, query);
            with_site(folio, &config.blog_dir, view)
        }
        ShowTarget::Post(slug) => {
            let view = BlogDetailView::build(store, &renderer, config, slug)?;
            with_site(folio, &format!("{}/{}", config.blog_dir, slug), view)
        }
        ShowTarget::Projects => {
            let view = ProjectListView::build(store, config);
            with_site(folio, &config.project_dir, view)
        }
        ShowTarget::Project(id) => {
            let view = ProjectDetailView::build(store, &renderer, config, *id)?;
            with_site(folio, &format!("{}/{}", config.project_dir, id), view)
        }
    }
}

fn with_site<V: Serialize>(folio: &Folio, path: &str, view: V) -> Result<Value> {
    let path = url_for(&folio.config, path);
    let site = SiteContext::new(&folio.config, &path, &full_url_for(&folio.config, &path));
    Ok(serde_json::to_value(WithSite::new(site, view))?)
}
