//! Serializable view models handed to the page renderer

mod blog;
mod projects;
mod site;

pub use blog::{BlogDetailView, BlogListView, BlogQuery, FacetRef, PageLink, PostDetail, PostSummary};
pub use projects::{ProjectDetailView, ProjectListView, ProjectSummary};
pub use site::{SiteContext, WithSite};
