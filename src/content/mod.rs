//! Content module - posts, projects, taxonomy and content processing

mod frontmatter;
pub mod loader;
mod markdown;
pub mod math;
mod post;
mod project;
pub mod slug;
mod store;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::{Facet, FacetKind, Post};
pub use project::{sort_projects, Project};
pub use slug::{derive_slug, unique_slug};
pub use store::{ContentStore, PostRepository, ProjectRepository};
