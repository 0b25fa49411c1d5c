//! List site content

use anyhow::Result;

use crate::content::{ContentStore, PostRepository, ProjectRepository};
use crate::listing::FacetCount;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let store = folio.load_store()?;
    for line in render(&store, &folio.config.date_format, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// Output lines for one content type
pub fn render(store: &ContentStore, date_format: &str, content_type: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    match content_type {
        "post" | "posts" => {
            let posts = store.all_posts();
            lines.push(format!("Posts ({}):", posts.len()));
            for post in posts {
                let state = if post.published { "" } else { " (draft)" };
                lines.push(format!(
                    "  {} - {}{} [{}]",
                    post.created.format(date_format),
                    post.title,
                    state,
                    post.source
                ));
            }
        }
        "category" | "categories" => {
            facet_lines(&mut lines, "Categories", &store.category_counts());
        }
        "tag" | "tags" => {
            facet_lines(&mut lines, "Tags", &store.tag_counts());
        }
        "project" | "projects" => {
            let projects = store.projects();
            lines.push(format!("Projects ({}):", projects.len()));
            for project in projects {
                lines.push(format!("  #{} {} [{}]", project.id, project.title, project.source));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category, tag, project",
                content_type
            );
        }
    }
    Ok(lines)
}

fn facet_lines(lines: &mut Vec<String>, heading: &str, counts: &[FacetCount]) {
    lines.push(format!("{} ({}):", heading, counts.len()));
    for facet in counts {
        lines.push(format!("  {} ({})", facet.name, facet.post_count));
    }
}
