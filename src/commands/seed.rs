//! Generate sample posts for trying out listings

use anyhow::Result;
use chrono::{Duration, Local};
use std::collections::HashSet;

use crate::commands::new::write_post_file;
use crate::content::{derive_slug, unique_slug, FrontMatter, PostRepository};
use crate::Folio;

const TITLES: &[&str] = &[
    "Getting Started with {}",
    "Advanced {} Techniques",
    "Introduction to {}",
    "{} Best Practices",
    "Building with {}",
    "Mastering {}",
    "{} for Beginners",
    "Deep Dive into {}",
    "Understanding {}",
    "{} Tips and Tricks",
    "The Complete {} Guide",
    "{} Fundamentals",
    "Modern {} Development",
    "{} Patterns",
    "Optimizing {}",
];

const TOPICS: &[&str] = &[
    "Rust", "Python", "Machine Learning", "Docker", "REST APIs", "PostgreSQL", "React",
    "CI/CD", "Cloud Computing", "Kubernetes", "Data Science", "Web Security", "TypeScript",
    "GraphQL", "Redis", "Linear Algebra", "Git", "Linux", "Compilers", "Probability",
    "WebAssembly", "Testing", "Microservices", "DevOps", "Serverless", "WebSockets",
    "Numerical Methods",
];

const EXCERPTS: &[&str] = &[
    "Learn the essentials and build your first application.",
    "Essential practices every developer should know.",
    "A comprehensive guide to understanding core concepts.",
    "How to effectively leverage this technology in your projects.",
    "Create robust solutions with industry best practices.",
    "Improve your skills with these proven techniques.",
    "Build modern applications with confidence.",
    "Automate and streamline your development workflow.",
    "Master the fundamentals and beyond.",
    "Explore analysis and implementation strategies.",
];

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod \
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

/// Create `count` published posts and return their slugs.
///
/// Titles, excerpts and facet assignments are picked by position, so the
/// same site and count always produce the same posts. Categories and tags
/// come from the declared taxonomy; with none declared posts get none.
pub fn run(folio: &Folio, count: usize) -> Result<Vec<String>> {
    let store = folio.load_store()?;
    let categories: Vec<String> = store.categories().iter().map(|c| c.name.clone()).collect();
    let tags: Vec<String> = store.tags().iter().map(|t| t.name.clone()).collect();

    let mut taken: HashSet<String> = store.all_posts().iter().map(|p| p.slug.clone()).collect();
    let existing = store.all_posts().len();
    let author = folio.config.default_author().to_string();
    let now = Local::now();
    let mut created = Vec::with_capacity(count);

    for i in 0..count {
        let n = existing + i;
        let topic = TOPICS[(n * 7 + n / TITLES.len()) % TOPICS.len()];
        let title = TITLES[n % TITLES.len()].replace("{}", topic);
        let excerpt = EXCERPTS[n % EXCERPTS.len()];

        let slug = unique_slug(&derive_slug(&title), |s| {
            taken.contains(s) || folio.posts_dir().join(format!("{}.md", s)).exists()
        });
        taken.insert(slug.clone());

        let front_matter = FrontMatter {
            title: Some(title.clone()),
            slug: Some(slug.clone()),
            date: Some(
                (now - Duration::hours(i as i64))
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
            ),
            published: true,
            excerpt: Some(excerpt.to_string()),
            author: Some(author.clone()),
            categories: pick(&categories, n, 1 + n % 3),
            tags: pick(&tags, n * 5, 2 + n % 4),
            ..Default::default()
        };
        let body = format!(
            "{}\n\n{}\n\nThe usual bound is $O(n \\log n)$ and the total is\n\n$$\\sum_{{k=1}}^{{n}} k = \\frac{{n(n+1)}}{{2}}$$\n",
            excerpt, LOREM
        );

        let path = write_post_file(folio, &slug, &front_matter, &body)?;
        tracing::debug!("Seeded {} at {:?}", slug, path);
        created.push(slug);
    }

    tracing::info!("Created {} posts", created.len());
    Ok(created)
}

/// `amount` distinct entries starting at `offset`, wrapping around
fn pick(pool: &[String], offset: usize, amount: usize) -> Vec<String> {
    if pool.is_empty() {
        return Vec::new();
    }
    (0..amount.min(pool.len()))
        .map(|k| pool[(offset + k) % pool.len()].clone())
        .collect()
}
