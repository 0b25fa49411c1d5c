//! Blog list and detail views

use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::SiteConfig;
use crate::content::{Facet, MarkdownRenderer, Post, PostRepository};
use crate::error::Result;
use crate::helpers::{date_xml, format_date, parse_query, query_string, url_for};
use crate::listing::{
    paginate_and_filter, parse_page_number, related_posts, FacetCount, FacetFilter, PageInfo,
    PageWindow,
};

const ACTIVE_PAGE: &str = "blog";

/// Query parameters of the blog list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogQuery {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    /// Raw page value, validated when the listing is built
    pub page: Option<String>,
}

impl BlogQuery {
    /// Parse `category=..&tag=..&page=..`; category and tag may repeat
    pub fn from_query_string(raw: &str) -> Self {
        let mut query = Self::default();
        for (key, value) in parse_query(raw) {
            match key.as_str() {
                "category" => query.categories.push(value),
                "tag" => query.tags.push(value),
                "page" => query.page = Some(value),
                _ => {}
            }
        }
        query
    }

    pub fn filter(&self) -> FacetFilter {
        FacetFilter::new(self.categories.iter().cloned(), self.tags.iter().cloned())
    }

    pub fn page_number(&self) -> i64 {
        parse_page_number(self.page.as_deref())
    }
}

/// Name and slug of a facet attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetRef {
    pub name: String,
    pub slug: String,
}

/// A post as shown in lists
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub url: String,
    pub excerpt: String,
    pub author: String,
    pub featured_image: Option<String>,
    /// Display date in the configured format
    pub date: String,
    pub datetime: String,
    pub categories: Vec<FacetRef>,
    pub tags: Vec<FacetRef>,
}

impl PostSummary {
    fn build(post: &Post, categories: &[&Facet], tags: &[&Facet], config: &SiteConfig) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            url: post_url(config, &post.slug),
            excerpt: post.excerpt.clone(),
            author: post.author.clone(),
            featured_image: post.featured_image.clone(),
            date: format_date(&post.created, &config.date_format),
            datetime: date_xml(&post.created),
            categories: resolve(&post.categories, categories),
            tags: resolve(&post.tags, tags),
        }
    }
}

/// A numbered link in the pager
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub number: usize,
    pub url: String,
    pub current: bool,
}

/// The blog index: one page of filtered posts with sidebar facets
#[derive(Debug, Clone, Serialize)]
pub struct BlogListView {
    pub active_page: &'static str,
    pub posts: Vec<PostSummary>,
    pub page: PageInfo,
    pub window: PageWindow,
    pub page_links: Vec<PageLink>,
    pub previous_url: Option<String>,
    pub next_url: Option<String>,
    /// Every category with its published post count
    pub categories: Vec<FacetCount>,
    pub tags: Vec<FacetCount>,
    pub selected_categories: BTreeSet<String>,
    pub selected_tags: BTreeSet<String>,
    /// Selected slugs that name a known facet
    pub selected_category_facets: Vec<Facet>,
    pub selected_tag_facets: Vec<Facet>,
}

impl BlogListView {
    pub fn build<R>(repo: &R, config: &SiteConfig, query: &BlogQuery) -> Self
    where
        R: PostRepository + ?Sized,
    {
        let filter = query.filter();
        let published = repo.published_posts();
        let listing = paginate_and_filter(
            published.iter().copied(),
            &filter,
            config.per_page,
            query.page_number(),
            config.page_window,
        );

        let categories = repo.categories();
        let tags = repo.tags();
        let posts = listing
            .items
            .iter()
            .map(|post| PostSummary::build(post, &categories, &tags, config))
            .collect();

        let link = |number: usize| list_url(config, &filter, number);
        let page_links = listing
            .window
            .pages
            .iter()
            .map(|&number| PageLink {
                number,
                url: link(number),
                current: number == listing.page.number,
            })
            .collect();

        Self {
            active_page: ACTIVE_PAGE,
            posts,
            previous_url: listing.page.previous_page_number.map(link),
            next_url: listing.page.next_page_number.map(link),
            page: listing.page,
            window: listing.window,
            page_links,
            categories: repo.category_counts(),
            tags: repo.tag_counts(),
            selected_category_facets: selected(&filter.categories, &categories),
            selected_tag_facets: selected(&filter.tags, &tags),
            selected_categories: filter.categories,
            selected_tags: filter.tags,
        }
    }
}

/// A post with its rendered body
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub content_html: String,
    pub updated: Option<String>,
}

/// A single post page
#[derive(Debug, Clone, Serialize)]
pub struct BlogDetailView {
    pub active_page: &'static str,
    pub post: PostDetail,
    /// Other posts sharing a category
    pub related: Vec<PostSummary>,
}

impl BlogDetailView {
    /// Fails with `NotFound` unless a published post has this slug
    pub fn build<R>(
        repo: &R,
        renderer: &MarkdownRenderer,
        config: &SiteConfig,
        slug: &str,
    ) -> Result<Self>
    where
        R: PostRepository + ?Sized,
    {
        let post = repo.post_by_slug(slug)?;
        let categories = repo.categories();
        let tags = repo.tags();

        let related = related_posts(post, &repo.published_posts(), config.related_posts)
            .into_iter()
            .map(|other| PostSummary::build(other, &categories, &tags, config))
            .collect();

        Ok(Self {
            active_page: ACTIVE_PAGE,
            post: PostDetail {
                summary: PostSummary::build(post, &categories, &tags, config),
                content_html: renderer.render(&post.content),
                updated: post.updated.as_ref().map(date_xml),
            },
            related,
        })
    }
}

fn post_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("{}/{}", config.blog_dir, slug))
}

/// Blog list URL for `page`, keeping the current selection
fn list_url(config: &SiteConfig, filter: &FacetFilter, page: usize) -> String {
    let page = page.to_string();
    let pairs = filter
        .categories
        .iter()
        .map(|c| ("category", c.as_str()))
        .chain(filter.tags.iter().map(|t| ("tag", t.as_str())))
        .chain(std::iter::once(("page", page.as_str())));
    format!("{}?{}", url_for(config, &config.blog_dir), query_string(pairs))
}

/// Unknown slugs fall back to the slug as the name
fn resolve(slugs: &[String], facets: &[&Facet]) -> Vec<FacetRef> {
    slugs
        .iter()
        .map(|slug| {
            let name = facets
                .iter()
                .find(|f| &f.slug == slug)
                .map(|f| f.name.clone())
                .unwrap_or_else(|| slug.clone());
            FacetRef {
                name,
                slug: slug.clone(),
            }
        })
        .collect()
}

fn selected(slugs: &BTreeSet<String>, facets: &[&Facet]) -> Vec<Facet> {
    facets
        .iter()
        .filter(|f| slugs.contains(&f.slug))
        .map(|f| (*f).clone())
        .collect()
}
