//! Faceted listing: filter, paginate, page window and facet counts

mod facets;
mod filter;
mod paginator;
mod window;

pub use facets::{aggregate, FacetCount};
pub use filter::{FacetFilter, Faceted};
pub use paginator::{parse_page_number, Page, PageInfo, Paginator};
pub use window::PageWindow;

use crate::content::Post;

/// Number of page links shown by default
pub const DEFAULT_WINDOW: usize = 5;

/// One page of a filtered collection with its pager data
#[derive(Debug, Clone)]
pub struct Listing<'a, T> {
    pub items: Vec<&'a T>,
    pub page: PageInfo,
    pub window: PageWindow,
}

/// Filter `collection`, cut out the requested page and compute its window.
///
/// `requested_page` is clamped to the nearest valid page, so asking past
/// the end yields the last page and anything below 1 yields the first.
pub fn paginate_and_filter<'a, T, I>(
    collection: I,
    filter: &FacetFilter,
    page_size: usize,
    requested_page: i64,
    max_visible: usize,
) -> Listing<'a, T>
where
    T: Faceted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let filtered = filter.apply(collection);
    let paginator = Paginator::new(&filtered, page_size);
    let page = paginator.page(requested_page);
    let window = PageWindow::compute(page.info.num_pages, page.info.number, max_visible);

    tracing::debug!(
        matched = filtered.len(),
        page = page.info.number,
        pages = page.info.num_pages,
        "paginated listing"
    );

    Listing {
        items: page.items.to_vec(),
        page: page.info,
        window,
    }
}

/// Published posts sharing a category with `post`, newest first, at most `limit`.
///
/// `published` must already be ordered newest first.
pub fn related_posts<'a>(post: &Post, published: &[&'a Post], limit: usize) -> Vec<&'a Post> {
    published
        .iter()
        .copied()
        .filter(|other| other.published && other.id != post.id && post.shares_category_with(other))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    fn post(id: u64, categories: &[&str], tags: &[&str]) -> Post {
        let mut post = Post::new(
            id,
            format!("Post {}", id),
            format!("post-{}", id),
            "Admin".to_string(),
            Local::now() - Duration::hours(id as i64),
        );
        post.published = true;
        post.categories = categories.iter().map(|s| s.to_string()).collect();
        post.tags = tags.iter().map(|s| s.to_string()).collect();
        post
    }

    fn ids(posts: &[&Post]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_seventeen_items_five_pages() {
        let posts: Vec<Post> = (1..=17).map(|i| post(i, &[], &[])).collect();
        let listing = paginate_and_filter(&posts, &FacetFilter::default(), 4, 3, DEFAULT_WINDOW);
        assert_eq!(listing.page.num_pages, 5);
        assert_eq!(listing.window.pages, vec![1, 2, 3, 4, 5]);
        assert_eq!(ids(&listing.items), vec![9, 10, 11, 12]);
    }

    #[test]
    fn test_window_clamped_at_end() {
        let posts: Vec<Post> = (1..=40).map(|i| post(i, &[], &[])).collect();
        let listing = paginate_and_filter(&posts, &FacetFilter::default(), 4, 8, DEFAULT_WINDOW);
        assert_eq!(listing.page.num_pages, 10);
        assert_eq!(listing.window.pages, vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_filter_union_then_paginate() {
        let posts = vec![
            post(1, &["a"], &[]),
            post(2, &[], &["b"]),
            post(3, &["a"], &["b"]),
            post(4, &["c"], &["c"]),
        ];
        let filter = FacetFilter::new(["a"], ["b"]);
        let listing = paginate_and_filter(&posts, &filter, 4, 1, DEFAULT_WINDOW);
        assert_eq!(ids(&listing.items), vec![1, 2, 3]);
        assert_eq!(listing.page.count, 3);
    }

    #[test]
    fn test_out_of_range_page_goes_to_last() {
        let posts: Vec<Post> = (1..=9).map(|i| post(i, &[], &[])).collect();
        let listing = paginate_and_filter(&posts, &FacetFilter::default(), 4, 42, DEFAULT_WINDOW);
        assert_eq!(listing.page.number, 3);
        assert_eq!(ids(&listing.items), vec![9]);
        assert_eq!(listing.window.current, 3);
    }

    #[test]
    fn test_no_matches_single_empty_page() {
        let posts = vec![post(1, &["a"], &[])];
        let filter = FacetFilter::new(["missing"], Vec::<String>::new());
        let listing = paginate_and_filter(&posts, &filter, 4, 2, DEFAULT_WINDOW);
        assert!(listing.items.is_empty());
        assert_eq!(listing.page.number, 1);
        assert_eq!(listing.window.pages, vec![1]);
    }

    #[test]
    fn test_related_posts() {
        let posts = vec![
            post(1, &["rust"], &[]),
            post(2, &["rust", "web"], &[]),
            post(3, &["math"], &[]),
            post(4, &["web"], &[]),
            post(5, &["rust"], &[]),
            post(6, &["rust"], &[]),
        ];
        let published: Vec<&Post> = posts.iter().collect();
        let related = related_posts(&posts[1], &published, 3);
        assert_eq!(ids(&related), vec![1, 4, 5]);
        assert!(related_posts(&posts[2], &published, 3).is_empty());
    }
}
