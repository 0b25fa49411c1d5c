//! Category/tag filtering with OR semantics

use serde::Serialize;
use std::collections::BTreeSet;

use crate::content::Post;

/// Anything that carries category and tag slugs
pub trait Faceted {
    fn category_slugs(&self) -> &[String];
    fn tag_slugs(&self) -> &[String];

    fn is_published(&self) -> bool {
        true
    }
}

impl Faceted for Post {
    fn category_slugs(&self) -> &[String] {
        &self.categories
    }

    fn tag_slugs(&self) -> &[String] {
        &self.tags
    }

    fn is_published(&self) -> bool {
        self.published
    }
}

/// Selected category and tag slugs.
///
/// An empty filter matches everything. Otherwise an item matches when it is
/// in any selected category or carries any selected tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetFilter {
    pub categories: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

impl FacetFilter {
    pub fn new<C, T>(categories: C, tags: T) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            categories: clean(categories),
            tags: clean(tags),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.tags.is_empty()
    }

    pub fn matches<T: Faceted + ?Sized>(&self, item: &T) -> bool {
        if self.is_empty() {
            return true;
        }
        item.category_slugs()
            .iter()
            .any(|c| self.categories.contains(c))
            || item.tag_slugs().iter().any(|t| self.tags.contains(t))
    }

    /// Matching items in their input order. Each input item appears at
    /// most once in the output, however many facets it matches.
    pub fn apply<'a, T, I>(&self, items: I) -> Vec<&'a T>
    where
        T: Faceted + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        items.into_iter().filter(|item| self.matches(*item)).collect()
    }
}

fn clean<I>(slugs: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    slugs
        .into_iter()
        .map(Into::into)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        categories: Vec<String>,
        tags: Vec<String>,
    }

    impl Faceted for Item {
        fn category_slugs(&self) -> &[String] {
            &self.categories
        }

        fn tag_slugs(&self) -> &[String] {
            &self.tags
        }
    }

    fn item(name: &'static str, categories: &[&str], tags: &[&str]) -> Item {
        Item {
            name,
            categories: categories.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn names(items: &[&Item]) -> Vec<&'static str> {
        items.iter().map(|i| i.name).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let items = vec![item("a", &[], &[]), item("b", &["x"], &["y"])];
        let filter = FacetFilter::default();
        assert_eq!(names(&filter.apply(&items)), vec!["a", "b"]);
    }

    #[test]
    fn test_union_across_facets() {
        let items = vec![
            item("only-a", &["a"], &["a"]),
            item("only-b", &["b"], &["b"]),
            item("both", &["a", "b"], &["a", "b"]),
            item("only-c", &["c"], &["c"]),
        ];
        let filter = FacetFilter::new(["a"], ["b"]);
        assert_eq!(names(&filter.apply(&items)), vec!["only-a", "only-b", "both"]);
    }

    #[test]
    fn test_multiple_values_in_one_facet() {
        let items = vec![
            item("one", &["rust"], &[]),
            item("two", &["math"], &[]),
            item("three", &["web"], &[]),
        ];
        let filter = FacetFilter::new(["rust", "math"], Vec::<String>::new());
        assert_eq!(names(&filter.apply(&items)), vec!["one", "two"]);
    }

    #[test]
    fn test_tag_only_filter() {
        let items = vec![item("one", &["a"], &["t1"]), item("two", &["a"], &["t2"])];
        let filter = FacetFilter::new(Vec::<String>::new(), ["t2"]);
        assert_eq!(names(&filter.apply(&items)), vec!["two"]);
    }

    #[test]
    fn test_blank_slugs_ignored() {
        let filter = FacetFilter::new(["", "  "], [" rust "]);
        assert!(filter.categories.is_empty());
        assert!(filter.tags.contains("rust"));
    }
}
