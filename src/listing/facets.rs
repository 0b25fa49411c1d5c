//! Facet aggregation for sidebar display

use serde::Serialize;

use super::filter::Faceted;
use crate::content::{Facet, FacetKind};

/// A facet annotated with the number of published items referencing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub kind: FacetKind,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub post_count: usize,
}

/// Count published items per facet, most used first, then by name.
///
/// Every facet is listed, including those nobody references. Counts are
/// taken against every published item, never against a filtered subset.
pub fn aggregate<'a, F, T>(facets: F, items: &[&T]) -> Vec<FacetCount>
where
    F: IntoIterator<Item = &'a Facet>,
    T: Faceted + ?Sized,
{
    let mut counts: Vec<FacetCount> = facets
        .into_iter()
        .map(|facet| {
            let post_count = items
                .iter()
                .filter(|item| item.is_published() && references(**item, facet))
                .count();
            FacetCount {
                kind: facet.kind,
                name: facet.name.clone(),
                slug: facet.slug.clone(),
                description: facet.description.clone(),
                post_count,
            }
        })
        .collect();

    counts.sort_by(|a, b| {
        b.post_count
            .cmp(&a.post_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    counts
}

fn references<T: Faceted + ?Sized>(item: &T, facet: &Facet) -> bool {
    let slugs = match facet.kind {
        FacetKind::Category => item.category_slugs(),
        FacetKind::Tag => item.tag_slugs(),
    };
    slugs.iter().any(|s| *s == facet.slug)
}
