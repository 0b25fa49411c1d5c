//! Site-wide context shared by every page

use serde::Serialize;

use crate::config::SiteConfig;
use crate::helpers::canonical_url;

/// Site settings every page needs, plus the canonical URL of the request
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub full_name: String,
    pub email: String,
    pub language: String,
    pub canonical_url: String,
}

impl SiteContext {
    /// Build the context for a request to `path` that arrived as `absolute_uri`
    pub fn new(config: &SiteConfig, path: &str, absolute_uri: &str) -> Self {
        Self {
            title: config.title.clone(),
            tagline: config.tagline.clone(),
            description: config.description.clone(),
            full_name: config.full_name.clone(),
            email: config.email.clone(),
            language: config.language.clone(),
            canonical_url: canonical_url(config, path, absolute_uri),
        }
    }
}

/// A view together with the site context, serialized side by side
#[derive(Debug, Clone, Serialize)]
pub struct WithSite<V> {
    pub site: SiteContext,
    #[serde(flatten)]
    pub view: V,
}

impl<V: Serialize> WithSite<V> {
    pub fn new(site: SiteContext, view: V) -> Self {
        Self { site, view }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Dummy {
        active_page: &'static str,
    }

    #[test]
    fn test_context_serializes_flat() {
        let config = SiteConfig {
            title: "Notes".to_string(),
            site_url: "https://notes.dev/".to_string(),
            ..Default::default()
        };
        let site = SiteContext::new(&config, "/projects", "http://127.0.0.1:4000/projects");
        let value = serde_json::to_value(WithSite::new(site, Dummy { active_page: "projects" })).unwrap();
        assert_eq!(value["active_page"], json!("projects"));
        assert_eq!(value["site"]["title"], json!("Notes"));
        assert_eq!(value["site"]["canonical_url"], json!("https://notes.dev/projects"));
    }
}
